use std::path::Path;

use anyhow::Context as _;

/// Optional settings file, read from the working directory.
const CONFIG_FILE: &str = "asciigif.json";

/// Debug mode when no settings file is present.
const DEBUG: bool = false;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let config_path = Path::new(CONFIG_FILE);
    let cfg = if config_path.is_file() {
        asciigif::PipelineConfig::from_json_path(config_path)
            .with_context(|| format!("load '{}'", config_path.display()))?
    } else {
        asciigif::PipelineConfig::new(DEBUG)
    };

    let stats = asciigif::render_to_gif(&cfg)
        .with_context(|| format!("render '{}'", cfg.pattern))?;

    eprintln!(
        "wrote {} ({} frames + {} hold)",
        cfg.out_path.display(),
        stats.frames_source,
        stats.frames_hold
    );
    Ok(())
}
