use std::path::PathBuf;

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_source").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn touch(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

fn names(src: &FrameSource) -> Vec<String> {
    src.paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn split_pattern_defaults_to_current_dir() {
    let (dir, parts) = split_pattern("*.txt").unwrap();
    assert_eq!(dir, PathBuf::from("."));
    assert_eq!(parts, vec!["*.txt"]);

    let (dir, parts) = split_pattern("part2/*.txt").unwrap();
    assert_eq!(dir, PathBuf::from("part2"));
    assert_eq!(parts, vec!["*.txt"]);
}

#[test]
fn split_pattern_keeps_components_after_first_wildcard() {
    let (dir, parts) = split_pattern("runs/part*/frames/map_[0-9]*.txt").unwrap();
    assert_eq!(dir, PathBuf::from("runs"));
    assert_eq!(parts, vec!["part*", "frames", "map_[0-9]*.txt"]);
}

#[test]
fn split_pattern_rejects_bad_shapes() {
    assert!(split_pattern("").is_err());
    assert!(split_pattern("part2/").is_err());
    assert!(split_pattern("part2/..").is_err());
}

#[test]
fn discovery_orders_by_file_name() {
    let dir = scratch_dir("ordering");
    touch(&dir, "frame_010.txt", "c");
    touch(&dir, "frame_001.txt", "a");
    touch(&dir, "frame_002.txt", "b");

    let pattern = format!("{}/*.txt", dir.display());
    let src = FrameSource::discover(&pattern, 1600).unwrap();
    assert_eq!(
        names(&src),
        vec!["frame_001.txt", "frame_002.txt", "frame_010.txt"]
    );
}

#[test]
fn discovery_only_selects_matching_regular_files() {
    let dir = scratch_dir("filtering");
    touch(&dir, "map_000001.txt", "x");
    touch(&dir, "map_000002.txt", "y");
    touch(&dir, "notes.md", "ignored");
    touch(&dir, ".map_hidden.txt", "ignored");
    std::fs::create_dir_all(dir.join("nested.txt")).unwrap();

    let src = FrameSource::discover(&format!("{}/map_*.txt", dir.display()), 1600).unwrap();
    assert_eq!(names(&src), vec!["map_000001.txt", "map_000002.txt"]);
}

#[test]
fn discovery_truncates_to_max_frames() {
    let dir = scratch_dir("truncation");
    for i in 0..2000 {
        touch(&dir, &format!("map_{i:06}.txt"), "");
    }
    let pattern = format!("{}/*.txt", dir.display());

    let normal = FrameSource::discover(&pattern, crate::config::MAX_FRAMES).unwrap();
    assert_eq!(normal.len(), 1600);
    assert_eq!(names(&normal)[1599], "map_001599.txt");

    let debug = FrameSource::discover(&pattern, crate::config::MAX_FRAMES_DEBUG).unwrap();
    assert_eq!(debug.len(), 10);
    assert_eq!(names(&debug)[0], "map_000000.txt");
    assert_eq!(names(&debug)[9], "map_000009.txt");
}

#[test]
fn discovery_fails_on_empty_directory() {
    let dir = scratch_dir("empty");
    let err = FrameSource::discover(&format!("{}/*.txt", dir.display()), 10).unwrap_err();
    assert!(matches!(err, AsciiGifError::Discovery(_)), "{err}");
}

#[test]
fn discovery_fails_on_missing_directory() {
    let dir = scratch_dir("missing").join("does_not_exist");
    let err = FrameSource::discover(&format!("{}/*.txt", dir.display()), 10).unwrap_err();
    assert!(matches!(err, AsciiGifError::Discovery(_)), "{err}");
}

#[test]
fn read_frame_returns_raw_text() {
    let dir = scratch_dir("read");
    touch(&dir, "f_1.txt", "##..\n#@.#\n");
    let src = FrameSource::discover(&format!("{}/*.txt", dir.display()), 10).unwrap();
    assert_eq!(src.read_frame(0).unwrap(), "##..\n#@.#\n");
    assert!(matches!(
        src.read_frame(1).unwrap_err(),
        AsciiGifError::FrameRead(_)
    ));
}

#[test]
fn read_frame_rejects_invalid_utf8() {
    let dir = scratch_dir("utf8");
    std::fs::write(dir.join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();
    let src = FrameSource::discover(&format!("{}/*.txt", dir.display()), 10).unwrap();
    assert!(matches!(
        src.read_frame(0).unwrap_err(),
        AsciiGifError::FrameRead(_)
    ));
}

#[test]
fn discovery_honours_character_classes() {
    let dir = scratch_dir("classes");
    touch(&dir, "frame_1.txt", "a");
    touch(&dir, "frame_2.txt", "b");
    touch(&dir, "frame_x.txt", "ignored");
    touch(&dir, "frame_10.txt", "ignored");

    let src = FrameSource::discover(&format!("{}/frame_[0-9].txt", dir.display()), 10).unwrap();
    assert_eq!(names(&src), vec!["frame_1.txt", "frame_2.txt"]);

    let src = FrameSource::discover(&format!("{}/frame_[!0-9].txt", dir.display()), 10).unwrap();
    assert_eq!(names(&src), vec!["frame_x.txt"]);
}

#[test]
fn discovery_expands_directory_wildcards() {
    let dir = scratch_dir("dir_wildcards");
    for sub in ["part1", "part2", "other"] {
        std::fs::create_dir_all(dir.join(sub)).unwrap();
    }
    touch(&dir.join("part2"), "map_1.txt", "b");
    touch(&dir.join("part1"), "map_2.txt", "a");
    touch(&dir.join("other"), "map_0.txt", "ignored");
    // A plain file whose name matches the directory glob is not descended into.
    touch(&dir, "part3", "ignored");

    let src = FrameSource::discover(&format!("{}/part*/*.txt", dir.display()), 10).unwrap();
    let got: Vec<PathBuf> = src
        .paths()
        .iter()
        .map(|p| p.strip_prefix(&dir).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        got,
        vec![
            PathBuf::from("part1").join("map_2.txt"),
            PathBuf::from("part2").join("map_1.txt"),
        ]
    );
}

#[test]
fn discovery_walks_literal_components_after_a_wildcard() {
    let dir = scratch_dir("literal_after_wildcard");
    std::fs::create_dir_all(dir.join("run_a").join("frames")).unwrap();
    std::fs::create_dir_all(dir.join("run_b")).unwrap();
    touch(&dir.join("run_a").join("frames"), "f.txt", "x");
    touch(&dir.join("run_b"), "f.txt", "ignored");

    let src = FrameSource::discover(&format!("{}/run_?/frames/*.txt", dir.display()), 10).unwrap();
    assert_eq!(src.len(), 1);
    assert!(src.paths()[0].ends_with("run_a/frames/f.txt"));

    let err = FrameSource::discover(&format!("{}/nope_*/frames/*.txt", dir.display()), 10)
        .unwrap_err();
    assert!(matches!(err, AsciiGifError::Discovery(_)), "{err}");
}
