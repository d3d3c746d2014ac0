#[derive(Debug, PartialEq)]
enum Token {
    Literal(char),
    AnyOne,
    AnyRun,
    Class { negated: bool, ranges: Vec<(char, char)> },
}

impl Token {
    fn matches(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::AnyOne => true,
            Token::AnyRun => false,
            Token::Class { negated, ranges } => {
                ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi) != *negated
            }
        }
    }
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let p: Vec<char> = pattern.chars().collect();
    let mut out = Vec::with_capacity(p.len());
    let mut i = 0;
    while i < p.len() {
        match p[i] {
            '*' => out.push(Token::AnyRun),
            '?' => out.push(Token::AnyOne),
            '[' => match parse_class(&p, i + 1) {
                Some((tok, end)) => {
                    out.push(tok);
                    i = end;
                }
                // Unclosed bracket is a literal `[`.
                None => out.push(Token::Literal('[')),
            },
            c => out.push(Token::Literal(c)),
        }
        i += 1;
    }
    out
}

/// Parse a class body starting after `[`. Returns the token and the index of the closing `]`.
fn parse_class(p: &[char], start: usize) -> Option<(Token, usize)> {
    let mut j = start;
    let negated = p.get(j) == Some(&'!');
    if negated {
        j += 1;
    }
    let body_start = j;
    let mut ranges = Vec::new();
    loop {
        let c = *p.get(j)?;
        // `]` right after the opening (or `!`) is a member, not the terminator.
        if c == ']' && j > body_start {
            return Some((Token::Class { negated, ranges }, j));
        }
        if p.get(j + 1) == Some(&'-') && p.get(j + 2).is_some_and(|&hi| hi != ']') {
            ranges.push((c, p[j + 2]));
            j += 3;
        } else {
            ranges.push((c, c));
            j += 1;
        }
    }
}

/// Match one path component against a shell-style glob.
///
/// `*` matches any run (possibly empty), `?` exactly one character, and `[...]` one character
/// from a set: `[abc]`, ranges like `[0-9]`, negation with `[!x]`. A `]` directly after the
/// opening bracket is part of the set. Every other character matches itself.
///
/// Hidden names (leading `.`) only match patterns that also start with `.`.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    if name.starts_with('.') && !pattern.starts_with('.') {
        return false;
    }

    let p = tokenize(pattern);
    let n: Vec<char> = name.chars().collect();

    let (mut pi, mut ni) = (0usize, 0usize);
    // Position of the last `*` and the name index it was tried against.
    let mut backtrack: Option<(usize, usize)> = None;

    while ni < n.len() {
        match p.get(pi) {
            Some(Token::AnyRun) => {
                backtrack = Some((pi, ni));
                pi += 1;
            }
            Some(tok) if tok.matches(n[ni]) => {
                pi += 1;
                ni += 1;
            }
            _ => match backtrack {
                Some((star_pi, star_ni)) => {
                    pi = star_pi + 1;
                    ni = star_ni + 1;
                    backtrack = Some((star_pi, star_ni + 1));
                }
                None => return false,
            },
        }
    }

    p[pi..].iter().all(|t| *t == Token::AnyRun)
}

/// `true` if `s` contains a glob metacharacter.
pub(crate) fn has_wildcard(s: &str) -> bool {
    s.contains(['*', '?', '['])
}
