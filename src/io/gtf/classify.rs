use once_cell::sync::Lazy;
use regex_lite::Regex;

static FEATURE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[^#\s>]").expect("valid regex"));
static HASH_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(#+)(.*)$").expect("valid regex"));
static FASTA_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*>").expect("valid regex"));
static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*$").expect("valid regex"));

/// Shape of one raw input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Feature,
    /// Exactly two leading `#`.
    Directive,
    /// Exactly three leading `#`.
    SyncMarker,
    /// Exactly one leading `#`; holds the text after it, left-trimmed.
    Comment(&'a str),
    /// `>` header starting an implicit FASTA section.
    FastaHeader,
    Blank,
    Malformed,
}

pub fn classify(line: &str) -> LineClass<'_> {
    if FEATURE_LINE.is_match(line) {
        return LineClass::Feature;
    }

    if let Some(captures) = HASH_LINE.captures(line) {
        let n_hashes = captures
            .get(1)
            .map(|m| m.len())
            .unwrap_or_default();
        return match n_hashes {
            1 => {
                let contents = captures
                    .get(2)
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                LineClass::Comment(contents.trim_start())
            },
            2 => LineClass::Directive,
            3 => LineClass::SyncMarker,
            _ => LineClass::Malformed,
        };
    }

    if FASTA_HEADER.is_match(line) {
        LineClass::FastaHeader
    }
    else if BLANK_LINE.is_match(line) {
        LineClass::Blank
    }
    else {
        LineClass::Malformed
    }
}
