//! Column and attribute tokenization for single GTF lines.
//!
//! Nothing here keeps state between calls; the builder owns everything that
//! spans lines.

use std::fmt::Write;
use std::str::FromStr;

use anyhow::{
    anyhow,
    bail,
    Context,
};
use arcstr::ArcStr;

use crate::data_structs::typedef::{
    Attributes,
    PosType,
};
use crate::data_structs::{
    Directive,
    DirectiveDetails,
    FeatureLine,
    Strand,
};

const N_COLUMNS: usize = 9;
const ESCAPED_CHARS: [char; 6] = ['%', ';', '"', '\t', '\n', '\r'];

/// Parses one tab-separated feature line. A `.` column is treated as absent.
pub fn parse_feature(line: &str) -> anyhow::Result<FeatureLine> {
    let line = line
        .trim_start()
        .trim_end_matches(['\r', '\n']);
    let fields = line
        .splitn(N_COLUMNS, '\t')
        .collect::<Vec<_>>();
    if fields.len() < N_COLUMNS {
        bail!(
            "expected {} tab-separated columns, found {}",
            N_COLUMNS,
            fields.len()
        )
    }

    let start = column(fields[3])
        .map(PosType::from_str)
        .transpose()
        .with_context(|| format!("invalid start '{}'", fields[3]))?;
    let end = column(fields[4])
        .map(PosType::from_str)
        .transpose()
        .with_context(|| format!("invalid end '{}'", fields[4]))?;
    let score = column(fields[5])
        .map(f64::from_str)
        .transpose()
        .with_context(|| format!("invalid score '{}'", fields[5]))?;
    let strand = column(fields[6])
        .map(Strand::from_str)
        .transpose()?;
    let phase = column(fields[7])
        .map(|s| {
            match s.parse::<u8>() {
                Ok(p) if p <= 2 => Ok(p),
                _ => Err(anyhow!("invalid phase '{}'", s)),
            }
        })
        .transpose()?;
    let attributes = parse_attributes(fields[8])?;

    Ok(FeatureLine {
        seq_id: column(fields[0]).map(unescape).map(ArcStr::from),
        source: column(fields[1]).map(unescape).map(ArcStr::from),
        feature_type: column(fields[2]).map(unescape).map(ArcStr::from),
        start,
        end,
        score,
        strand,
        phase,
        attributes,
        ..Default::default()
    })
}

fn column(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() || s == "." {
        None
    }
    else {
        Some(s)
    }
}

/// Parses the ninth column.
///
/// Accepts GTF pairs (`gene_id "G1"; tag basic;`) and, for explicit linkage
/// attributes, GFF3 pairs (`Parent=T1,T2`). Repeated keys accumulate values.
pub fn parse_attributes(s: &str) -> anyhow::Result<Attributes> {
    let mut attributes = Attributes::new();
    let s = s.trim();
    if s.is_empty() || s == "." {
        return Ok(attributes);
    }

    for segment in split_outside_quotes(s, ';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (key, values) = match gff3_pair(segment) {
            Some((key, raw)) => {
                let values = split_outside_quotes(raw, ',')
                    .into_iter()
                    .map(|v| unescape(unquote(v.trim())))
                    .filter(|v| !v.is_empty())
                    .collect::<Vec<_>>();
                (key, values)
            },
            None => {
                let (key, rest) = segment
                    .split_once(char::is_whitespace)
                    .unwrap_or((segment, ""));
                (key, gtf_values(rest)?)
            },
        };

        if key.starts_with('"') {
            bail!("attribute name missing before '{}'", segment)
        }
        attributes
            .entry(key.to_string())
            .or_default()
            .extend(values);
    }
    Ok(attributes)
}

/// `key=value` where the key is a bare word.
fn gff3_pair(segment: &str) -> Option<(&str, &str)> {
    let (key, value) = segment.split_once('=')?;
    if key.is_empty() || key.contains(char::is_whitespace) || key.contains('"') {
        return None;
    }
    Some((key, value))
}

fn gtf_values(rest: &str) -> anyhow::Result<Vec<String>> {
    let mut values = Vec::new();
    let mut rest = rest.trim_start();
    while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix('"') {
            let close = quoted
                .find('"')
                .ok_or_else(|| anyhow!("unterminated quote in '{}'", rest))?;
            values.push(unescape(&quoted[..close]));
            rest = quoted[close + 1..].trim_start();
        }
        else {
            let end = rest
                .find(char::is_whitespace)
                .unwrap_or(rest.len());
            values.push(unescape(&rest[..end]));
            rest = rest[end..].trim_start();
        }
    }
    Ok(values)
}

fn split_outside_quotes(
    s: &str,
    separator: char,
) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut last = 0;
    for (idx, c) in s.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        }
        else if c == separator && !in_quotes {
            parts.push(&s[last..idx]);
            last = idx + c.len_utf8();
        }
    }
    parts.push(&s[last..]);
    parts
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

/// Decodes `%XX` escapes. Malformed escapes are kept verbatim.
pub fn unescape(s: &str) -> String {
    if !s.contains('%') {
        return s.to_string();
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if ESCAPED_CHARS.contains(&c) {
            // Infallible for String
            let _ = write!(out, "%{:02X}", c as u32);
        }
        else {
            out.push(c);
        }
    }
    out
}

/// Formats the tokenized part of a line (containers are not written).
pub fn format_feature(line: &FeatureLine) -> String {
    fn or_dot<T: ToString>(value: Option<T>) -> String {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| ".".to_string())
    }

    let mut out = String::with_capacity(128);
    let columns = [
        or_dot(line.seq_id.as_deref().map(escape)),
        or_dot(line.source.as_deref().map(escape)),
        or_dot(line.feature_type.as_deref().map(escape)),
        or_dot(line.start),
        or_dot(line.end),
        or_dot(line.score),
        or_dot(line.strand),
        or_dot(line.phase),
    ];
    for column in columns.iter() {
        out.push_str(column);
        out.push('\t');
    }
    out.push_str(&format_attributes(&line.attributes));
    out
}

pub fn format_attributes(attributes: &Attributes) -> String {
    if attributes.is_empty() {
        return ".".to_string();
    }
    let mut pairs = Vec::with_capacity(attributes.len());
    for (key, values) in attributes.iter() {
        if values.is_empty() {
            pairs.push(format!("{};", key));
        }
        for value in values {
            pairs.push(format!("{} \"{}\";", key, escape(value)));
        }
    }
    pairs.join(" ")
}

/// Parses a `##` line. Unknown directives keep their raw value.
pub fn parse_directive(line: &str) -> Directive {
    let body = line
        .trim()
        .trim_start_matches('#')
        .trim();
    let (name, value) = match body.split_once(char::is_whitespace) {
        Some((name, value)) => (name, Some(value.trim())),
        None => (body, None),
    };
    let value = value.filter(|v| !v.is_empty());

    let details = value.and_then(|value| {
        let fields = value
            .split_whitespace()
            .collect::<Vec<_>>();
        match (name, fields.as_slice()) {
            ("sequence-region", [seq_id, start, end]) => {
                Some(DirectiveDetails::SequenceRegion {
                    seq_id: unescape(seq_id),
                    start:  start.parse().ok()?,
                    end:    end.parse().ok()?,
                })
            },
            ("genome-build", [source, build_name]) => {
                Some(DirectiveDetails::GenomeBuild {
                    source:     unescape(source),
                    build_name: unescape(build_name),
                })
            },
            _ => None,
        }
    });

    Directive {
        directive: name.to_string(),
        value: value.map(str::to_string),
        details,
    }
}

/// Splits a FASTA header line into its id and optional description.
pub fn parse_fasta_header(line: &str) -> (String, Option<String>) {
    let header = line
        .trim()
        .trim_start_matches('>');
    match header.split_once(char::is_whitespace) {
        Some((id, description)) => {
            let description = description.trim();
            (
                id.to_string(),
                (!description.is_empty()).then(|| description.to_string()),
            )
        },
        None => (header.to_string(), None),
    }
}
