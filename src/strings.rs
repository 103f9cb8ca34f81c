//! Text utilities shared by the driver and the emitters: Logo word quoting,
//! number formatting, line prefixing and comment wrapping.

use regex::Regex;
use std::sync::OnceLock;

/// Quotes text as a Logo word literal: `"` followed by the text with
/// Logo's delimiter characters backslash-escaped.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' | ';' | ' ' | '|' | '~' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Quotes every line separately and joins them with a line continuation.
pub fn multiline_quote(text: &str) -> String {
    text.split('\n').map(quote).collect::<Vec<_>>().join("\\\n")
}

/// Reverses [`quote`]: drops the leading quote and resolves backslash
/// escapes the way a Logo reader does.
pub fn unquote(word: &str) -> String {
    let body = word.strip_prefix('"').unwrap_or(word);
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// True for a bare decimal literal such as `3`, `-2` or ` 4.5 `.
pub fn is_number(text: &str) -> bool {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE
        .get_or_init(|| Regex::new(r"^\s*-?\d+(\.\d+)?\s*$").expect("valid number pattern"))
        .is_match(text)
}

/// Formats a number the way the host renders numeric field values.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 1e21 || v.abs() < 1e-6 {
        // Exponent form past the host's thresholds, with an explicit `+`.
        let exp = format!("{:e}", v);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        }
    } else {
        format!("{}", v)
    }
}

pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Prepends `prefix` to every line of `text`, leaving a trailing newline
/// unprefixed.
pub fn prefix_lines(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len() + prefix.len());
    out.push_str(prefix);
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        out.push_str(&rest[..=pos]);
        rest = &rest[pos + 1..];
        if !rest.is_empty() {
            out.push_str(prefix);
        }
    }
    out.push_str(rest);
    out
}

/// Greedy word wrap. Existing line breaks are kept; words longer than the
/// limit sit on a line of their own.
pub fn wrap(text: &str, limit: usize) -> String {
    text.split('\n')
        .map(|paragraph| wrap_line(paragraph, limit))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, limit: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= limit {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    lines.push(current);
    lines.join("\n")
}
