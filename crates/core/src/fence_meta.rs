//! Tokenizer for the meta string of a fenced code block.
//!
//! The meta string is everything after the language on the opening fence
//! line, e.g. `title="main.rs" {2,4-6} showLineNumbers`.

use std::ops::RangeInclusive;

/// One whitespace-separated token of a meta string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaToken {
    /// `key="value"`, `key='value'` or `key=value`.
    Pair {
        /// Attribute name.
        key: String,
        /// Unquoted value.
        value: String,
    },
    /// `{1,3-5}` line range list, braces stripped.
    Ranges(String),
    /// A bare word.
    Flag(String),
}

/// Parsed meta string of one fenced block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceMeta {
    /// Tokens in source order.
    pub tokens: Vec<MetaToken>,
}

impl FenceMeta {
    /// Tokenizes a raw meta string. Quoted values may contain whitespace; an
    /// unterminated quote runs to the end of the string.
    pub fn parse(raw: &str) -> Self {
        let mut tokens = Vec::new();
        let mut chars = raw.char_indices().peekable();

        while let Some(&(start, ch)) = chars.peek() {
            if ch.is_whitespace() {
                chars.next();
                continue;
            }

            if ch == '{' {
                let mut body = String::new();
                chars.next();
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    body.push(c);
                }
                tokens.push(MetaToken::Ranges(body));
                continue;
            }

            let mut key_end = raw.len();
            let mut has_value = false;
            while let Some(&(idx, c)) = chars.peek() {
                if c.is_whitespace() {
                    key_end = idx;
                    break;
                }
                chars.next();
                if c == '=' {
                    key_end = idx;
                    has_value = true;
                    break;
                }
            }
            let key = raw[start..key_end].to_string();

            if !has_value {
                tokens.push(MetaToken::Flag(key));
                continue;
            }

            let value = match chars.peek() {
                Some(&(_, quote @ ('"' | '\''))) => {
                    chars.next();
                    let mut value = String::new();
                    for (_, c) in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        value.push(c);
                    }
                    value
                }
                _ => {
                    let mut value = String::new();
                    while let Some(&(_, c)) = chars.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        value.push(c);
                        chars.next();
                    }
                    value
                }
            };
            tokens.push(MetaToken::Pair { key, value });
        }

        Self { tokens }
    }

    /// Value of the first `key=...` pair.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens.iter().find_map(|token| match token {
            MetaToken::Pair { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Whether a bare flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, MetaToken::Flag(f) if f == flag))
    }

    /// Line ranges named by every `{...}` token, in source order.
    pub fn line_ranges(&self) -> Vec<RangeInclusive<usize>> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                MetaToken::Ranges(body) => Some(parse_line_ranges(body)),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

/// Parses `1,3-5` into `[1..=1, 3..=5]`. Malformed parts and zero are
/// skipped; reversed ranges are read in ascending order.
/// Ranges are kept as bounds and never expanded.
pub fn parse_line_ranges(spec: &str) -> Vec<RangeInclusive<usize>> {
    let mut ranges = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((a, b)) => {
                let (Ok(a), Ok(b)) = (a.trim().parse::<usize>(), b.trim().parse::<usize>()) else {
                    continue;
                };
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let lo = lo.max(1);
                if lo <= hi {
                    ranges.push(lo..=hi);
                }
            }
            None => {
                if let Ok(n) = part.parse::<usize>()
                    && n > 0
                {
                    ranges.push(n..=n);
                }
            }
        }
    }
    ranges
}

/// Whether 1-based line `number` falls in any of `ranges`.
pub fn ranges_contain(ranges: &[RangeInclusive<usize>], number: usize) -> bool {
    ranges.iter().any(|range| range.contains(&number))
}
