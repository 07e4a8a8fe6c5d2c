use serde_yaml::{Mapping, Value as YamlValue};
use thiserror::Error;

/// A document split into its YAML frontmatter block and markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// Raw YAML between the `---` fences, if the document has a block.
    pub yaml: Option<&'a str>,
    /// Markdown content after the closing fence.
    pub body: &'a str,
    /// Byte offset inside the original document where `body` begins.
    pub body_start: usize,
}

impl<'a> FrontmatterSplit<'a> {
    /// Parses the YAML block into a mapping; an absent or empty block yields an empty mapping.
    pub fn parse(&self) -> Result<Mapping, FrontmatterError> {
        match self.yaml {
            Some(block) => parse_mapping(block),
            None => Ok(Mapping::new()),
        }
    }
}

/// Errors emitted while splitting or parsing frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Unclosed YAML fence (e.g., missing terminating `---`).
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Splits a markdown document into frontmatter and body without parsing the YAML.
///
/// Leading blank lines and a UTF-8 BOM are skipped before looking for the
/// opening fence. A document whose first content line is not `---` has no
/// frontmatter and its whole text is the body.
pub fn split_frontmatter(input: &str) -> Result<FrontmatterSplit<'_>, FrontmatterError> {
    let bom_len = if input.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };

    let mut lines = LineCursor::new(input, bom_len);
    let opening = loop {
        match lines.next() {
            Some((line, _, _)) if line.trim().is_empty() => continue,
            Some((line, _, end)) if is_fence(line) => break end,
            _ => return Ok(no_frontmatter(input)),
        }
    };

    for (line, start, end) in lines {
        if is_fence(line) {
            let yaml = input[opening..start].trim_end_matches(['\r', '\n']);
            return Ok(FrontmatterSplit {
                yaml: Some(yaml),
                body: &input[end..],
                body_start: end,
            });
        }
    }

    Err(FrontmatterError::Unterminated)
}

fn no_frontmatter(input: &str) -> FrontmatterSplit<'_> {
    FrontmatterSplit {
        yaml: None,
        body: input,
        body_start: 0,
    }
}

fn parse_mapping(block: &str) -> Result<Mapping, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let value: YamlValue =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    match value {
        YamlValue::Null => Ok(Mapping::new()),
        YamlValue::Mapping(mapping) => Ok(mapping),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches('\r') == "---"
}

/// Iterates lines as `(text, start, next_line_start)` byte ranges.
struct LineCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(input: &'a str, pos: usize) -> Self {
        Self { input, pos }
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = (&'a str, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.input[start..];
        let (line, end) = match rest.find('\n') {
            Some(idx) => (&rest[..idx], start + idx + 1),
            None => (rest, self.input.len()),
        };
        self.pos = end;
        Some((line, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> FrontmatterSplit<'_> {
        split_frontmatter(input).expect("frontmatter split should succeed")
    }

    #[test]
    fn document_without_frontmatter_is_all_body() {
        let result = split("# Title\nBody");
        assert_eq!(result.yaml, None);
        assert_eq!(result.body, "# Title\nBody");
        assert!(result.parse().unwrap().is_empty());
    }

    #[test]
    fn splits_basic_yaml() {
        let input = "---\ntitle: Example\ntags:\n  - rust\n  - astro\n---\n# Content";
        let result = split(input);
        assert_eq!(result.body, "# Content");
        assert_eq!(result.body_start, input.find("# Content").unwrap());

        let mapping = result.parse().unwrap();
        assert_eq!(
            mapping.get("title").and_then(YamlValue::as_str),
            Some("Example")
        );
    }

    #[test]
    fn empty_block_parses_to_empty_mapping() {
        let input = "---\n---\n# Body";
        let result = split(input);
        assert_eq!(result.yaml, Some(""));
        assert!(result.parse().unwrap().is_empty());
        assert_eq!(result.body, "# Body");
    }

    #[test]
    fn skips_bom_and_leading_blank_lines() {
        let input = "\u{feff}\n   \n---\nfoo: bar\n---\nBody";
        let result = split(input);
        assert_eq!(result.yaml, Some("foo: bar"));
        assert_eq!(result.body_start, input.find("Body").unwrap());
    }

    #[test]
    fn crlf_fences_are_recognized() {
        let result = split("---\r\ntitle: x\r\n---\r\nBody");
        assert_eq!(result.yaml, Some("title: x"));
        assert_eq!(result.body, "Body");
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let result = split("---\ninvalid: [unterminated\n---\n");
        let err = result.parse().unwrap_err();
        assert!(matches!(err, FrontmatterError::Parse(_)), "{err:?}");
    }

    #[test]
    fn errors_on_non_mapping_root() {
        let err = split("---\n- a\n- b\n---\n").parse().unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidRootType));
    }

    #[test]
    fn errors_on_unterminated_block() {
        let err = split_frontmatter("---\ntitle: test").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated));
    }
}
