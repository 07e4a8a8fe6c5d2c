use std::collections::HashMap;
use std::path::{Component, Path};

/// Github-slugger compatible slug of `text`, without uniqueness tracking.
///
/// Lowercases, keeps letters, digits, combining marks, `-` and `_`, turns
/// each space into `-` and drops everything else. Hyphen runs are neither
/// collapsed nor trimmed.
///
/// ```
/// use blogmark_core::slug::slug;
///
/// assert_eq!(slug("Hello, World!"), "hello-world");
/// assert_eq!(slug("多言語 ガイド"), "多言語-ガイド");
/// ```
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ' ' => out.push('-'),
            '-' | '_' => out.push(ch),
            c if c.is_ascii_alphanumeric() => out.push(c.to_ascii_lowercase()),
            c if !c.is_ascii() && (c.is_alphanumeric() || is_combining_mark(c)) => {
                out.extend(c.to_lowercase());
            }
            _ => {}
        }
    }
    out
}

/// Stateful slugger that suffixes repeated slugs with `-1`, `-2`, ...
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next unique slug for the given heading text.
    ///
    /// Text that slugs to nothing falls back to `heading`.
    pub fn next_slug(&mut self, text: &str) -> String {
        let mut base = slug(text);
        if base.is_empty() {
            base.push_str("heading");
        }

        let count = self.seen.entry(base.clone()).or_insert(0);
        let unique = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        unique
    }
}

/// Collection id for a content file: its path relative to the collection
/// root, extension removed, each segment slugged, joined by `/`.
///
/// ```
/// use std::path::Path;
/// use blogmark_core::slug::entry_id;
///
/// assert_eq!(entry_id(Path::new("2024/My First Post.md")), "2024/my-first-post");
/// ```
pub fn entry_id(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let segments: Vec<String> = without_ext
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(slug(&part.to_string_lossy())),
            _ => None,
        })
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.join("/")
}

/// Unicode combining marks kept in slugs (diacritics, viramas, nuktas and
/// similar), so scripts such as Devanagari or Thai slug correctly.
fn is_combining_mark(ch: char) -> bool {
    const MARKS: &[(u32, u32)] = &[
        (0x0300, 0x036F),
        (0x0591, 0x05BD),
        (0x05BF, 0x05C7),
        (0x0610, 0x061A),
        (0x064B, 0x065F),
        (0x0670, 0x0670),
        (0x0900, 0x0903),
        (0x093A, 0x094F),
        (0x0951, 0x0957),
        (0x0962, 0x0963),
        (0x0980, 0x0983),
        (0x09BC, 0x09CD),
        (0x0A01, 0x0A4D),
        (0x0A81, 0x0ACD),
        (0x0B01, 0x0BCD),
        (0x0E31, 0x0E3A),
        (0x0E47, 0x0E4E),
        (0x1AB0, 0x1AFF),
        (0x1DC0, 0x1DFF),
        (0x302A, 0x302F),
        (0x3099, 0x309A),
        (0xFE20, 0xFE2F),
    ];

    let cp = ch as u32;
    MARKS.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_basic() {
        assert_eq!(slug("Hello World"), "hello-world");
    }

    #[test]
    fn punctuation_dropped_hyphens_kept() {
        assert_eq!(slug("v1.2: what's new?"), "v12-whats-new");
        assert_eq!(slug("  a---b  "), "--a---b--");
    }

    #[test]
    fn combining_marks_survive() {
        assert_eq!(slug("क़िला"), "क़िला");
        assert_eq!(slug("Café"), "café");
    }

    #[test]
    fn slugger_deduplicates() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("Title"), "title");
        assert_eq!(slugger.next_slug("Title"), "title-1");
        assert_eq!(slugger.next_slug("title"), "title-2");
        assert_eq!(slugger.next_slug("!!!"), "heading");
    }

    #[test]
    fn entry_ids_follow_relative_paths() {
        assert_eq!(entry_id(Path::new("hello-world.md")), "hello-world");
        assert_eq!(entry_id(Path::new("Notes/Rust Tips.mdx")), "notes/rust-tips");
    }
}
