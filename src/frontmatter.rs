//! Front-matter extraction.
//!
//! A document may start with a metadata block fenced by lines that consist
//! solely of `---`:
//!
//! ```text
//! ---
//! title: ホームページ制作
//! slug: homepage
//! imagePosition: top center
//! ---
//! # 見出し
//! ```
//!
//! Each `key: value` line inside the block becomes one entry. Everything after
//! the closing fence is the body. Parsing never fails: a missing or
//! unterminated block yields [`ParsedDocument::NoMetadata`] with the whole
//! input as body, so callers cannot treat bad metadata as fatal.

use std::collections::BTreeMap;

const FENCE: &str = "---";
const SEPARATOR: &str = ": ";

/// Key/value metadata from a document's leading block.
///
/// All entries are kept, recognised or not. The accessors cover the keys the
/// site builder understands; callers apply their own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: BTreeMap<String, String>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn slug(&self) -> Option<&str> {
        self.get("slug")
    }

    pub fn image_position(&self) -> Option<&str> {
        self.get("imagePosition")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Outcome of splitting a document into metadata and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDocument<'a> {
    /// A well-formed leading block was found.
    Parsed {
        front_matter: FrontMatter,
        body: &'a str,
    },
    /// No block, or an unterminated one. `body` is the full input.
    NoMetadata { body: &'a str },
}

impl<'a> ParsedDocument<'a> {
    pub fn body(&self) -> &'a str {
        match self {
            ParsedDocument::Parsed { body, .. } | ParsedDocument::NoMetadata { body } => body,
        }
    }

    /// The metadata, empty for [`ParsedDocument::NoMetadata`].
    pub fn front_matter(&self) -> FrontMatter {
        match self {
            ParsedDocument::Parsed { front_matter, .. } => front_matter.clone(),
            ParsedDocument::NoMetadata { .. } => FrontMatter::default(),
        }
    }

    pub fn into_parts(self) -> (FrontMatter, &'a str) {
        match self {
            ParsedDocument::Parsed { front_matter, body } => (front_matter, body),
            ParsedDocument::NoMetadata { body } => (FrontMatter::default(), body),
        }
    }
}

/// Split `raw` into front matter and body.
///
/// The opening fence must be the first line. The body starts right after the
/// three hyphens of the closing fence, so its line break is kept and
/// `body == raw[closing_fence_end..]`.
pub fn parse(raw: &str) -> ParsedDocument<'_> {
    let Some(block_start) = opening_fence_end(raw) else {
        return ParsedDocument::NoMetadata { body: raw };
    };

    let mut entries = BTreeMap::new();
    let mut offset = block_start;
    for line in raw[block_start..].split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content == FENCE {
            let body_start = offset + FENCE.len();
            return ParsedDocument::Parsed {
                front_matter: FrontMatter { entries },
                body: &raw[body_start..],
            };
        }
        if let Some((key, value)) = parse_entry(content) {
            // First occurrence wins
            entries
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        offset += line.len();
    }

    ParsedDocument::NoMetadata { body: raw }
}

/// Byte offset just past the opening fence line, if the document has one.
fn opening_fence_end(raw: &str) -> Option<usize> {
    let first = raw.split_inclusive('\n').next()?;
    if first.trim_end_matches(['\n', '\r']) == FENCE && first.ends_with('\n') {
        Some(first.len())
    } else {
        None
    }
}

fn parse_entry(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(SEPARATOR)?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
