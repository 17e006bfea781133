//! Parsing of an edited snapshot into the desired tag state

use crate::discover::path::{expand_home, normalize_path};
use crate::error::TagError;
use crate::store::validate_tag;
use crate::tokenizer::{split_by_space, unescape};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Desired tags per path, in document order of each path's first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredState {
    entries: Vec<(PathBuf, BTreeSet<String>)>,
    positions: HashMap<PathBuf, usize>,
}

impl DesiredState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the desired tags of `path`. Returns true when an earlier entry was replaced.
    pub fn insert(&mut self, path: PathBuf, tags: BTreeSet<String>) -> bool {
        match self.positions.get(&path) {
            Some(&idx) => {
                self.entries[idx].1 = tags;
                true
            }
            None => {
                self.positions.insert(path.clone(), self.entries.len());
                self.entries.push((path, tags));
                false
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<&BTreeSet<String>> {
        self.positions.get(path).map(|&idx| &self.entries[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &BTreeSet<String>)> {
        self.entries.iter().map(|(p, t)| (p.as_path(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Desired state plus the lines that could not be used.
#[derive(Debug, Default)]
pub struct ParsedDocument {
    pub desired: DesiredState,
    pub malformed: Vec<TagError>,
}

/// Blank lines and lines whose first non-space character is `#` carry no data.
pub fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Strip one optional leading `#`, then one optional leading `@`.
pub fn strip_tag_prefix(token: &str) -> &str {
    let token = token.strip_prefix('#').unwrap_or(token);
    token.strip_prefix('@').unwrap_or(token)
}

/// Turn the first field of a data line into an absolute, normalized path.
pub fn parse_path(token: &str, home: &Path) -> Result<PathBuf, String> {
    let unescaped = unescape(token);
    if unescaped.is_empty() {
        return Err("empty path".to_string());
    }
    let expanded = expand_home(&unescaped, home);
    if !expanded.is_absolute() {
        return Err(format!("{:?} is not an absolute path", unescaped));
    }
    Ok(normalize_path(&expanded))
}

/// Parse an edited document. Bad lines are reported and skipped; the rest still count.
pub fn parse_document(document: &str, home: &Path) -> ParsedDocument {
    let mut parsed = ParsedDocument::default();

    for (idx, raw) in document.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if is_comment(line) {
            continue;
        }
        let line_number = idx + 1;
        let malformed = |reason: String| TagError::MalformedLine {
            line_number,
            line: line.to_string(),
            reason,
        };

        let tokens = split_by_space(line);
        let Some((path_token, tag_tokens)) = tokens.split_first() else {
            parsed.malformed.push(malformed("no path".to_string()));
            continue;
        };

        let path = match parse_path(path_token, home) {
            Ok(path) => path,
            Err(reason) => {
                warn!(line_number, %reason, "Skipping malformed line");
                parsed.malformed.push(malformed(reason));
                continue;
            }
        };

        let mut tags = BTreeSet::new();
        for token in tag_tokens {
            let tag = strip_tag_prefix(token);
            if tag.is_empty() {
                continue;
            }
            if validate_tag(tag).is_err() {
                warn!(line_number, tag, "Ignoring invalid tag");
                parsed
                    .malformed
                    .push(malformed(format!("invalid tag {:?}", tag)));
                continue;
            }
            tags.insert(tag.to_string());
        }

        if parsed.desired.insert(path.clone(), tags) {
            warn!(line_number, path = %path.display(), "Path listed more than once, later line wins");
        }
    }

    parsed
}
