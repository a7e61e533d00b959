//! Index document parsing and rendering
//!
//! The document is split textually rather than round-tripped through a YAML
//! tree: header lines and entries this run does not touch are written back
//! exactly as they were read, comments and line endings included.

use crate::entry::IndexEntry;
use crate::error::{IndexError, IndexResult};

/// The full plugin index: free-text header plus ordered entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexDocument {
    /// Header lines with their terminators
    header: Vec<String>,
    entries: Vec<DocumentEntry>,
    /// Comment and blank lines after the last entry
    trailer: String,
    line_ending: LineEnding,
}

/// One entry of an [`IndexDocument`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    id: String,
    /// Column-zero comments and blank lines directly above the entry
    leading: String,
    body: EntryBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EntryBody {
    /// Original text block, re-emitted unchanged
    Verbatim { text: String, line: usize },
    /// Entry written by this process
    Rendered(IndexEntry),
}

/// Line terminator used for text this process writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// The terminator of the first line of `text`
    fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(end) if text[..end].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    fn apply(self, text: &str) -> String {
        match self {
            LineEnding::Lf => text.to_string(),
            LineEnding::CrLf => text.replace('\n', "\r\n"),
        }
    }
}

/// What [`IndexDocument::upsert`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Replaced,
    Appended,
}

impl DocumentEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether this entry still holds the text it was parsed from
    pub(crate) fn is_verbatim(&self) -> bool {
        matches!(self.body, EntryBody::Verbatim { .. })
    }

    /// Typed view of the entry
    pub fn to_entry(&self) -> IndexResult<IndexEntry> {
        match &self.body {
            EntryBody::Rendered(entry) => Ok(entry.clone()),
            EntryBody::Verbatim { text, line } => {
                let mut items: Vec<IndexEntry> =
                    serde_yaml::from_str(text).map_err(|e| IndexError::Parse {
                        line: *line,
                        message: e.to_string(),
                    })?;
                items.pop().ok_or_else(|| IndexError::Parse {
                    line: *line,
                    message: "empty entry".to_string(),
                })
            }
        }
    }
}

struct RawBlock {
    line: usize,
    leading: String,
    text: String,
}

impl IndexDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split index text into header lines and entry blocks.
    ///
    /// An entry block starts at a column-zero `- ` line and runs until the
    /// next one. Column-zero comments and blank lines between two blocks
    /// belong to the block below them. Each block must be a YAML sequence
    /// item with a string `id`.
    pub fn parse(text: &str) -> IndexResult<Self> {
        let mut header = Vec::new();
        let mut blocks: Vec<RawBlock> = Vec::new();
        let mut pending = String::new();

        for (idx, raw) in text.split_inclusive('\n').enumerate() {
            let line = strip_terminator(raw);

            if is_item_start(line) {
                blocks.push(RawBlock {
                    line: idx + 1,
                    leading: std::mem::take(&mut pending),
                    text: raw.to_string(),
                });
                continue;
            }

            let Some(block) = blocks.last_mut() else {
                if line.trim() != "[]" {
                    header.push(raw.to_string());
                }
                continue;
            };

            if is_separator(line) {
                pending.push_str(raw);
            } else {
                block.text.push_str(&pending);
                pending.clear();
                block.text.push_str(raw);
            }
        }

        let entries = blocks
            .into_iter()
            .map(|block| {
                let id = block_id(&block.text, block.line)?;
                Ok(DocumentEntry {
                    id,
                    leading: block.leading,
                    body: EntryBody::Verbatim {
                        text: block.text,
                        line: block.line,
                    },
                })
            })
            .collect::<IndexResult<Vec<_>>>()?;

        Ok(Self {
            header,
            entries,
            trailer: pending,
            line_ending: LineEnding::detect(text),
        })
    }

    /// Render the document back to text.
    pub fn render(&self) -> IndexResult<String> {
        let newline = self.line_ending.as_str();
        let mut out: String = self.header.concat();

        if self.entries.is_empty() {
            terminate(&mut out, newline);
            out.push_str("[]");
            out.push_str(newline);
            return Ok(out);
        }

        for entry in &self.entries {
            out.push_str(&entry.leading);
            match &entry.body {
                EntryBody::Verbatim { text, .. } => out.push_str(text),
                EntryBody::Rendered(index_entry) => {
                    let yaml = index_entry
                        .to_yaml_item()
                        .map_err(|e| IndexError::Serialize(e.to_string()))?;
                    terminate(&mut out, newline);
                    out.push_str(&self.line_ending.apply(&yaml));
                }
            }
        }
        out.push_str(&self.trailer);

        Ok(out)
    }

    /// Header lines without their terminators
    pub fn header(&self) -> impl Iterator<Item = &str> {
        self.header.iter().map(|line| strip_terminator(line))
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(DocumentEntry::id)
    }

    pub fn get(&self, id: &str) -> Option<&DocumentEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Published version of `id`, if the entry exists and carries one
    pub fn version_of(&self, id: &str) -> Option<String> {
        let entry = self.get(id)?;
        match &entry.body {
            EntryBody::Rendered(index_entry) => Some(index_entry.version.clone()),
            EntryBody::Verbatim { text, .. } => block_field(text, "version"),
        }
    }

    /// Replace the entry with the same id in place, or append it.
    ///
    /// The replacement is whole: no field of the old entry survives. Later
    /// entries repeating the id are removed.
    pub fn upsert(&mut self, entry: IndexEntry) -> Upsert {
        let id = entry.id.clone();
        let Some(position) = self.entries.iter().position(|e| e.id == id) else {
            self.entries.push(DocumentEntry {
                id,
                leading: String::new(),
                body: EntryBody::Rendered(entry),
            });
            return Upsert::Appended;
        };

        self.entries[position].body = EntryBody::Rendered(entry);

        let before = self.entries.len();
        let mut seen = 0usize;
        self.entries.retain(|e| {
            if e.id != id {
                return true;
            }
            seen += 1;
            seen == 1
        });
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::warn!(id = %id, dropped, "removed duplicate index entries");
        }

        Upsert::Replaced
    }
}

fn is_item_start(line: &str) -> bool {
    line == "-" || line.starts_with("- ")
}

/// Blank or column-zero comment line between entries
fn is_separator(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

fn strip_terminator(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}

/// End `out` with a line terminator unless it is empty or already ends one
fn terminate(out: &mut String, newline: &str) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str(newline);
    }
}

fn parse_block(text: &str, line: usize) -> IndexResult<serde_yaml::Mapping> {
    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| IndexError::Parse {
        line,
        message: e.to_string(),
    })?;

    match value {
        serde_yaml::Value::Sequence(mut items) if items.len() == 1 => match items.pop() {
            Some(serde_yaml::Value::Mapping(map)) => Ok(map),
            _ => Err(IndexError::Parse {
                line,
                message: "entry is not a mapping".to_string(),
            }),
        },
        _ => Err(IndexError::Parse {
            line,
            message: "expected a single sequence item".to_string(),
        }),
    }
}

fn block_id(text: &str, line: usize) -> IndexResult<String> {
    let map = parse_block(text, line)?;
    match map.get("id") {
        Some(serde_yaml::Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        _ => Err(IndexError::Parse {
            line,
            message: "entry has no id".to_string(),
        }),
    }
}

/// Scalar field of a block as text; parse errors were caught in [`IndexDocument::parse`]
fn block_field(text: &str, field: &str) -> Option<String> {
    let map = parse_block(text, 0).ok()?;
    match map.get(field)? {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "document/document_tests.rs"]
mod document_tests;
