//! Minimal reader for the keyed-section configuration format tile-sets are
//! authored in:
//!
//! ```text
//! ; comment
//! [Cliff.0]
//! ConnectionPoint0=0,0
//! ConnectionPoint0.Directions=00000010
//! ConnectionPoint0.Side=front
//! ```
//!
//! Section order and key order are preserved. Key lookups ignore ASCII case
//! and the last assignment of a key wins.

use crate::error::CatalogError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniSection {
    pub name: String,
    /// 1-based line of the section header.
    pub line: usize,
    pub entries: Vec<(String, String)>,
}

impl IniSection {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IniDocument {
    pub sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn parse(source: &str) -> Result<IniDocument, CatalogError> {
        let mut sections: Vec<IniSection> = Vec::new();

        for (line_index, raw) in source.lines().enumerate() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            let malformed = || CatalogError::MalformedLine {
                line: line_index + 1,
                content: raw.to_string(),
            };

            if let Some(header) = line.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(malformed)?.trim();
                if name.is_empty() {
                    return Err(malformed());
                }
                sections.push(IniSection {
                    name: name.to_string(),
                    line: line_index + 1,
                    entries: Vec::new(),
                });
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(malformed)?;
            let key = key.trim();
            if key.is_empty() {
                return Err(malformed());
            }

            // Keys outside any section have nowhere to go.
            let section = sections.last_mut().ok_or_else(malformed)?;
            section
                .entries
                .push((key.to_string(), value.trim().to_string()));
        }

        Ok(IniDocument { sections })
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(|c: char| c == ';' || c == '#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}
