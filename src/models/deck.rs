//! Deck records keyed by standings rank

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeckEditorError, Result};
use crate::text::DeckList;

/// Row identifier in the standings table (1 = first ranked row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(pub u32);

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Rank {
    type Err = DeckEditorError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|rank| *rank > 0)
            .map(Rank)
            .ok_or_else(|| DeckEditorError::InvalidRank(s.to_string()))
    }
}

/// Deck name plus its multi-line list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecord {
    pub name: String,
    pub list: String,
}

impl DeckRecord {
    pub fn new(name: impl Into<String>, list: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            list: list.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.list.is_empty()
    }

    /// The list split into editor lines
    pub fn lines(&self) -> DeckList {
        DeckList::from_text(&self.list)
    }
}

/// Flattened record for handing to JavaScript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub rank: Rank,
    pub name: String,
    pub list: String,
}

/// In-memory deck records, mirrored into the page's hidden fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStore {
    records: BTreeMap<Rank, DeckRecord>,
}

impl DeckStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rank: Rank) -> Option<&DeckRecord> {
        self.records.get(&rank)
    }

    /// Insert or overwrite; empty records are dropped instead of stored
    pub fn insert(&mut self, rank: Rank, record: DeckRecord) -> Option<DeckRecord> {
        if record.is_empty() {
            return self.records.remove(&rank);
        }
        self.records.insert(rank, record)
    }

    pub fn remove(&mut self, rank: Rank) -> Option<DeckRecord> {
        self.records.remove(&rank)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rank, &DeckRecord)> {
        self.records.iter().map(|(rank, record)| (*rank, record))
    }

    /// Records in rank order
    pub fn entries(&self) -> Vec<DeckEntry> {
        self.iter()
            .map(|(rank, record)| DeckEntry {
                rank,
                name: record.name.clone(),
                list: record.list.clone(),
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| DeckEditorError::Config(format!("Serialization error: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records = serde_json::from_str(json)
            .map_err(|e| DeckEditorError::Config(format!("Deserialization error: {}", e)))?;
        Ok(Self { records })
    }
}
