//! Archive loading: reading the global index, day indexes and message files.
//!
//! Everything except day discovery is best-effort: a missing or broken file is
//! logged and replaced with an empty value so a single bad export never blocks
//! rendering the rest of the archive.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{DayIndex, GlobalIndex, Message};

/// Handle on an archive data directory
#[derive(Debug, Clone)]
pub struct Archive {
    data_dir: PathBuf,
}

impl Archive {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn days_dir(&self) -> PathBuf {
        self.data_dir.join("days")
    }

    pub fn global_path(&self) -> PathBuf {
        self.data_dir.join("index.json")
    }

    pub fn day_path(&self, day: &str) -> PathBuf {
        self.days_dir().join(day).join("index.json")
    }

    pub fn messages_path(&self, day: &str, conversation_id: &str) -> PathBuf {
        self.days_dir()
            .join(day)
            .join(format!("messages-{conversation_id}"))
            .join("messages.json")
    }

    /// Load the global index, or an empty one if it can't be read
    pub fn load_global(&self) -> GlobalIndex {
        let path = self.global_path();
        read_json(&path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), "failed to load global index: {err:#}");
            GlobalIndex::default()
        })
    }

    /// All day folder names, sorted ascending
    pub fn list_days(&self) -> Result<Vec<String>> {
        let dir = self.days_dir();
        let entries =
            fs::read_dir(&dir).with_context(|| format!("failed to read {}", dir.display()))?;
        let mut days = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                days.push(name.to_string());
            }
        }
        days.sort();
        Ok(days)
    }

    /// Load a day index, or an empty one if it can't be read
    pub fn load_day(&self, day: &str) -> DayIndex {
        let path = self.day_path(day);
        read_json(&path).unwrap_or_else(|err| {
            tracing::warn!(day, "failed to load day index: {err:#}");
            DayIndex::default()
        })
    }

    /// Load the messages of one conversation on one day
    pub fn load_messages(&self, day: &str, conversation_id: &str) -> Vec<Message> {
        let path = self.messages_path(day, conversation_id);
        match read_json(&path) {
            Ok(messages) => messages,
            Err(err) => {
                tracing::info!(
                    day,
                    conversation = conversation_id,
                    "no messages found: {err:#}"
                );
                Vec::new()
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

/// Reject path segments that would escape the archive
pub fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}
