//! Local persistence helper — a file-backed key-value store over the four
//! draft keys. Writes are synchronous and unconditional (last write wins, no
//! versioning); reads tolerate an absent file, absent key or malformed record
//! by returning `None`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::career::{Assessment, CareerResult, Story};

pub const KEY_STORY: &str = "userStory";
pub const KEY_ASSESSMENT: &str = "userAssessment";
pub const KEY_LATEST_RESULT: &str = "latestResult";
pub const KEY_LAST_UPDATED: &str = "lastUpdated";

/// File-backed draft store. The whole map is rewritten on every set; drafts
/// are a handful of small records, so this stays cheap.
pub struct LocalStore {
    path: PathBuf,
    records: Mutex<BTreeMap<String, Value>>,
}

impl LocalStore {
    /// Opens the store at `path`, loading any existing records. A missing or
    /// unreadable file starts the store empty rather than failing.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let records = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, Value>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Local store at {} is malformed, starting empty: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self {
            path,
            records: Mutex::new(records),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut records = self.records.lock().expect("local store lock poisoned");
        records.insert(
            key.to_string(),
            serde_json::to_value(value).context("serializing local record")?,
        );
        records.insert(
            KEY_LAST_UPDATED.to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        self.persist(&records)
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let records = self.records.lock().expect("local store lock poisoned");
        let value = records.get(key)?.clone();
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Local record '{key}' is malformed, ignoring: {e}");
                None
            }
        }
    }

    fn persist(&self, records: &BTreeMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let raw = serde_json::to_string_pretty(records).context("serializing local store")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("writing {}", self.path.display()))
    }

    pub fn save_story(&self, story: &Story) -> Result<()> {
        self.set(KEY_STORY, story)
    }

    pub fn load_story(&self) -> Option<Story> {
        self.get(KEY_STORY)
    }

    pub fn save_assessment(&self, assessment: &Assessment) -> Result<()> {
        self.set(KEY_ASSESSMENT, assessment)
    }

    pub fn load_assessment(&self) -> Option<Assessment> {
        self.get(KEY_ASSESSMENT)
    }

    pub fn save_latest_result(&self, result: &CareerResult) -> Result<()> {
        self.set(KEY_LATEST_RESULT, result)
    }

    pub fn load_latest_result(&self) -> Option<CareerResult> {
        self.get(KEY_LATEST_RESULT)
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        let raw: String = self.get(KEY_LAST_UPDATED)?;
        DateTime::parse_from_rfc3339(&raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
