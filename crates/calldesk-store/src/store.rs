use std::cmp::Reverse;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use calldesk_core::{parse_rfc3339, Agent, SummaryRecord, Timestamps, Transcript};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::paths::DataPaths;
use crate::write_atomic;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid id {0:?}: only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidId(String),
}

/// A record persisted as one `<id>.json` file.
pub trait Entity: Serialize + DeserializeOwned {
    fn timestamps(&self) -> &Timestamps;
    fn timestamps_mut(&mut self) -> &mut Timestamps;
}

impl Entity for Transcript {
    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }
}

impl Entity for SummaryRecord {
    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }
}

impl Entity for Agent {
    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }
}

/// Ids become file names, so they are restricted to a path-safe alphabet.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// One JSON file per entity, no index. Writes are atomic renames, so
/// concurrent writers to the same id are last-write-wins and readers never
/// observe a partial file.
#[derive(Debug, Clone)]
pub struct Store {
    paths: DataPaths,
}

impl Store {
    /// Open the store rooted at `root`, creating its directories if needed.
    pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let paths = DataPaths::discover(root);
        paths.ensure_layout()?;
        Ok(Self { paths })
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    // ── Transcripts ──

    pub fn save_transcript(&self, transcript: Transcript) -> anyhow::Result<Transcript> {
        let id = transcript.id.clone();
        self.save(&self.paths.transcripts_dir, &id, transcript)
    }

    pub fn get_transcript(&self, id: &str) -> anyhow::Result<Option<Transcript>> {
        self.load(&self.paths.transcripts_dir, id)
    }

    pub fn list_transcripts(&self) -> anyhow::Result<Vec<Transcript>> {
        self.list(&self.paths.transcripts_dir)
    }

    /// Returns `false` when there was nothing to delete.
    pub fn delete_transcript(&self, id: &str) -> anyhow::Result<bool> {
        self.remove(&self.paths.transcripts_dir, id)
    }

    // ── Summaries (keyed by transcript id) ──

    /// Store `record` under `call_id`, overwriting any previous summary. The
    /// first summary's `createdAt` survives regeneration.
    pub fn save_summary(
        &self,
        call_id: &str,
        mut record: SummaryRecord,
    ) -> anyhow::Result<SummaryRecord> {
        record.call_id = call_id.to_string();
        if record.timestamps.created_at.is_none() {
            if let Some(existing) = self.get_summary(call_id)? {
                record.timestamps.created_at = existing.timestamps.created_at;
            }
        }
        self.save(&self.paths.summaries_dir, call_id, record)
    }

    pub fn get_summary(&self, call_id: &str) -> anyhow::Result<Option<SummaryRecord>> {
        self.load(&self.paths.summaries_dir, call_id)
    }

    pub fn list_summaries(&self) -> anyhow::Result<Vec<SummaryRecord>> {
        self.list(&self.paths.summaries_dir)
    }

    // ── Agents ──

    pub fn save_agent(&self, agent: Agent) -> anyhow::Result<Agent> {
        let id = agent.id.clone();
        self.save(&self.paths.agents_dir, &id, agent)
    }

    pub fn get_agent(&self, id: &str) -> anyhow::Result<Option<Agent>> {
        self.load(&self.paths.agents_dir, id)
    }

    pub fn list_agents(&self) -> anyhow::Result<Vec<Agent>> {
        self.list(&self.paths.agents_dir)
    }

    // ── Generic file operations ──

    fn save<T: Entity>(&self, dir: &Path, id: &str, mut record: T) -> anyhow::Result<T> {
        if !is_valid_id(id) {
            return Err(StoreError::InvalidId(id.to_string()).into());
        }
        record.timestamps_mut().touch(&calldesk_core::now_rfc3339());
        let json = serde_json::to_string_pretty(&record)?;
        let path = DataPaths::entity_file(dir, id);
        write_atomic(&path, json.as_bytes())?;
        tracing::debug!(path = %path.display(), "saved record");
        Ok(record)
    }

    fn load<T: Entity>(&self, dir: &Path, id: &str) -> anyhow::Result<Option<T>> {
        if !is_valid_id(id) {
            return Ok(None);
        }
        let path = DataPaths::entity_file(dir, id);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("corrupt record {}: {e}", path.display()))?;
        Ok(Some(record))
    }

    fn list<T: Entity>(&self, dir: &Path) -> anyhow::Result<Vec<T>> {
        let mut items = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                // deleted between read_dir and read
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            match serde_json::from_str(&content) {
                Ok(record) => items.push(record),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unreadable record"
                    );
                }
            }
        }
        Ok(items)
    }

    fn remove(&self, dir: &Path, id: &str) -> anyhow::Result<bool> {
        if !is_valid_id(id) {
            return Ok(false);
        }
        match fs::remove_file(DataPaths::entity_file(dir, id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Order records by `createdAt`, newest first. Records whose timestamp is
/// missing or unparseable go last.
pub fn sort_newest_first<T: Entity>(items: &mut [T]) {
    items.sort_by_cached_key(|item| {
        Reverse(parse_rfc3339(item.timestamps().created_at.as_deref()))
    });
}
