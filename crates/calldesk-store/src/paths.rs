use std::path::{Path, PathBuf};

/// All well-known paths under the data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub root: PathBuf,
    pub transcripts_dir: PathBuf,
    pub summaries_dir: PathBuf,
    pub agents_dir: PathBuf,
    pub config_json: PathBuf,
}

impl DataPaths {
    /// Derive all paths from a data root. Pure computation, no I/O.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            transcripts_dir: root.join("transcripts"),
            summaries_dir: root.join("summaries"),
            agents_dir: root.join("agents"),
            config_json: root.join("config.json"),
            root,
        }
    }

    /// Create all entity directories. Idempotent.
    pub fn ensure_layout(&self) -> anyhow::Result<()> {
        for dir in [&self.transcripts_dir, &self.summaries_dir, &self.agents_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.transcripts_dir.is_dir() && self.summaries_dir.is_dir() && self.agents_dir.is_dir()
    }

    /// `<dir>/<id>.json`
    pub fn entity_file(dir: &Path, id: &str) -> PathBuf {
        dir.join(format!("{id}.json"))
    }
}
