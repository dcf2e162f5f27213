mod config;
mod paths;
mod store;

pub use config::{parse_value, read_config, write_config, ConfigMap};
pub use paths::DataPaths;
pub use store::{sort_newest_first, Entity, Store, StoreError};

use std::fs;
use std::io::Write;
use std::path::Path;

/// Replace `path` in one rename so a concurrent reader sees either the old
/// record or the new one. The staging file lives beside the target and has no
/// `.json` extension, so listings never pick it up.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("{} has no parent directory", path.display()))?;
    fs::create_dir_all(dir)?;
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(data)?;
    staged.flush()?;
    staged.persist(path)?;
    Ok(())
}
