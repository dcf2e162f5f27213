use std::path::Path;

use anyhow::Context;
use calldesk_store::Store;
use serde_json::Value;

use crate::cmd_ingest::build_transcript;

/// `calldesk normalize`
pub fn execute(data_dir: &Path) -> anyhow::Result<()> {
    let store = Store::open(data_dir)?;
    let report = normalize_stored(&store)?;
    println!(
        "Normalized {} transcript(s) ({} already current, {} failed)",
        report.normalized, report.current, report.failed
    );
    if report.failed > 0 {
        anyhow::bail!("{} transcript file(s) could not be normalized", report.failed);
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct NormalizeReport {
    normalized: usize,
    current: usize,
    failed: usize,
}

/// Rewrite generator-style files under `transcripts/` in place. The file
/// name supplies the id when the record has none.
fn normalize_stored(store: &Store) -> anyhow::Result<NormalizeReport> {
    let mut report = NormalizeReport::default();
    for entry in std::fs::read_dir(&store.paths().transcripts_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match normalize_file(store, &path) {
            Ok(true) => report.normalized += 1,
            Ok(false) => report.current += 1,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{e:#}"),
                    "normalize failed"
                );
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

fn normalize_file(store: &Store, path: &Path) -> anyhow::Result<bool> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).context("not valid JSON")?;
    if !calldesk_core::is_legacy(&value) {
        return Ok(false);
    }
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let transcript = build_transcript(value, || stem.clone())?;
    let id = transcript.id.clone();
    store.save_transcript(transcript)?;
    if id != stem {
        // record lived under a different name; the store now holds it as <id>.json
        std::fs::remove_file(path)?;
    }
    tracing::debug!(id = %id, "normalized");
    Ok(true)
}
