use std::path::Path;

use calldesk_core::Transcript;
use calldesk_store::{sort_newest_first, Store};

/// `calldesk list`
pub fn execute(data_dir: &Path) -> anyhow::Result<()> {
    let store = Store::open(data_dir)?;
    let rows = rows(&store)?;
    if rows.is_empty() {
        println!("(no transcripts)");
        return Ok(());
    }
    for row in rows {
        println!("{row}");
    }
    Ok(())
}

/// One display line per transcript, newest first.
fn rows(store: &Store) -> anyhow::Result<Vec<String>> {
    let mut transcripts = store.list_transcripts()?;
    sort_newest_first(&mut transcripts);
    transcripts
        .iter()
        .map(|t| {
            let outcome = store
                .get_summary(&t.id)?
                .map(|r| r.summary.outcome.to_string())
                .unwrap_or_else(|| "-".to_string());
            Ok(format_row(t, &outcome))
        })
        .collect()
}

fn format_row(t: &Transcript, outcome: &str) -> String {
    format!(
        "{:<20}  {:<36}  {:<24}  {:>4} msgs  {}",
        t.timestamps.created_at.as_deref().unwrap_or("-"),
        t.id,
        t.customer_name,
        t.message_count,
        outcome
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use calldesk_core::{Message, NewTranscript, SummaryRecord};

    fn seed(store: &Store, id: &str, created: &str, name: &str) {
        let mut t = NewTranscript {
            messages: Some(vec![Message::new("Customer", "Please transfer me")]),
            customer_name: Some(name.into()),
            transferred_to_agent: Some(true),
            ..Default::default()
        }
        .into_transcript(id.into(), created);
        t.timestamps.created_at = Some(created.into());
        store.save_transcript(t).unwrap();
    }

    #[test]
    fn rows_are_newest_first_with_outcome() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        seed(&store, "old", "2024-01-01T00:00:00Z", "Ann");
        seed(&store, "new", "2024-06-01T00:00:00Z", "Ben");

        let t = store.get_transcript("new").unwrap().unwrap();
        let summary = calldesk_insight::generate_summary(&t);
        store
            .save_summary("new", SummaryRecord::new("new", summary, "2024-06-01T00:00:05Z"))
            .unwrap();

        let rows = rows(&store).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("new") && rows[0].contains("Ben"));
        assert!(rows[0].ends_with("Transferred to Agent"));
        assert!(rows[1].contains("Ann"));
        assert!(rows[1].ends_with('-'));
    }
}
