use std::path::Path;

use calldesk_core::{SummaryRecord, Transcript};
use calldesk_store::Store;

/// `calldesk summarize <id> [--json]`
pub fn summarize(data_dir: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = Store::open(data_dir)?;
    let Some(transcript) = store.get_transcript(id)? else {
        anyhow::bail!("Transcript not found: {id}");
    };
    let record = regenerate(&store, &transcript)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let s = &record.summary;
    println!("{}", s.title);
    println!("  topics:     {}", join(s.key_topics.iter()));
    println!("  resolution: {}", s.resolution);
    println!("  sentiment:  {}", s.sentiment);
    println!("  duration:   {}", s.duration);
    println!("  outcome:    {}", s.outcome);
    if let Some(insights) = &s.insights {
        println!("  intent:     {}", insights.customer_intent);
        println!("  actions:    {}", join(insights.action_items.iter()));
        println!("  follow-up:  {}", if insights.follow_up_required { "yes" } else { "no" });
        let p = &insights.policy_details;
        if let Some(n) = &p.policy_number {
            println!("  policy:     {n}");
        }
        if let Some(c) = p.coverage_type {
            println!("  coverage:   {c}");
        }
        if let Some(d) = &p.deductible {
            println!("  deductible: {d}");
        }
        if let Some(a) = &p.property_address {
            println!("  address:    {a}");
        }
    }
    Ok(())
}

/// `calldesk backfill [--missing-only]`
pub fn backfill(data_dir: &Path, missing_only: bool) -> anyhow::Result<()> {
    let store = Store::open(data_dir)?;
    let report = run_backfill(&store, missing_only)?;
    println!(
        "Regenerated {} summaries ({} skipped, {} failed)",
        report.regenerated, report.skipped, report.failed
    );
    if report.failed > 0 {
        anyhow::bail!("{} transcript(s) could not be summarized", report.failed);
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct BackfillReport {
    regenerated: usize,
    skipped: usize,
    failed: usize,
}

/// Full analysis for every stored transcript. A failure on one transcript is
/// logged and counted; the rest still run.
fn run_backfill(store: &Store, missing_only: bool) -> anyhow::Result<BackfillReport> {
    let mut report = BackfillReport::default();
    for transcript in store.list_transcripts()? {
        if missing_only && store.get_summary(&transcript.id)?.is_some() {
            report.skipped += 1;
            continue;
        }
        match regenerate(store, &transcript) {
            Ok(_) => report.regenerated += 1,
            Err(e) => {
                tracing::warn!(id = %transcript.id, error = %e, "backfill failed");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

fn regenerate(store: &Store, transcript: &Transcript) -> anyhow::Result<SummaryRecord> {
    let summary = calldesk_insight::analyze(transcript);
    let record = SummaryRecord::new(&transcript.id, summary, calldesk_core::now_rfc3339());
    store.save_summary(&transcript.id, record)
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let parts: Vec<String> = items.map(|i| i.to_string()).collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}
