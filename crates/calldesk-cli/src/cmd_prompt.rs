use std::path::Path;

use calldesk_insight::{format_prompt, render_transcript, PromptKey};
use calldesk_store::Store;

/// `calldesk prompt [KEY] [--var name=value ...] [--transcript <id>]`
pub fn execute(
    data_dir: &Path,
    key: Option<&str>,
    vars: &[String],
    transcript_id: Option<&str>,
) -> anyhow::Result<()> {
    let Some(key) = key else {
        for k in PromptKey::ALL {
            println!("{k}");
        }
        return Ok(());
    };
    let key: PromptKey = key.parse()?;

    let mut pairs = parse_vars(vars)?;
    if let Some(id) = transcript_id {
        let store = Store::open(data_dir)?;
        let Some(t) = store.get_transcript(id)? else {
            anyhow::bail!("Transcript not found: {id}");
        };
        pairs.push(("transcript".to_string(), render_transcript(&t)));
    }

    println!("{}", render(key, &pairs));
    Ok(())
}

/// Split `name=value` arguments. The value may itself contain `=`.
fn parse_vars(vars: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    vars.iter()
        .map(|v| {
            let (name, value) = v
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected name=value, got {v:?}"))?;
            if name.is_empty() {
                anyhow::bail!("empty variable name in {v:?}");
            }
            Ok((name.to_string(), value.to_string()))
        })
        .collect()
}

fn render(key: PromptKey, pairs: &[(String, String)]) -> String {
    let borrowed: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(n, v)| (n.as_str(), v.as_str()))
        .collect();
    format_prompt(key, &borrowed)
}
