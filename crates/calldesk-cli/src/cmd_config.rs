use std::path::Path;

use calldesk_store::{parse_value, read_config, write_config, DataPaths};
use clap::Subcommand;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Set a config value
    Set {
        /// Config key (bind, port, frontend_url)
        key: String,
        /// Config value (true/false/number/string)
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// Remove a config value
    Unset {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, data_dir: &Path) -> anyhow::Result<()> {
    let paths = DataPaths::discover(data_dir);
    match cmd {
        ConfigCmd::Set { key, value } => set(&paths, &key, &value),
        ConfigCmd::Get { key } => get(&paths, &key),
        ConfigCmd::Unset { key } => unset(&paths, &key),
        ConfigCmd::List => list(&paths),
    }
}

// ── Command Implementations ──

/// `calldesk config set <key> <value>`
fn set(paths: &DataPaths, key: &str, value: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(&paths.root)?;
    let mut config = read_config(&paths.config_json)?;
    config.insert(key.to_string(), parse_value(value));
    write_config(&paths.config_json, &config)?;
    println!("{key} = {value}");
    Ok(())
}

/// `calldesk config get <key>`
fn get(paths: &DataPaths, key: &str) -> anyhow::Result<()> {
    let config = read_config(&paths.config_json)?;
    match config.get(key) {
        Some(val) => println!("{val}"),
        None => println!("(not set)"),
    }
    Ok(())
}

/// `calldesk config unset <key>`
fn unset(paths: &DataPaths, key: &str) -> anyhow::Result<()> {
    let mut config = read_config(&paths.config_json)?;
    if config.remove(key).is_none() {
        println!("(not set)");
        return Ok(());
    }
    write_config(&paths.config_json, &config)?;
    println!("{key} removed");
    Ok(())
}

/// `calldesk config list`
fn list(paths: &DataPaths) -> anyhow::Result<()> {
    let config = read_config(&paths.config_json)?;
    if config.is_empty() {
        println!("(no config set)");
    } else {
        for (k, v) in &config {
            println!("{k} = {v}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_creates_data_dir_and_stores_typed_values() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("fresh");
        run(
            ConfigCmd::Set {
                key: "port".into(),
                value: "8080".into(),
            },
            &data,
        )
        .unwrap();
        run(
            ConfigCmd::Set {
                key: "frontend_url".into(),
                value: "https://dash.example.com".into(),
            },
            &data,
        )
        .unwrap();

        let config = read_config(&data.join("config.json")).unwrap();
        assert_eq!(config.get("port"), Some(&json!(8080)));
        assert_eq!(
            config.get("frontend_url"),
            Some(&json!("https://dash.example.com"))
        );
    }

    #[test]
    fn unset_removes_key() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = DataPaths::discover(tmp.path());
        set(&paths, "bind", "0.0.0.0").unwrap();
        unset(&paths, "bind").unwrap();
        assert!(read_config(&paths.config_json).unwrap().is_empty());
    }

    #[test]
    fn get_and_list_tolerate_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = DataPaths::discover(tmp.path().join("none"));
        get(&paths, "port").unwrap();
        list(&paths).unwrap();
    }
}
