use std::path::Path;

use serde_json::Value;

/// Server settings (`bind`, `port`, `frontend_url`) kept in the data
/// directory's `config.json`.
pub type ConfigMap = serde_json::Map<String, Value>;

/// A data directory without `config.json`, or one whose file holds
/// something other than an object, has no settings.
pub fn read_config(path: &Path) -> anyhow::Result<ConfigMap> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigMap::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(match serde_json::from_str::<Value>(&content)? {
        Value::Object(settings) => settings,
        _ => ConfigMap::new(),
    })
}

pub fn write_config(path: &Path, settings: &ConfigMap) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::write_atomic(path, json.as_bytes())
}

/// Type a `calldesk config set` argument: `5000` stays a number so `port`
/// reads back as one, `true`/`false` become booleans, anything else a string.
pub fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => raw
            .parse::<i64>()
            .map(Value::from)
            .or_else(|_| raw.parse::<f64>().map(Value::from))
            .unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_value_types() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("false"), json!(false));
        assert_eq!(parse_value("5000"), json!(5000));
        assert_eq!(parse_value("0.5"), json!(0.5));
        assert_eq!(
            parse_value("http://localhost:3000"),
            json!("http://localhost:3000")
        );
    }

    #[test]
    fn missing_config_reads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let map = read_config(&tmp.path().join("config.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn non_object_config_reads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "[1,2]").unwrap();
        assert!(read_config(&path).unwrap().is_empty());
    }

    #[test]
    fn write_then_read() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        let mut map = ConfigMap::new();
        map.insert("port".into(), parse_value("8080"));
        write_config(&path, &map).unwrap();
        let back = read_config(&path).unwrap();
        assert_eq!(back.get("port"), Some(&json!(8080)));
    }
}
