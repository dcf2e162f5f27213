use std::path::Path;

use calldesk_serve::{ServeConfig, DEFAULT_FRONTEND_URL};
use calldesk_store::{read_config, ConfigMap, DataPaths};

const DEFAULT_BIND: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

pub fn execute(
    data_dir: &Path,
    bind: Option<String>,
    port: Option<u16>,
    frontend_url: Option<String>,
) -> anyhow::Result<()> {
    let paths = DataPaths::discover(data_dir);
    let file_config = read_config(&paths.config_json)?;
    let config = resolve(data_dir, &file_config, bind, port, frontend_url)?;
    tokio::runtime::Runtime::new()?.block_on(calldesk_serve::serve(config))
}

/// Flags and environment win over `config.json`, which wins over defaults.
fn resolve(
    data_dir: &Path,
    file_config: &ConfigMap,
    bind: Option<String>,
    port: Option<u16>,
    frontend_url: Option<String>,
) -> anyhow::Result<ServeConfig> {
    let bind = bind
        .or_else(|| config_str(file_config, "bind"))
        .unwrap_or_else(|| DEFAULT_BIND.to_string());

    let port = match port {
        Some(p) => p,
        None => match file_config.get("port") {
            Some(v) => v
                .as_u64()
                .and_then(|n| u16::try_from(n).ok())
                .ok_or_else(|| anyhow::anyhow!("config key 'port' is not a port number: {v}"))?,
            None => DEFAULT_PORT,
        },
    };

    let frontend_url = frontend_url
        .or_else(|| config_str(file_config, "frontend_url"))
        .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());

    Ok(ServeConfig {
        bind,
        port,
        data_dir: data_dir.to_path_buf(),
        frontend_url: Some(frontend_url),
    })
}

fn config_str(config: &ConfigMap, key: &str) -> Option<String> {
    config.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calldesk_store::parse_value;

    fn config(pairs: &[(&str, &str)]) -> ConfigMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), parse_value(v)))
            .collect()
    }

    #[test]
    fn defaults_apply_without_flags_or_config() {
        let c = resolve(Path::new("data"), &ConfigMap::new(), None, None, None).unwrap();
        assert_eq!(c.bind, "127.0.0.1");
        assert_eq!(c.port, 5000);
        assert_eq!(c.frontend_url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let file = config(&[
            ("bind", "0.0.0.0"),
            ("port", "8080"),
            ("frontend_url", "https://dash.example.com"),
        ]);
        let c = resolve(Path::new("data"), &file, None, None, None).unwrap();
        assert_eq!(c.bind, "0.0.0.0");
        assert_eq!(c.port, 8080);
        assert_eq!(c.frontend_url.as_deref(), Some("https://dash.example.com"));
    }

    #[test]
    fn flags_override_config_file() {
        let file = config(&[("port", "8080")]);
        let c = resolve(Path::new("data"), &file, None, Some(9000), None).unwrap();
        assert_eq!(c.port, 9000);
    }

    #[test]
    fn bad_port_in_config_is_an_error() {
        let file = config(&[("port", "99999")]);
        assert!(resolve(Path::new("data"), &file, None, None, None).is_err());
        let file = config(&[("port", "high")]);
        assert!(resolve(Path::new("data"), &file, None, None, None).is_err());
    }
}
