use crate::cluster::{Configuration, REST_TIMEOUT_KEY, REST_URL_KEY};
use anyhow::{anyhow, Result};
use config::{Config, Environment};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Prefix of environment variables overriding the configuration file
pub const ENV_PREFIX: &str = "HBADMIN";

const DEFAULT_MASTER: &str = "localhost";
const DEFAULT_QUORUM: &str = "localhost";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminConfig {
    /// Host of the cluster master
    pub master: String,

    /// Comma-separated coordination quorum
    pub quorum: String,

    /// REST gateway URL; derived from the master host when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_url: Option<String>,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

const EMPTY_CONFIG: &str = r#"### hbadmin configuration file

### cluster master host and coordination quorum
# master = "localhost"
# quorum = "zk1,zk2,zk3"

### REST gateway, defaults to http://{master}:8080
# rest_url = "http://localhost:8080"

### request timeout (in seconds)
# timeout_secs = 30
"#;

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            master: DEFAULT_MASTER.to_string(),
            quorum: DEFAULT_QUORUM.to_string(),
            rest_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AdminConfig {
    /// Load the configuration file and `HBADMIN_*` environment overrides
    ///
    /// Without `path`, `$HOME/.hbadmin/hbadmin.toml` is used. A missing file is
    /// created from a commented template.
    pub fn new(path: &Option<String>) -> Result<AdminConfig> {
        let file = match path {
            Some(p) => p.clone(),
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not find home directory"))?;
                let hbadmin_dir = home_dir.join(".hbadmin");
                std::fs::create_dir_all(&hbadmin_dir)
                    .map_err(|e| anyhow!("Unable to create hbadmin directory: {}", e))?;
                hbadmin_dir
                    .join("hbadmin.toml")
                    .to_str()
                    .ok_or_else(|| anyhow!("Could not convert config path to string"))?
                    .to_string()
            }
        };

        if Path::new(file.as_str()).exists() {
            Self::load(Some(file.as_str()), Environment::with_prefix(ENV_PREFIX))
        } else {
            std::fs::write(file.as_str(), EMPTY_CONFIG)
                .map_err(|e| anyhow!("Unable to create config file {}: {}", file, e))?;
            Self::load(None, Environment::with_prefix(ENV_PREFIX))
        }
    }

    /// Build from an optional toml file layered under `environment`
    pub fn load(file: Option<&str>, environment: Environment) -> Result<AdminConfig> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(config::File::with_name(file));
        }
        builder = builder.add_source(environment);

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout_secs = match config.get("timeout_secs") {
            Some(t) => t
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid timeout_secs '{}': {}", t, e))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(AdminConfig {
            master: non_empty("master").unwrap_or_else(|| DEFAULT_MASTER.to_string()),
            quorum: non_empty("quorum").unwrap_or_else(|| DEFAULT_QUORUM.to_string()),
            rest_url: non_empty("rest_url"),
            timeout_secs,
        })
    }

    /// Client configuration every connection starts from
    pub fn base_configuration(&self) -> Configuration {
        let mut configuration = Configuration::new();
        if let Some(url) = &self.rest_url {
            configuration.set(REST_URL_KEY, url.as_str());
        }
        configuration.set_int(
            REST_TIMEOUT_KEY,
            i64::try_from(self.timeout_secs).unwrap_or(i64::MAX),
        );
        configuration
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        [
            format!("Master:             {}", self.master),
            format!("Quorum:             {}", self.quorum),
            format!(
                "REST Gateway:       {}",
                self.rest_url.as_deref().unwrap_or("(derived from master)")
            ),
            format!("Timeout:            {} seconds", self.timeout_secs),
        ]
        .join("\n")
    }

    /// Get the config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.hbadmin/hbadmin.toml", home_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AdminConfig::load(None, no_env()).unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_load_file() {
        let file = toml_file(
            r#"
master = "master1"
quorum = "zk1,zk2"
rest_url = "http://gateway:8080"
timeout_secs = 5
"#,
        );
        let config = AdminConfig::load(file.path().to_str(), no_env()).unwrap();
        assert_eq!(config.master, "master1");
        assert_eq!(config.quorum, "zk1,zk2");
        assert_eq!(config.rest_url.as_deref(), Some("http://gateway:8080"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = toml_file("master = \"master1\"\nquorum = \"zk1\"\n");
        let config = AdminConfig::load(
            file.path().to_str(),
            env(&[("HBADMIN_MASTER", "master2"), ("HBADMIN_REST_URL", "")]),
        )
        .unwrap();
        assert_eq!(config.master, "master2");
        assert_eq!(config.quorum, "zk1");
        assert!(config.rest_url.is_none());
    }

    #[test]
    fn test_invalid_timeout() {
        let res = AdminConfig::load(None, env(&[("HBADMIN_TIMEOUT_SECS", "soon")]));
        assert!(res.is_err());
    }

    #[test]
    fn test_new_creates_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hbadmin.toml");
        let path_str = path.to_str().unwrap().to_string();

        AdminConfig::new(&Some(path_str.clone())).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("### hbadmin configuration file"));

        // the template is all comments and loads as defaults
        let config = AdminConfig::load(Some(path_str.as_str()), no_env()).unwrap();
        assert_eq!(config.master, "localhost");
    }

    #[test]
    fn test_base_configuration() {
        let config = AdminConfig {
            rest_url: Some("http://gateway:8080".to_string()),
            timeout_secs: 10,
            ..Default::default()
        };
        let conf = config.base_configuration();
        assert_eq!(conf.get(REST_URL_KEY), Some("http://gateway:8080"));
        assert_eq!(conf.get_int(REST_TIMEOUT_KEY), Some(10));

        let conf = AdminConfig::default().base_configuration();
        assert!(!conf.contains(REST_URL_KEY));
    }

    #[test]
    fn test_summary() {
        let summary = AdminConfig::default().summary();
        assert!(summary.contains("Master:             localhost"));
        assert!(summary.contains("(derived from master)"));
    }
}
