use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// HTTP server settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to
    pub bind: String,
    /// Directory served under `/static/`
    pub static_dir: PathBuf,
    /// HTML template for the game page; the built-in page is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:3333".to_string(),
            static_dir: PathBuf::from("static"),
            template: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    ///
    /// `server.bind` is checked for shape only (`host:port` or a socket
    /// address); host names are resolved when the listener binds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_bind_address(&self.server.bind) {
            return Err(ConfigError::Validation(format!(
                "server.bind must be host:port like 127.0.0.1:3333, got '{}'",
                self.server.bind
            )));
        }
        if self.server.static_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "server.static_dir must not be empty".into(),
            ));
        }
        if matches!(&self.server.template, Some(p) if p.as_os_str().is_empty()) {
            return Err(ConfigError::Validation(
                "server.template must not be empty when set".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

fn is_bind_address(bind: &str) -> bool {
    if bind.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match bind.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty() && !host.contains(':') && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.server.bind, "127.0.0.1:3333");
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert!(config.server.template.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[server]
bind = "0.0.0.0:8080"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        // Other fields should be defaults
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert!(config.server.template.is_none());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.server.bind, default.server.bind);
        assert_eq!(config.server.static_dir, default.server.static_dir);
    }

    #[test]
    fn test_validation_rejects_bad_bind() {
        let mut config = AppConfig::default();
        config.server.bind = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_host_names() {
        let mut config = AppConfig::default();
        for bind in ["localhost:3333", "[::1]:3333", "0.0.0.0:0"] {
            config.server.bind = bind.to_string();
            assert!(config.validate().is_ok(), "{bind} should be accepted");
        }
        for bind in [":3333", "localhost:", "localhost:99999", "::1:3333"] {
            config.server.bind = bind.to_string();
            assert!(config.validate().is_err(), "{bind} should be rejected");
        }
    }

    #[test]
    fn test_validation_rejects_empty_static_dir() {
        let mut config = AppConfig::default();
        config.server.static_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_template() {
        let mut config = AppConfig::default();
        config.server.template = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:3333");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[server]
template = "templates/index.html"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(
            config.server.template,
            Some(PathBuf::from("templates/index.html"))
        );
        // Others are defaults
        assert_eq!(config.server.bind, "127.0.0.1:3333");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[server]\nbind = \"nope\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "[server\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
