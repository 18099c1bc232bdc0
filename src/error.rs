use std::path::PathBuf;

/// Errors from turning user text into a column index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("'{0}' is not a column number")]
    Malformed(String),

    #[error("column {0} is out of range")]
    OutOfRange(i64),
}

/// Errors that end a console game early.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("input closed before the game ended")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that stop the HTTP server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid template {path}: {reason}")]
    TemplateInvalid { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display() {
        let err = InputError::Malformed("abc".to_string());
        assert_eq!(err.to_string(), "'abc' is not a column number");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("server.bind must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: server.bind must not be empty"
        );
    }

    #[test]
    fn test_template_error_display() {
        let err = ServerError::TemplateInvalid {
            path: PathBuf::from("templates/index.html"),
            reason: "missing {{board}}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid template templates/index.html: missing {{board}}"
        );
    }
}
