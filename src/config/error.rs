//! Error type shared by config loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while loading or validating `lectern.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{}`", .0.display())]
    Read(PathBuf, #[source] std::io::Error),

    #[error("`{}` is not valid TOML", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_read_error_names_the_file() {
        let err = ConfigError::Read(
            PathBuf::from("lectern.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );

        assert!(format!("{err}").contains("lectern.toml"));
    }

    #[test]
    fn test_invalid_error_carries_message() {
        let err = ConfigError::Invalid("[profile.name] is required".into());

        assert_eq!(format!("{err}"), "invalid config: [profile.name] is required");
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let toml_err = toml::from_str::<toml::Value>("profile = [").unwrap_err();
        let err = ConfigError::Parse(PathBuf::from("site/lectern.toml"), toml_err);

        assert!(format!("{err}").contains("site/lectern.toml"));
    }
}
