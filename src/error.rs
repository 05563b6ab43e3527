use std::path::PathBuf;

pub type LoadResult<T> = Result<T, LoadError>;

/// Anything that prevents the deck from being built. All of them are terminal.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("fetch error: {path}: {source}")]
    Fetch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("conversion error: {0}")]
    Convert(String),
}

impl LoadError {
    pub fn convert(msg: impl Into<String>) -> Self {
        Self::Convert(msg.into())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        let fetch = LoadError::Fetch {
            path: PathBuf::from("slides.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(fetch.to_string().starts_with("fetch error: slides.md"));
        assert!(LoadError::convert("x").to_string().contains("conversion error:"));
    }

    #[test]
    fn config_error_names_the_field() {
        let e = ConfigError::Invalid { field: "fps", reason: "must be positive" };
        assert_eq!(e.to_string(), "invalid config: fps must be positive");
    }
}
