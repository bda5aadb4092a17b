//! Error types for bootmeta

use thiserror::Error;

/// Main error type for metadata retrieval and translation
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to parse {field}: {cause}")]
    Parse { field: String, cause: String },

    #[error("Provider reported an error: {0}")]
    Provider(String),

    #[error("Failed to decode metadata: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported provider {0:?}")]
    UnsupportedProvider(String),
}

impl MetadataError {
    /// Create a parse error for the named input field
    pub fn parse(field: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Parse {
            field: field.into(),
            cause: cause.to_string(),
        }
    }
}

impl From<reqwest::Error> for MetadataError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = MetadataError::parse("interface.mac", "invalid MAC address \"zz\"");
        assert_eq!(
            err.to_string(),
            "Failed to parse interface.mac: invalid MAC address \"zz\""
        );
    }

    #[test]
    fn test_provider_error_is_verbatim() {
        let err = MetadataError::Provider("Not authorized".to_string());
        assert!(err.to_string().ends_with("Not authorized"));
    }
}
