//! Error types for marker file operations.

use thiserror::Error;

/// Errors that can occur while reading or writing a marker file.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON
    #[error("Not a JSON file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The `format` field is missing or not "markers"
    #[error("Wrong format of the file: expected \"markers\", found {}", describe_found(.found))]
    WrongFormat {
        /// The format value that was found, if any
        found: Option<String>,
    },

    /// The format tag is right but the marker data is malformed
    #[error("Invalid marker data: {message}")]
    InvalidEntry {
        /// Description of what is wrong
        message: String,
    },
}

fn describe_found(found: &Option<String>) -> String {
    match found {
        Some(value) => format!("\"{}\"", value),
        None => "no format field".to_string(),
    }
}

impl FormatError {
    /// Create a wrong format error.
    pub fn wrong_format(found: Option<String>) -> Self {
        Self::WrongFormat { found }
    }

    /// Create an invalid entry error with a message.
    pub fn invalid_entry(message: impl Into<String>) -> Self {
        Self::InvalidEntry {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_format_messages() {
        let missing = FormatError::wrong_format(None);
        assert_eq!(
            missing.to_string(),
            "Wrong format of the file: expected \"markers\", found no format field"
        );
        let other = FormatError::wrong_format(Some("rois".to_string()));
        assert!(other.to_string().ends_with("found \"rois\""));
    }
}
