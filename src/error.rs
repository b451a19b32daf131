//! Error types for the top_colors library

use thiserror::Error;

/// Result type alias for top_colors operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for color analysis operations
///
/// Only [`AnalysisError::ImageLoadError`] can come out of the pipeline itself.
/// Scaling, posterizing, tallying and formatting are total over a loaded image.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image file could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error came from loading the input image
    pub fn is_load_error(&self) -> bool {
        matches!(self, AnalysisError::ImageLoadError { .. })
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { .. } => {
                "Could not load the image. Please upload a PNG, JPEG or GIF file and try again."
                    .to_string()
            }
            AnalysisError::ConfigError { .. } => {
                "Could not read the analysis configuration.".to_string()
            }
            AnalysisError::InvalidParameter { parameter, value } => {
                format!("The value '{}' is not valid for {}.", value, parameter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_image_load_keeps_source() {
        let err = AnalysisError::image_load(
            "Failed to open image file: missing.png",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );

        assert!(err.is_load_error());
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "Failed to load image: Failed to open image file: missing.png"
        );
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = AnalysisError::invalid_parameter("posterize_bits", 9);

        assert!(!err.is_load_error());
        assert_eq!(err.to_string(), "Invalid parameter: posterize_bits = 9");
        assert!(err.user_message().contains("posterize_bits"));
    }
}
