use std::fmt;

#[derive(Debug)]
pub enum ScanError {
    InvalidInput(String),
    ConversionError(String),
    ConfigError(String),
    ProcessingError(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanError::InvalidInput(msg) => write!(f, "Invalid input error: {}", msg),
            ScanError::ConversionError(msg) => write!(f, "Conversion error: {}", msg),
            ScanError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ScanError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl std::error::Error for ScanError {}
