use thiserror::Error;

use crate::numeric::NumberKind;

#[derive(Error, Debug)]
pub enum RangeSeekError {
    #[error("Number type '{type_name}' is not supported")]
    UnsupportedNumericKind { type_name: &'static str },

    #[error("Cannot represent non-finite value {value} as {kind}")]
    NonFiniteValue { kind: NumberKind, value: f64 },

    #[error("Settings error: {message}")]
    SettingsError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, RangeSeekError>;

impl RangeSeekError {
    /// Returns true if this error is recoverable (user can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RangeSeekError::SettingsError { .. }
                | RangeSeekError::IoError { .. }
                | RangeSeekError::JsonError { .. }
        )
    }

    /// Returns a user-friendly error message with recovery suggestions
    pub fn user_message(&self) -> String {
        let base_message = self.to_string();
        let suggestion = match self {
            RangeSeekError::UnsupportedNumericKind { .. } => {
                "Use one of i64, f64, i32, f32, i16, i8 or BigDecimal for the range bounds."
            }
            RangeSeekError::NonFiniteValue { .. } => "Range bounds must be finite numbers.",
            RangeSeekError::SettingsError { .. } | RangeSeekError::JsonError { .. } => {
                "The settings file may be corrupted. Defaults will be used instead."
            }
            RangeSeekError::IoError { .. } => {
                "File system error occurred. Check disk space and permissions."
            }
        };

        format!("{}\n\n{}", base_message, suggestion)
    }

    /// Returns an error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            RangeSeekError::UnsupportedNumericKind { .. } => "UNSUPPORTED_NUMERIC_KIND",
            RangeSeekError::NonFiniteValue { .. } => "NON_FINITE_VALUE",
            RangeSeekError::SettingsError { .. } => "SETTINGS_ERROR",
            RangeSeekError::IoError { .. } => "IO_ERROR",
            RangeSeekError::JsonError { .. } => "JSON_ERROR",
        }
    }

    /// Logs the error at a level matching its severity
    pub fn log(&self) {
        if self.is_recoverable() {
            log::warn!("[{}] {}", self.error_code(), self);
        } else {
            log::error!("[{}] {}", self.error_code(), self);
        }
    }
}
