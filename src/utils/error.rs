use thiserror::Error;

/// 單次投擲輸入無效：既不是哨兵代碼，也不是範圍內的整數
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid throw value '{raw}': {reason}")]
pub struct InvalidThrow {
    pub raw: String,
    pub reason: String,
}

/// 回合分數輸入無效
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid round score '{raw}': {reason}")]
pub struct InvalidRound {
    pub raw: String,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error(transparent)]
    InvalidThrow(#[from] InvalidThrow),

    #[error(transparent)]
    InvalidRound(#[from] InvalidRound),

    #[error("Malformed configuration: {field}: {message}")]
    MalformedConfiguration { field: String, message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoreError::InvalidThrow(_) | ScoreError::InvalidRound(_) => ErrorCategory::Input,
            ScoreError::MalformedConfiguration { .. }
            | ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScoreError::IoError(_) | ScoreError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// 使用者輸入錯誤可在原地恢復；配置錯誤代表部署損壞，必須立即失敗
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScoreError::InvalidThrow(_) | ScoreError::InvalidRound(_) => ErrorSeverity::Low,
            ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ScoreError::MalformedConfiguration { .. } => ErrorSeverity::Critical,
            ScoreError::IoError(_) => ErrorSeverity::Critical,
            ScoreError::SerializationError(_) => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoreError::InvalidThrow(_) => {
                "Enter a throw within the configured range or one of the sentinel codes"
            }
            ScoreError::InvalidRound(_) => "Enter a round score within the configured range",
            ScoreError::MalformedConfiguration { .. } => {
                "Fix the score rules so that every minimum is at most its maximum"
            }
            ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. } => {
                "Check the rules file syntax and field values"
            }
            ScoreError::IoError(_) => "Make sure the file exists and is readable",
            ScoreError::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoreError::InvalidThrow(e) => format!("Throw '{}' was rejected", e.raw),
            ScoreError::InvalidRound(e) => format!("Round score '{}' was rejected", e.raw),
            ScoreError::MalformedConfiguration { field, .. } => {
                format!("Score rules are broken ({})", field)
            }
            ScoreError::ConfigValidationError { field, .. }
            | ScoreError::InvalidConfigValueError { field, .. } => {
                format!("Configuration value '{}' is invalid", field)
            }
            ScoreError::IoError(e) => format!("Could not read input: {}", e),
            ScoreError::SerializationError(e) => format!("Could not render output: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_recoverable() {
        let err: ScoreError = InvalidRound {
            raw: "20".to_string(),
            reason: "out of range".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains("20"));
    }

    #[test]
    fn test_malformed_configuration_is_critical() {
        let err = ScoreError::MalformedConfiguration {
            field: "round_score".to_string(),
            message: "min 10 > max 5".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(
            err.to_string(),
            "Malformed configuration: round_score: min 10 > max 5"
        );
    }
}
