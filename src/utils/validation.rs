use crate::utils::error::{Result, ScoreError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 上下界檢查：min > max 代表部署配置損壞
pub fn validate_min_max<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    min: T,
    max: T,
) -> Result<()> {
    if min > max {
        return Err(ScoreError::MalformedConfiguration {
            field: field_name.to_string(),
            message: format!("minimum {} is greater than maximum {}", min, max),
        });
    }
    Ok(())
}
