use crate::core::rules::ScoreRules;
use crate::domain::model::RulesConfig;
use crate::domain::ports::RulesProvider;
use crate::utils::error::{Result, ScoreError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub rules: RulesConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl RulesFile {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoreError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROUND_SCORE_MAX})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoreError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證並建立計分規則
    pub fn score_rules(&self) -> Result<ScoreRules> {
        ScoreRules::from_config(&self.rules)
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl RulesProvider for RulesFile {
    fn rules_config(&self) -> RulesConfig {
        self.rules.clone()
    }
}

impl Validate for RulesFile {
    fn validate(&self) -> Result<()> {
        self.score_rules()?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format.to_ascii_lowercase().as_str()) {
                return Err(ScoreError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_rules_file() {
        let toml_content = r#"
[rules]
single_throw_min = -8
single_throw_max = 80
round_score_min = -80
round_score_max = 19
sentinels = ["H", "U", "-", "E"]
empty_throw_sentinel = "-"

[logging]
format = "json"
"#;

        let config = RulesFile::from_toml_str(toml_content).unwrap();
        assert_eq!(config.rules.single_throw_min, -8);
        assert_eq!(config.rules.sentinels.len(), 4);
        assert!(config.json_logging());
        assert!(config.validate().is_ok());

        let rules = config.score_rules().unwrap();
        assert!(rules.is_sentinel("U"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = RulesFile::from_toml_str("[rules]\nround_score_max = 25\n").unwrap();
        assert_eq!(config.rules.round_score_max, 25);
        assert_eq!(config.rules.single_throw_max, 80);
        assert!(!config.json_logging());

        let empty = RulesFile::from_toml_str("").unwrap();
        assert_eq!(empty.rules, RulesConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("KYYKKA_TEST_ROUND_MAX", "21");

        let toml_content = r#"
[rules]
round_score_max = ${KYYKKA_TEST_ROUND_MAX}
"#;

        let config = RulesFile::from_toml_str(toml_content).unwrap();
        assert_eq!(config.rules.round_score_max, 21);

        std::env::remove_var("KYYKKA_TEST_ROUND_MAX");
    }

    #[test]
    fn test_inverted_bounds_fail_validation() {
        let toml_content = r#"
[rules]
round_score_min = 10
round_score_max = 5
"#;

        let config = RulesFile::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ScoreError::MalformedConfiguration { .. })
        ));
    }

    #[test]
    fn test_unknown_log_format_fails_validation() {
        let config = RulesFile::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = RulesFile::from_toml_str("[rules\n").unwrap_err();
        assert!(matches!(err, ScoreError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[rules]\nsingle_throw_min = -10\n")
            .unwrap();

        let config = RulesFile::from_file(temp_file.path()).unwrap();
        assert_eq!(config.rules.single_throw_min, -10);
    }
}
