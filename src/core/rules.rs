use crate::domain::model::{EmptyThrowPolicy, RulesConfig};
use crate::domain::ports::RulesProvider;
use crate::utils::error::{Result, ScoreError};
use crate::utils::validation::{validate_min_max, validate_non_empty_string};

/// Number of rounds a game is played in.
pub const ROUNDS_PER_GAME: i32 = 2;

/// Immutable score bounds shared by every validator call.
///
/// Built once at startup and passed by reference; nothing mutates it
/// afterwards, so any number of callers may read it at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRules {
    single_throw_min: i32,
    single_throw_max: i32,
    round_score_min: i32,
    round_score_max: i32,
    sentinels: Vec<String>,
    empty_throw: EmptyThrowPolicy,
}

impl ScoreRules {
    /// Bounds only, with the default sentinel set and a rejecting empty-throw policy.
    pub fn new(
        single_throw_min: i32,
        single_throw_max: i32,
        round_score_min: i32,
        round_score_max: i32,
    ) -> Result<Self> {
        Self::from_config(&RulesConfig {
            single_throw_min,
            single_throw_max,
            round_score_min,
            round_score_max,
            ..RulesConfig::default()
        })
    }

    pub fn from_provider<P: RulesProvider + ?Sized>(provider: &P) -> Result<Self> {
        Self::from_config(&provider.rules_config())
    }

    /// 驗證配置記錄並建立規則；任何 min > max 立即失敗
    pub fn from_config(config: &RulesConfig) -> Result<Self> {
        validate_min_max("single_throw", config.single_throw_min, config.single_throw_max)?;
        validate_min_max("round_score", config.round_score_min, config.round_score_max)?;

        if config.sentinels.is_empty() {
            return Err(ScoreError::MalformedConfiguration {
                field: "sentinels".to_string(),
                message: "at least one sentinel code is required".to_string(),
            });
        }

        let mut sentinels: Vec<String> = Vec::with_capacity(config.sentinels.len());
        for code in &config.sentinels {
            validate_non_empty_string("sentinels", code).map_err(|_| {
                ScoreError::MalformedConfiguration {
                    field: "sentinels".to_string(),
                    message: "sentinel codes cannot be blank".to_string(),
                }
            })?;
            let code = code.trim().to_uppercase();
            if code.parse::<i64>().is_ok() {
                return Err(ScoreError::MalformedConfiguration {
                    field: "sentinels".to_string(),
                    message: format!("sentinel '{}' would shadow a numeric throw", code),
                });
            }
            if !sentinels.contains(&code) {
                sentinels.push(code);
            }
        }

        let empty_throw = match &config.empty_throw_sentinel {
            None => EmptyThrowPolicy::Reject,
            Some(code) => {
                let code = code.trim().to_uppercase();
                if !sentinels.contains(&code) {
                    return Err(ScoreError::MalformedConfiguration {
                        field: "empty_throw_sentinel".to_string(),
                        message: format!(
                            "'{}' is not one of the sentinels {}",
                            code,
                            sentinels.join(", ")
                        ),
                    });
                }
                EmptyThrowPolicy::AcceptAs(code)
            }
        };

        tracing::debug!(
            "Score rules: throw [{}, {}], round [{}, {}], sentinels {:?}",
            config.single_throw_min,
            config.single_throw_max,
            config.round_score_min,
            config.round_score_max,
            sentinels
        );

        Ok(Self {
            single_throw_min: config.single_throw_min,
            single_throw_max: config.single_throw_max,
            round_score_min: config.round_score_min,
            round_score_max: config.round_score_max,
            sentinels,
            empty_throw,
        })
    }

    pub fn single_throw_min(&self) -> i32 {
        self.single_throw_min
    }

    pub fn single_throw_max(&self) -> i32 {
        self.single_throw_max
    }

    pub fn round_score_min(&self) -> i32 {
        self.round_score_min
    }

    pub fn round_score_max(&self) -> i32 {
        self.round_score_max
    }

    pub fn total_score_min(&self) -> i32 {
        self.round_score_min.saturating_mul(ROUNDS_PER_GAME)
    }

    pub fn total_score_max(&self) -> i32 {
        self.round_score_max.saturating_mul(ROUNDS_PER_GAME)
    }

    /// Uppercase sentinel codes in configuration order.
    pub fn sentinels(&self) -> &[String] {
        &self.sentinels
    }

    pub fn empty_throw(&self) -> &EmptyThrowPolicy {
        &self.empty_throw
    }

    pub fn is_sentinel(&self, code: &str) -> bool {
        self.sentinels.iter().any(|s| s == code)
    }

    pub fn contains_throw(&self, value: i64) -> bool {
        (i64::from(self.single_throw_min)..=i64::from(self.single_throw_max)).contains(&value)
    }

    pub fn contains_round(&self, value: i64) -> bool {
        (i64::from(self.round_score_min)..=i64::from(self.round_score_max)).contains(&value)
    }

    pub fn contains_total(&self, value: i64) -> bool {
        (i64::from(self.total_score_min())..=i64::from(self.total_score_max())).contains(&value)
    }

    pub fn round_rejection_message(&self) -> String {
        format!(
            "Round score must be between {} and {}",
            self.round_score_min, self.round_score_max
        )
    }

    pub fn throw_rejection_message(&self) -> String {
        format!(
            "Invalid throw score. Use a number between {} and {}, or {}",
            self.single_throw_min,
            self.single_throw_max,
            self.sentinels.join(", ")
        )
    }
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            single_throw_min: -40,
            single_throw_max: 80,
            round_score_min: -80,
            round_score_max: 19,
            sentinels: vec!["H".to_string(), "F".to_string(), "E".to_string()],
            empty_throw: EmptyThrowPolicy::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_default_config() {
        let from_config = ScoreRules::from_config(&RulesConfig::default()).unwrap();
        assert_eq!(from_config, ScoreRules::default());
    }

    #[test]
    fn test_inverted_round_bounds_fail_fast() {
        let err = ScoreRules::new(-40, 80, 10, 5).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::MalformedConfiguration { ref field, .. } if field == "round_score"
        ));
    }

    #[test]
    fn test_inverted_throw_bounds_fail_fast() {
        assert!(ScoreRules::new(80, -40, -80, 19).is_err());
    }

    #[test]
    fn test_equal_bounds_are_allowed() {
        let rules = ScoreRules::new(0, 0, 0, 0).unwrap();
        assert!(rules.contains_throw(0));
        assert!(!rules.contains_throw(1));
    }

    #[test]
    fn test_sentinels_are_uppercased_and_deduplicated() {
        let config = RulesConfig {
            sentinels: vec![
                "h".to_string(),
                "u".to_string(),
                "-".to_string(),
                "E".to_string(),
                "H".to_string(),
            ],
            ..RulesConfig::default()
        };
        let rules = ScoreRules::from_config(&config).unwrap();
        assert_eq!(rules.sentinels(), &["H", "U", "-", "E"]);
    }

    #[test]
    fn test_numeric_sentinel_rejected() {
        let config = RulesConfig {
            sentinels: vec!["H".to_string(), "7".to_string()],
            ..RulesConfig::default()
        };
        assert!(ScoreRules::from_config(&config).is_err());
    }

    #[test]
    fn test_empty_sentinel_set_rejected() {
        let config = RulesConfig {
            sentinels: vec![],
            ..RulesConfig::default()
        };
        assert!(ScoreRules::from_config(&config).is_err());
    }

    #[test]
    fn test_empty_throw_sentinel_must_be_configured() {
        let config = RulesConfig {
            empty_throw_sentinel: Some("U".to_string()),
            ..RulesConfig::default()
        };
        assert!(ScoreRules::from_config(&config).is_err());

        let config = RulesConfig {
            empty_throw_sentinel: Some("e".to_string()),
            ..RulesConfig::default()
        };
        let rules = ScoreRules::from_config(&config).unwrap();
        assert_eq!(rules.empty_throw(), &EmptyThrowPolicy::AcceptAs("E".to_string()));
    }

    #[test]
    fn test_total_bounds_are_two_rounds() {
        let rules = ScoreRules::default();
        assert_eq!(rules.total_score_min(), -160);
        assert_eq!(rules.total_score_max(), 38);
        assert!(rules.contains_total(38));
        assert!(!rules.contains_total(39));
    }

    #[test]
    fn test_rejection_messages() {
        let rules = ScoreRules::default();
        assert_eq!(rules.round_rejection_message(), "Round score must be between -80 and 19");
        assert_eq!(
            rules.throw_rejection_message(),
            "Invalid throw score. Use a number between -40 and 80, or H, F, E"
        );
    }
}
