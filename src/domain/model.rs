use serde::{Deserialize, Serialize};
use std::fmt;

/// 宿主應用提供的分數界限記錄，由 `ScoreRules::from_config` 驗證後使用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub single_throw_min: i32,
    pub single_throw_max: i32,
    pub round_score_min: i32,
    pub round_score_max: i32,
    pub sentinels: Vec<String>,
    pub empty_throw_sentinel: Option<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            // all pappi kyykkas pushed in from the line
            single_throw_min: -40,
            // all kyykkas out
            single_throw_max: 80,
            // 40 kyykkas at 2 points each
            round_score_min: -80,
            // every kyykka out with one throw, plus 1 point for an unused throw
            round_score_max: 19,
            sentinels: vec!["H".to_string(), "F".to_string(), "E".to_string()],
            empty_throw_sentinel: None,
        }
    }
}

/// What to do with a throw field that is empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyThrowPolicy {
    Reject,
    /// Treat the empty field as this sentinel code (already uppercase).
    AcceptAs(String),
}

/// A throw that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum NormalizedThrow {
    Sentinel(String),
    Score(i32),
}

impl NormalizedThrow {
    /// 正規化後的字串形式：大寫哨兵代碼或整數
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NormalizedThrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedThrow::Sentinel(code) => f.write_str(code),
            NormalizedThrow::Score(value) => write!(f, "{}", value),
        }
    }
}

/// Meaning of a normalized throw on the score sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrowKind {
    /// "Hauki": the throw hit nothing.
    Hauki,
    Fault,
    /// Throw left unused, worth one point.
    Unused,
    Valid(i32),
    /// A configured sentinel with no known scoring meaning.
    Other(String),
}

impl ThrowKind {
    pub fn points(&self) -> i32 {
        match self {
            ThrowKind::Hauki | ThrowKind::Fault | ThrowKind::Other(_) => 0,
            ThrowKind::Unused => 1,
            ThrowKind::Valid(value) => *value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub team1_total: i32,
    pub team2_total: i32,
}

/// Position of one round-score field in the `score_<team>_<round>` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScoreField {
    pub team: u32,
    pub round: u32,
}

/// The fixed two-team, two-round form shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInputs {
    pub team1_round1: String,
    pub team1_round2: String,
    pub team2_round1: String,
    pub team2_round2: String,
}

impl RoundInputs {
    pub fn fields(&self) -> [(ScoreField, &str); 4] {
        [
            (ScoreField::new(1, 1), self.team1_round1.as_str()),
            (ScoreField::new(1, 2), self.team1_round2.as_str()),
            (ScoreField::new(2, 1), self.team2_round1.as_str()),
            (ScoreField::new(2, 2), self.team2_round2.as_str()),
        ]
    }
}

/// Result of feeding one input event to the score sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Accepted { value: i32, totals: TeamTotals },
    /// The field was cleared and the user notified.
    Rejected { message: String },
}
