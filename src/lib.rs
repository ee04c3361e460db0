pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::RulesFile;

pub use crate::core::aggregate::{compute_fixed_totals, compute_totals, parse_or_zero};
pub use crate::core::round::validate_round;
pub use crate::core::rules::ScoreRules;
pub use crate::core::sheet::ScoreSheet;
pub use crate::core::throw::{classify, validate_throw};
pub use crate::domain::model::{
    NormalizedThrow, RoundInputs, RulesConfig, ScoreField, TeamTotals, ThrowKind,
};
pub use crate::domain::ports::{Notifier, RecordingNotifier, TracingNotifier};
pub use crate::utils::error::{InvalidRound, InvalidThrow, Result, ScoreError};
