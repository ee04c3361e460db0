pub mod aggregate;
pub mod round;
pub mod rules;
pub mod sheet;
pub mod throw;

pub use crate::domain::model::{
    EmptyThrowPolicy, FieldOutcome, NormalizedThrow, RoundInputs, RulesConfig, ScoreField,
    TeamTotals, ThrowKind,
};
pub use crate::domain::ports::{Notifier, RecordingNotifier, RulesProvider, TracingNotifier};
pub use crate::utils::error::Result;
