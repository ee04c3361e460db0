use crate::core::aggregate::compute_field_totals;
use crate::core::round::validate_round;
use crate::core::rules::ScoreRules;
use crate::core::throw::validate_throw;
use crate::domain::model::{FieldOutcome, NormalizedThrow, ScoreField, TeamTotals};
use crate::domain::ports::Notifier;
use crate::utils::error::InvalidThrow;
use std::collections::BTreeMap;

/// Raw form state for one game-entry session.
///
/// Input events go through the validators; rejected values are cleared from
/// their field and reported through the [`Notifier`], accepted values are
/// kept verbatim and the team totals recomputed from whatever is left.
pub struct ScoreSheet<'r, N: Notifier> {
    rules: &'r ScoreRules,
    notifier: N,
    rounds: BTreeMap<ScoreField, String>,
    throws: BTreeMap<String, NormalizedThrow>,
}

impl<'r, N: Notifier> ScoreSheet<'r, N> {
    pub fn new(rules: &'r ScoreRules, notifier: N) -> Self {
        Self {
            rules,
            notifier,
            rounds: BTreeMap::new(),
            throws: BTreeMap::new(),
        }
    }

    pub fn rules(&self) -> &ScoreRules {
        self.rules
    }

    /// Keystroke while editing a round field: no validation, totals use the
    /// lenient parse so partial values like `-` count as zero.
    pub fn input_round(&mut self, field: ScoreField, raw: &str) -> TeamTotals {
        self.rounds.insert(field, raw.to_string());
        self.totals()
    }

    /// Field committed (change/blur): validate strictly.
    pub fn commit_round(&mut self, field: ScoreField, raw: &str) -> FieldOutcome {
        match validate_round(self.rules, raw) {
            Ok(value) => {
                self.rounds.insert(field, value.to_string());
                let totals = self.totals();
                tracing::debug!(
                    "{} = {} -> totals {}/{}",
                    field.name(),
                    value,
                    totals.team1_total,
                    totals.team2_total
                );
                FieldOutcome::Accepted { value, totals }
            }
            Err(_) => {
                self.rounds.remove(&field);
                let message = self.rules.round_rejection_message();
                self.notifier.notify(&message);
                FieldOutcome::Rejected { message }
            }
        }
    }

    /// [`Self::commit_round`] addressed by form field name; `None` when the
    /// name is outside the `score_<team>_<round>` convention.
    pub fn commit_named(&mut self, name: &str, raw: &str) -> Option<FieldOutcome> {
        ScoreField::parse(name).map(|field| self.commit_round(field, raw))
    }

    pub fn commit_throw(&mut self, key: &str, raw: &str) -> Result<NormalizedThrow, InvalidThrow> {
        match validate_throw(self.rules, raw) {
            Ok(throw) => {
                self.throws.insert(key.to_string(), throw.clone());
                Ok(throw)
            }
            Err(err) => {
                self.throws.remove(key);
                self.notifier.notify(&self.rules.throw_rejection_message());
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.rounds.clear();
        self.throws.clear();
    }

    pub fn totals(&self) -> TeamTotals {
        compute_field_totals(self.rounds.iter().map(|(f, raw)| (*f, raw.as_str())))
    }

    /// Current raw round values keyed by form field name.
    pub fn fields(&self) -> BTreeMap<String, String> {
        self.rounds
            .iter()
            .map(|(field, raw)| (field.name(), raw.clone()))
            .collect()
    }

    pub fn round_value(&self, field: ScoreField) -> Option<&str> {
        self.rounds.get(&field).map(String::as_str)
    }

    pub fn throws(&self) -> &BTreeMap<String, NormalizedThrow> {
        &self.throws
    }

    /// True when both totals fit the two-round game bounds.
    pub fn totals_in_bounds(&self) -> bool {
        let totals = self.totals();
        self.rules.contains_total(i64::from(totals.team1_total))
            && self.rules.contains_total(i64::from(totals.team2_total))
    }
}
