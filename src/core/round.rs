use crate::core::rules::ScoreRules;
use crate::utils::error::InvalidRound;

/// Strictly validate one round total.
///
/// Unlike [`crate::core::aggregate::parse_or_zero`], a value that does not
/// parse is a hard rejection here.
pub fn validate_round(rules: &ScoreRules, raw: &str) -> Result<i32, InvalidRound> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| reject(raw, "not a whole number"))?;

    if !rules.contains_round(value) {
        return Err(reject(
            raw,
            &format!(
                "must be between {} and {}",
                rules.round_score_min(),
                rules.round_score_max()
            ),
        ));
    }

    i32::try_from(value).map_err(|_| reject(raw, "number is too large"))
}

fn reject(raw: &str, reason: &str) -> InvalidRound {
    tracing::debug!("Round score rejected: {:?} ({})", raw, reason);
    InvalidRound {
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}
