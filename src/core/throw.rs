use crate::core::rules::ScoreRules;
use crate::domain::model::{EmptyThrowPolicy, NormalizedThrow, ThrowKind};
use crate::utils::error::InvalidThrow;

pub const THROWS_PER_PLAYER: u32 = 2;
pub const PLAYERS_PER_ROUND: u32 = 2;
pub const THROWS_PER_ROUND: u32 = THROWS_PER_PLAYER * PLAYERS_PER_ROUND;

/// Validate and normalize one raw throw.
///
/// Sentinel codes match case-insensitively after trimming. Anything else is
/// reduced to its digits and minus signs, read as an optional leading minus
/// followed by a run of digits, and must land inside the configured
/// single-throw bounds. Never panics.
pub fn validate_throw(rules: &ScoreRules, raw: &str) -> Result<NormalizedThrow, InvalidThrow> {
    let trimmed = raw.trim();
    let upper = trimmed.to_uppercase();

    if upper.is_empty() {
        return match rules.empty_throw() {
            EmptyThrowPolicy::AcceptAs(code) => {
                tracing::debug!("Empty throw accepted as {}", code);
                Ok(NormalizedThrow::Sentinel(code.clone()))
            }
            EmptyThrowPolicy::Reject => Err(reject(raw, "input required")),
        };
    }

    if rules.is_sentinel(&upper) {
        return Ok(NormalizedThrow::Sentinel(upper));
    }

    // 只保留數字與減號，再讀取可選的開頭減號與其後連續的數字
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    let (negative, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Err(reject(raw, "not a number or sentinel code"));
    }

    let magnitude = digits
        .parse::<i64>()
        .map_err(|_| reject(raw, "number is too large"))?;
    let value = if negative { -magnitude } else { magnitude };

    if !rules.contains_throw(value) {
        return Err(reject(
            raw,
            &format!(
                "must be between {} and {}",
                rules.single_throw_min(),
                rules.single_throw_max()
            ),
        ));
    }

    let value = i32::try_from(value).map_err(|_| reject(raw, "number is too large"))?;
    Ok(NormalizedThrow::Score(value))
}

fn reject(raw: &str, reason: &str) -> InvalidThrow {
    tracing::debug!("Throw rejected: {:?} ({})", raw, reason);
    InvalidThrow {
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// 判斷已正規化投擲的計分意義
pub fn classify(throw: &NormalizedThrow) -> ThrowKind {
    match throw {
        NormalizedThrow::Score(value) => ThrowKind::Valid(*value),
        NormalizedThrow::Sentinel(code) => match code.as_str() {
            "H" => ThrowKind::Hauki,
            "F" => ThrowKind::Fault,
            "E" => ThrowKind::Unused,
            other => ThrowKind::Other(other.to_string()),
        },
    }
}

/// Sum of points for a player's or a team's validated throws.
pub fn throw_points<'a, I>(throws: I) -> i32
where
    I: IntoIterator<Item = &'a NormalizedThrow>,
{
    throws
        .into_iter()
        .map(|t| classify(t).points())
        .fold(0i32, i32::saturating_add)
}

/// 1-based throw number within a team's sheet: `round` counts from 1, the
/// player is 1 or 2 within the round and throws twice.
pub fn throw_index(round: u32, player_position: u32, throw: u32) -> Option<u32> {
    if round == 0
        || !(1..=PLAYERS_PER_ROUND).contains(&player_position)
        || !(1..=THROWS_PER_PLAYER).contains(&throw)
    {
        return None;
    }
    let round_base = (round - 1).checked_mul(THROWS_PER_ROUND)?;
    let player_offset = (player_position - 1) * THROWS_PER_PLAYER;
    round_base.checked_add(player_offset + throw)
}

/// 0-based index of the team member throwing at `player_position` in `round`.
/// The pair rotates every two rounds.
pub fn player_for_round(round: u32, player_position: u32, team_size: u32) -> Option<u32> {
    if round == 0 || team_size == 0 || !(1..=PLAYERS_PER_ROUND).contains(&player_position) {
        return None;
    }
    let base = ((round - 1) / 2 * 2) % team_size;
    Some((base + player_position - 1) % team_size)
}
