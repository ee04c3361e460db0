use crate::domain::model::{RoundInputs, ScoreField, TeamTotals};
use regex::Regex;
use std::sync::OnceLock;

pub const FIELD_PREFIX: &str = "score_";

fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^score_([0-9]+)_([0-9]+)$").expect("score field pattern is valid")
    })
}

impl ScoreField {
    pub fn new(team: u32, round: u32) -> Self {
        Self { team, round }
    }

    /// 解析 `score_<team>_<round>` 欄位名稱
    pub fn parse(name: &str) -> Option<Self> {
        let caps = field_pattern().captures(name.trim())?;
        let team = caps[1].parse().ok()?;
        let round = caps[2].parse().ok()?;
        Some(Self { team, round })
    }

    pub fn name(&self) -> String {
        format!("{}{}_{}", FIELD_PREFIX, self.team, self.round)
    }
}

/// Lenient integer parse used while the user is still typing.
///
/// Reads an optional sign and the leading run of digits, ignoring whatever
/// follows; anything without leading digits counts as `0`.
pub fn parse_or_zero(raw: &str) -> i32 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 0;
    }
    match digits.parse::<i64>() {
        Ok(magnitude) => {
            let value = if negative { -magnitude } else { magnitude };
            value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
        }
        Err(_) if negative => i32::MIN,
        Err(_) => i32::MAX,
    }
}

/// Sum raw round fields into the two team totals.
///
/// Fields are routed by their `score_<team>_<round>` name; names outside the
/// convention and teams other than 1 and 2 are ignored. Pure and total.
pub fn compute_totals<'a, I>(fields: I) -> TeamTotals
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    compute_field_totals(
        fields
            .into_iter()
            .filter_map(|(name, raw)| ScoreField::parse(name).map(|field| (field, raw))),
    )
}

/// Same as [`compute_totals`] for fields that are already parsed.
pub fn compute_field_totals<'a, I>(fields: I) -> TeamTotals
where
    I: IntoIterator<Item = (ScoreField, &'a str)>,
{
    let mut totals = TeamTotals::default();
    for (field, raw) in fields {
        let value = parse_or_zero(raw);
        match field.team {
            1 => totals.team1_total = totals.team1_total.saturating_add(value),
            2 => totals.team2_total = totals.team2_total.saturating_add(value),
            _ => {}
        }
    }
    totals
}

/// The fixed four-field form.
pub fn compute_fixed_totals(inputs: &RoundInputs) -> TeamTotals {
    compute_field_totals(inputs.fields())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_field_naming() {
        assert_eq!(ScoreField::parse("score_1_2"), Some(ScoreField::new(1, 2)));
        assert_eq!(ScoreField::parse("score_12_3"), Some(ScoreField::new(12, 3)));
        assert_eq!(ScoreField::parse("score_1"), None);
        assert_eq!(ScoreField::parse("team1-total"), None);
        assert_eq!(ScoreField::parse("score_a_1"), None);
        assert_eq!(ScoreField::new(2, 1).name(), "score_2_1");
    }

    #[test]
    fn test_team_prefix_without_round_number_is_ignored() {
        let totals = compute_totals([
            ("score_1_1", "4"),
            ("score_1_total", "9"),
            ("score_2_x", "2"),
        ]);
        assert_eq!(
            totals,
            TeamTotals {
                team1_total: 4,
                team2_total: 0
            }
        );
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero("15"), 15);
        assert_eq!(parse_or_zero(" -7"), -7);
        assert_eq!(parse_or_zero("+3"), 3);
        assert_eq!(parse_or_zero("12abc"), 12);
        assert_eq!(parse_or_zero(""), 0);
        assert_eq!(parse_or_zero("-"), 0);
        assert_eq!(parse_or_zero("abc"), 0);
        assert_eq!(parse_or_zero("99999999999999999999999"), i32::MAX);
    }

    #[test]
    fn test_named_fields_with_empty_value() {
        let fields = [
            ("score_1_1", "5"),
            ("score_1_2", "10"),
            ("score_2_1", ""),
            ("score_2_2", "3"),
        ];
        assert_eq!(
            compute_totals(fields),
            TeamTotals {
                team1_total: 15,
                team2_total: 3
            }
        );
    }

    #[test]
    fn test_variable_number_of_rounds_and_foreign_fields() {
        let fields = [
            ("score_1_1", "-4"),
            ("score_1_2", "2"),
            ("score_1_3", "1"),
            ("score_2_1", "x"),
            ("score_3_1", "100"),
            ("player_1", "42"),
        ];
        assert_eq!(
            compute_totals(fields),
            TeamTotals {
                team1_total: -1,
                team2_total: 0
            }
        );
    }

    #[test]
    fn test_fixed_shape_matches_named_shape() {
        let inputs = RoundInputs {
            team1_round1: "-20".to_string(),
            team1_round2: "4".to_string(),
            team2_round1: "7a".to_string(),
            team2_round2: "".to_string(),
        };
        let named: Vec<(String, &str)> = inputs
            .fields()
            .iter()
            .map(|(field, raw)| (field.name(), *raw))
            .collect();
        let expected = compute_totals(named.iter().map(|(n, r)| (n.as_str(), *r)));

        let totals = compute_fixed_totals(&inputs);
        assert_eq!(totals, expected);
        assert_eq!(totals.team1_total, -16);
        assert_eq!(totals.team2_total, 7);
        assert_eq!(compute_fixed_totals(&inputs), totals);
    }
}
