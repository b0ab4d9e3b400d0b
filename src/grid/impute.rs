//! Team-average skill for players without ratings.

use crate::skill::{NormalizedSkill, SKILL_LEN};

/// Per-dimension mean of every teammate that has a vector, rounded to the
/// nearest whole rating.
///
/// Placeholder entries only count towards a dimension when no teammate
/// has a real rating there. Returns the zero vector when nobody has one.
pub fn team_average(skills: &[Option<NormalizedSkill>]) -> NormalizedSkill {
    let rated: Vec<&NormalizedSkill> = skills.iter().flatten().collect();
    if rated.is_empty() {
        return NormalizedSkill::zeros();
    }

    let mut values = [0.0f32; SKILL_LEN];
    let mut placeholder_dims = Vec::new();
    for (dim, value) in values.iter_mut().enumerate() {
        let (sum, count) = rated
            .iter()
            .filter(|s| !s.is_placeholder(dim))
            .fold((0.0f64, 0usize), |(sum, n), s| {
                (sum + s.values()[dim] as f64, n + 1)
            });
        let (sum, count) = if count == 0 {
            placeholder_dims.push(dim);
            let sum: f64 = rated.iter().map(|s| s.values()[dim] as f64).sum();
            (sum, rated.len())
        } else {
            (sum, count)
        };
        *value = (sum / count as f64).round() as f32;
    }

    let mut average = NormalizedSkill::new(values);
    for dim in placeholder_dims {
        average.mark_placeholder(dim);
    }
    average
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{normalize, RawField, SkillPayload, LEGACY_PLACEHOLDER_INDEX};

    fn flat(v: f32) -> NormalizedSkill {
        NormalizedSkill::new([v; SKILL_LEN])
    }

    fn legacy(v: f64) -> NormalizedSkill {
        let mut fields = vec![RawField::Text("70 kg".into())];
        fields.extend((0..SKILL_LEN - 1).map(|_| RawField::Number(v)));
        normalize(&SkillPayload::from_fields(fields)).unwrap()
    }

    #[test]
    fn averages_and_rounds() {
        let skills = vec![Some(flat(60.0)), None, Some(flat(65.0))];
        let avg = team_average(&skills);
        // 62.5 rounds away from zero.
        assert!(avg.values().iter().all(|&v| v == 63.0));
    }

    #[test]
    fn missing_players_do_not_dilute_the_mean() {
        let skills = vec![Some(flat(70.0)), None, None, None];
        assert_eq!(team_average(&skills).values(), &[70.0; SKILL_LEN]);
    }

    #[test]
    fn no_rated_teammates_gives_zeros() {
        assert_eq!(team_average(&[None, None]), NormalizedSkill::zeros());
        assert_eq!(team_average(&[]), NormalizedSkill::zeros());
    }

    #[test]
    fn placeholders_are_excluded_when_real_ratings_exist() {
        let skills = vec![Some(legacy(50.0)), Some(flat(61.0))];
        let avg = team_average(&skills);
        // Only the current-schema player rates dimension 11.
        assert_eq!(avg.values()[LEGACY_PLACEHOLDER_INDEX], 61.0);
        assert!(!avg.is_placeholder(LEGACY_PLACEHOLDER_INDEX));
        // Elsewhere both count: (50 + 61) / 2 = 55.5 -> 56.
        assert_eq!(avg.values()[0], 56.0);
    }

    #[test]
    fn all_legacy_team_keeps_placeholder() {
        let skills = vec![Some(legacy(50.0)), Some(legacy(60.0))];
        let avg = team_average(&skills);
        assert_eq!(avg.values()[LEGACY_PLACEHOLDER_INDEX], 75.0);
        assert!(avg.is_placeholder(LEGACY_PLACEHOLDER_INDEX));
        assert_eq!(avg.values()[0], 55.0);
    }
}
