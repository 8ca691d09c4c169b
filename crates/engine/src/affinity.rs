//! Style affinity estimation.
//!
//! From the user's own small rating set, infer which styles they prefer and
//! in what order. Two signals per style: how highly the user rates it (mean)
//! and how often they reach for it (count). Both are min-max normalized
//! across the styles present, then averaged.
//!
//! The preferred-styles filter is deliberately strict: a style qualifies
//! only when it is maximal on *both* axes simultaneously (combined score
//! 1.0). That can come up empty, so callers go through
//! [`preferred_styles`], which applies the documented fallback.

use crate::profile::UserProfile;
use catalog::Style;
use std::collections::HashMap;
use tracing::warn;

/// A style and the user's combined affinity score for it, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleAffinity {
    pub style: Style,
    pub score: f64,
}

/// Min-max normalize one value against the observed range.
///
/// When min == max the range is degenerate (a single style, or all styles
/// tied); the normalized value is defined as 1.0 so such a style ranks
/// first instead of dividing by zero.
fn min_max(value: f64, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        (value - min) / (max - min)
    }
}

/// Score every style present in the profile, sorted descending by score.
///
/// Ties are broken by the canonical `Style::ALL` order, and the per-style
/// aggregation is independent of entry order, so the result depends only on
/// the profile's contents.
pub fn rank_styles(profile: &UserProfile) -> Vec<StyleAffinity> {
    let mut stats: HashMap<Style, (f64, u32)> = HashMap::new();
    for entry in &profile.entries {
        let slot = stats.entry(entry.style).or_insert((0.0, 0));
        slot.0 += entry.rating as f64;
        slot.1 += 1;
    }

    // Collect in canonical style order so the later stable sort has a
    // deterministic base ordering.
    let per_style: Vec<(Style, f64, f64)> = Style::ALL
        .iter()
        .filter_map(|style| {
            stats
                .get(style)
                .map(|(sum, count)| (*style, sum / *count as f64, *count as f64))
        })
        .collect();

    let (mut mean_min, mut mean_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut count_min, mut count_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for (_, mean, count) in &per_style {
        mean_min = mean_min.min(*mean);
        mean_max = mean_max.max(*mean);
        count_min = count_min.min(*count);
        count_max = count_max.max(*count);
    }

    let mut affinities: Vec<StyleAffinity> = per_style
        .into_iter()
        .map(|(style, mean, count)| StyleAffinity {
            style,
            score: (min_max(mean, mean_min, mean_max)
                + min_max(count, count_min, count_max))
                / 2.0,
        })
        .collect();

    affinities.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    affinities
}

/// The styles to recommend for, in preference order.
///
/// An explicit caller-supplied list is used verbatim (deduplicated), and the
/// affinity ranking is bypassed entirely. Otherwise, keep the styles whose
/// combined score reaches 1.0 - maximal on both normalized axes. If that
/// strict filter keeps nothing, fall back to every style present in the
/// profile, in affinity order.
pub fn preferred_styles(profile: &UserProfile, explicit: &[Style]) -> Vec<Style> {
    if !explicit.is_empty() {
        let mut seen = std::collections::HashSet::new();
        return explicit
            .iter()
            .copied()
            .filter(|style| seen.insert(*style))
            .collect();
    }

    let ranked = rank_styles(profile);
    let preferred: Vec<Style> = ranked
        .iter()
        .filter(|a| a.score >= 1.0)
        .map(|a| a.style)
        .collect();

    if preferred.is_empty() {
        warn!("Affinity filter kept no styles; falling back to all rated styles");
        return ranked.into_iter().map(|a| a.style).collect();
    }
    preferred
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{UserProfile, UserRating};

    fn profile_of(entries: &[(&str, Style, f32)]) -> UserProfile {
        let mut profile = UserProfile::default();
        for (id, style, rating) in entries {
            profile.entries.push(UserRating {
                item_id: id.to_string(),
                style: *style,
                rating: *rating,
            });
            profile.rated_items.insert(id.to_string());
        }
        profile
    }

    #[test]
    fn test_dominant_style_scores_one() {
        // Ipa dominates on both axes: highest mean and highest count
        let profile = profile_of(&[
            ("a", Style::Ipa, 5.0),
            ("b", Style::Ipa, 4.5),
            ("c", Style::Ipa, 5.0),
            ("d", Style::Stout, 3.0),
            ("e", Style::Wheat, 2.0),
        ]);

        let ranked = rank_styles(&profile);
        assert_eq!(ranked[0].style, Style::Ipa);
        assert!((ranked[0].score - 1.0).abs() < 1e-12);

        let preferred = preferred_styles(&profile, &[]);
        assert_eq!(preferred, vec![Style::Ipa]);
    }

    #[test]
    fn test_scores_lie_in_unit_interval() {
        let profile = profile_of(&[
            ("a", Style::Ipa, 5.0),
            ("b", Style::Stout, 4.0),
            ("c", Style::Stout, 4.5),
            ("d", Style::Wheat, 1.0),
            ("e", Style::Lager, 3.0),
        ]);

        for affinity in rank_styles(&profile) {
            assert!(affinity.score >= 0.0 && affinity.score <= 1.0);
        }
    }

    #[test]
    fn test_single_style_ranks_first() {
        // min == max on both axes: normalized to 1.0, not a division by zero
        let profile = profile_of(&[
            ("a", Style::Porter, 2.0),
            ("b", Style::Porter, 2.5),
            ("c", Style::Porter, 3.0),
            ("d", Style::Porter, 2.0),
            ("e", Style::Porter, 2.5),
        ]);

        let ranked = rank_styles(&profile);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].score - 1.0).abs() < 1e-12);
        assert_eq!(preferred_styles(&profile, &[]), vec![Style::Porter]);
    }

    #[test]
    fn test_split_axes_falls_back_to_all_rated_styles() {
        // Stout wins on count, Ipa on mean: nobody is maximal on both, so
        // the strict filter is empty and the fallback kicks in.
        let profile = profile_of(&[
            ("a", Style::Ipa, 5.0),
            ("b", Style::Stout, 4.0),
            ("c", Style::Stout, 4.0),
            ("d", Style::Stout, 4.0),
            ("e", Style::Wheat, 1.0),
        ]);

        let ranked = rank_styles(&profile);
        assert!(ranked.iter().all(|a| a.score < 1.0));

        let preferred = preferred_styles(&profile, &[]);
        assert_eq!(preferred.len(), 3);
    }

    #[test]
    fn test_explicit_styles_bypass_ranking() {
        let profile = profile_of(&[
            ("a", Style::Ipa, 5.0),
            ("b", Style::Ipa, 5.0),
            ("c", Style::Ipa, 5.0),
            ("d", Style::Stout, 1.0),
            ("e", Style::Wheat, 1.0),
        ]);

        let preferred = preferred_styles(&profile, &[Style::Sour, Style::Ginger, Style::Sour]);
        assert_eq!(preferred, vec![Style::Sour, Style::Ginger]);
    }

    #[test]
    fn test_affinity_invariant_to_entry_order() {
        let entries = [
            ("a", Style::Ipa, 5.0),
            ("b", Style::Ipa, 4.0),
            ("c", Style::Stout, 3.0),
            ("d", Style::Wheat, 2.0),
            ("e", Style::Lager, 4.5),
        ];
        let mut reversed = entries;
        reversed.reverse();

        let forward = rank_styles(&profile_of(&entries));
        let backward = rank_styles(&profile_of(&reversed));

        assert_eq!(forward.len(), backward.len());
        for (f, b) in forward.iter().zip(backward.iter()) {
            assert_eq!(f.style, b.style);
            assert!((f.score - b.score).abs() < 1e-12);
        }
    }
}
