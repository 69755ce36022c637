//! Near-duplicate suppression

use crate::color::Rgb;

/// Distance below which two swatches count as the same color.
///
/// An older copy of this routine used 30; 28 keeps slightly more variety.
pub const DEFAULT_DEDUPE_THRESHOLD: f64 = 28.0;

/// Drop colors that sit within `threshold` (Euclidean, RGB space) of a color
/// kept earlier.
///
/// Greedy and order-dependent: the first occurrence always wins, so callers
/// put the color they most want to keep first.
pub fn dedupe_near(colors: &[Rgb], threshold: f64) -> Vec<Rgb> {
    let mut kept: Vec<Rgb> = Vec::with_capacity(colors.len());
    for &candidate in colors {
        if kept.iter().all(|&k| k.distance(candidate) >= threshold) {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merges_close_colors_into_first() {
        let colors = [
            Rgb::new(255, 0, 0),
            Rgb::new(253, 2, 1),
            Rgb::new(0, 255, 0),
        ];
        assert_eq!(
            dedupe_near(&colors, 30.0),
            vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let colors = [Rgb::new(253, 2, 1), Rgb::new(255, 0, 0)];
        assert_eq!(dedupe_near(&colors, 30.0), vec![Rgb::new(253, 2, 1)]);
    }

    #[test]
    fn test_distance_equal_to_threshold_is_kept() {
        // (0,0,0) -> (0,0,28) is exactly 28 apart
        let colors = [Rgb::new(0, 0, 0), Rgb::new(0, 0, 28)];
        assert_eq!(dedupe_near(&colors, 28.0).len(), 2);
        assert_eq!(dedupe_near(&colors, 28.5).len(), 1);
    }

    #[test]
    fn test_candidate_checked_against_all_kept() {
        // Third color is far from the first but close to the second
        let colors = [
            Rgb::new(0, 0, 0),
            Rgb::new(100, 0, 0),
            Rgb::new(110, 0, 0),
        ];
        assert_eq!(
            dedupe_near(&colors, DEFAULT_DEDUPE_THRESHOLD),
            vec![Rgb::new(0, 0, 0), Rgb::new(100, 0, 0)]
        );
    }

    #[test]
    fn test_exact_duplicates_collapse() {
        let blue = Rgb::new(10, 20, 200);
        assert_eq!(dedupe_near(&[blue, blue, blue], 1.0), vec![blue]);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe_near(&[], DEFAULT_DEDUPE_THRESHOLD).is_empty());
    }
}
