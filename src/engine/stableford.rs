//! Stableford scoring, used by the Nancy Millar Trophy.
//!
//! Each hole converts the net score relative to par into points (higher is
//! better); the competition compares point totals across the field rather
//! than producing a win/loss.

/// Handicap strokes received on a hole. One stroke on every hole whose
/// stroke index is within the handicap; handicaps over eighteen receive a
/// second stroke on the lowest-indexed holes.
pub fn strokes_received(stroke_index: i64, handicap: i64) -> i64 {
    if handicap <= 0 || stroke_index < 1 {
        return 0;
    }

    let base = handicap / 18;
    let extra = i64::from(stroke_index <= handicap % 18);
    base + extra
}

pub fn hole_points(
    gross: i64,
    par: i64,
    stroke_index: i64,
    handicap: i64,
) -> i64 {
    let net = gross - strokes_received(stroke_index, handicap);
    match net - par {
        d if d <= -3 => 5,
        -2 => 4,
        -1 => 3,
        0 => 2,
        1 => 1,
        _ => 0,
    }
}

/// Total points over the holes played so far. Holes without a gross score
/// (or without a stroke index on the card) are simply not counted yet.
pub fn stableford_total(
    holes: impl IntoIterator<Item = (Option<i64>, i64, Option<i64>)>,
    handicap: i64,
) -> i64 {
    holes
        .into_iter()
        .filter_map(|(gross, par, stroke_index)| {
            Some(hole_points(gross?, par, stroke_index?, handicap))
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_stroke_within_handicap() {
        // Par 4, stroke index 10, handicap 18, gross 5: one stroke
        // received, net par, two points.
        assert_eq!(strokes_received(10, 18), 1);
        assert_eq!(hole_points(5, 4, 10, 18), 2);
    }

    #[test]
    fn no_stroke_beyond_handicap() {
        assert_eq!(strokes_received(10, 9), 0);
        assert_eq!(strokes_received(9, 9), 1);
        assert_eq!(strokes_received(1, 0), 0);
    }

    #[test]
    fn high_handicaps_receive_multiple_strokes() {
        // Handicap 20: two strokes on indexes 1 and 2, one elsewhere.
        assert_eq!(strokes_received(1, 20), 2);
        assert_eq!(strokes_received(2, 20), 2);
        assert_eq!(strokes_received(3, 20), 1);
        assert_eq!(strokes_received(18, 20), 1);
        // Handicap 36: two strokes everywhere.
        assert_eq!(strokes_received(18, 36), 2);
    }

    #[test]
    fn points_table() {
        // Scratch player on a par four.
        assert_eq!(hole_points(1, 4, 1, 0), 5);
        assert_eq!(hole_points(2, 4, 1, 0), 4);
        assert_eq!(hole_points(3, 4, 1, 0), 3);
        assert_eq!(hole_points(4, 4, 1, 0), 2);
        assert_eq!(hole_points(5, 4, 1, 0), 1);
        assert_eq!(hole_points(6, 4, 1, 0), 0);
        assert_eq!(hole_points(9, 4, 1, 0), 0);
    }

    #[test]
    fn totals_skip_unplayed_holes() {
        let holes = vec![
            (Some(4), 4, Some(1)),
            (None, 4, Some(2)),
            (Some(3), 4, Some(3)),
            (Some(5), 5, None),
        ];
        // 2 (par) + 3 (birdie); the unscored and unindexed holes wait.
        assert_eq!(stableford_total(holes, 0), 5);
    }
}
