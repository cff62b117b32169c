//! Head-to-head match-play resolution.
//!
//! The winner of each hole is whoever took fewer strokes; equal strokes
//! halve the hole. The match outcome is the net holes won. A match is over
//! early ("clinched") once the trailing side cannot catch up even by winning
//! every remaining hole.

use super::HOLES_PER_ROUND;

/// Hole-count tallies for one pairwise contest. Only holes where both sides
/// have a recorded score are counted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HoleTally {
    pub holes_won_first: i64,
    pub holes_won_second: i64,
    pub holes_played: i64,
}

impl HoleTally {
    pub fn from_scores(
        scores: impl IntoIterator<Item = (Option<i64>, Option<i64>)>,
    ) -> Self {
        let mut tally = HoleTally::default();

        for (first, second) in scores {
            let (first, second) = match (first, second) {
                (Some(a), Some(b)) => (a, b),
                // Not yet played; never an error.
                _ => continue,
            };

            tally.holes_played += 1;
            if first < second {
                tally.holes_won_first += 1;
            } else if second < first {
                tally.holes_won_second += 1;
            }
        }

        tally
    }

    pub fn holes_remaining(&self) -> i64 {
        HOLES_PER_ROUND - self.holes_played
    }

    pub fn difference(&self) -> i64 {
        (self.holes_won_first - self.holes_won_second).abs()
    }

    /// The trailing side cannot equal the leader even winning every
    /// remaining hole.
    pub fn is_clinched(&self) -> bool {
        self.difference() > self.holes_remaining()
    }

    pub fn is_complete(&self) -> bool {
        self.holes_played == HOLES_PER_ROUND || self.is_clinched()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winner {
    First,
    Second,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairwiseResult {
    pub tally: HoleTally,
    pub complete: bool,
    /// Conventional golf result string; present only once the contest is
    /// settled ("3/2", "2up", "AS").
    pub result: Option<String>,
}

impl PairwiseResult {
    /// The side with strictly more holes won; `None` is all square.
    pub fn winner(&self) -> Option<Winner> {
        match self
            .tally
            .holes_won_first
            .cmp(&self.tally.holes_won_second)
        {
            std::cmp::Ordering::Greater => Some(Winner::First),
            std::cmp::Ordering::Less => Some(Winner::Second),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Human-readable standing for live display ("3 up thru 15").
    pub fn summary(&self) -> String {
        if let Some(result) = &self.result {
            return result.clone();
        }
        if self.tally.holes_played == 0 {
            return "not started".to_string();
        }
        if self.tally.difference() == 0 {
            format!("all square thru {}", self.tally.holes_played)
        } else {
            format!(
                "{} up thru {}",
                self.tally.difference(),
                self.tally.holes_played
            )
        }
    }
}

pub fn resolve_pair(
    scores: impl IntoIterator<Item = (Option<i64>, Option<i64>)>,
) -> PairwiseResult {
    let tally = HoleTally::from_scores(scores);
    let complete = tally.is_complete();

    PairwiseResult {
        tally,
        complete,
        result: complete.then(|| result_string(&tally)),
    }
}

/// The legal published results for a given number of holes played. A match
/// clinched with `r` holes remaining can only ever finish `r+1` or `r+2` up
/// (any earlier clinch would have ended it sooner); a match that goes the
/// full eighteen ends all square or a plain "N up".
pub fn valid_results(holes_played: i64) -> Vec<String> {
    if holes_played == HOLES_PER_ROUND {
        let mut out = vec!["AS".to_string()];
        out.push("1up".to_string());
        out.push("2up".to_string());
        return out;
    }

    let remaining = HOLES_PER_ROUND - holes_played;
    vec![
        format!("{}/{}", remaining + 1, remaining),
        format!("{}/{}", remaining + 2, remaining),
    ]
}

/// Formats a completed tally as a conventional golf result, snapping an
/// out-of-range margin to the nearest legal closeout rather than emitting an
/// impossible score.
fn result_string(tally: &HoleTally) -> String {
    if tally.holes_played == HOLES_PER_ROUND {
        // A full card with a margin above two can only arise from holes
        // filled out of play order; any sequential match would have
        // clinched earlier. Snap to the widest legal 18-hole margin.
        return match tally.difference().min(2) {
            0 => "AS".to_string(),
            n => format!("{n}up"),
        };
    }

    let remaining = tally.holes_remaining();
    let margin = tally.difference().clamp(remaining + 1, remaining + 2);
    format!("{margin}/{remaining}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both(scores: &[(i64, i64)]) -> Vec<(Option<i64>, Option<i64>)> {
        scores.iter().map(|&(a, b)| (Some(a), Some(b))).collect()
    }

    #[test]
    fn lower_score_wins_hole_and_equal_halves() {
        let tally =
            HoleTally::from_scores(both(&[(3, 4), (4, 4), (5, 4), (4, 5)]));
        assert_eq!(tally.holes_won_first, 2);
        assert_eq!(tally.holes_won_second, 1);
        assert_eq!(tally.holes_played, 4);
    }

    #[test]
    fn missing_scores_are_excluded() {
        let tally = HoleTally::from_scores(vec![
            (Some(4), Some(5)),
            (Some(4), None),
            (None, Some(3)),
            (None, None),
        ]);
        assert_eq!(tally.holes_played, 1);
        assert_eq!(tally.holes_won_first, 1);
        assert_eq!(tally.holes_played + tally.holes_remaining(), 18);
    }

    #[test]
    fn full_round_winner_has_strictly_more_holes() {
        // Team A takes the first ten holes, team B the last eight.
        let mut scores = vec![(3i64, 4i64); 10];
        scores.extend(vec![(5, 4); 8]);

        let result = resolve_pair(both(&scores));
        assert_eq!(result.tally.holes_won_first, 10);
        assert_eq!(result.tally.holes_won_second, 8);
        assert_eq!(result.tally.holes_played, 18);
        assert!(result.complete);
        assert_eq!(result.winner(), Some(Winner::First));
        assert_eq!(result.result.as_deref(), Some("2up"));
    }

    #[test]
    fn all_square_after_eighteen() {
        let mut scores = vec![(3i64, 4i64); 9];
        scores.extend(vec![(4, 3); 9]);

        let result = resolve_pair(both(&scores));
        assert!(result.complete);
        assert_eq!(result.winner(), None);
        assert_eq!(result.result.as_deref(), Some("AS"));
    }

    #[test]
    fn clinch_requires_strict_majority_of_remaining() {
        // After 14 holes A leads 9-5: difference 4, remaining 4, not yet
        // clinched.
        let mut scores = vec![(3i64, 4i64); 9];
        scores.extend(vec![(4, 3); 5]);

        let result = resolve_pair(both(&scores));
        assert_eq!(result.tally.difference(), 4);
        assert_eq!(result.tally.holes_remaining(), 4);
        assert!(!result.complete);

        // A takes the fifteenth: 10-5, difference 5 > 3 remaining.
        let mut scores = both(&scores);
        scores.push((Some(3), Some(4)));
        let result = resolve_pair(scores);
        assert!(result.tally.is_clinched());
        assert!(result.complete);
        assert_eq!(result.result.as_deref(), Some("5/3"));
    }

    #[test]
    fn results_are_always_legal() {
        for played in 1..=18 {
            for won_first in 0..=played {
                let mut scores = vec![(3i64, 4i64); won_first as usize];
                scores.extend(vec![(4, 3); (played - won_first) as usize]);

                let result = resolve_pair(both(&scores));
                if let Some(s) = &result.result {
                    assert!(
                        valid_results(result.tally.holes_played).contains(s),
                        "{s} is not a legal result at {} holes played",
                        result.tally.holes_played,
                    );
                }
            }
        }
    }

    #[test]
    fn full_card_blowout_snaps_to_legal_margin() {
        // All eighteen holes entered for a side that won every one of
        // them: 18up is not a result that exists, so the card reads as
        // the widest legal full-round margin.
        let result = resolve_pair(both(&vec![(3i64, 4i64); 18]));
        assert!(result.complete);
        assert_eq!(result.result.as_deref(), Some("2up"));
        assert!(valid_results(18).contains(&"2up".to_string()));
    }

    #[test]
    fn margin_snaps_to_nearest_legal_closeout() {
        // 6-0 after six holes: difference 6, remaining 12, not clinched.
        // 13-0 after thirteen: difference 13 > 5 remaining, but the only
        // legal closeouts with 5 to play are 6/5 and 7/5.
        let scores = vec![(3i64, 4i64); 13];
        let result = resolve_pair(both(&scores));
        assert!(result.complete);
        assert_eq!(result.result.as_deref(), Some("7/5"));
    }

    #[test]
    fn live_summary_reports_standing() {
        let result = resolve_pair(both(&[(3, 4), (3, 4), (4, 4)]));
        assert!(!result.complete);
        assert_eq!(result.summary(), "2 up thru 3");

        let result = resolve_pair(vec![]);
        assert_eq!(result.summary(), "not started");
    }
}
