//! The match result engine.
//!
//! Everything in this module is a pure computation over a snapshot of a
//! match's hole data. The engine performs no I/O, holds no state, and never
//! errors: holes with a missing score on either side are treated as not yet
//! played and excluded from the tallies, so a resolution is always consistent
//! as scores stream in one at a time.
//!
//! Database rows are converted to a [`MatchSnapshot`] by a single adapter
//! (see [`crate::tournament::matches`]); no other code derives hole tallies
//! inline.

use chrono::NaiveDate;

pub mod matchplay;
pub mod points;
pub mod stableford;

use matchplay::PairwiseResult;
use points::{PointsAward, league_points};
use rust_decimal::Decimal;
use stableford::stableford_total;

pub const HOLES_PER_ROUND: i64 = 18;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Division {
    Trophy,
    Shield,
    Plaque,
    Bowl,
    Mug,
}

impl Division {
    pub const ALL: [Division; 5] = [
        Division::Trophy,
        Division::Shield,
        Division::Plaque,
        Division::Bowl,
        Division::Mug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Division::Trophy => "Trophy",
            Division::Shield => "Shield",
            Division::Plaque => "Plaque",
            Division::Bowl => "Bowl",
            Division::Mug => "Mug",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Session {
    Am,
    Pm,
}

impl Session {
    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Am => "AM",
            Session::Pm => "PM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AM" => Some(Session::Am),
            "PM" => Some(Session::Pm),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchType {
    FourBbb,
    Foursomes,
    Singles,
    Stableford,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::FourBbb => "4BBB",
            MatchType::Foursomes => "Foursomes",
            MatchType::Singles => "Singles",
            MatchType::Stableford => "Stableford",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "4BBB" => Some(MatchType::FourBbb),
            "Foursomes" => Some(MatchType::Foursomes),
            "Singles" => Some(MatchType::Singles),
            "Stableford" => Some(MatchType::Stableford),
            _ => None,
        }
    }
}

/// Ordered so that the derived comparison is the direction of legal
/// transitions: scheduled < in_progress < completed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(MatchStatus::Scheduled),
            "in_progress" => Some(MatchStatus::InProgress),
            "completed" => Some(MatchStatus::Completed),
            _ => None,
        }
    }
}

/// A participant slot within a match. Two-team matches use `A` and `B`;
/// three-way matches additionally use `C`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TeamSlot {
    A,
    B,
    C,
}

/// One hole of a match, in the engine's canonical shape. Gross scores are
/// `None` until entered.
#[derive(Copy, Clone, Debug, Default)]
pub struct HoleScores {
    pub hole_number: i64,
    pub par: i64,
    pub stroke_index: Option<i64>,
    pub team_a: Option<i64>,
    pub team_b: Option<i64>,
    pub team_c: Option<i64>,
}

impl HoleScores {
    fn score_of(&self, slot: TeamSlot) -> Option<i64> {
        match slot {
            TeamSlot::A => self.team_a,
            TeamSlot::B => self.team_b,
            TeamSlot::C => self.team_c,
        }
    }
}

/// The canonical input to the engine: everything it needs to know about one
/// match, detached from how the datastore spells it.
#[derive(Clone, Debug)]
pub struct MatchSnapshot {
    pub division: Division,
    pub date: NaiveDate,
    pub session: Session,
    pub match_type: MatchType,
    pub three_way: bool,
    pub holes: Vec<HoleScores>,
    /// Playing handicaps per slot, used only by the Stableford format.
    pub handicaps: [Option<i64>; 3],
}

/// The engine's verdict for one pairwise contest, with the slots it relates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContestResult {
    pub slots: (TeamSlot, TeamSlot),
    pub inner: PairwiseResult,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Head-to-head match play between slots A and B.
    MatchPlay(ContestResult),
    /// Three independent pairwise contests over the same holes.
    ThreeWay {
        contests: [ContestResult; 3],
    },
    /// Stableford point totals per participating slot. No win/loss.
    Stableford {
        totals: Vec<(TeamSlot, i64)>,
        complete: bool,
    },
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        match self {
            Resolution::MatchPlay(c) => c.inner.complete,
            // A three-way is over when its most advanced pairwise contest
            // has covered all eighteen holes.
            Resolution::ThreeWay { contests } => contests
                .iter()
                .any(|c| c.inner.tally.holes_played == HOLES_PER_ROUND),
            Resolution::Stableford { complete, .. } => *complete,
        }
    }
}

impl MatchSnapshot {
    fn slots(&self) -> &'static [TeamSlot] {
        if self.three_way {
            &[TeamSlot::A, TeamSlot::B, TeamSlot::C]
        } else {
            &[TeamSlot::A, TeamSlot::B]
        }
    }

    fn pair_scores(
        &self,
        x: TeamSlot,
        y: TeamSlot,
    ) -> impl Iterator<Item = (Option<i64>, Option<i64>)> + '_ {
        self.holes.iter().map(move |h| (h.score_of(x), h.score_of(y)))
    }

    pub fn resolve(&self) -> Resolution {
        match self.match_type {
            MatchType::Stableford => self.resolve_stableford(),
            _ if self.three_way => self.resolve_three_way(),
            _ => Resolution::MatchPlay(ContestResult {
                slots: (TeamSlot::A, TeamSlot::B),
                inner: matchplay::resolve_pair(
                    self.pair_scores(TeamSlot::A, TeamSlot::B),
                ),
            }),
        }
    }

    fn resolve_three_way(&self) -> Resolution {
        let pairs = [
            (TeamSlot::A, TeamSlot::B),
            (TeamSlot::A, TeamSlot::C),
            (TeamSlot::B, TeamSlot::C),
        ];

        Resolution::ThreeWay {
            contests: pairs.map(|(x, y)| ContestResult {
                slots: (x, y),
                inner: matchplay::resolve_pair(self.pair_scores(x, y)),
            }),
        }
    }

    fn resolve_stableford(&self) -> Resolution {
        let totals = self
            .slots()
            .iter()
            .map(|&slot| {
                let handicap = self.handicap_of(slot).unwrap_or(0);
                let total = stableford_total(
                    self.holes.iter().map(|h| {
                        (h.score_of(slot), h.par, h.stroke_index)
                    }),
                    handicap,
                );
                (slot, total)
            })
            .collect();

        // No clinch concept applies: a Stableford card is only final once
        // every participant has a score on every hole.
        let complete = self.holes.len() as i64 == HOLES_PER_ROUND
            && self.holes.iter().all(|h| {
                self.slots().iter().all(|&s| h.score_of(s).is_some())
            });

        Resolution::Stableford { totals, complete }
    }

    fn handicap_of(&self, slot: TeamSlot) -> Option<i64> {
        match slot {
            TeamSlot::A => self.handicaps[0],
            TeamSlot::B => self.handicaps[1],
            TeamSlot::C => self.handicaps[2],
        }
    }

    /// True when any score at all has been entered.
    pub fn has_scores(&self) -> bool {
        self.holes.iter().any(|h| {
            h.team_a.is_some() || h.team_b.is_some() || h.team_c.is_some()
        })
    }

    /// The status the match ought to be in, given its hole data. Status is
    /// monotonic; callers must never move a match backwards off the back of
    /// this (only the explicit admin reset does that).
    pub fn implied_status(&self) -> MatchStatus {
        if self.resolve().is_complete() {
            MatchStatus::Completed
        } else if self.has_scores() {
            MatchStatus::InProgress
        } else {
            MatchStatus::Scheduled
        }
    }

    /// League points per slot.
    ///
    /// Authoritative awards exist only for completed matches. For a match
    /// that is merely in progress this returns the live-leaderboard
    /// heuristic (full win-points to every participant), tagged
    /// [`PointsAward::Provisional`] so it cannot be summed into a real
    /// ledger. Stableford matches carry no league points.
    pub fn points(&self) -> Vec<(TeamSlot, PointsAward)> {
        let resolution = self.resolve();

        if let Resolution::Stableford { .. } = resolution {
            return vec![];
        }

        let schedule = league_points(
            self.date,
            self.session,
            self.match_type,
            self.division,
        );

        if !resolution.is_complete() {
            if !self.has_scores() {
                return vec![];
            }
            return self
                .slots()
                .iter()
                .map(|&s| (s, PointsAward::Provisional(schedule.win)))
                .collect();
        }

        let mut totals: Vec<(TeamSlot, Decimal)> =
            self.slots().iter().map(|&s| (s, Decimal::ZERO)).collect();

        let mut add = |slot: TeamSlot, value: Decimal| {
            for (s, v) in totals.iter_mut() {
                if *s == slot {
                    *v += value;
                }
            }
        };

        let contests: &[ContestResult] = match &resolution {
            Resolution::MatchPlay(c) => std::slice::from_ref(c),
            Resolution::ThreeWay { contests } => contests,
            Resolution::Stableford { .. } => unreachable!(),
        };

        // Each pairwise contest awards independently, so a three-way can be
        // worth up to twice the win-points for one team.
        for contest in contests {
            match contest.inner.winner() {
                Some(matchplay::Winner::First) => {
                    add(contest.slots.0, schedule.win)
                }
                Some(matchplay::Winner::Second) => {
                    add(contest.slots.1, schedule.win)
                }
                None => {
                    add(contest.slots.0, schedule.tie);
                    add(contest.slots.1, schedule.tie);
                }
            }
        }

        totals
            .into_iter()
            .map(|(s, v)| (s, PointsAward::Authoritative(v)))
            .collect()
    }
}
