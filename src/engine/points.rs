//! League point allocation.
//!
//! How much a match is worth depends on when it is played and in which
//! format: the Friday and Saturday morning fourballs carry the most weight,
//! the afternoon foursomes differ by division group, and the Sunday singles
//! close out the weekend.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use super::{Division, MatchType, Session};

/// Win and tie values for one match. A loss is always worth zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointsSchedule {
    pub win: Decimal,
    pub tie: Decimal,
}

/// A point award, tagged by trustworthiness. Provisional awards are the
/// live-leaderboard estimate for matches still out on the course; they must
/// never be added to an authoritative ledger, which the type distinction
/// enforces at compile time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointsAward {
    Authoritative(Decimal),
    Provisional(Decimal),
}

impl PointsAward {
    pub fn value(&self) -> Decimal {
        match self {
            PointsAward::Authoritative(v) | PointsAward::Provisional(v) => *v,
        }
    }

    pub fn is_authoritative(&self) -> bool {
        matches!(self, PointsAward::Authoritative(_))
    }
}

pub fn league_points(
    date: NaiveDate,
    session: Session,
    match_type: MatchType,
    division: Division,
) -> PointsSchedule {
    let friday_or_saturday =
        matches!(date.weekday(), Weekday::Fri | Weekday::Sat);
    let sunday = date.weekday() == Weekday::Sun;

    let (win, tie) = match (session, match_type) {
        (Session::Am, MatchType::FourBbb) if friday_or_saturday => (50, 25),
        (Session::Pm, MatchType::Foursomes) if friday_or_saturday => {
            match division {
                Division::Trophy | Division::Shield | Division::Plaque => {
                    (30, 15)
                }
                Division::Bowl | Division::Mug => (40, 20),
            }
        }
        (_, MatchType::Singles) if sunday => (30, 15),
        // Unscheduled combination; award a nominal point.
        _ => (10, 5),
    };

    PointsSchedule {
        win: Decimal::new(win, 1),
        tie: Decimal::new(tie, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The 2026 Patron's Cup weekend.
    const FRIDAY: (i32, u32, u32) = (2026, 8, 21);
    const SATURDAY: (i32, u32, u32) = (2026, 8, 22);
    const SUNDAY: (i32, u32, u32) = (2026, 8, 23);

    fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn morning_fourballs() {
        for day in [FRIDAY, SATURDAY] {
            for division in Division::ALL {
                let schedule = league_points(
                    date(day),
                    Session::Am,
                    MatchType::FourBbb,
                    division,
                );
                assert_eq!(schedule.win, dec("5"));
                assert_eq!(schedule.tie, dec("2.5"));
            }
        }
    }

    #[test]
    fn afternoon_foursomes_split_by_division_group() {
        let upper = league_points(
            date(FRIDAY),
            Session::Pm,
            MatchType::Foursomes,
            Division::Plaque,
        );
        assert_eq!(upper.win, dec("3"));
        assert_eq!(upper.tie, dec("1.5"));

        let lower = league_points(
            date(FRIDAY),
            Session::Pm,
            MatchType::Foursomes,
            Division::Bowl,
        );
        assert_eq!(lower.win, dec("4"));
        assert_eq!(lower.tie, dec("2"));
    }

    #[test]
    fn sunday_singles_either_session() {
        for session in [Session::Am, Session::Pm] {
            let schedule = league_points(
                date(SUNDAY),
                session,
                MatchType::Singles,
                Division::Mug,
            );
            assert_eq!(schedule.win, dec("3"));
            assert_eq!(schedule.tie, dec("1.5"));
        }
    }

    #[test]
    fn unmatched_combinations_fall_back() {
        // Singles on a Friday morning is not on the card.
        let schedule = league_points(
            date(FRIDAY),
            Session::Am,
            MatchType::Singles,
            Division::Trophy,
        );
        assert_eq!(schedule.win, dec("1"));
        assert_eq!(schedule.tie, dec("0.5"));
    }
}
