//! Division standings, recomputed from match data on every read.
//!
//! Standings are purely derived: there is no persisted points table to fall
//! out of step with the matches it summarises. The authoritative ledger sums
//! only completed matches; live figures for matches still on the course are
//! provisional and rendered separately.

use std::collections::HashMap;

use axum::extract::Path;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use hypertext::prelude::*;
use rust_decimal::Decimal;

use crate::{
    auth::User,
    engine::{
        Division, MatchStatus, Resolution,
        matchplay::Winner,
        points::PointsAward,
    },
    state::Conn,
    template::Page,
    tournament::{matches::Match, teams::Team},
    util_resp::{StandardResponse, err_not_found, success},
};

#[derive(Clone, Debug, Default)]
pub struct TeamRecord {
    pub points: Decimal,
    pub provisional: Decimal,
    pub played: i64,
    pub won: i64,
    pub lost: i64,
    pub halved: i64,
    pub holes_won: i64,
    pub holes_lost: i64,
}

pub struct DivisionStandings {
    pub division: Division,
    /// Teams with their records, best first.
    pub sorted: Vec<(Team, TeamRecord)>,
}

impl DivisionStandings {
    pub fn fetch(
        division: Division,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Self {
        let teams = Team::of_division(division, conn);
        let mut records: HashMap<String, TeamRecord> = teams
            .iter()
            .map(|t| (t.id.clone(), TeamRecord::default()))
            .collect();

        for m in Match::of_division(division, conn) {
            let snapshot = m.snapshot(conn);

            for (slot, award) in snapshot.points() {
                let Some(team_id) = m.team_id_of(slot) else {
                    continue;
                };
                let Some(record) = records.get_mut(team_id) else {
                    continue;
                };
                match award {
                    PointsAward::Authoritative(v) => record.points += v,
                    PointsAward::Provisional(v) => record.provisional += v,
                }
            }

            // Win/loss/halve and hole counts come only from settled
            // matches.
            if m.status() != MatchStatus::Completed {
                continue;
            }

            let contests = match snapshot.resolve() {
                Resolution::MatchPlay(c) => vec![c],
                Resolution::ThreeWay { contests } => contests.to_vec(),
                Resolution::Stableford { .. } => continue,
            };

            for contest in contests {
                let (first, second) = contest.slots;
                let tally = contest.inner.tally;

                let mut update = |slot, won, lost, outcome| {
                    let Some(team_id) = m.team_id_of(slot) else {
                        return;
                    };
                    let Some(record) = records.get_mut(team_id) else {
                        return;
                    };
                    record.played += 1;
                    record.holes_won += won;
                    record.holes_lost += lost;
                    match outcome {
                        Some(true) => record.won += 1,
                        Some(false) => record.lost += 1,
                        None => record.halved += 1,
                    }
                };

                let winner = contest.inner.winner();
                update(
                    first,
                    tally.holes_won_first,
                    tally.holes_won_second,
                    winner.map(|w| w == Winner::First),
                );
                update(
                    second,
                    tally.holes_won_second,
                    tally.holes_won_first,
                    winner.map(|w| w == Winner::Second),
                );
            }
        }

        let mut sorted: Vec<(Team, TeamRecord)> = teams
            .into_iter()
            .map(|t| {
                let record = records.remove(&t.id).unwrap_or_default();
                (t, record)
            })
            .collect();

        sorted.sort_by(|(ta, ra), (tb, rb)| {
            rb.points
                .cmp(&ra.points)
                .then((rb.holes_won - rb.holes_lost).cmp(&(ra.holes_won - ra.holes_lost)))
                .then(ta.name.cmp(&tb.name))
        });

        DivisionStandings { division, sorted }
    }
}

pub async fn division_standings_page(
    Path(division): Path<String>,
    user: Option<User<true>>,
    mut conn: Conn<true>,
) -> StandardResponse {
    let Some(division) = Division::parse(&division) else {
        return err_not_found();
    };

    let standings = DivisionStandings::fetch(division, &mut *conn);
    let any_provisional = standings
        .sorted
        .iter()
        .any(|(_, r)| r.provisional > Decimal::ZERO);

    success(
        Page::new()
            .user_opt(user)
            .body(maud! {
                h1 { (standings.division.as_str()) " Division" }
                table class="table" {
                    thead {
                        tr {
                            th scope="col" { "#" }
                            th scope="col" { "Team" }
                            th scope="col" { "Points" }
                            th scope="col" { "P" }
                            th scope="col" { "W" }
                            th scope="col" { "L" }
                            th scope="col" { "H" }
                            th scope="col" { "Holes +/-" }
                            @if any_provisional {
                                th scope="col" { "Live (provisional)" }
                            }
                        }
                    }
                    tbody {
                        @for (i, (team, record)) in standings.sorted.iter().enumerate() {
                            tr {
                                th scope="row" { (i + 1) }
                                td { (team.name) }
                                td { (record.points.to_string()) }
                                td { (record.played) }
                                td { (record.won) }
                                td { (record.lost) }
                                td { (record.halved) }
                                td { (record.holes_won - record.holes_lost) }
                                @if any_provisional {
                                    td class="text-muted" {
                                        @if record.provisional > rust_decimal::Decimal::ZERO {
                                            "+" (record.provisional.to_string())
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            })
            .render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HoleScores, MatchSnapshot, MatchType, Session};
    use chrono::NaiveDate;

    // Standings maths that does not need a database: the engine feeds the
    // aggregation, so spot-check the point arithmetic end to end.
    #[test]
    fn completed_win_beats_halved_pair() {
        let holes: Vec<_> = (1..=18)
            .map(|n| HoleScores {
                hole_number: n,
                par: 4,
                stroke_index: Some(n),
                team_a: Some(4),
                team_b: Some(5),
                team_c: None,
            })
            .collect();

        let snapshot = MatchSnapshot {
            division: Division::Bowl,
            date: NaiveDate::from_ymd_opt(2026, 8, 21).unwrap(),
            session: Session::Pm,
            match_type: MatchType::Foursomes,
            three_way: false,
            holes,
            handicaps: [None, None, None],
        };

        // Friday PM foursomes in the Bowl division: 4 points for the win.
        let points = snapshot.points();
        assert!(points.iter().all(|(_, p)| p.is_authoritative()));
        let total: Decimal = points.iter().map(|(_, p)| p.value()).sum();
        assert_eq!(total, Decimal::from(4));
    }
}
