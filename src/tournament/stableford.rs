//! The Nancy Millar Trophy: a Stableford competition scored from the same
//! hole data as the match-play schedule. There is no win/loss here, only
//! point totals compared across the field.

use std::collections::HashMap;

use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use hypertext::prelude::*;

use crate::{
    auth::User,
    engine::{MatchType, Resolution},
    schema::matches,
    state::Conn,
    template::Page,
    tournament::{matches::Match, teams::Team},
    util_resp::{StandardResponse, success},
};

pub struct StablefordStandings {
    /// Team name, total points, and whether that team's card is complete.
    pub sorted: Vec<(Team, i64, bool)>,
}

impl StablefordStandings {
    pub fn fetch(
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Self {
        let stableford_matches = matches::table
            .filter(matches::match_type.eq(MatchType::Stableford.as_str()))
            .load::<Match>(&mut *conn)
            .unwrap();

        let mut totals: HashMap<String, (i64, bool)> = HashMap::new();

        for m in stableford_matches {
            let snapshot = m.snapshot(conn);
            let Resolution::Stableford { totals: per_slot, complete } =
                snapshot.resolve()
            else {
                continue;
            };

            for (slot, points) in per_slot {
                let Some(team_id) = m.team_id_of(slot) else {
                    continue;
                };
                let entry =
                    totals.entry(team_id.to_string()).or_insert((0, true));
                entry.0 += points;
                entry.1 &= complete;
            }
        }

        let mut sorted: Vec<(Team, i64, bool)> = totals
            .into_iter()
            .filter_map(|(team_id, (points, complete))| {
                let team = Team::fetch(&team_id, conn).ok()?;
                Some((team, points, complete))
            })
            .collect();

        sorted.sort_by(|(ta, pa, _), (tb, pb, _)| {
            pb.cmp(pa).then(ta.name.cmp(&tb.name))
        });

        StablefordStandings { sorted }
    }
}

pub async fn stableford_standings_page(
    user: Option<User<true>>,
    mut conn: Conn<true>,
) -> StandardResponse {
    let standings = StablefordStandings::fetch(&mut *conn);

    success(
        Page::new()
            .user_opt(user)
            .body(maud! {
                h1 { "Nancy Millar Trophy" }
                p class="lead" {
                    "Stableford: net score against par converts to points per
                     hole, and the highest total takes the trophy."
                }
                table class="table" {
                    thead {
                        tr {
                            th scope="col" { "#" }
                            th scope="col" { "Team" }
                            th scope="col" { "Points" }
                            th scope="col" { }
                        }
                    }
                    tbody {
                        @for (i, (team, points, complete)) in standings.sorted.iter().enumerate() {
                            tr {
                                th scope="row" { (i + 1) }
                                td { (team.name) }
                                td { (*points) }
                                td {
                                    @if !complete {
                                        span class="badge bg-warning" { "Card open" }
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
