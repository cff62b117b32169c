use axum::extract::Path;
use chrono::NaiveDate;
use hypertext::prelude::*;
use itertools::Itertools;

use crate::{
    auth::User,
    engine::{MatchStatus, MatchType, Resolution, TeamSlot, matchplay::Winner},
    state::Conn,
    template::Page,
    tournament::matches::Match,
    util_resp::{StandardResponse, success},
    widgets::{alert::InfoAlert, badge::StatusBadge},
};

pub async fn home(
    user: Option<User<true>>,
    mut conn: Conn<true>,
) -> StandardResponse {
    let in_progress: Vec<Match> = Match::all(&mut *conn)
        .into_iter()
        .filter(|m| m.status() == MatchStatus::InProgress)
        .collect();

    success(
        Page::new()
            .user_opt(user)
            .body(maud! {
                h1 { "Patron's Cup" }
                p class="lead" {
                    "Hole-by-hole scoring and live standings across the five
                     divisions, plus the Nancy Millar Trophy."
                }
                @if !in_progress.is_empty() {
                    h4 { "Out on the course" }
                    ul {
                        @for m in &in_progress {
                            li {
                                a href=(format!("/matches/{}", m.id)) {
                                    "Game " (m.game_number)
                                    " (" (m.division) ", " (m.match_type) ")"
                                }
                            }
                        }
                    }
                }
            })
            .render(),
    )
}

pub async fn matches_page(
    user: Option<User<true>>,
    mut conn: Conn<true>,
) -> StandardResponse {
    let matches = Match::all(&mut *conn);

    let grouped: Vec<((NaiveDate, String), Vec<&Match>)> = matches
        .iter()
        .chunk_by(|m| (m.date, m.session.clone()))
        .into_iter()
        .map(|(key, group)| (key, group.collect()))
        .collect();

    success(
        Page::new()
            .user_opt(user)
            .body(maud! {
                h1 { "Match schedule" }
                @for ((date, session), group) in &grouped {
                    h4 class="mt-4" {
                        (date.format("%A %-d %B").to_string()) " — " (session)
                    }
                    table class="table" {
                        thead {
                            tr {
                                th scope="col" { "Game" }
                                th scope="col" { "Division" }
                                th scope="col" { "Format" }
                                th scope="col" { "Status" }
                                th scope="col" { }
                            }
                        }
                        tbody {
                            @for m in group {
                                tr {
                                    th scope="row" { (m.game_number) }
                                    td { (m.division) }
                                    td { (m.match_type) }
                                    td { (StatusBadge(m.status())) }
                                    td {
                                        a href=(format!("/matches/{}", m.id)) {
                                            "View"
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

pub async fn match_page(
    Path(match_id): Path<String>,
    user: Option<User<true>>,
    mut conn: Conn<true>,
) -> StandardResponse {
    let m = Match::fetch(&match_id, &mut *conn)?;
    let participants = m.participants(&mut *conn);
    let holes = m.holes(&mut *conn);
    let snapshot = m.snapshot(&mut *conn);
    let resolution = snapshot.resolve();
    let status = m.status();
    let is_stableford = m.match_type() == MatchType::Stableford;

    // The template consumes `participants`, so the lookup owns its own
    // copy of the names.
    let names: Vec<(TeamSlot, String)> = participants
        .iter()
        .map(|(slot, team)| (*slot, team.name.clone()))
        .collect();
    let name_of = move |slot: TeamSlot| -> String {
        names
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| "?".to_string())
    };

    let score_of = |slot: TeamSlot, hole: &crate::tournament::matches::MatchHole| {
        match slot {
            TeamSlot::A => hole.team_a_score,
            TeamSlot::B => hole.team_b_score,
            TeamSlot::C => hole.team_c_score,
        }
    };

    success(
        Page::new()
            .user_opt(user.clone())
            .body(maud! {
                h1 {
                    "Game " (m.game_number) ": "
                    @for (i, (_, team)) in participants.iter().enumerate() {
                        @if i > 0 { " v " }
                        (team.name)
                    }
                }
                p {
                    (m.division) " — " (m.match_type) " — "
                    (m.date.format("%A %-d %B").to_string()) " " (m.session)
                    " "
                    (StatusBadge(status))
                }

                @if status == MatchStatus::InProgress {
                    InfoAlert msg = "This match is still out on the course.
                        Any points shown are a provisional estimate for the
                        live leaderboard, not an awarded result.";
                }

                @match &resolution {
                    Resolution::MatchPlay(contest) => {
                        h4 {
                            @match contest.inner.winner() {
                                Some(Winner::First) => { (name_of(TeamSlot::A)) " " }
                                Some(Winner::Second) => { (name_of(TeamSlot::B)) " " }
                                None => {}
                            }
                            (contest.inner.summary())
                        }
                    }
                    Resolution::ThreeWay { contests } => {
                        h4 { "Head-to-head results" }
                        ul {
                            @for contest in contests.iter() {
                                li {
                                    (name_of(contest.slots.0))
                                    " v "
                                    (name_of(contest.slots.1))
                                    ": "
                                    @match contest.inner.winner() {
                                        Some(Winner::First) => { (name_of(contest.slots.0)) " " }
                                        Some(Winner::Second) => { (name_of(contest.slots.1)) " " }
                                        None => {}
                                    }
                                    (contest.inner.summary())
                                }
                            }
                        }
                    }
                    Resolution::Stableford { totals, complete } => {
                        h4 {
                            "Stableford points"
                            @if !complete { " (so far)" }
                        }
                        ul {
                            @for (slot, total) in totals.iter() {
                                li { (name_of(*slot)) ": " (*total) }
                            }
                        }
                    }
                }

                table class="table table-sm mt-4" {
                    thead {
                        tr {
                            th scope="col" { "Hole" }
                            th scope="col" { "Par" }
                            @if is_stableford {
                                th scope="col" { "SI" }
                            }
                            @for (_, team) in participants.iter() {
                                th scope="col" { (team.name) }
                            }
                        }
                    }
                    tbody {
                        @for hole in &holes {
                            tr {
                                th scope="row" { (hole.hole_number) }
                                td { (hole.par) }
                                @if is_stableford {
                                    td {
                                        @if let Some(si) = hole.stroke_index {
                                            (si)
                                        }
                                    }
                                }
                                @for (slot, _) in participants.iter() {
                                    td {
                                        @if let Some(s) = score_of(*slot, hole) {
                                            (s)
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                @if user.is_some() {
                    div class="mt-3" {
                        a class="btn btn-primary" href=(format!("/matches/{}/scores", m.id)) {
                            "Enter scores"
                        }
                    }
                }
            })
            .render(),
    )
}
