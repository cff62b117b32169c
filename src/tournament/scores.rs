//! Score entry and the destructive match reset. Both require a logged-in
//! user; score entry is the only way hole data changes during play.

use axum::{Form, extract::Path, response::Redirect};
use diesel::prelude::*;
use hypertext::prelude::*;
use serde::Deserialize;

use crate::{
    auth::User,
    engine::{MatchStatus, TeamSlot},
    schema::{match_holes, matches},
    state::Conn,
    template::Page,
    tournament::matches::Match,
    util_resp::{StandardResponse, bad_request, see_other_ok, success},
    validation::is_plausible_gross_score,
    widgets::alert::ErrorAlert,
};

pub async fn score_entry_page(
    Path(match_id): Path<String>,
    user: User<true>,
    mut conn: Conn<true>,
) -> StandardResponse {
    let m = Match::fetch(&match_id, &mut *conn)?;
    let participants = m.participants(&mut *conn);
    let holes = m.holes(&mut *conn);

    let score_of = |slot: TeamSlot, hole: &crate::tournament::matches::MatchHole| {
        match slot {
            TeamSlot::A => hole.team_a_score,
            TeamSlot::B => hole.team_b_score,
            TeamSlot::C => hole.team_c_score,
        }
    };

    let field_of = |slot: TeamSlot| match slot {
        TeamSlot::A => "team_a",
        TeamSlot::B => "team_b",
        TeamSlot::C => "team_c",
    };

    success(
        Page::new()
            .user(user)
            .body(maud! {
                h1 { "Score entry — game " (m.game_number) }
                p {
                    a href=(format!("/matches/{}", m.id)) { "Back to match" }
                }
                // One form per hole, associated by the HTML `form`
                // attribute since forms cannot nest inside table rows.
                @for hole in &holes {
                    form id=(format!("hole-{}", hole.hole_number))
                         method="post"
                         action=(format!("/matches/{}/scores", m.id)) {
                        input type="hidden"
                              name="hole_number"
                              value=(hole.hole_number);
                    }
                }
                table class="table table-sm" {
                    thead {
                        tr {
                            th scope="col" { "Hole" }
                            th scope="col" { "Par" }
                            @for (_, team) in participants.iter() {
                                th scope="col" { (team.name) }
                            }
                            th scope="col" { }
                        }
                    }
                    tbody {
                        @for hole in &holes {
                            tr {
                                th scope="row" { (hole.hole_number) }
                                td { (hole.par) }
                                @for (slot, _) in participants.iter() {
                                    td {
                                        input type="number"
                                              class="form-control form-control-sm"
                                              min="1"
                                              max="20"
                                              form=(format!("hole-{}", hole.hole_number))
                                              name=(field_of(*slot))
                                              value=(score_of(*slot, hole).map(|s| s.to_string()).unwrap_or_default());
                                    }
                                }
                                td {
                                    button type="submit"
                                           class="btn btn-sm btn-primary"
                                           form=(format!("hole-{}", hole.hole_number)) {
                                        "Save"
                                    }
                                }
                            }
                        }
                    }
                }

                form method="post"
                     action=(format!("/matches/{}/reset", m.id))
                     class="mt-4" {
                    button type="submit" class="btn btn-danger" {
                        "Reset match"
                    }
                    small class="text-muted d-block mt-1" {
                        "Clears every hole score and returns the match to the
                         scheduled state. This cannot be undone."
                    }
                }
            })
            .render(),
    )
}

#[derive(Deserialize, Debug)]
pub struct ScoreForm {
    hole_number: i64,
    // Browsers submit empty strings for untouched numeric inputs, so these
    // arrive as text and are parsed by hand.
    #[serde(default)]
    team_a: String,
    #[serde(default)]
    team_b: String,
    #[serde(default)]
    team_c: String,
}

fn parse_score(raw: &str) -> Result<Option<i64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let score: i64 = raw
        .parse()
        .map_err(|_| "scores must be whole numbers".to_string())?;
    is_plausible_gross_score(score)?;
    Ok(Some(score))
}

pub async fn submit_score(
    Path(match_id): Path<String>,
    user: User<true>,
    mut conn: Conn<true>,
    Form(form): Form<ScoreForm>,
) -> StandardResponse {
    let m = Match::fetch(&match_id, &mut *conn)?;

    if !(1..=18).contains(&form.hole_number) {
        return bad_request(
            Page::new()
                .user(user)
                .body(maud! {
                    ErrorAlert msg = "No such hole.";
                })
                .render(),
        );
    }

    // Only the slots actually playing this match are written; a stray
    // third-team field on a two-team match must not touch the stored row.
    let parsed = if m.is_three_way() {
        [
            parse_score(&form.team_a),
            parse_score(&form.team_b),
            parse_score(&form.team_c),
        ]
    } else {
        [parse_score(&form.team_a), parse_score(&form.team_b), Ok(None)]
    };

    let [team_a, team_b, team_c] = match parsed {
        [Ok(a), Ok(b), Ok(c)] => [a, b, c],
        _ => {
            return bad_request(
                Page::new()
                    .user(user)
                    .body(maud! {
                        ErrorAlert msg = "Gross scores must be whole numbers
                                          between 1 and 20.";
                    })
                    .render(),
            );
        }
    };

    let target = match_holes::table.filter(
        match_holes::match_id
            .eq(&m.id)
            .and(match_holes::hole_number.eq(form.hole_number)),
    );

    if m.is_three_way() {
        diesel::update(target)
            .set((
                match_holes::team_a_score.eq(team_a),
                match_holes::team_b_score.eq(team_b),
                match_holes::team_c_score.eq(team_c),
            ))
            .execute(&mut *conn)
            .unwrap();
    } else {
        diesel::update(target)
            .set((
                match_holes::team_a_score.eq(team_a),
                match_holes::team_b_score.eq(team_b),
            ))
            .execute(&mut *conn)
            .unwrap();
    }

    let new_status = m.advance_status(&mut *conn);
    tracing::debug!(
        match_id = %m.id,
        hole = form.hole_number,
        status = new_status.as_str(),
        "score recorded"
    );

    see_other_ok(Redirect::to(&format!("/matches/{}/scores", m.id)))
}

/// Administrative reset: clears all hole scores and reverts the match to
/// `scheduled`. This is the only transition away from `completed`.
pub async fn reset_match(
    Path(match_id): Path<String>,
    _user: User<true>,
    mut conn: Conn<true>,
) -> StandardResponse {
    let m = Match::fetch(&match_id, &mut *conn)?;

    diesel::update(match_holes::table.filter(match_holes::match_id.eq(&m.id)))
        .set((
            match_holes::team_a_score.eq(None::<i64>),
            match_holes::team_b_score.eq(None::<i64>),
            match_holes::team_c_score.eq(None::<i64>),
        ))
        .execute(&mut *conn)
        .unwrap();

    diesel::update(matches::table.find(&m.id))
        .set(matches::status.eq(MatchStatus::Scheduled.as_str()))
        .execute(&mut *conn)
        .unwrap();

    tracing::info!(match_id = %m.id, "match reset");

    see_other_ok(Redirect::to(&format!("/matches/{}", m.id)))
}
