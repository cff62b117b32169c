//! Integration tests driving the full router over an in-memory database.

use axum_test::{TestServer, TestServerConfig};
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use uuid::Uuid;

use crate::{
    config::create_app,
    schema::{match_holes, matches, teams},
    state::DbPool,
};

fn make_pool() -> DbPool {
    Pool::builder()
        .max_size(1)
        .build(ConnectionManager::new(":memory:"))
        .unwrap()
}

fn make_server(pool: &DbPool) -> TestServer {
    TestServer::new_with_config(
        create_app(pool.clone()),
        TestServerConfig {
            save_cookies: true,
            ..Default::default()
        },
    )
    .unwrap()
}

async fn register_and_login(server: &TestServer) {
    let res = server
        .post("/register")
        .form(&[
            ("username", "patron"),
            ("email", "patron@example.com"),
            ("password", "secret123"),
            ("password2", "secret123"),
        ])
        .await;
    assert!(res.status_code().is_redirection(), "{:?}", res.status_code());

    let res = server
        .post("/login")
        .form(&[("id", "patron"), ("password", "secret123")])
        .await;
    assert!(res.status_code().is_redirection(), "{:?}", res.status_code());
}

fn insert_team(
    conn: &mut SqliteConnection,
    name: &str,
    division: &str,
    seed: i64,
    handicap: Option<i64>,
) -> String {
    let id = Uuid::now_v7().to_string();
    diesel::insert_into(teams::table)
        .values((
            teams::id.eq(&id),
            teams::name.eq(name),
            teams::division.eq(division),
            teams::seed.eq(seed),
            teams::playing_handicap.eq(handicap),
        ))
        .execute(conn)
        .unwrap();
    id
}

#[allow(clippy::too_many_arguments)]
fn insert_match(
    conn: &mut SqliteConnection,
    game_number: i64,
    division: &str,
    date: NaiveDate,
    session: &str,
    match_type: &str,
    team_a: &str,
    team_b: &str,
    team_c: Option<&str>,
) -> String {
    let id = Uuid::now_v7().to_string();
    diesel::insert_into(matches::table)
        .values((
            matches::id.eq(&id),
            matches::game_number.eq(game_number),
            matches::division.eq(division),
            matches::date.eq(date),
            matches::session.eq(session),
            matches::match_type.eq(match_type),
            matches::team_a_id.eq(team_a),
            matches::team_b_id.eq(team_b),
            matches::team_c_id.eq(team_c),
            matches::status.eq("scheduled"),
        ))
        .execute(conn)
        .unwrap();

    for hole in 1i64..=18 {
        diesel::insert_into(match_holes::table)
            .values((
                match_holes::id.eq(Uuid::now_v7().to_string()),
                match_holes::match_id.eq(&id),
                match_holes::hole_number.eq(hole),
                match_holes::par.eq(4),
                match_holes::stroke_index.eq(hole),
            ))
            .execute(conn)
            .unwrap();
    }

    id
}

/// Two Trophy teams and their Friday-morning 4BBB match.
fn seed_fixture(pool: &DbPool) -> String {
    let mut conn = pool.get().unwrap();
    let friday = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();

    let seve = insert_team(&mut conn, "Team Seve", "Trophy", 1, None);
    let faldo = insert_team(&mut conn, "Team Faldo", "Trophy", 2, None);

    insert_match(
        &mut conn, 1, "Trophy", friday, "AM", "4BBB", &seve, &faldo, None,
    )
}

async fn submit_hole(
    server: &TestServer,
    match_id: &str,
    hole: i64,
    a: &str,
    b: &str,
) {
    let res = server
        .post(&format!("/matches/{match_id}/scores"))
        .form(&[
            ("hole_number", hole.to_string().as_str()),
            ("team_a", a),
            ("team_b", b),
        ])
        .await;
    assert!(res.status_code().is_redirection(), "{:?}", res.status_code());
}

#[tokio::test]
async fn home_page_renders() {
    let pool = make_pool();
    let server = make_server(&pool);

    let res = server.get("/").await;
    assert!(res.status_code().is_success());
    assert!(res.text().contains("Patron's Cup"));
}

#[tokio::test]
async fn register_then_login() {
    let pool = make_pool();
    let server = make_server(&pool);

    register_and_login(&server).await;

    // The navbar greets a logged-in user by name.
    let res = server.get("/").await;
    assert!(res.status_code().is_success());
    assert!(res.text().contains("patron"));
}

#[tokio::test]
async fn score_entry_requires_login() {
    let pool = make_pool();
    let server = make_server(&pool);
    let match_id = seed_fixture(&pool);

    let res = server.get(&format!("/matches/{match_id}/scores")).await;
    assert_eq!(res.status_code(), 401);

    let res = server
        .post(&format!("/matches/{match_id}/scores"))
        .form(&[("hole_number", "1"), ("team_a", "4"), ("team_b", "5")])
        .await;
    assert_eq!(res.status_code(), 401);
}

#[tokio::test]
async fn unknown_match_is_not_found() {
    let pool = make_pool();
    let server = make_server(&pool);

    let res = server.get("/matches/no-such-match").await;
    assert_eq!(res.status_code(), 404);
}

#[tokio::test]
async fn unknown_division_is_not_found() {
    let pool = make_pool();
    let server = make_server(&pool);

    let res = server.get("/standings/Saucer").await;
    assert_eq!(res.status_code(), 404);
}

#[tokio::test]
async fn live_scores_appear_as_provisional_points() {
    let pool = make_pool();
    let server = make_server(&pool);
    let match_id = seed_fixture(&pool);

    register_and_login(&server).await;

    for hole in 1..=3 {
        submit_hole(&server, &match_id, hole, "4", "5").await;
    }

    let res = server.get(&format!("/matches/{match_id}")).await;
    assert!(res.status_code().is_success());
    let text = res.text();
    assert!(text.contains("In Progress"));
    assert!(text.contains("3 up thru 3"));

    // No match has finished, so there are no awarded points yet, only the
    // live column.
    let res = server.get("/standings/Trophy").await;
    let text = res.text();
    assert!(text.contains("Live (provisional)"));
    assert!(text.contains("+5.0"));
}

#[tokio::test]
async fn clinched_match_completes_and_scores_the_table() {
    let pool = make_pool();
    let server = make_server(&pool);
    let match_id = seed_fixture(&pool);

    register_and_login(&server).await;

    // Team Seve wins the first ten holes: 10 up with 8 to play is a clinch.
    for hole in 1..=10 {
        submit_hole(&server, &match_id, hole, "4", "5").await;
    }

    let res = server.get(&format!("/matches/{match_id}")).await;
    assert!(res.status_code().is_success());
    let text = res.text();
    assert!(text.contains("Completed"));
    assert!(text.contains("Team Seve 10/8"));

    // Friday AM 4BBB in an upper division: 5 points to the winner.
    let res = server.get("/standings/Trophy").await;
    let text = res.text();
    assert!(text.contains("Team Seve"));
    assert!(text.contains("5.0"));
    assert!(!text.contains("Live (provisional)"));
}

#[tokio::test]
async fn reset_returns_a_completed_match_to_scheduled() {
    let pool = make_pool();
    let server = make_server(&pool);
    let match_id = seed_fixture(&pool);

    register_and_login(&server).await;

    for hole in 1..=10 {
        submit_hole(&server, &match_id, hole, "4", "5").await;
    }

    let res = server
        .post(&format!("/matches/{match_id}/reset"))
        .await;
    assert!(res.status_code().is_redirection(), "{:?}", res.status_code());

    let res = server.get(&format!("/matches/{match_id}")).await;
    let text = res.text();
    assert!(text.contains("Scheduled"));
    assert!(!text.contains("10/8"));

    let res = server.get("/standings/Trophy").await;
    assert!(!res.text().contains("5.0"));
}

#[tokio::test]
async fn implausible_score_is_rejected() {
    let pool = make_pool();
    let server = make_server(&pool);
    let match_id = seed_fixture(&pool);

    register_and_login(&server).await;

    let res = server
        .post(&format!("/matches/{match_id}/scores"))
        .form(&[("hole_number", "1"), ("team_a", "99"), ("team_b", "5")])
        .await;
    assert_eq!(res.status_code(), 400);

    let res = server
        .post(&format!("/matches/{match_id}/scores"))
        .form(&[("hole_number", "19"), ("team_a", "4"), ("team_b", "5")])
        .await;
    assert_eq!(res.status_code(), 400);
}

#[tokio::test]
async fn two_team_matches_ignore_stray_third_scores() {
    let pool = make_pool();
    let server = make_server(&pool);
    let match_id = seed_fixture(&pool);

    register_and_login(&server).await;

    let res = server
        .post(&format!("/matches/{match_id}/scores"))
        .form(&[
            ("hole_number", "1"),
            ("team_a", "4"),
            ("team_b", "5"),
            ("team_c", "6"),
        ])
        .await;
    assert!(res.status_code().is_redirection());

    let mut conn = pool.get().unwrap();
    let third: Option<i64> = match_holes::table
        .filter(
            match_holes::match_id
                .eq(&match_id)
                .and(match_holes::hole_number.eq(1)),
        )
        .select(match_holes::team_c_score)
        .first(&mut conn)
        .unwrap();
    assert_eq!(third, None);
}

#[tokio::test]
async fn three_way_match_reports_each_pairing() {
    let pool = make_pool();
    let server = make_server(&pool);

    let match_id = {
        let mut conn = pool.get().unwrap();
        let friday = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();
        let a = insert_team(&mut conn, "Mug One", "Mug", 1, None);
        let b = insert_team(&mut conn, "Mug Two", "Mug", 2, None);
        let c = insert_team(&mut conn, "Mug Three", "Mug", 3, None);
        insert_match(
            &mut conn, 1, "Mug", friday, "AM", "4BBB", &a, &b, Some(&c),
        )
    };

    register_and_login(&server).await;

    // One hole where A beats both B and C, and B beats C.
    let res = server
        .post(&format!("/matches/{match_id}/scores"))
        .form(&[
            ("hole_number", "1"),
            ("team_a", "3"),
            ("team_b", "4"),
            ("team_c", "5"),
        ])
        .await;
    assert!(res.status_code().is_redirection());

    let res = server.get(&format!("/matches/{match_id}")).await;
    let text = res.text();
    assert!(text.contains("Head-to-head results"));
    assert!(text.contains("Mug One v Mug Two"));
    assert!(text.contains("Mug One v Mug Three"));
    assert!(text.contains("Mug Two v Mug Three"));
    assert!(text.contains("1 up thru 1"));
}

#[tokio::test]
async fn stableford_cards_score_the_nancy_millar() {
    let pool = make_pool();
    let server = make_server(&pool);

    let match_id = {
        let mut conn = pool.get().unwrap();
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let a = insert_team(&mut conn, "Team Seve", "Trophy", 1, Some(18));
        let b = insert_team(&mut conn, "Team Faldo", "Trophy", 2, Some(18));
        insert_match(
            &mut conn,
            1,
            "Trophy",
            sunday,
            "PM",
            "Stableford",
            &a,
            &b,
            None,
        )
    };

    register_and_login(&server).await;

    // Handicap 18 gives a stroke a hole. Bogey golf nets par: 2 points per
    // hole, 36 for the card. The other card pars every hole net birdie: 3
    // points per hole, 54.
    for hole in 1..=18 {
        submit_hole(&server, &match_id, hole, "5", "4").await;
    }

    let res = server.get(&format!("/matches/{match_id}")).await;
    let text = res.text();
    assert!(text.contains("Stableford points"));
    assert!(!text.contains("(so far)"));
    assert!(text.contains("Team Seve: 36"));
    assert!(text.contains("Team Faldo: 54"));

    let res = server.get("/stableford").await;
    let text = res.text();
    assert!(res.status_code().is_success());
    assert!(text.contains("Nancy Millar Trophy"));
    // Faldo lead the field.
    let faldo = text.find("Team Faldo").unwrap();
    let seve = text.find("Team Seve").unwrap();
    assert!(faldo < seve);

    // Stableford rounds never feed the division points table.
    let res = server.get("/standings/Trophy").await;
    assert!(!res.text().contains("Live (provisional)"));
}
