//! Seeds a database with the Patron's Cup weekend: an admin user, the five
//! divisions' teams, and the full match schedule with empty 18-hole cards.

use argon2::Argon2;
use argon2::PasswordHasher;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use fairway::MIGRATIONS;
use fairway::engine::{Division, MatchType, Session};
use fairway::schema::{match_holes, matches, teams, users};
use uuid::Uuid;

#[derive(Parser)]
struct Seed {
    database_url: Option<String>,
    /// Playing handicap given to every team for the Stableford round.
    #[clap(long, default_value = "12")]
    handicap: i64,
}

// The card at the host course.
const PARS: [i64; 18] =
    [4, 4, 3, 5, 4, 3, 4, 5, 4, 4, 3, 5, 4, 4, 4, 3, 5, 4];
const STROKE_INDEXES: [i64; 18] =
    [5, 11, 17, 1, 7, 15, 9, 3, 13, 6, 16, 2, 8, 10, 4, 18, 12, 14];

const FRIDAY: (i32, u32, u32) = (2026, 8, 21);
const SATURDAY: (i32, u32, u32) = (2026, 8, 22);
const SUNDAY: (i32, u32, u32) = (2026, 8, 23);

fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() {
    let args = Seed::parse();
    let db_url = if let Some(url) = args.database_url {
        url
    } else {
        std::env::var("DATABASE_URL").expect(
            "please either set `DATABASE_URL` or pass the database path as an argument",
        )
    };

    let mut conn = diesel::SqliteConnection::establish(&db_url).unwrap();

    conn.run_pending_migrations(MIGRATIONS).unwrap();

    if teams::table
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap()
        > 0
    {
        panic!("database already contains teams; refusing to seed twice");
    }

    if users::table
        .filter(users::username.eq("admin"))
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap()
        == 0
    {
        diesel::insert_into(users::table)
            .values((
                users::id.eq(Uuid::now_v7().to_string()),
                users::email.eq("admin@example.com"),
                users::username.eq("admin"),
                users::password_hash.eq({
                    let salt = SaltString::generate(&mut OsRng);
                    Argon2::default()
                        .hash_password("password".as_bytes(), &salt)
                        .unwrap()
                        .to_string()
                }),
                users::created_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)
            .unwrap();
    }

    let mut game_number = 0i64;

    for division in Division::ALL {
        // The Mug carries five teams, which forces a three-way match in
        // each session; the other divisions play in pairs.
        let team_count: usize = if division == Division::Mug { 5 } else { 4 };

        let team_ids: Vec<String> = (1..=team_count)
            .map(|seed| {
                let id = Uuid::now_v7().to_string();
                diesel::insert_into(teams::table)
                    .values((
                        teams::id.eq(&id),
                        teams::name
                            .eq(format!("{} {}", division.as_str(), seed)),
                        teams::division.eq(division.as_str()),
                        teams::seed.eq(seed as i64),
                        teams::playing_handicap.eq(args.handicap),
                    ))
                    .execute(&mut conn)
                    .unwrap();
                id
            })
            .collect();

        // (date, session, format, pairings by seed; a third seed makes the
        // match three-way)
        let sessions: Vec<(NaiveDate, Session, MatchType, Vec<Vec<usize>>)> = vec![
            (
                date(FRIDAY),
                Session::Am,
                MatchType::FourBbb,
                pairings(team_count, 0),
            ),
            (
                date(FRIDAY),
                Session::Pm,
                MatchType::Foursomes,
                pairings(team_count, 1),
            ),
            (
                date(SATURDAY),
                Session::Am,
                MatchType::FourBbb,
                pairings(team_count, 2),
            ),
            (
                date(SATURDAY),
                Session::Pm,
                MatchType::Foursomes,
                pairings(team_count, 0),
            ),
            (
                date(SUNDAY),
                Session::Am,
                MatchType::Singles,
                pairings(team_count, 1),
            ),
            (
                date(SUNDAY),
                Session::Pm,
                MatchType::Stableford,
                pairings(team_count, 2),
            ),
        ];

        for (match_date, session, match_type, groups) in sessions {
            for group in groups {
                game_number += 1;
                let match_id = Uuid::now_v7().to_string();

                diesel::insert_into(matches::table)
                    .values((
                        matches::id.eq(&match_id),
                        matches::game_number.eq(game_number),
                        matches::division.eq(division.as_str()),
                        matches::date.eq(match_date),
                        matches::session.eq(session.as_str()),
                        matches::match_type.eq(match_type.as_str()),
                        matches::team_a_id.eq(&team_ids[group[0]]),
                        matches::team_b_id.eq(&team_ids[group[1]]),
                        matches::team_c_id.eq(group
                            .get(2)
                            .map(|&i| team_ids[i].clone())),
                        matches::status.eq("scheduled"),
                    ))
                    .execute(&mut conn)
                    .unwrap();

                for hole in 0..18 {
                    diesel::insert_into(match_holes::table)
                        .values((
                            match_holes::id.eq(Uuid::now_v7().to_string()),
                            match_holes::match_id.eq(&match_id),
                            match_holes::hole_number.eq(hole as i64 + 1),
                            match_holes::par.eq(PARS[hole]),
                            match_holes::stroke_index
                                .eq(STROKE_INDEXES[hole]),
                        ))
                        .execute(&mut conn)
                        .unwrap();
                }
            }
        }
    }

    println!("seeded {game_number} matches");
}

/// Groups team indexes into matches for one session, rotating pairings so
/// every team meets a variety of opponents over the weekend. An odd team
/// count folds the leftover team into the last group as a three-way.
fn pairings(team_count: usize, rotation: usize) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..team_count).collect();
    order.rotate_left(rotation % team_count);

    let mut groups: Vec<Vec<usize>> = order
        .chunks(2)
        .map(|chunk| chunk.to_vec())
        .collect();

    if let Some(last) = groups.last() {
        if last.len() == 1 {
            let leftover = groups.pop().unwrap();
            groups
                .last_mut()
                .unwrap()
                .extend(leftover);
        }
    }

    groups
}
