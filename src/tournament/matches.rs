use chrono::NaiveDate;
use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{
        Division, HoleScores, MatchSnapshot, MatchStatus, MatchType, Session,
        TeamSlot,
    },
    schema::{match_holes, matches, teams},
    tournament::teams::Team,
    util_resp::FailureResponse,
};

#[derive(Serialize, Deserialize, Queryable, Clone, Debug)]
pub struct Match {
    pub id: String,
    pub game_number: i64,
    pub division: String,
    pub date: NaiveDate,
    pub session: String,
    pub match_type: String,
    pub team_a_id: String,
    pub team_b_id: String,
    pub team_c_id: Option<String>,
    pub status: String,
}

#[derive(Serialize, Deserialize, Queryable, Clone, Debug)]
pub struct MatchHole {
    pub id: String,
    pub match_id: String,
    pub hole_number: i64,
    pub par: i64,
    pub stroke_index: Option<i64>,
    pub team_a_score: Option<i64>,
    pub team_b_score: Option<i64>,
    pub team_c_score: Option<i64>,
}

impl Match {
    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        match_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Match, FailureResponse> {
        matches::table
            .filter(matches::id.eq(match_id))
            .first::<Match>(&mut *conn)
            .optional()
            .unwrap()
            .ok_or(FailureResponse::NotFound(()))
    }

    pub fn all(
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Vec<Match> {
        matches::table
            .order((
                matches::date.asc(),
                matches::session.asc(),
                matches::game_number.asc(),
            ))
            .load::<Match>(&mut *conn)
            .unwrap()
    }

    pub fn of_division(
        division: Division,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Vec<Match> {
        matches::table
            .filter(matches::division.eq(division.as_str()))
            .load::<Match>(&mut *conn)
            .unwrap()
    }

    pub fn holes(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Vec<MatchHole> {
        match_holes::table
            .filter(match_holes::match_id.eq(&self.id))
            .order(match_holes::hole_number.asc())
            .load::<MatchHole>(&mut *conn)
            .unwrap()
    }

    pub fn division(&self) -> Division {
        Division::parse(&self.division).unwrap()
    }

    pub fn session(&self) -> Session {
        Session::parse(&self.session).unwrap()
    }

    pub fn match_type(&self) -> MatchType {
        MatchType::parse(&self.match_type).unwrap()
    }

    pub fn status(&self) -> MatchStatus {
        MatchStatus::parse(&self.status).unwrap()
    }

    pub fn is_three_way(&self) -> bool {
        self.team_c_id.is_some()
    }

    pub fn team_id_of(&self, slot: TeamSlot) -> Option<&str> {
        match slot {
            TeamSlot::A => Some(&self.team_a_id),
            TeamSlot::B => Some(&self.team_b_id),
            TeamSlot::C => self.team_c_id.as_deref(),
        }
    }

    pub fn participants(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Vec<(TeamSlot, Team)> {
        [TeamSlot::A, TeamSlot::B, TeamSlot::C]
            .iter()
            .filter_map(|&slot| {
                let id = self.team_id_of(slot)?;
                Some((slot, Team::fetch(id, conn).ok()?))
            })
            .collect()
    }

    /// The single adapter from the datastore's row shape to the engine's
    /// canonical shape. Nothing else in the crate reads hole rows directly
    /// for scoring purposes.
    pub fn snapshot(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> MatchSnapshot {
        let holes = self
            .holes(conn)
            .into_iter()
            .map(|h| HoleScores {
                hole_number: h.hole_number,
                par: h.par,
                stroke_index: h.stroke_index,
                team_a: h.team_a_score,
                team_b: h.team_b_score,
                team_c: h.team_c_score,
            })
            .collect();

        let mut handicap_of = |id: Option<&str>| -> Option<i64> {
            let id = id?;
            teams::table
                .filter(teams::id.eq(id))
                .select(teams::playing_handicap)
                .first::<Option<i64>>(&mut *conn)
                .optional()
                .unwrap()
                .flatten()
        };

        let handicaps = [
            handicap_of(Some(&self.team_a_id)),
            handicap_of(Some(&self.team_b_id)),
            handicap_of(self.team_c_id.as_deref()),
        ];

        MatchSnapshot {
            division: self.division(),
            date: self.date,
            session: self.session(),
            match_type: self.match_type(),
            three_way: self.is_three_way(),
            holes,
            handicaps,
        }
    }

    /// Moves the persisted status forward to match the engine's view of the
    /// hole data. Status is monotonic: this never moves a match backwards
    /// (only the explicit admin reset does).
    pub fn advance_status(
        &self,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> MatchStatus {
        let implied = self.snapshot(conn).implied_status();
        let new_status = self.status().max(implied);

        if new_status != self.status() {
            diesel::update(matches::table.find(&self.id))
                .set(matches::status.eq(new_status.as_str()))
                .execute(&mut *conn)
                .unwrap();
        }

        new_status
    }
}
