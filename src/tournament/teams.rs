use diesel::{connection::LoadConnection, prelude::*, sqlite::Sqlite};
use serde::{Deserialize, Serialize};

use crate::{
    engine::Division, schema::teams, util_resp::FailureResponse,
};

#[derive(Serialize, Deserialize, Queryable, Clone, Debug)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub division: String,
    pub seed: i64,
    /// Only used by the Stableford format.
    pub playing_handicap: Option<i64>,
}

impl Team {
    #[tracing::instrument(skip(conn))]
    pub fn fetch(
        team_id: &str,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Result<Team, FailureResponse> {
        teams::table
            .filter(teams::id.eq(team_id))
            .first::<Team>(&mut *conn)
            .optional()
            .unwrap()
            .ok_or(FailureResponse::NotFound(()))
    }

    pub fn of_division(
        division: Division,
        conn: &mut impl LoadConnection<Backend = Sqlite>,
    ) -> Vec<Team> {
        teams::table
            .filter(teams::division.eq(division.as_str()))
            .order(teams::seed.asc())
            .load::<Team>(&mut *conn)
            .unwrap()
    }
}
