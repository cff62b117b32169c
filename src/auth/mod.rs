//! Login sessions.
//!
//! A logged-in scorer carries a private (encrypted) cookie holding a
//! [`LoginSession`]. Handlers declare their authentication requirement in
//! their signature: `User<TX>` for score entry and administration,
//! `Option<User<TX>>` for public pages that merely show the login state.
//! Registration policy itself lives in [`register`] alongside the form it
//! validates.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use chrono::{Days, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    schema::users,
    state::{DbPool, ThreadSafeConn},
    util_resp::FailureResponse,
};

pub mod login;
pub mod register;

pub const LOGIN_COOKIE: &str = "green_jacket";

const SESSION_DAYS: u64 = 7;

#[derive(Debug, Queryable, Serialize, Deserialize, Clone)]
pub struct User<const TX: bool> {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Contents of the login cookie. Expiry is checked server-side on every
/// request; the cookie itself is tamper-proof by virtue of the private jar.
#[derive(Serialize, Deserialize)]
struct LoginSession {
    user_id: String,
    expires: NaiveDateTime,
}

impl LoginSession {
    fn issue(user_id: String) -> Self {
        LoginSession {
            user_id,
            expires: Utc::now()
                .naive_utc()
                .checked_add_days(Days::new(SESSION_DAYS))
                .unwrap(),
        }
    }

    fn current(&self) -> bool {
        Utc::now().naive_utc() < self.expires
    }
}

#[async_trait]
impl<const TX: bool, S> FromRequestParts<S> for User<TX>
where
    S: Send + Sync,
    DbPool: FromRef<S>,
    Key: FromRef<S>,
{
    type Rejection = FailureResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let jar: PrivateCookieJar<Key> =
            PrivateCookieJar::from_request_parts(parts, state)
                .await
                .map_err(|_| FailureResponse::Unauthorized(()))?;

        // A missing, malformed or expired session all read the same to the
        // caller: not logged in.
        let session = jar
            .get(LOGIN_COOKIE)
            .and_then(|cookie| {
                serde_json::from_str::<LoginSession>(cookie.value()).ok()
            })
            .filter(LoginSession::current)
            .ok_or(FailureResponse::Unauthorized(()))?;

        let wrapper = ThreadSafeConn::<TX>::from_request_parts(parts, state)
            .await
            .map_err(|_| FailureResponse::ServerError(()))?;
        let mut slot = wrapper
            .inner
            .try_lock()
            .map_err(|_| FailureResponse::ServerError(()))?;
        let conn = slot.as_mut().ok_or(FailureResponse::ServerError(()))?;

        users::table
            .filter(users::id.eq(&session.user_id))
            .first(conn)
            .optional()
            .map_err(|_| FailureResponse::ServerError(()))?
            .ok_or(FailureResponse::Unauthorized(()))
    }
}

pub fn set_login_cookie(
    user_id: String,
    jar: PrivateCookieJar,
) -> PrivateCookieJar {
    jar.add(Cookie::new(
        LOGIN_COOKIE,
        serde_json::to_string(&LoginSession::issue(user_id)).unwrap(),
    ))
}
