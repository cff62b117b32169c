use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::Key;
use diesel::{
    Connection, SqliteConnection,
    connection::TransactionManager,
    r2d2::{ConnectionManager, Pool, PooledConnection},
};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

type PooledSqlite = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub key: Key,
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// A request-scoped connection slot, shared between every extractor on the
/// request and the transaction middleware. The `TX` parameter selects
/// whether a transaction is opened when the slot is first filled.
#[derive(Clone)]
pub struct ThreadSafeConn<const TX: bool> {
    pub inner: Arc<tokio::sync::Mutex<Option<PooledSqlite>>>,
}

impl<const TX: bool> ThreadSafeConn<TX> {
    pub fn empty() -> Self {
        ThreadSafeConn {
            inner: Arc::new(tokio::sync::Mutex::new(None)),
        }
    }
}

#[async_trait]
impl<const TX: bool, S> FromRequestParts<S> for ThreadSafeConn<TX>
where
    S: Send + Sync,
    DbPool: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let wrapper = match parts.extensions.get::<ThreadSafeConn<TX>>() {
            Some(wrapper) => wrapper.clone(),
            None => {
                let wrapper = ThreadSafeConn::empty();
                parts.extensions.insert(wrapper.clone());
                wrapper
            }
        };

        {
            let mut slot = wrapper.inner.lock().await;

            if slot.is_none() {
                let pool = DbPool::from_ref(state);

                let mut conn =
                    tokio::task::spawn_blocking(move || pool.get())
                        .await
                        .map_err(|_| db_error())?
                        .map_err(|_| db_error())?;

                if TX {
                    <PooledSqlite as Connection>::TransactionManager
                        ::begin_transaction(&mut conn)
                        .map_err(|_| db_error())?;
                }

                *slot = Some(conn);
            }
        }

        Ok(wrapper)
    }
}

fn db_error() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
}

/// Exclusive handle on the request's connection, for handlers that run
/// queries directly.
pub struct Conn<const TX: bool> {
    inner: tokio::sync::OwnedMutexGuard<Option<PooledSqlite>>,
}

impl<const TX: bool> Deref for Conn<TX> {
    type Target = PooledSqlite;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref().unwrap()
    }
}

impl<const TX: bool> DerefMut for Conn<TX> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut().unwrap()
    }
}

#[async_trait]
impl<const TX: bool, S> FromRequestParts<S> for Conn<TX>
where
    S: Send + Sync,
    DbPool: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let wrapper =
            ThreadSafeConn::<TX>::from_request_parts(parts, state).await?;

        let inner = wrapper
            .inner
            .clone()
            .try_lock_owned()
            .map_err(|_| db_error())?;

        Ok(Conn { inner })
    }
}

/// Commits the request's transaction (if one was opened) after the handler
/// has run, or rolls it back on an error response.
pub async fn tx_commit_middleware(mut req: Request, next: Next) -> Response {
    let slot: ThreadSafeConn<true> = ThreadSafeConn::empty();
    req.extensions_mut().insert(slot.clone());

    let res = next.run(req).await;

    let mut guard = slot.inner.lock().await;
    if let Some(conn) = guard.as_mut() {
        let status = res.status();
        let outcome = if status.is_success()
            || status.is_redirection()
            || status.is_informational()
        {
            <PooledSqlite as Connection>::TransactionManager
                ::commit_transaction(conn)
        } else {
            <PooledSqlite as Connection>::TransactionManager
                ::rollback_transaction(conn)
        };

        if let Err(e) = outcome {
            tracing::error!("failed to finish transaction: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    res
}
