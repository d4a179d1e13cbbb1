//! Scoped store sessions and pool occupancy
//!
//! A [`Session`] is one checked-out connection. It dereferences to the
//! underlying `SqliteConnection`, so repository code and transactions use it
//! directly. Dropping it hands the connection back to the pool and records
//! how long it was held.

use prometheus::{register_histogram_vec, register_int_gauge_vec, HistogramVec, IntGaugeVec};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use std::ops::{Deref, DerefMut};
use std::time::Instant;

lazy_static::lazy_static! {
    static ref POOL_OCCUPANCY: IntGaugeVec = register_int_gauge_vec!(
        "db_pool_occupancy",
        "Pool connections by state (open/idle/in_use/capacity)",
        &["service", "state"]
    ).expect("db_pool_occupancy registration");

    static ref SESSION_WAIT_SECONDS: HistogramVec = register_histogram_vec!(
        "db_session_wait_seconds",
        "Time spent waiting to open a session, by outcome",
        &["service", "outcome"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.25, 1.0, 5.0]
    ).expect("db_session_wait_seconds registration");

    static ref SESSION_HOLD_SECONDS: HistogramVec = register_histogram_vec!(
        "db_session_hold_seconds",
        "Time a session kept its connection checked out",
        &["service"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.25, 1.0, 5.0]
    ).expect("db_session_hold_seconds registration");
}

/// Point-in-time view of a pool's connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub open: u32,
    pub idle: u32,
    pub capacity: u32,
}

impl PoolSnapshot {
    pub fn capture(pool: &SqlitePool) -> Self {
        let open = pool.size();
        Self {
            open,
            idle: (pool.num_idle() as u32).min(open),
            capacity: pool.options().get_max_connections(),
        }
    }

    pub fn in_use(&self) -> u32 {
        self.open - self.idle
    }

    pub(crate) fn publish(&self, service: &str) {
        for (state, value) in [
            ("open", self.open),
            ("idle", self.idle),
            ("in_use", self.in_use()),
            ("capacity", self.capacity),
        ] {
            POOL_OCCUPANCY
                .with_label_values(&[service, state])
                .set(i64::from(value));
        }
    }
}

/// A checked-out connection, returned to the pool on drop
pub struct Session {
    conn: PoolConnection<Sqlite>,
    service: String,
    opened_at: Instant,
}

impl Deref for Session {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        SESSION_HOLD_SECONDS
            .with_label_values(&[self.service.as_str()])
            .observe(self.opened_at.elapsed().as_secs_f64());
    }
}

/// Check a connection out of `pool` for one unit of work
pub async fn open_session(pool: &SqlitePool, service: &str) -> Result<Session, sqlx::Error> {
    let started = Instant::now();
    let result = pool.acquire().await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(sqlx::Error::PoolTimedOut) => "timeout",
        Err(sqlx::Error::PoolClosed) => "closed",
        Err(_) => "error",
    };
    SESSION_WAIT_SECONDS
        .with_label_values(&[service, outcome])
        .observe(started.elapsed().as_secs_f64());

    let conn = result?;
    Ok(Session {
        conn,
        service: service.to_string(),
        opened_at: Instant::now(),
    })
}
