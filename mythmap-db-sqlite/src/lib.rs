#[macro_use]
extern crate diesel;

use anyhow::{anyhow, Result as Fallible};
use diesel::{
    connection::SimpleConnection as _,
    r2d2::{self, CustomizeConnection},
    sqlite::SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use mythmap_core::{repositories as repo, usecases as uc};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    cell::{RefCell, RefMut},
    sync::Arc,
};

mod models;
mod repo_impl;
mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type Connection = SqliteConnection;

type ConnectionManager = r2d2::ConnectionManager<Connection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

type SharedConnectionPool = Arc<RwLock<ConnectionPool>>;

pub struct DbReadOnly<'a> {
    _locked_pool: RwLockReadGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

impl<'a> DbReadOnly<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Fallible<Self> {
        let locked_pool = pool.read();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read-only access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
        })
    }
}

pub struct DbReadWrite<'a> {
    _locked_pool: RwLockWriteGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

/// A connection inside of a transaction.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl<'a> DbConnection<'a> {
    fn new(conn: &'a mut SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
        }
    }
}

impl<'a> DbReadWrite<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Fallible<Self> {
        let locked_pool = pool.write();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read/write access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
        })
    }

    /// Run `f` in a transaction that is rolled back on error.
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        let mut usecase_error = None;
        use diesel::Connection;
        self.conn
            .borrow_mut()
            .transaction(|conn| {
                f(&DbConnection::new(conn))
                    .map_err(Into::into)
                    .map_err(|err| {
                        usecase_error = Some(err);
                        diesel::result::Error::RollbackTransaction
                    })
            })
            .map_err(|err| {
                if let Some(usecase_error) = usecase_error {
                    debug_assert!(matches!(err, diesel::result::Error::RollbackTransaction));
                    usecase_error
                } else {
                    uc::Error::Repo(repo_impl::from_diesel_err(err))
                }
            })
    }

    fn sqlite_conn(&self) -> RefMut<PooledConnection> {
        self.conn.borrow_mut()
    }
}

#[derive(Clone)]
pub struct Connections {
    // Only a single connection with write access will be
    // handed out at a time from the pool. Multiple read
    // connections can be accessed concurrently. This locking
    // pattern around the connection pool prevents SQLITE_LOCKED
    // ("database is locked") errors.
    pool: SharedConnectionPool,
}

/// Per-connection settings that SQLite does not persist.
#[derive(Debug)]
struct ConnectionCustomizer;

impl CustomizeConnection<Connection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), r2d2::Error> {
        conn.batch_execute(
            r#"
PRAGMA foreign_keys = 1;          -- check foreign key constraints and cascade deletes
PRAGMA busy_timeout = 5000;       -- wait for locks held by other processes
"#,
        )
        .map_err(r2d2::Error::QueryError)
    }
}

/// Configure the database engine
///
/// Some values like the text encoding can only be changed once after the
/// database has initially been created.
pub fn initialize_database(connection: &mut SqliteConnection) -> Fallible<()> {
    connection.batch_execute(
        r#"
PRAGMA journal_mode = WAL;        -- better write-concurrency
PRAGMA synchronous = NORMAL;      -- fsync only in critical moments, safe for journal_mode = WAL
PRAGMA wal_checkpoint(TRUNCATE);  -- free some space by truncating possibly massive WAL files from the last run
PRAGMA secure_delete = 0;         -- avoid some disk I/O
PRAGMA encoding = 'UTF-8';
"#,
    )?;
    Ok(())
}

impl Connections {
    /// Use a `pool_size` of 1 for `:memory:` databases, every
    /// connection would open a separate database otherwise.
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // Establish a test connection before creating the connection pool to fail early.
        use diesel::Connection as _;
        let _ = diesel::SqliteConnection::establish(url)?;
        let manager = ConnectionManager::new(url);
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionCustomizer))
            .build(manager)?;
        initialize_database(&mut *pool.get()?)?;
        Ok(Self::new(pool))
    }

    fn new(pool: ConnectionPool) -> Self {
        Self {
            pool: Arc::new(RwLock::new(pool)),
        }
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        DbReadOnly::try_new(&self.pool)
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        DbReadWrite::try_new(&self.pool)
    }
}

pub fn run_embedded_database_migrations(conn: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    let mut conn = conn.sqlite_conn();
    let versions = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow!("Failed to run database migrations: {err}"))?;
    for version in versions {
        log::debug!("Applied database migration {version}");
    }
    Ok(())
}

#[cfg(test)]
mod tests;
