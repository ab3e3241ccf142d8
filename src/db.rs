//! SQLite connection pool shared by the Diesel repository.

use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};

/// Pool of SQLite connections.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// A connection checked out of [`DbPool`].
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Build a connection pool for the SQLite database at `database_url`.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder().build(manager)
}
