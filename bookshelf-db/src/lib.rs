#[cfg(not(any(feature = "postgres", feature = "mysql", feature = "sqlite")))]
compile_error!(
    "Enable exactly one of the `postgres`, `mysql`, or `sqlite` features for bookshelf-db."
);

#[cfg(any(
    all(feature = "postgres", feature = "mysql"),
    all(feature = "postgres", feature = "sqlite"),
    all(feature = "mysql", feature = "sqlite"),
))]
compile_error!(
    "Activate only one backend feature (`postgres`, `mysql`, or `sqlite`) for bookshelf-db."
);

#[cfg(feature = "postgres")]
pub type DbBackend = sqlx::Postgres;
#[cfg(feature = "mysql")]
pub type DbBackend = sqlx::MySql;
#[cfg(feature = "sqlite")]
pub type DbBackend = sqlx::Sqlite;

pub mod books;
mod config;
mod error;
mod pool;
mod schema;

pub use config::DbConnectionConfig;
pub use error::DbError;
pub use pool::{create_pool, DbPool};
pub use schema::ensure_schema;
