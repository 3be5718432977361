use diesel_async::pooled_connection::deadpool;
use thiserror::Error;
use volunteer_manager_reconciler::UnknownValue;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to create database pool {0}")]
    PoolBuild(#[from] deadpool::BuildError),
    #[error("Database pool failed {0}")]
    Pool(#[from] deadpool::PoolError),
    #[error("Database query failed {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Stored value is invalid: {0}")]
    UnknownValue(#[from] UnknownValue),
}
