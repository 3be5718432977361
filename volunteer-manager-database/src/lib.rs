pub mod error;
pub mod loaders;
pub mod models;
pub mod schema;

use diesel_async::pooled_connection::deadpool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
pub use diesel_async::AsyncPgConnection;
use error::DatabaseError;

pub type Pool = deadpool::Pool<AsyncPgConnection>;

// https://github.com/tokio-rs/axum/tree/main/examples/diesel-async-postgres

pub fn get_database_connection(database_url: &str) -> Result<Pool, DatabaseError> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Ok(Pool::builder(config).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_built_lazily() {
        let pool = get_database_connection("postgres://localhost/volunteer_manager").unwrap();
        assert_eq!(pool.status().size, 0);
    }
}
