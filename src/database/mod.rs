pub mod combos;
pub mod models;
pub mod pool;
pub mod seats;
pub mod tickets;
pub mod users;

pub use pool::{db_pool, health_check, run_migrations, DatabaseError};
