pub mod connection;
pub mod profiles;
pub mod properties;
pub mod users;

pub use connection::{init_db, Database};
