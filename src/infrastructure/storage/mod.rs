//! Storage infrastructure - backend selection, pooling and migrations

mod factory;
pub mod migrations;
mod pool;

pub use factory::StorageFactory;
pub use migrations::{run_user_migrations, Migration, PostgresMigrator};
pub use pool::connect;
