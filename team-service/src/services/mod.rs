pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::TeamDb;
pub use memory::InMemoryTeamStore;
pub use metrics::{get_metrics, init_metrics, record_store_operation};
pub use store::TeamStore;
