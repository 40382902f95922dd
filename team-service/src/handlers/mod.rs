pub mod health;
pub mod teams;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use teams::{create_team, delete_team, get_team, list_teams, update_team};
