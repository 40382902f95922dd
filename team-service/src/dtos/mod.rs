pub mod teams;

pub use teams::{InvalidTeamPayload, TeamPayload, TeamResponse};
