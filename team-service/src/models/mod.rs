pub mod team;

pub use team::{parse_team_id, Team, TeamInLeague};
