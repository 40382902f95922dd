use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use service_core::error::AppError;

/// One league membership of a team.
///
/// The record shape is owned by other services of the platform, so it is kept as an
/// opaque JSON object and written back exactly as it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamInLeague(pub Map<String, Value>);

/// A team as stored in the `Teams` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    /// `None` is stored as `null` and is distinct from an empty list.
    #[serde(default)]
    pub league: Option<Vec<TeamInLeague>>,
}

impl Team {
    pub fn new(name: impl Into<String>, league: Option<Vec<TeamInLeague>>) -> Self {
        Self {
            id: None,
            name: name.into(),
            league,
        }
    }

    /// Hex form of the identifier, empty for a team that was never stored.
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// Parse an externally supplied team id into the store's native identifier.
pub fn parse_team_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::InvalidIdentifier(format!("Invalid team ID {}.", id)))
}
