use crate::models::{parse_team_id, Team, TeamInLeague};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use service_core::error::AppError;
use thiserror::Error;

/// External representation of a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub team_id: String,
    pub name: String,
    pub league: Option<Vec<TeamInLeague>>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            team_id: team.id_hex(),
            name: team.name,
            league: team.league,
        }
    }
}

#[derive(Debug, Error)]
pub enum InvalidTeamPayload {
    #[error("body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("body must be a JSON object")]
    NotAnObject,

    #[error("league data holds an integer outside the signed 64-bit range")]
    UnrepresentableNumber,
}

/// Body of create and update requests.
///
/// Field names are matched without regard to case, unknown fields are ignored and a
/// missing or `null` name reads as an empty string. League records may hold any JSON
/// except integers above `i64::MAX`, which the store cannot represent.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPayload {
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub league: Option<Vec<TeamInLeague>>,
}

impl TeamPayload {
    pub fn from_json(body: &[u8]) -> Result<Self, InvalidTeamPayload> {
        let object = match serde_json::from_slice::<Value>(body)? {
            Value::Object(object) => object,
            _ => return Err(InvalidTeamPayload::NotAnObject),
        };

        let mut normalized = Map::new();
        for (key, value) in object {
            let field = match key.to_ascii_lowercase().as_str() {
                "teamid" => "teamId",
                "name" => "name",
                "league" => "league",
                _ => continue,
            };
            // Later spellings of the same field win.
            normalized.insert(field.to_string(), value);
        }

        if normalized.get("league").is_some_and(has_unrepresentable_number) {
            return Err(InvalidTeamPayload::UnrepresentableNumber);
        }

        Ok(serde_json::from_value(Value::Object(normalized))?)
    }

    /// Team to insert. A non-empty `teamId` in the body becomes the new document's id.
    pub fn into_new_team(self) -> Result<Team, AppError> {
        let id = match self.team_id.as_deref() {
            Some(id) if !id.is_empty() => Some(parse_team_id(id)?),
            _ => None,
        };

        Ok(Team {
            id,
            name: self.name.unwrap_or_default(),
            league: self.league,
        })
    }

    /// Replacement document. The identifier always comes from the request path.
    pub fn into_replacement(self) -> Team {
        Team::new(self.name.unwrap_or_default(), self.league)
    }
}

fn has_unrepresentable_number(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_u64() && n.as_i64().is_none(),
        Value::Array(items) => items.iter().any(has_unrepresentable_number),
        Value::Object(fields) => fields.values().any(has_unrepresentable_number),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn parses_minimal_body() {
        let payload = TeamPayload::from_json(br#"{"name":"Red FC"}"#).unwrap();

        assert_eq!(payload.name.as_deref(), Some("Red FC"));
        assert_eq!(payload.league, None);
        assert_eq!(payload.team_id, None);
    }

    #[test]
    fn field_names_are_case_insensitive() {
        let payload =
            TeamPayload::from_json(br#"{"NAME":"Red FC","League":[{"leagueId":"L1"}],"TEAMID":""}"#)
                .unwrap();

        assert_eq!(payload.name.as_deref(), Some("Red FC"));
        assert_eq!(payload.league.as_ref().map(Vec::len), Some(1));
        assert_eq!(payload.team_id.as_deref(), Some(""));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let payload = TeamPayload::from_json(br#"{"name":"Red FC","coach":"Jo"}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Red FC"));
    }

    #[test]
    fn rejects_non_json_and_non_objects() {
        assert!(matches!(
            TeamPayload::from_json(b"not json"),
            Err(InvalidTeamPayload::Malformed(_))
        ));
        assert!(matches!(
            TeamPayload::from_json(b"null"),
            Err(InvalidTeamPayload::NotAnObject)
        ));
        assert!(matches!(
            TeamPayload::from_json(b"[]"),
            Err(InvalidTeamPayload::NotAnObject)
        ));
    }

    #[test]
    fn rejects_league_entries_that_are_not_objects() {
        assert!(TeamPayload::from_json(br#"{"name":"Red FC","league":[1,2]}"#).is_err());
    }

    #[test]
    fn rejects_league_integers_beyond_i64() {
        let body = br#"{"name":"Red FC","league":[{"stats":{"points":18446744073709551615}}]}"#;
        assert!(matches!(
            TeamPayload::from_json(body),
            Err(InvalidTeamPayload::UnrepresentableNumber)
        ));
    }

    #[test]
    fn accepts_league_numbers_within_range() {
        let body = br#"{"name":"Red FC","league":[{"points":9223372036854775807,"ratio":0.5,"delta":-3}]}"#;
        let team = TeamPayload::from_json(body).unwrap().into_new_team().unwrap();

        let document = mongodb::bson::to_document(&team).unwrap();
        assert!(document.contains_key("league"));
    }

    #[test]
    fn missing_name_becomes_empty_string() {
        let team = TeamPayload::from_json(b"{}")
            .unwrap()
            .into_new_team()
            .unwrap();
        assert_eq!(team.name, "");
        assert_eq!(team.id, None);
    }

    #[test]
    fn new_team_uses_supplied_id() {
        let id = ObjectId::new();
        let body = format!(r#"{{"teamId":"{}","name":"Red FC"}}"#, id.to_hex());

        let team = TeamPayload::from_json(body.as_bytes())
            .unwrap()
            .into_new_team()
            .unwrap();
        assert_eq!(team.id, Some(id));
    }

    #[test]
    fn new_team_rejects_malformed_id() {
        let err = TeamPayload::from_json(br#"{"teamId":"xyz","name":"Red FC"}"#)
            .unwrap()
            .into_new_team()
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidIdentifier(_)));
    }

    #[test]
    fn replacement_ignores_body_id() {
        let body = format!(r#"{{"teamId":"{}","name":"Blue"}}"#, ObjectId::new().to_hex());
        let team = TeamPayload::from_json(body.as_bytes())
            .unwrap()
            .into_replacement();
        assert_eq!(team.id, None);
        assert_eq!(team.name, "Blue");
    }

    #[test]
    fn response_round_trip_keeps_null_league() {
        let response = TeamResponse {
            team_id: ObjectId::new().to_hex(),
            name: "Red FC".to_string(),
            league: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["league"], Value::Null);
        assert!(json.get("teamId").is_some());

        let parsed: TeamResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, response);
    }

    #[test]
    fn response_round_trip_keeps_league_entries_in_order() {
        let league = vec![
            serde_json::from_value::<TeamInLeague>(json!({"leagueId": "L2", "season": 2023}))
                .unwrap(),
            serde_json::from_value::<TeamInLeague>(json!({"leagueId": "L1", "season": 2024}))
                .unwrap(),
        ];
        let response = TeamResponse {
            team_id: ObjectId::new().to_hex(),
            name: "Red FC".to_string(),
            league: Some(league),
        };

        let text = serde_json::to_string(&response).unwrap();
        let parsed: TeamResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, response);
    }
}
