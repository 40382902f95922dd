use crate::models::{parse_team_id, Team};
use crate::services::store::TeamStore;
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Process-local team store for local runs and tests.
///
/// Follows the same contract as the MongoDB store, including identifier format and the
/// "unchanged replace is not an update" rule.
#[derive(Default)]
pub struct InMemoryTeamStore {
    teams: DashMap<ObjectId, Team>,
}

impl InMemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[async_trait]
impl TeamStore for InMemoryTeamStore {
    async fn list_all(&self) -> Result<Vec<Team>, AppError> {
        Ok(self.teams.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Team>, AppError> {
        let id = parse_team_id(id)?;
        Ok(self.teams.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, mut team: Team) -> Result<Team, AppError> {
        let id = *team.id.get_or_insert_with(ObjectId::new);

        match self.teams.entry(id) {
            Entry::Occupied(_) => Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: team {} already exists",
                id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(team.clone());
                Ok(team)
            }
        }
    }

    async fn update(&self, id: &str, mut team: Team) -> Result<Option<Team>, AppError> {
        let id = parse_team_id(id)?;
        team.id = Some(id);

        let Some(mut stored) = self.teams.get_mut(&id) else {
            return Ok(None);
        };

        if *stored == team {
            return Ok(None);
        }

        *stored = team.clone();
        Ok(Some(team))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let id = parse_team_id(id)?;
        Ok(self.teams.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
