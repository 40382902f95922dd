use crate::models::{parse_team_id, Team};
use crate::services::store::TeamStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

/// MongoDB-backed team store.
///
/// Holds one client for the whole process; the driver pools connections and is safe to
/// share across concurrent requests.
#[derive(Clone)]
pub struct TeamDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl TeamDb {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, collection = %collection, "Successfully connected to MongoDB database");
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub fn teams(&self) -> Collection<Team> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    async fn find_by_object_id(&self, id: ObjectId) -> Result<Option<Team>, AppError> {
        self.teams()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(team_id = %id, "Failed to find team: {}", e);
                AppError::from(e)
            })
    }
}

#[async_trait]
impl TeamStore for TeamDb {
    async fn list_all(&self) -> Result<Vec<Team>, AppError> {
        let cursor = self.teams().find(None, None).await.map_err(|e| {
            tracing::error!("Failed to query teams: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect::<Vec<Team>>().await.map_err(|e| {
            tracing::error!("Failed to read teams cursor: {}", e);
            AppError::from(e)
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Team>, AppError> {
        let id = parse_team_id(id)?;
        self.find_by_object_id(id).await
    }

    async fn create(&self, mut team: Team) -> Result<Team, AppError> {
        let result = self.teams().insert_one(&team, None).await.map_err(|e| {
            tracing::error!("Failed to insert team: {}", e);
            AppError::from(e)
        })?;

        if team.id.is_none() {
            let id = result.inserted_id.as_object_id().ok_or_else(|| {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Inserted team id is not an ObjectId: {}",
                    result.inserted_id
                ))
            })?;
            team.id = Some(id);
        }

        Ok(team)
    }

    async fn update(&self, id: &str, mut team: Team) -> Result<Option<Team>, AppError> {
        let id = parse_team_id(id)?;
        team.id = Some(id);

        let result = self
            .teams()
            .replace_one(doc! { "_id": id }, &team, None)
            .await
            .map_err(|e| {
                tracing::error!(team_id = %id, "Failed to replace team: {}", e);
                AppError::from(e)
            })?;

        if result.modified_count == 0 {
            return Ok(None);
        }

        self.find_by_object_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let id = parse_team_id(id)?;

        let result = self
            .teams()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(team_id = %id, "Failed to delete team: {}", e);
                AppError::from(e)
            })?;

        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
