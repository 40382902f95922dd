use crate::models::Team;
use async_trait::async_trait;
use service_core::error::AppError;

/// Single-document CRUD over the team collection.
///
/// Operations taking an `id` fail with [`AppError::InvalidIdentifier`] when it is not a
/// valid store identifier. No ordering or atomicity holds across calls.
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Every stored team, in no particular order.
    async fn list_all(&self) -> Result<Vec<Team>, AppError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Team>, AppError>;

    /// Insert `team`, assigning an identifier when it has none.
    async fn create(&self, team: Team) -> Result<Team, AppError>;

    /// Replace the whole document at `id`.
    ///
    /// Returns `None` when nothing matched or the stored document was left unchanged.
    async fn update(&self, id: &str, team: Team) -> Result<Option<Team>, AppError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
