use crate::dtos::{TeamPayload, TeamResponse};
use crate::services::record_store_operation;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

const INVALID_BODY_MESSAGE: &str = "Invalid player data.";

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Team with ID {} not found.", id))
}

fn parse_body(body: &[u8]) -> Result<TeamPayload, AppError> {
    TeamPayload::from_json(body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected team payload");
        AppError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    })
}

/// Log server-side failures with the endpoint context; client errors pass through.
fn log_failure(err: AppError, context: &str) -> AppError {
    if err.status_code().is_server_error() {
        tracing::error!(error = %err, "{}", context);
    }
    err
}

pub async fn list_teams(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let result = state.store.list_all().await;
    record_store_operation("list_all", &result);
    let teams = result.map_err(|e| log_failure(e, "Error fetching teams"))?;

    Ok(Json(
        teams
            .into_iter()
            .map(TeamResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.store.get_by_id(&id).await;
    record_store_operation("get_by_id", &result);
    let team = result
        .map_err(|e| log_failure(e, &format!("Error fetching team with ID {}", id)))?
        .ok_or_else(|| not_found(&id))?;

    Ok(Json(TeamResponse::from(team)))
}

pub async fn create_team(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let team = parse_body(&body)?.into_new_team()?;

    let result = state.store.create(team).await;
    record_store_operation("create", &result);
    let created = TeamResponse::from(result.map_err(|e| log_failure(e, "Error creating team"))?);

    tracing::info!(team_id = %created.team_id, "Team created");

    let location = format!("/api/team/{}", created.team_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let team = parse_body(&body)?.into_replacement();

    let result = state.store.update(&id, team).await;
    record_store_operation("update", &result);
    let updated = result
        .map_err(|e| log_failure(e, &format!("Error updating team with ID {}", id)))?
        .ok_or_else(|| not_found(&id))?;

    tracing::info!(team_id = %id, "Team updated");

    Ok(Json(TeamResponse::from(updated)))
}

pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.store.delete(&id).await;
    record_store_operation("delete", &result);
    let deleted =
        result.map_err(|e| log_failure(e, &format!("Error deleting team with ID {}", id)))?;

    if !deleted {
        return Err(not_found(&id));
    }

    tracing::info!(team_id = %id, "Team deleted");

    Ok(StatusCode::NO_CONTENT)
}
