//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use journal_core::{
    analysis::{analyze_entry, AnalyzeError},
    domain::{AnalysisResult, Entry, EntryPatch, NewEntry},
    ports::PortError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_entry_handler,
        list_entries_handler,
        get_entry_handler,
        update_entry_handler,
        delete_entry_handler,
        delete_all_entries_handler,
        analyze_entry_handler,
    ),
    components(
        schemas(
            EntryBody,
            CreateEntryPayload,
            UpdateEntryPayload,
            CreateEntryResponse,
            EntryListResponse,
            AnalysisBody,
            AnalyzeEntryResponse,
            DetailResponse,
        )
    ),
    tags(
        (name = "Journal API", description = "A simple journal API for tracking daily work, struggles, and intentions.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// One journal entry as it appears on the wire.
#[derive(Serialize, ToSchema)]
pub struct EntryBody {
    id: Uuid,
    work: String,
    struggle: String,
    intention: String,
    created_at: DateTime<Utc>,
}

impl From<Entry> for EntryBody {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            work: entry.work,
            struggle: entry.struggle,
            intention: entry.intention,
            created_at: entry.created_at,
        }
    }
}

/// The request payload for creating an entry.
#[derive(Deserialize, ToSchema)]
pub struct CreateEntryPayload {
    work: String,
    struggle: String,
    intention: String,
}

/// The request payload for partially updating an entry.
#[derive(Deserialize, ToSchema)]
pub struct UpdateEntryPayload {
    work: Option<String>,
    struggle: Option<String>,
    intention: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CreateEntryResponse {
    detail: String,
    entry: EntryBody,
}

#[derive(Serialize, ToSchema)]
pub struct EntryListResponse {
    entries: Vec<EntryBody>,
    count: usize,
}

/// A completed analysis as it appears on the wire.
#[derive(Serialize, ToSchema)]
pub struct AnalysisBody {
    entry_id: Uuid,
    /// "positive" | "negative" | "neutral"
    sentiment: String,
    summary: String,
    topics: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<AnalysisResult> for AnalysisBody {
    fn from(result: AnalysisResult) -> Self {
        Self {
            entry_id: result.entry_id,
            sentiment: result.sentiment.as_str().to_string(),
            summary: result.summary,
            topics: result.topics,
            created_at: result.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AnalyzeEntryResponse {
    analysis: AnalysisBody,
}

#[derive(Serialize, ToSchema)]
pub struct DetailResponse {
    detail: String,
}

/// Maps a store failure to a response, keeping database detail out of the body.
fn store_error_response(context: &str, e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        PortError::Unexpected(msg) => {
            error!("{context}: {msg}");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {context}"))
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Create a new journal entry.
#[utoipa::path(
    post,
    path = "/entries",
    request_body = CreateEntryPayload,
    responses(
        (status = 201, description = "Entry created successfully", body = CreateEntryResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateEntryPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let new = NewEntry {
        work: payload.work,
        struggle: payload.struggle,
        intention: payload.intention,
    };
    let entry = app_state
        .store
        .create(new)
        .await
        .map_err(|e| store_error_response("failed to create entry", e))?;

    let response = CreateEntryResponse {
        detail: "Entry created successfully".to_string(),
        entry: entry.into(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all journal entries.
#[utoipa::path(
    get,
    path = "/entries",
    responses(
        (status = 200, description = "All entries", body = EntryListResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_entries_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entries = app_state
        .store
        .list_all()
        .await
        .map_err(|e| store_error_response("failed to list entries", e))?;

    let entries: Vec<EntryBody> = entries.into_iter().map(EntryBody::from).collect();
    let count = entries.len();
    Ok(Json(EntryListResponse { entries, count }))
}

/// Return a single journal entry by ID.
#[utoipa::path(
    get,
    path = "/entries/{entry_id}",
    responses(
        (status = 200, description = "The entry", body = EntryBody),
        (status = 404, description = "Entry not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("entry_id" = Uuid, Path, description = "The unique ID of the entry.")
    )
)]
pub async fn get_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(entry_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entry = app_state
        .store
        .get(entry_id)
        .await
        .map_err(|e| store_error_response("failed to fetch entry", e))?;
    Ok(Json(EntryBody::from(entry)))
}

/// Partially update a journal entry. Omitted fields are left unchanged.
#[utoipa::path(
    patch,
    path = "/entries/{entry_id}",
    request_body = UpdateEntryPayload,
    responses(
        (status = 200, description = "The updated entry", body = EntryBody),
        (status = 404, description = "Entry not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("entry_id" = Uuid, Path, description = "The unique ID of the entry.")
    )
)]
pub async fn update_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(entry_id): Path<Uuid>,
    Json(payload): Json<UpdateEntryPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let patch = EntryPatch {
        work: payload.work,
        struggle: payload.struggle,
        intention: payload.intention,
    };
    let entry = app_state
        .store
        .update(entry_id, patch)
        .await
        .map_err(|e| store_error_response("failed to update entry", e))?;
    Ok(Json(EntryBody::from(entry)))
}

/// Delete a specific journal entry.
#[utoipa::path(
    delete,
    path = "/entries/{entry_id}",
    responses(
        (status = 200, description = "Entry deleted", body = DetailResponse),
        (status = 404, description = "Entry not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("entry_id" = Uuid, Path, description = "The unique ID of the entry.")
    )
)]
pub async fn delete_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(entry_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let deleted = app_state
        .store
        .delete(entry_id)
        .await
        .map_err(|e| store_error_response("failed to delete entry", e))?;
    if !deleted {
        return Err((
            StatusCode::NOT_FOUND,
            format!("Entry {} not found", entry_id),
        ));
    }
    Ok(Json(DetailResponse {
        detail: format!("Entry {} has been deleted successfully", entry_id),
    }))
}

/// Delete all journal entries.
#[utoipa::path(
    delete,
    path = "/entries",
    responses(
        (status = 200, description = "All entries deleted", body = DetailResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_all_entries_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .store
        .delete_all()
        .await
        .map_err(|e| store_error_response("failed to delete entries", e))?;
    Ok(Json(DetailResponse {
        detail: "All entries deleted".to_string(),
    }))
}

/// Analyze a journal entry using AI.
///
/// Runs the stored entry through the language model and returns sentiment,
/// a two-sentence summary, and 2-4 key topics. The result is not persisted;
/// re-analyzing the same entry issues a fresh model call.
#[utoipa::path(
    post,
    path = "/entries/{entry_id}/analyze",
    responses(
        (status = 200, description = "Analysis of the entry", body = AnalyzeEntryResponse),
        (status = 404, description = "Entry not found"),
        (status = 500, description = "Could not analyze entry")
    ),
    params(
        ("entry_id" = Uuid, Path, description = "The unique ID of the entry.")
    )
)]
pub async fn analyze_entry_handler(
    State(app_state): State<Arc<AppState>>,
    Path(entry_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let result = analyze_entry(
        app_state.store.as_ref(),
        app_state.analyzer.as_ref(),
        entry_id,
    )
    .await
    .map_err(|e| match e {
        AnalyzeError::EntryNotFound(id) => {
            (StatusCode::NOT_FOUND, format!("Entry {} not found", id))
        }
        // The cause was already logged where it happened; callers get an
        // opaque failure with no provider detail.
        AnalyzeError::Analysis => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not analyze entry".to_string(),
        ),
    })?;

    Ok(Json(AnalyzeEntryResponse {
        analysis: result.into(),
    }))
}
