use axum::extract::{Path, Query, State};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;
use crate::types::activity::ActivitySummary;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/activities", get(list_activities))
        .route(
            "/api/activities/:id",
            get(get_activity).delete(delete_activity),
        )
}

#[derive(Serialize, Deserialize)]
pub struct StoredActivity {
    pub activity_id: String,
    pub summary: ActivitySummary,
}

#[derive(Deserialize)]
struct ListParams {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    100
}

async fn list_activities(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<StoredActivity>> {
    let activities = state
        .list()
        .into_iter()
        .skip(params.skip)
        .take(params.limit)
        .map(|(activity_id, summary)| StoredActivity {
            activity_id,
            summary,
        })
        .collect();
    Json(activities)
}

async fn get_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<StoredActivity>, AppError> {
    let summary = state
        .get(&activity_id)
        .ok_or_else(|| AppError::NotFound(activity_id.clone()))?;

    Ok(Json(StoredActivity {
        activity_id,
        summary,
    }))
}

async fn delete_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .remove(&activity_id)
        .ok_or_else(|| AppError::NotFound(activity_id.clone()))?;

    tracing::info!("Deleted activity {}", activity_id);

    Ok(Json(json!({
        "message": "Activity deleted successfully"
    })))
}
