use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::pipeline;
use crate::state::AppState;
use crate::types::activity::ActivitySummary;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload))
}

#[derive(Serialize, Deserialize)]
pub struct UploadedActivity {
    pub activity_id: String,
    pub summary: ActivitySummary,
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<UploadedActivity>>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file bytes: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let filename = filename.ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;

    if !is_tcx(&filename) {
        return Err(AppError::BadRequest(
            "Unsupported file format, expected a .tcx workout export".to_string(),
        ));
    }

    tracing::info!("Parsing workout export: {}", filename);

    // The rejection message stays human-readable; the parse detail goes to
    // the log, not the response.
    let summaries = pipeline::parse(&bytes).map_err(|e| {
        tracing::warn!("Rejected {}: {}", filename, e);
        AppError::BadRequest("File could not be read as a workout export".to_string())
    })?;

    let uploaded: Vec<UploadedActivity> = summaries
        .into_iter()
        .map(|summary| {
            let activity_id = Uuid::new_v4().to_string();
            state.insert(activity_id.clone(), summary.clone());
            UploadedActivity {
                activity_id,
                summary,
            }
        })
        .collect();

    tracing::info!(
        "Uploaded file {} with {} session(s)",
        filename,
        uploaded.len()
    );

    Ok(Json(uploaded))
}

fn is_tcx(filename: &str) -> bool {
    filename
        .rsplit('.')
        .next()
        .map(|ext| ext.eq_ignore_ascii_case("tcx"))
        .unwrap_or(false)
}
