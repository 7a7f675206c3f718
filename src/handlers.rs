use crate::content::ContentRegistry;
use crate::errors::AppError;
use crate::models::{ChartMount, ContentResponse, EmbeddedData};
use crate::state::AppState;
use crate::stats::build_charts;
use crate::ui::render_preview;
use axum::{
    Json,
    extract::{Path, State},
    response::Html,
};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = render_preview(&state.stats, &state.stats_path.display().to_string())?;
    Ok(Html(page))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<EmbeddedData> {
    Json(state.stats.as_ref().clone())
}

pub async fn get_charts(State(state): State<AppState>) -> Json<Vec<ChartMount>> {
    Json(build_charts(&state.stats))
}

pub async fn get_content(
    Path((registry, key)): Path<(String, String)>,
) -> Result<Json<ContentResponse>, AppError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::bad_request("key must not be empty"));
    }
    let registry = ContentRegistry::by_name(&registry)
        .ok_or_else(|| AppError::not_found(format!("unknown registry '{registry}'")))?;

    Ok(Json(ContentResponse {
        key: key.to_string(),
        html: registry.resolve(key).to_string(),
    }))
}
