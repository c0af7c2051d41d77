use crate::{
    dto::{PinpointDto, SelectionDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub async fn pinpoints(State(state): State<Arc<AppState>>) -> Json<Vec<PinpointDto>> {
    let store = state.store.read().await;
    Json(PinpointDto::all(&store))
}

/// Opens a pinpoint. User markers cannot be opened and answer like unknown ids.
pub async fn pinpoint(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let store = state.store.read().await;
    let resource = store.selectable(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(SelectionDto::from(resource, &store)).into_response())
}
