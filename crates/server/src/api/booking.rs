use crate::{dto::PinpointDto, state::AppState};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pinpoints::{seed::User, store};
use std::sync::Arc;
use tracing::{info, warn};

/// Books the resource for the user in the body, or for a random seed user without one.
pub async fn book(
    Path(ext_id): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, StatusCode> {
    let user: Option<User> = if body.is_empty() {
        None
    } else {
        let user = serde_json::from_slice(&body).map_err(|err| {
            warn!("Invalid user in booking request: {err}");
            StatusCode::BAD_REQUEST
        })?;
        Some(user)
    };

    let mut store = state.store.write().await;
    let user = match user {
        Some(user) => user,
        None => {
            let mut rng = state.rng.lock().await;
            store
                .random_seed_user(&mut *rng)
                .cloned()
                .ok_or(StatusCode::CONFLICT)?
        }
    };
    let user_id = user.id.clone();
    let next = store.book(&ext_id, user).map_err(rejected)?;
    *store = next;
    info!("Booked {ext_id} for {user_id}");
    Ok(Json(PinpointDto::all(&store)).into_response())
}

pub async fn unbook(
    Path(ext_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let mut store = state.store.write().await;
    let next = store.unbook(&ext_id).map_err(rejected)?;
    *store = next;
    info!("Unbooked {ext_id}");
    Ok(Json(PinpointDto::all(&store)).into_response())
}

/// What the action button of an opened resource does.
pub async fn toggle(
    Path(ext_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let mut store = state.store.write().await;
    let mut rng = state.rng.lock().await;
    let next = store.toggle(&ext_id, &mut *rng).map_err(rejected)?;
    *store = next;
    info!("Toggled {ext_id}");
    Ok(Json(PinpointDto::all(&store)).into_response())
}

fn rejected(err: store::Error) -> StatusCode {
    warn!("Rejected transition: {err}");
    match err {
        store::Error::NotFound(_) => StatusCode::NOT_FOUND,
        store::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
    }
}
