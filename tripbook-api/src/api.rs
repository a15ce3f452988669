use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tripbook_core::{infer_listing, IndexedBooking, ListingGuess};

use crate::error::AppError;
use crate::session;
use crate::state::AppState;
use crate::view::ViewFilter;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub view: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InferQuery {
    #[serde(default)]
    pub url: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings))
        .route("/api/infer", get(infer))
}

/// GET /api/bookings
/// The session's bookings in display order, each with its position in the full list
async fn list_bookings(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ListQuery>,
) -> Result<(CookieJar, Json<Vec<IndexedBooking>>), AppError> {
    let (jar, sid) = session::resolve(&state, jar).await;
    let filter = ViewFilter::parse(query.view.as_deref());
    let items = state
        .sessions
        .read(&sid, |s| filter.select(s))
        .await
        .ok_or_else(AppError::session_expired)?;
    Ok((jar, Json(items)))
}

/// GET /api/infer?url=
async fn infer(Query(query): Query<InferQuery>) -> Json<ListingGuess> {
    Json(infer_listing(&query.url))
}
