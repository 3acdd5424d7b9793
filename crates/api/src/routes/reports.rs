//! Summary report routes.

use axum::{Json, Router, extract::State, response::{IntoResponse, Response}, routing::get};
use chrono::Local;
use tracing::error;

use crate::routes::error_response;
use crate::{AppState, middleware::SessionUser};
use offertory_core::reports::SummaryService;
use offertory_db::repositories::entry::{EntryRepository, ListScope};
use offertory_shared::AppError;

/// Creates the report routes (requires the session middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/entries/summary", get(get_summary))
}

/// GET /entries/summary - Aggregated totals over the caller's visible rows.
async fn get_summary(State(state): State<AppState>, user: SessionUser) -> Response {
    let repo = EntryRepository::new((*state.db).clone());
    let scope = ListScope::for_session(user.role(), user.username());

    match repo.list(scope).await {
        Ok(listing) => {
            let today = Local::now().date_naive();
            let summary = SummaryService::summarize(listing.records(), today);
            Json(summary).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to compute summary");
            error_response(&AppError::Storage("entry store unavailable".to_string()))
        }
    }
}
