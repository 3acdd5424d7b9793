//! Authentication routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tracing::{error, info, warn};

use crate::AppState;
use offertory_core::auth::AuthError;
use offertory_shared::auth::{LoginRequest, LoginResponse, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login - Verify credentials and return a session token.
///
/// All authentication failures produce the same generic response; the cause
/// is distinguished only in the logs.
async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> impl IntoResponse {
    let session = match state
        .credentials
        .authenticate(&payload.username, &payload.password)
    {
        Ok(session) => session,
        Err(e) => {
            match e {
                AuthError::UnknownUser => {
                    info!(username = %payload.username, "Login attempt for unknown user");
                }
                AuthError::NotConfigured => {
                    warn!(
                        username = %payload.username,
                        "Login attempt for account without a usable password hash"
                    );
                }
                AuthError::InvalidCredentials => {
                    info!(username = %payload.username, "Failed login attempt - invalid password");
                }
            }
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid username or password"
                })),
            )
                .into_response();
        }
    };

    let access_token = match state.jwt_service.generate_session_token(
        &session.username,
        &session.display_name,
        session.role.as_str(),
    ) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to generate session token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    info!(username = %session.username, role = %session.role, "User logged in");

    let response = LoginResponse {
        user: UserInfo {
            username: session.username,
            display_name: session.display_name,
            role: session.role.as_str().to_string(),
        },
        access_token,
        expires_in: state.jwt_service.session_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
