//! Donation entry routes.
//!
//! Listing is open to every role but row visibility depends on it; creation
//! requires the editor role; single-entry read, update, and delete are
//! admin-only.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::notify::NotificationReport;
use crate::routes::error_response;
use crate::{AppState, middleware::SessionUser};
use offertory_core::entry::{Category, EntryListing, NewEntry, PaymentMethod, PhoneInput, validation};
use offertory_db::repositories::entry::{EntryRepository, ListScope, UpdateEntryInput};
use offertory_shared::AppError;
use offertory_shared::types::{PageRequest, PageResponse};

/// Creates the entry routes (requires the session middleware to be applied
/// externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/options", get(get_options))
        .route(
            "/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Payload for creating an entry.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Contribution date.
    pub date: NaiveDate,
    /// Contributor name.
    pub payer_name: String,
    /// Contribution amount.
    pub amount: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Contribution category.
    pub category: Category,
    /// Contributor mobile phone, formatted or not, e.g. `(11) 98765-4321`.
    pub phone: String,
    /// Contact email (optional).
    #[serde(default)]
    pub email: Option<String>,
    /// Mobile carrier (optional, informational).
    #[serde(default)]
    pub operator: Option<String>,
}

/// Response for a created entry.
#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    /// Assigned entry id.
    pub id: i64,
    /// Best-effort notification outcomes; failures are warnings, never
    /// errors.
    pub notifications: NotificationReport,
}

/// Payload for replacing the mutable fields of an entry.
#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    /// Contribution date.
    pub date: NaiveDate,
    /// Contributor name.
    pub payer_name: String,
    /// Contribution amount.
    pub amount: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Contribution category.
    pub category: Category,
    /// Contact email (optional).
    #[serde(default)]
    pub email: Option<String>,
    /// Phone area code (optional).
    #[serde(default)]
    pub area_code: Option<String>,
    /// Phone subscriber number (optional).
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Mobile carrier (optional).
    #[serde(default)]
    pub operator: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /entries - Role-filtered listing, newest first.
async fn list_entries(
    State(state): State<AppState>,
    user: SessionUser,
    Query(page): Query<PageRequest>,
) -> Response {
    let repo = EntryRepository::new((*state.db).clone());
    let scope = ListScope::for_session(user.role(), user.username());

    match repo.list(scope).await {
        Ok(EntryListing::Own(rows)) => Json(paginate(rows, &page)).into_response(),
        Ok(EntryListing::All(rows)) => Json(paginate(rows, &page)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list entries");
            error_response(&AppError::Storage("entry store unavailable".to_string()))
        }
    }
}

/// POST /entries - Record a new entry (editor and above).
async fn create_entry(
    State(state): State<AppState>,
    user: SessionUser,
    Json(payload): Json<CreateEntryRequest>,
) -> Response {
    if !user.role().can_edit() {
        return error_response(&AppError::Forbidden(
            "recording entries requires the editor role".to_string(),
        ));
    }

    if let Err(e) = validate_create(&payload) {
        return error_response(&e);
    }

    let entry = NewEntry {
        date: payload.date,
        payer_name: payload.payer_name.trim().to_string(),
        amount: payload.amount,
        payment_method: payload.payment_method,
        category: payload.category,
        email: normalize(payload.email),
        phone: PhoneInput::Formatted(payload.phone),
        operator: normalize(payload.operator),
    };

    let repo = EntryRepository::new((*state.db).clone());
    let id = match repo.create(entry, user.username()).await {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Failed to create entry");
            return error_response(&AppError::Storage("entry store unavailable".to_string()));
        }
    };

    info!(entry_id = id, created_by = %user.username(), "Entry recorded");

    // Best-effort receipts over the stored row; never affects the entry.
    let notifications = match repo.get_by_id(id).await {
        Ok(Some(stored)) => state.notifier.send_receipts(&stored.entry).await,
        Ok(None) | Err(_) => {
            warn!(entry_id = id, "Could not re-read entry for notifications");
            NotificationReport::default()
        }
    };

    (
        StatusCode::CREATED,
        Json(CreateEntryResponse { id, notifications }),
    )
        .into_response()
}

/// GET /entries/options - The value lists entry forms are built from.
async fn get_options(State(state): State<AppState>, _user: SessionUser) -> Response {
    let payment_methods: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.as_str()).collect();
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();

    Json(serde_json::json!({
        "payment_methods": payment_methods,
        "categories": categories,
        "operators": state.operators.as_slice(),
    }))
    .into_response()
}

/// GET /entries/{id} - Fetch one entry with its owner column (admin only).
async fn get_entry(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<i64>,
) -> Response {
    if !user.role().can_administer() {
        return error_response(&AppError::Forbidden(
            "viewing arbitrary entries requires the admin role".to_string(),
        ));
    }

    let repo = EntryRepository::new((*state.db).clone());
    match repo.get_by_id(id).await {
        Ok(Some(entry)) => Json(entry).into_response(),
        Ok(None) => error_response(&AppError::NotFound(format!("entry {id}"))),
        Err(e) => {
            error!(error = %e, entry_id = id, "Failed to fetch entry");
            error_response(&AppError::Storage("entry store unavailable".to_string()))
        }
    }
}

/// PUT /entries/{id} - Replace the mutable fields of an entry (admin only).
async fn update_entry(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEntryRequest>,
) -> Response {
    if !user.role().can_administer() {
        return error_response(&AppError::Forbidden(
            "editing entries requires the admin role".to_string(),
        ));
    }

    if let Err(e) = validate_update(&payload) {
        return error_response(&e);
    }

    let fields = UpdateEntryInput {
        date: payload.date,
        payer_name: payload.payer_name.trim().to_string(),
        amount: payload.amount,
        payment_method: payload.payment_method,
        category: payload.category,
        email: normalize(payload.email),
        area_code: normalize(payload.area_code),
        phone_number: normalize(payload.phone_number),
        operator: normalize(payload.operator),
    };

    let repo = EntryRepository::new((*state.db).clone());
    match repo.update(id, fields).await {
        Ok(true) => {
            info!(entry_id = id, updated_by = %user.username(), "Entry updated");
            Json(serde_json::json!({ "updated": true })).into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!("entry {id}"))),
        Err(e) => {
            error!(error = %e, entry_id = id, "Failed to update entry");
            error_response(&AppError::Storage("entry store unavailable".to_string()))
        }
    }
}

/// DELETE /entries/{id} - Permanently remove an entry (admin only).
async fn delete_entry(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<i64>,
) -> Response {
    if !user.role().can_administer() {
        return error_response(&AppError::Forbidden(
            "deleting entries requires the admin role".to_string(),
        ));
    }

    let repo = EntryRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(true) => {
            info!(entry_id = id, deleted_by = %user.username(), "Entry deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!("entry {id}"))),
        Err(e) => {
            error!(error = %e, entry_id = id, "Failed to delete entry");
            error_response(&AppError::Storage("entry store unavailable".to_string()))
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn validate_create(payload: &CreateEntryRequest) -> Result<(), AppError> {
    validation::validate_payer_name(&payload.payer_name)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validation::validate_amount(payload.amount).map_err(|e| AppError::Validation(e.to_string()))?;
    validation::validate_mobile_phone(&payload.phone)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if let Some(email) = payload.email.as_deref().filter(|s| !s.trim().is_empty()) {
        validation::validate_email(email).map_err(|e| AppError::Validation(e.to_string()))?;
    }

    Ok(())
}

fn validate_update(payload: &UpdateEntryRequest) -> Result<(), AppError> {
    validation::validate_payer_name(&payload.payer_name)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    validation::validate_amount(payload.amount).map_err(|e| AppError::Validation(e.to_string()))?;

    if let Some(email) = payload.email.as_deref().filter(|s| !s.trim().is_empty()) {
        validation::validate_email(email).map_err(|e| AppError::Validation(e.to_string()))?;
    }

    let area_code = payload.area_code.as_deref().filter(|s| !s.trim().is_empty());
    let phone_number = payload
        .phone_number
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    match (area_code, phone_number) {
        (None, None) => {}
        (Some(area), Some(number)) => {
            validation::validate_phone_parts(area, number)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }
        _ => {
            return Err(AppError::Validation(
                "area code and phone number must be supplied together".to_string(),
            ));
        }
    }

    Ok(())
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn paginate<T>(rows: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = rows.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    let data: Vec<T> = rows.into_iter().skip(offset).take(limit).collect();
    PageResponse::new(data, page.page, page.per_page, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_request() -> CreateEntryRequest {
        CreateEntryRequest {
            date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            payer_name: "Maria Silva".to_string(),
            amount: dec!(120.50),
            payment_method: PaymentMethod::Pix,
            category: Category::Tithe,
            phone: "(11) 98765-4321".to_string(),
            email: None,
            operator: None,
        }
    }

    #[test]
    fn test_validate_create_accepts_valid_payload() {
        assert!(validate_create(&create_request()).is_ok());
    }

    #[test]
    fn test_validate_create_rejects_short_name() {
        let mut payload = create_request();
        payload.payer_name = "M".to_string();
        assert!(matches!(
            validate_create(&payload),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_create_rejects_short_phone() {
        let mut payload = create_request();
        payload.phone = "8765-4321".to_string();
        assert!(matches!(
            validate_create(&payload),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_create_ignores_blank_email() {
        let mut payload = create_request();
        payload.email = Some("   ".to_string());
        assert!(validate_create(&payload).is_ok());
    }

    #[test]
    fn test_paginate_slices_and_counts() {
        let rows: Vec<i32> = (1..=45).collect();
        let page = PageRequest { page: 2, per_page: 20 };

        let response = paginate(rows, &page);
        assert_eq!(response.data.first(), Some(&21));
        assert_eq!(response.data.len(), 20);
        assert_eq!(response.meta.total, 45);
        assert_eq!(response.meta.total_pages, 3);
    }
}
