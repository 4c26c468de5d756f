use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use common::{
    models::{DisplayEntry, ViewState},
    Chain, Error as CommonError,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::service::MemeService;

pub type SharedService = Arc<MemeService>;

// Create a wrapper for our common::Error type
pub struct ApiError(CommonError);

// Implement From<CommonError> for ApiError
impl From<CommonError> for ApiError {
    fn from(err: CommonError) -> Self {
        ApiError(err)
    }
}

// Convert our API error wrapper to an Axum response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CommonError::RefreshInProgress => StatusCode::CONFLICT,
            CommonError::HttpError(_) | CommonError::FetchError(_) | CommonError::ParseError(_) => {
                StatusCode::BAD_GATEWAY
            }
            CommonError::InvalidRequest(_)
            | CommonError::ConfigError(_)
            | CommonError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &self.0 {
            CommonError::HttpError(e) => format!("External API request failed: {}", e),
            other => other.to_string(),
        };

        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// Render the board page
pub async fn page(State(service): State<SharedService>) -> Html<String> {
    Html(service.page_html().await)
}

// Return the cards currently shown on the page
pub async fn list_coins(State(service): State<SharedService>) -> Json<Vec<DisplayEntry>> {
    let page = service.snapshot().await;
    Json(page.visible_cards().to_vec())
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub chain: Chain,
    pub state: ViewState,
    pub refreshing: bool,
    pub cards: usize,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

pub async fn status(State(service): State<SharedService>) -> Json<StatusResponse> {
    let page = service.snapshot().await;
    Json(StatusResponse {
        chain: service.profile().chain,
        state: page.state,
        refreshing: service.is_refreshing(),
        cards: page.visible_cards().len(),
        updated_at: page.updated_at,
        last_error: page.last_error,
    })
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub cards: usize,
}

// Run a refresh cycle now
pub async fn refresh(State(service): State<SharedService>) -> Result<Json<RefreshResponse>, ApiError> {
    debug!("Manual refresh requested");
    let cards = service.refresh().await.map_err(|e| {
        error!("Manual refresh failed: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(RefreshResponse { cards }))
}
