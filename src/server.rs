use crate::error::GenieError;
use crate::model::RecipeRecord;
use crate::service::RecipeService;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Body returned for malformed requests
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Routes of the recipe chat API
pub fn router(service: Arc<RecipeService>) -> Router {
    Router::new()
        .route("/generate_recipe", post(generate_recipe))
        .with_state(service)
}

/// Serve the API on `address` until the process is stopped
pub async fn serve(service: RecipeService, address: &str) -> Result<(), GenieError> {
    let listener = TcpListener::bind(address).await?;
    info!("Recipe server listening on {}", listener.local_addr()?);
    if !service.is_available() {
        error!("Model is not loaded. /generate_recipe will answer 503.");
    }

    axum::serve(listener, router(Arc::new(service))).await?;
    Ok(())
}

/// Suggest a recipe for `{"userQuery": "..."}`
///
/// Always answers with the five-field record, except for requests without a
/// usable `userQuery` (400). An unloaded model answers 503 before the body
/// is read.
async fn generate_recipe(State(service): State<Arc<RecipeService>>, body: Bytes) -> Response {
    if !service.is_available() {
        error!("Model not loaded. Cannot process request.");
        return service_unavailable();
    }

    let Some(user_query) = read_user_query(&body) else {
        warn!("Missing userQuery in request body");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: GenieError::MissingQuery.to_string(),
            }),
        )
            .into_response();
    };

    match service.suggest(&user_query).await {
        Ok(record) => {
            info!("Returning structured response: {:?}", record);
            Json(record).into_response()
        }
        Err(GenieError::ModelUnavailable(reason)) => {
            error!("Cannot process request: {}", reason);
            service_unavailable()
        }
        Err(e) => {
            error!("Error during inference: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RecipeRecord::server_error(&e)),
            )
                .into_response()
        }
    }
}

fn service_unavailable() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(RecipeRecord::service_unavailable()),
    )
        .into_response()
}

fn read_user_query(body: &[u8]) -> Option<String> {
    let request: Value = serde_json::from_slice(body).ok()?;
    request.get("userQuery")?.as_str().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_user_query() {
        assert_eq!(
            read_user_query(br#"{"userQuery": "tofu"}"#),
            Some("tofu".to_string())
        );
        assert_eq!(read_user_query(br#"{"query": "tofu"}"#), None);
        assert_eq!(read_user_query(br#"{"userQuery": 3}"#), None);
        assert_eq!(read_user_query(b"not json"), None);
        assert_eq!(read_user_query(b""), None);
    }
}
