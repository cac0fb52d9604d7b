//! Uniform JSON envelopes for every group endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

pub const API_ERROR_CODE: &str = "API_ERROR";

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: Some(data),
        }
    }
}

impl SuccessResponse<()> {
    /// Envelope for operations that have nothing to return.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn api_error(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "error".to_string(),
            code: API_ERROR_CODE.to_string(),
            message: message.into(),
            details: None,
        })
    }
}

/// Success envelope paired with its HTTP status.
pub struct Respond<T>(pub StatusCode, pub SuccessResponse<T>);

impl<T: Serialize> IntoResponse for Respond<T> {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Respond<T> {
    Respond(StatusCode::OK, SuccessResponse::new(message, data))
}

pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> Respond<T> {
    Respond(StatusCode::CREATED, SuccessResponse::new(message, data))
}

pub fn ok_empty(message: impl Into<String>) -> Respond<()> {
    Respond(StatusCode::OK, SuccessResponse::empty(message))
}
