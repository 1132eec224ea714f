//! JSON request/response dispatch envelope.
//!
//! # Responsibilities
//! - Map a handler's outcome code to the HTTP status: code 1 is 200, every
//!   other code is 500 (the specific code travels only in the body)
//! - Default cache-control headers; JSON responses are never cacheable
//!   unless the handler overrides explicitly
//! - Hand the handler's optional log detail to the access-log middleware
//!
//! # Design Decisions
//! - Every response type exposes its outcome code through the [`Outcome`]
//!   trait, resolved at compile time. A code of 0 means the handler never
//!   set one; that is an internal defect and is coerced to the generic
//!   failure code, not propagated as success.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Outcome code signaling success on the wire.
pub const SUCCESS_CODE: i32 = 1;

/// Generic failure code: request decoding failed (shared with the
/// gas-estimation failure in the deployed wire contract).
pub const DECODE_FAILURE_CODE: i32 = 10;

/// Size limit on any JSON request body, in bytes.
pub const JSON_REQUEST_SIZE_LIMIT: usize = 200_000;

const CACHE_CONTROL_SUCCESS: &str = "no-cache, no-store, must-revalidate";
const CACHE_CONTROL_FAILURE: &str = "no-store";

/// Required capability of every JSON response type: an explicit outcome
/// code accessor, checked at compile time.
pub trait Outcome {
    fn code(&self) -> i32;
}

/// Optional per-request detail a handler wants in the access log, carried
/// to the logging middleware through response extensions.
#[derive(Debug, Clone)]
pub struct LogDetail(pub String);

/// A handler's reply: the response value plus optional log detail and an
/// optional cache-control override (honored on success only).
pub struct Reply<T> {
    pub response: T,
    pub for_log: Option<String>,
    pub cache_control: Option<String>,
}

impl<T> Reply<T> {
    pub fn new(response: T) -> Self {
        Self {
            response,
            for_log: None,
            cache_control: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.for_log = Some(detail.into());
        self
    }

    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }
}

/// Serialize a reply and choose status and headers from its outcome code.
pub fn dispatch<T: Outcome + Serialize>(reply: Reply<T>) -> Response {
    let code = reply.response.code();
    if code == 0 {
        tracing::error!("handler response has no outcome code set");
        return failure(DECODE_FAILURE_CODE);
    }

    let mut response = if code == SUCCESS_CODE {
        let cache_control = reply
            .cache_control
            .as_deref()
            .unwrap_or(CACHE_CONTROL_SUCCESS);
        match HeaderValue::from_str(cache_control) {
            Ok(value) => (
                StatusCode::OK,
                [(header::CACHE_CONTROL, value)],
                Json(&reply.response),
            )
                .into_response(),
            Err(_) => {
                tracing::error!(cache_control, "invalid cache-control override");
                return failure(DECODE_FAILURE_CODE);
            }
        }
    } else {
        tracing::warn!(code, "error response");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(
                header::CACHE_CONTROL,
                HeaderValue::from_static(CACHE_CONTROL_FAILURE),
            )],
            Json(&reply.response),
        )
            .into_response()
    };

    if let Some(detail) = reply.for_log {
        response.extensions_mut().insert(LogDetail(detail));
    }
    response
}

/// A bare failure response carrying only its code.
pub fn failure(code: i32) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_FAILURE),
        )],
        Json(serde_json::json!({ "code": code })),
    )
        .into_response()
}
