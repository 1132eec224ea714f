//! The mint endpoint handler.

use axum::extract::{Request, State};
use axum::response::Response;

use crate::http::envelope::{self, dispatch, Reply, DECODE_FAILURE_CODE, JSON_REQUEST_SIZE_LIMIT};
use crate::http::server::AppState;
use crate::mint::{MintRequest, MintResponse};

/// Decode the request under the size ceiling, run the pipeline, and wrap
/// the outcome in the dispatch envelope.
///
/// Decode failures never reach the pipeline; they surface as the generic
/// failure code. An empty body decodes as an all-defaults request so that
/// validation, not decoding, reports what is missing.
pub async fn mint_handler(State(state): State<AppState>, request: Request) -> Response {
    let bytes = match axum::body::to_bytes(request.into_body(), JSON_REQUEST_SIZE_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read request body");
            return envelope::failure(DECODE_FAILURE_CODE);
        }
    };

    let mint_request: MintRequest = if bytes.is_empty() {
        MintRequest::default()
    } else {
        match serde_json::from_slice(&bytes) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(error = %e, "json decoding failed");
                return envelope::failure(DECODE_FAILURE_CODE);
            }
        }
    };

    let response = match state.minter.mint(&mint_request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(code = e.code(), error = %e, "mint request failed");
            MintResponse::failure(e.code())
        }
    };

    dispatch(Reply::new(response))
}
