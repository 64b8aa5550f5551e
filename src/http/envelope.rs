// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use bytes::Bytes;
use http::{header, Response, StatusCode};
use http_body_util::Full;
use serde::Serialize;

use crate::errors::ApiError;

#[derive(Serialize)]
struct SuccessEnvelope<'a, T: Serialize> {
    success: bool,
    data: &'a T,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    success: bool,
    error: &'a str,
}

/// `{success:true, data}` with the given status.
pub fn json_success<T: Serialize>(status: StatusCode, data: &T) -> Response<Full<Bytes>> {
    let envelope = SuccessEnvelope { success: true, data };
    match serde_json::to_vec(&envelope) {
        Ok(body) => json_response(status, body),
        Err(err) => json_error(&ApiError::Internal(err.to_string())),
    }
}

/// `{success:false, error}` with the status the error variant dictates.
pub fn json_error(err: &ApiError) -> Response<Full<Bytes>> {
    let message = err.to_string();
    let envelope = ErrorEnvelope {
        success: false,
        error: &message,
    };
    let body = serde_json::to_vec(&envelope)
        .unwrap_or_else(|_| br#"{"success":false,"error":"Internal server error"}"#.to_vec());
    json_response(err.status(), body)
}

/// Bare JSON document, outside the envelope. Used by the health probe.
pub fn json_plain<T: Serialize>(status: StatusCode, data: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(data) {
        Ok(body) => json_response(status, body),
        Err(err) => json_error(&ApiError::Internal(err.to_string())),
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}
