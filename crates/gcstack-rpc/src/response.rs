//! HTTP response construction for the transport shell.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Response, StatusCode};
use http_body_util::Full;
use serde::Serialize;

use gcstack_model::StorageError;

const HEADER_REQUEST_ID: &str = "x-request-id";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: u16,
    status: &'static str,
    message: &'a str,
}

/// Build a JSON response with the given status and pre-serialized body.
#[must_use]
pub fn json_response(
    status: StatusCode,
    request_id: &str,
    body: Bytes,
) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, http::HeaderValue::from_static("application/json"));
    if let Ok(value) = http::HeaderValue::from_str(request_id) {
        headers.insert(HEADER_REQUEST_ID, value);
    }
    response
}

/// Render a [`StorageError`] as a JSON error envelope.
#[must_use]
pub fn error_response(err: &StorageError, request_id: &str) -> Response<Full<Bytes>> {
    let http_code = err.code.http_status();
    let body = ErrorBody {
        error: ErrorDetail {
            code: http_code,
            status: err.code.as_str(),
            message: &err.message,
        },
    };
    // The envelope contains only plain strings and integers; serialization
    // cannot fail on well-formed UTF-8.
    let encoded = serde_json::to_vec(&body).unwrap_or_default();
    let status = StatusCode::from_u16(http_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, request_id, Bytes::from(encoded))
}

#[cfg(test)]
mod tests {
    use gcstack_model::RpcCode;

    use super::*;

    #[test]
    fn test_should_set_json_content_type_and_request_id() {
        let response = json_response(StatusCode::OK, "req-1", Bytes::from_static(b"{}"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).expect("content type"),
            "application/json",
        );
        assert_eq!(
            response.headers().get(HEADER_REQUEST_ID).expect("request id"),
            "req-1",
        );
    }

    #[test]
    fn test_should_render_error_envelope() {
        let err = StorageError::not_found("bucket b not found");
        let response = error_response(&err, "req-2");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_should_map_unimplemented_to_501() {
        let err = StorageError::unimplemented("ReadObject");
        let response = error_response(&err, "req-3");
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_should_serialize_error_detail_fields() {
        let err = StorageError::with_message(RpcCode::InvalidArgument, "bad frame");
        let body = ErrorBody {
            error: ErrorDetail {
                code: err.code.http_status(),
                status: err.code.as_str(),
                message: &err.message,
            },
        };
        let json = serde_json::to_string(&body).expect("test serialization");
        assert_eq!(
            json,
            "{\"error\":{\"code\":400,\"status\":\"INVALID_ARGUMENT\",\"message\":\"bad frame\"}}",
        );
    }
}
