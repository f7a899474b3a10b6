//! Storage RPC service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use tracing::{info, warn};

use gcstack_model::{StorageError, StorageOperation};

use crate::dispatch::dispatch;
use crate::response::{error_response, json_response};
use crate::server::StorageServer;

/// Path prefix every storage RPC call is mounted under.
pub const SERVICE_PREFIX: &str = "/google.storage.v2.Storage/";

/// Hyper `Service` implementation for the storage RPC surface.
///
/// Wraps a shared [`StorageServer`] and routes incoming HTTP requests to
/// the appropriate storage operation handler.
#[derive(Debug, Clone)]
pub struct StorageRpcService {
    server: Arc<StorageServer>,
}

impl StorageRpcService {
    /// Create a new `StorageRpcService`.
    #[must_use]
    pub fn new(server: Arc<StorageServer>) -> Self {
        Self { server }
    }
}

impl hyper::service::Service<http::Request<Incoming>> for StorageRpcService {
    type Response = http::Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let server = Arc::clone(&self.server);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            Ok(process_request(req, &server, &request_id).await)
        })
    }
}

/// Process a single RPC request through the full pipeline.
async fn process_request(
    req: http::Request<Incoming>,
    server: &StorageServer,
    request_id: &str,
) -> http::Response<Full<Bytes>> {
    let (parts, incoming) = req.into_parts();

    // 1. Calls are always POSTed.
    if parts.method != http::Method::POST {
        let err = StorageError::invalid_argument(format!(
            "storage calls require POST, got {}",
            parts.method,
        ));
        return error_response(&err, request_id);
    }

    // 2. Route: the method name is the last path segment under the prefix.
    let op = match resolve_operation(parts.uri.path()) {
        Ok(op) => op,
        Err(err) => {
            warn!(path = parts.uri.path(), "unroutable request");
            return error_response(&err, request_id);
        }
    };

    // 3. Collect body.
    let body = match collect_body(incoming).await {
        Ok(body) => body,
        Err(err) => return error_response(&err, request_id),
    };

    // 4. Dispatch to the handler.
    match dispatch(server, op, body).await {
        Ok(response) => {
            info!(request_id, method = %op, "call succeeded");
            json_response(StatusCode::OK, request_id, response)
        }
        Err(err) => {
            warn!(request_id, method = %op, code = %err.code, "call failed");
            error_response(&err, request_id)
        }
    }
}

/// Resolve the request path into a [`StorageOperation`].
fn resolve_operation(path: &str) -> Result<StorageOperation, StorageError> {
    let method = path
        .strip_prefix(SERVICE_PREFIX)
        .ok_or_else(|| StorageError::not_found(format!("no service mounted at {path}")))?;
    StorageOperation::from_name(method)
        .ok_or_else(|| StorageError::not_found(format!("unknown method {method}")))
}

/// Collect the incoming body into a single `Bytes` buffer.
async fn collect_body(incoming: Incoming) -> Result<Bytes, StorageError> {
    incoming
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| StorageError::internal(format!("failed to read request body: {e}")))
}
