//! Request tracking middleware
//!
//! Every request gets an id (kept if the client sent one) which is echoed on
//! the response. Generated ids use the TypeID format with a `req` prefix and
//! a UUIDv7, e.g. `req_01h455vb4pex5vsknk084sn02q`, so they sort by time.

use axum::http::{header, HeaderName, HeaderValue, Request};
use mti::prelude::*;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

use crate::error::{Error, Result};

/// Prefix of generated request ids
pub const REQUEST_ID_PREFIX: &str = "req";

/// Generates `req_`-prefixed TypeIDs for [`SetRequestIdLayer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeTypedRequestId;

impl MakeRequestId for MakeTypedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = REQUEST_ID_PREFIX.create_type_id::<V7>();
        let header_value = HeaderValue::from_str(id.as_str()).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Parses the configured request id header name.
pub fn request_id_header(name: &str) -> Result<HeaderName> {
    HeaderName::try_from(name)
        .map_err(|e| Error::Internal(format!("invalid request id header {name:?}: {e}")))
}

/// Sets a request id on requests that lack one.
pub fn request_id_layer(header: HeaderName) -> SetRequestIdLayer<MakeTypedRequestId> {
    SetRequestIdLayer::new(header, MakeTypedRequestId)
}

/// Copies the request id onto the response.
pub fn request_id_propagation_layer(header: HeaderName) -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(header)
}

/// Marks credential-carrying headers as sensitive so traces don't print them.
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new([
        header::AUTHORIZATION,
        header::COOKIE,
        header::SET_COOKIE,
        HeaderName::from_static("x-api-key"),
        HeaderName::from_static("x-auth-token"),
    ])
}
