//! Decode → execute → encode pipeline
//!
//! A [`Handler`] owns exactly one [`Decoder`], one [`Endpoint`] and one
//! [`Encoder`]. Parts can be supplied in any order; [`Handler::serve`] only
//! exists once all three are present and their types line up:
//!
//! ```rust,ignore
//! let handler = Handler::new()
//!     .with_encoder(CreatePetEncoder)
//!     .with_decoder(CreatePetDecoder)
//!     .with_endpoint(endpoints.create.clone());
//!
//! let response = handler.serve(request).await;
//! ```
//!
//! A failing stage aborts the remaining ones and produces a 500 with a
//! `{"message": "..."}` body.

use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::decoder::Decoder;
use super::encoder::Encoder;
use crate::pets::Endpoint;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Written when the error body itself cannot be serialized
const DEFAULT_ERROR_RESPONSE: &[u8] = br#"{"message": "unable to process request"}"#;

/// Placeholder for a pipeline part not supplied yet
#[derive(Debug, Clone, Copy, Default)]
pub struct Missing;

/// Body of every pipeline failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Request pipeline for one route.
#[derive(Debug, Clone)]
pub struct Handler<D = Missing, E = Missing, C = Missing> {
    decoder: D,
    endpoint: E,
    encoder: C,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            decoder: Missing,
            endpoint: Missing,
            encoder: Missing,
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, E, C> Handler<D, E, C> {
    pub fn with_decoder<N: Decoder>(self, decoder: N) -> Handler<N, E, C> {
        Handler {
            decoder,
            endpoint: self.endpoint,
            encoder: self.encoder,
        }
    }

    pub fn with_endpoint<N: Endpoint>(self, endpoint: N) -> Handler<D, N, C> {
        Handler {
            decoder: self.decoder,
            endpoint,
            encoder: self.encoder,
        }
    }

    pub fn with_encoder<N: Encoder>(self, encoder: N) -> Handler<D, E, N> {
        Handler {
            decoder: self.decoder,
            endpoint: self.endpoint,
            encoder,
        }
    }
}

impl<D, E, C> Handler<D, E, C>
where
    D: Decoder,
    E: Endpoint<Request = D::Request>,
    C: Encoder<Result = E::Response>,
{
    /// Runs the pipeline for one request.
    pub async fn serve(&self, request: Request) -> Response {
        let request = match self.decoder.decode(request).await {
            Ok(request) => request,
            Err(e) => return error_response(&e),
        };

        let result = match self.endpoint.execute(request).await {
            Ok(result) => result,
            Err(e) => return error_response(&e),
        };

        match self.encoder.encode(result) {
            Ok(response) => response,
            Err(e) => error_response(&e),
        }
    }
}

fn error_response(err: &dyn std::error::Error) -> Response {
    tracing::debug!(error = %err, "request pipeline aborted");

    let body = ErrorResponse {
        message: err.to_string(),
    };

    let content = serde_json::to_vec(&body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "unable to marshal error response into json");
        DEFAULT_ERROR_RESPONSE.to_vec()
    });

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        content,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::decoder::DecodeError;
    use crate::web::encoder::EncodeError;
    use axum::body::{to_bytes, Body};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct EchoDecoder {
        fail: bool,
    }

    impl Decoder for EchoDecoder {
        type Request = String;

        async fn decode(&self, request: Request) -> Result<String, DecodeError> {
            if self.fail {
                return Err(DecodeError::MissingParameter);
            }
            Ok(request.uri().path().to_string())
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("endpoint exploded")]
    struct Exploded;

    struct CountingEndpoint {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Endpoint for CountingEndpoint {
        type Request = String;
        type Response = usize;
        type Error = Exploded;

        async fn execute(&self, request: String) -> Result<usize, Exploded> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Exploded);
            }
            Ok(request.len())
        }
    }

    struct LengthEncoder;

    impl Encoder for LengthEncoder {
        type Result = usize;

        fn encode(&self, result: usize) -> Result<Response, EncodeError> {
            Ok(result.to_string().into_response())
        }
    }

    struct FailingEncoder;

    impl Encoder for FailingEncoder {
        type Result = usize;

        fn encode(&self, _result: usize) -> Result<Response, EncodeError> {
            let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
            Err(EncodeError::new("length", source))
        }
    }

    fn request(path: &str) -> Request {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_serve_runs_every_stage() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = Handler::new()
            .with_encoder(LengthEncoder)
            .with_endpoint(CountingEndpoint {
                calls: Arc::clone(&calls),
                fail: false,
            })
            .with_decoder(EchoDecoder { fail: false });

        let response = handler.serve(request("/pets")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "5");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_decode_failure_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = Handler::new()
            .with_decoder(EchoDecoder { fail: true })
            .with_endpoint(CountingEndpoint {
                calls: Arc::clone(&calls),
                fail: false,
            })
            .with_encoder(LengthEncoder);

        let response = handler.serve(request("/pets")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        let body: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body.message, "pet ID was not provided");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_endpoint_failure_becomes_error_response() {
        let handler = Handler::new()
            .with_decoder(EchoDecoder { fail: false })
            .with_endpoint(CountingEndpoint {
                calls: Arc::new(AtomicUsize::new(0)),
                fail: true,
            })
            .with_encoder(LengthEncoder);

        let response = handler.serve(request("/pets")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response).await,
            r#"{"message":"endpoint exploded"}"#
        );
    }

    #[tokio::test]
    async fn test_encode_failure_becomes_error_response() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = Handler::new()
            .with_decoder(EchoDecoder { fail: false })
            .with_endpoint(CountingEndpoint {
                calls: Arc::clone(&calls),
                fail: false,
            })
            .with_encoder(FailingEncoder);

        let response = handler.serve(request("/pets")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        let body: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body.message.starts_with("unable to encode length result:"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_default_error_response_is_valid_json() {
        let body: ErrorResponse = serde_json::from_slice(DEFAULT_ERROR_RESPONSE).unwrap();
        assert_eq!(body.message, "unable to process request");
    }
}
