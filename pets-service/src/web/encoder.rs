//! Result encoders
//!
//! Encoders wrap operation results in a [`ResponseEnvelope`] and write it as
//! JSON. Status is 200 unless the envelope is failed, in which case it is 500.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use super::model::{Pet, ResponseEnvelope, SearchPetsResult};
use crate::pets::{
    CreatePetResult, DeletePetResult, GetPetWithIdResult, SearchPetsDataResult, UpdatePetResult,
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// A result could not be serialized
#[derive(Debug, Error)]
#[error("unable to encode {operation} result: {source}")]
pub struct EncodeError {
    operation: &'static str,
    #[source]
    source: serde_json::Error,
}

impl EncodeError {
    pub fn new(operation: &'static str, source: serde_json::Error) -> Self {
        Self { operation, source }
    }
}

/// Last stage of a request pipeline.
pub trait Encoder: Send + Sync {
    /// Typed result produced by the endpoint
    type Result: Send;

    fn encode(&self, result: Self::Result) -> Result<Response, EncodeError>;
}

/// Encodes create results; `data` is the new id.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatePetEncoder;

impl Encoder for CreatePetEncoder {
    type Result = CreatePetResult;

    fn encode(&self, result: CreatePetResult) -> Result<Response, EncodeError> {
        encode_envelope("create pet", ResponseEnvelope::<String>::from(result))
    }
}

/// Encodes update results; `data` is always null.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdatePetEncoder;

impl Encoder for UpdatePetEncoder {
    type Result = UpdatePetResult;

    fn encode(&self, result: UpdatePetResult) -> Result<Response, EncodeError> {
        encode_envelope("update pet", ResponseEnvelope::<()>::from(result))
    }
}

/// Encodes delete results; `data` is always null.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeletePetEncoder;

impl Encoder for DeletePetEncoder {
    type Result = DeletePetResult;

    fn encode(&self, result: DeletePetResult) -> Result<Response, EncodeError> {
        encode_envelope("delete pet", ResponseEnvelope::<()>::from(result))
    }
}

/// Encodes lookups; `data` is the pet or null when it does not exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetPetWithIdEncoder;

impl Encoder for GetPetWithIdEncoder {
    type Result = GetPetWithIdResult;

    fn encode(&self, result: GetPetWithIdResult) -> Result<Response, EncodeError> {
        encode_envelope("get pet by id", ResponseEnvelope::<Pet>::from(result))
    }
}

/// Encodes search results.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPetsEncoder;

impl Encoder for SearchPetsEncoder {
    type Result = SearchPetsDataResult;

    fn encode(&self, result: SearchPetsDataResult) -> Result<Response, EncodeError> {
        encode_envelope(
            "search pets",
            ResponseEnvelope::<SearchPetsResult>::from(result),
        )
    }
}

/// The five pet encoders.
#[derive(Debug, Clone, Copy, Default)]
pub struct PetEncoders {
    pub get_by_id: GetPetWithIdEncoder,
    pub search: SearchPetsEncoder,
    pub create: CreatePetEncoder,
    pub update: UpdatePetEncoder,
    pub delete: DeletePetEncoder,
}

impl PetEncoders {
    pub fn new() -> Self {
        Self::default()
    }
}

fn encode_envelope<T: Serialize>(
    operation: &'static str,
    envelope: ResponseEnvelope<T>,
) -> Result<Response, EncodeError> {
    let body =
        serde_json::to_vec(&envelope).map_err(|source| EncodeError::new(operation, source))?;

    let status = if envelope.failed() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body,
    )
        .into_response())
}
