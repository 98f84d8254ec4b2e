//! Request decoders
//!
//! A decoder turns the raw HTTP request into the typed request its endpoint
//! expects. Only structural problems are errors here; search parameters are
//! lenient and fall back to defaults.

use std::future::Future;

use axum::body::to_bytes;
use axum::extract::rejection::RawPathParamsRejection;
use axum::extract::{FromRequestParts, Query, RawPathParams, Request};
use thiserror::Error;

use super::model;
use crate::pets::{
    NewPet, OrderByField, PetId, QueryFilter, UpdatePet, PAGE_NUMBER_DEFAULT,
    ROWS_PER_PAGE_DEFAULT,
};

/// Path parameter holding the pet id
const ID_PARAMETER: &str = "id";

/// Why a request could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("pet ID was not provided")]
    MissingParameter,

    #[error("invalid pet ID: {0}")]
    InvalidParameter(String),

    #[error("unable to read request body: {0}")]
    Body(#[from] axum::Error),

    #[error("invalid pet request: {0}")]
    Json(#[from] serde_json::Error),
}

/// First stage of a request pipeline.
pub trait Decoder: Send + Sync {
    /// Typed request handed to the endpoint
    type Request: Send;

    fn decode(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Self::Request, DecodeError>> + Send;
}

/// Decodes `GET /pets/{id}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetPetWithIdDecoder;

impl Decoder for GetPetWithIdDecoder {
    type Request = PetId;

    async fn decode(&self, request: Request) -> Result<PetId, DecodeError> {
        pet_id_from_path(request).await
    }
}

/// Decodes `DELETE /pets/{id}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeletePetDecoder;

impl Decoder for DeletePetDecoder {
    type Request = PetId;

    async fn decode(&self, request: Request) -> Result<PetId, DecodeError> {
        pet_id_from_path(request).await
    }
}

/// Decodes `GET /pets?name&page&pagesize&orderby`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPetsDecoder;

impl Decoder for SearchPetsDecoder {
    type Request = QueryFilter;

    async fn decode(&self, request: Request) -> Result<QueryFilter, DecodeError> {
        let params = match Query::<Vec<(String, String)>>::try_from_uri(request.uri()) {
            Ok(Query(params)) => params,
            Err(e) => {
                tracing::error!(error = %e, "invalid search query string, ignoring it");
                Vec::new()
            }
        };

        let mut filter = QueryFilter {
            page_number: PAGE_NUMBER_DEFAULT,
            rows_per_page: ROWS_PER_PAGE_DEFAULT,
            ..QueryFilter::default()
        };

        if let Some(name) = first_value(&params, "name") {
            filter.name = name.to_string();
        }

        if let Some(page) = first_value(&params, "page") {
            filter.page_number = page.parse().unwrap_or_else(|e| {
                tracing::error!(page, error = %e, "invalid page parameter, it must be an integer");
                PAGE_NUMBER_DEFAULT
            });
        }

        if let Some(page_size) = first_value(&params, "pagesize") {
            filter.rows_per_page = page_size.parse().unwrap_or_else(|e| {
                tracing::error!(
                    page_size,
                    error = %e,
                    "invalid page size parameter, it must be an integer"
                );
                ROWS_PER_PAGE_DEFAULT
            });
        }

        if let Some(order_by) = first_value(&params, "orderby") {
            filter.order_by = order_by.parse().unwrap_or_else(|e| {
                tracing::debug!(error = %e, "ignoring order by parameter");
                OrderByField::Unset
            });
        }

        Ok(filter)
    }
}

/// Decodes the `POST /pets` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatePetDecoder;

impl Decoder for CreatePetDecoder {
    type Request = NewPet;

    async fn decode(&self, request: Request) -> Result<NewPet, DecodeError> {
        tracing::debug!("decoding new pet request");
        let body: model::NewPet = json_body(request).await?;
        Ok(body.into())
    }
}

/// Decodes the `PUT /pets` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdatePetDecoder;

impl Decoder for UpdatePetDecoder {
    type Request = UpdatePet;

    async fn decode(&self, request: Request) -> Result<UpdatePet, DecodeError> {
        tracing::debug!("decoding update pet request");
        let body: model::UpdatePet = json_body(request).await?;
        Ok(body.into())
    }
}

/// The five pet decoders.
#[derive(Debug, Clone, Copy, Default)]
pub struct PetDecoders {
    pub get_by_id: GetPetWithIdDecoder,
    pub search: SearchPetsDecoder,
    pub create: CreatePetDecoder,
    pub update: UpdatePetDecoder,
    pub delete: DeletePetDecoder,
}

impl PetDecoders {
    pub fn new() -> Self {
        Self::default()
    }
}

async fn pet_id_from_path(request: Request) -> Result<PetId, DecodeError> {
    let (mut parts, _body) = request.into_parts();

    let params = match RawPathParams::from_request_parts(&mut parts, &()).await {
        Ok(params) => params,
        Err(RawPathParamsRejection::MissingPathParams(_)) => {
            return Err(DecodeError::MissingParameter)
        }
        Err(rejection) => return Err(DecodeError::InvalidParameter(rejection.body_text())),
    };

    params
        .iter()
        .find(|(key, _)| *key == ID_PARAMETER)
        .map(|(_, value)| PetId::from(value))
        .ok_or(DecodeError::MissingParameter)
}

/// Parses a JSON body; a literal `null` yields the empty request.
async fn json_body<T>(request: Request) -> Result<T, DecodeError>
where
    T: serde::de::DeserializeOwned + Default,
{
    // Size is bounded by the request body limit layer.
    let bytes = to_bytes(request.into_body(), usize::MAX).await?;

    serde_json::from_slice::<Option<T>>(&bytes)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            tracing::error!(
                request = %String::from_utf8_lossy(&bytes),
                error = %e,
                "pet request could not be decoded"
            );
            DecodeError::from(e)
        })
}

fn first_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}
