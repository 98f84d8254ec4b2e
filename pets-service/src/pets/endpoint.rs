//! Per-operation endpoints
//!
//! Each endpoint calls one service operation and folds the outcome into the
//! matching result type. Business failures travel inside the result, so the
//! endpoints themselves never fail.

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use super::model::{
    CreatePetResult, DeletePetResult, GetPetWithIdResult, NewPet, PetId, QueryFilter,
    SearchPetsDataResult, UpdatePet, UpdatePetResult,
};
use super::service::Service;

/// Middle stage of a request pipeline.
///
/// The associated types tie an endpoint to the decoder feeding it and the
/// encoder consuming its output.
pub trait Endpoint: Send + Sync {
    /// Typed request produced by the decoder
    type Request: Send;
    /// Typed result handed to the encoder
    type Response: Send;
    /// Failure that aborts the pipeline
    type Error: std::error::Error + Send;

    fn execute(
        &self,
        request: Self::Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

/// Creates a pet.
#[derive(Clone)]
pub struct CreatePetEndpoint {
    service: Arc<Service>,
}

impl CreatePetEndpoint {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl Endpoint for CreatePetEndpoint {
    type Request = NewPet;
    type Response = CreatePetResult;
    type Error = Infallible;

    async fn execute(&self, request: NewPet) -> Result<CreatePetResult, Infallible> {
        let result = CreatePetResult::from(self.service.create(request).await);
        if let Some(error) = &result.error {
            tracing::debug!(error = %error, "create pet failed");
        }
        Ok(result)
    }
}

/// Updates a pet.
#[derive(Clone)]
pub struct UpdatePetEndpoint {
    service: Arc<Service>,
}

impl UpdatePetEndpoint {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl Endpoint for UpdatePetEndpoint {
    type Request = UpdatePet;
    type Response = UpdatePetResult;
    type Error = Infallible;

    async fn execute(&self, request: UpdatePet) -> Result<UpdatePetResult, Infallible> {
        let result = UpdatePetResult::from(self.service.update(request).await);
        if let Some(error) = &result.error {
            tracing::debug!(error = %error, "update pet failed");
        }
        Ok(result)
    }
}

/// Deletes a pet.
#[derive(Clone)]
pub struct DeletePetEndpoint {
    service: Arc<Service>,
}

impl DeletePetEndpoint {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl Endpoint for DeletePetEndpoint {
    type Request = PetId;
    type Response = DeletePetResult;
    type Error = Infallible;

    async fn execute(&self, request: PetId) -> Result<DeletePetResult, Infallible> {
        let result = DeletePetResult::from(self.service.delete(&request).await);
        if let Some(error) = &result.error {
            tracing::debug!(id = %request, error = %error, "delete pet failed");
        }
        Ok(result)
    }
}

/// Looks a pet up by id.
#[derive(Clone)]
pub struct GetPetWithIdEndpoint {
    service: Arc<Service>,
}

impl GetPetWithIdEndpoint {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl Endpoint for GetPetWithIdEndpoint {
    type Request = PetId;
    type Response = GetPetWithIdResult;
    type Error = Infallible;

    async fn execute(&self, request: PetId) -> Result<GetPetWithIdResult, Infallible> {
        let result = GetPetWithIdResult::from(self.service.query_by_id(&request).await);
        if let Some(error) = &result.error {
            tracing::debug!(id = %request, error = %error, "get pet failed");
        }
        Ok(result)
    }
}

/// Searches pets.
#[derive(Clone)]
pub struct SearchPetsEndpoint {
    service: Arc<Service>,
}

impl SearchPetsEndpoint {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl Endpoint for SearchPetsEndpoint {
    type Request = QueryFilter;
    type Response = SearchPetsDataResult;
    type Error = Infallible;

    async fn execute(&self, request: QueryFilter) -> Result<SearchPetsDataResult, Infallible> {
        let result = SearchPetsDataResult::from(self.service.query(request).await);
        if let Some(error) = &result.error {
            tracing::debug!(error = %error, "search pets failed");
        }
        Ok(result)
    }
}

/// The five pet endpoints, sharing one service.
#[derive(Clone)]
pub struct Endpoints {
    pub create: CreatePetEndpoint,
    pub update: UpdatePetEndpoint,
    pub delete: DeletePetEndpoint,
    pub get_with_id: GetPetWithIdEndpoint,
    pub search: SearchPetsEndpoint,
}

impl Endpoints {
    pub fn new(service: Arc<Service>) -> Self {
        Self {
            create: CreatePetEndpoint::new(Arc::clone(&service)),
            update: UpdatePetEndpoint::new(Arc::clone(&service)),
            delete: DeletePetEndpoint::new(Arc::clone(&service)),
            get_with_id: GetPetWithIdEndpoint::new(Arc::clone(&service)),
            search: SearchPetsEndpoint::new(service),
        }
    }
}
