//! Pets domain: model, business service, persistence port and endpoints

pub mod endpoint;
pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use endpoint::{
    CreatePetEndpoint, DeletePetEndpoint, Endpoint, Endpoints, GetPetWithIdEndpoint,
    SearchPetsEndpoint, UpdatePetEndpoint,
};
pub use error::{PetError, ValidationError};
pub use model::{
    CreatePetResult, DeletePetResult, GetPetWithIdResult, NewPet, OrderByField, Pet, PetId,
    QueryFilter, SearchPetsDataResult, SearchPetsResult, UnknownOrderByField, UpdatePet,
    UpdatePetResult, PAGE_NUMBER_DEFAULT, ROWS_PER_PAGE_DEFAULT,
};
pub use service::Service;
pub use store::{StoreError, StoreErrorKind, StoreOperation, StoreResult, Storer};
