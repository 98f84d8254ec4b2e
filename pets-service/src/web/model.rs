//! JSON shapes exchanged over HTTP
//!
//! Every pet operation answers with a [`ResponseEnvelope`]:
//!
//! ```json
//! { "success": true, "data": "858455b7-e182-4122-a1b6-132c64d2f77b", "errors": null }
//! ```
//!
//! Request bodies and payloads are separate from the domain types so the
//! wire format can evolve independently.

use serde::{Deserialize, Serialize};

use crate::pets;

// ============================================================================
// Envelope
// ============================================================================

/// Standard result wrapper for pet responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T> ResponseEnvelope<T> {
    /// Successful envelope carrying `data` (which may still be null).
    pub fn success(data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            errors: None,
        }
    }

    /// Unsuccessful envelope carrying one error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors: Some(vec![message.into()]),
        }
    }

    /// True only when the envelope is unsuccessful AND carries errors.
    ///
    /// `success: false` with no errors is not considered failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.success && self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}

impl From<pets::CreatePetResult> for ResponseEnvelope<String> {
    fn from(result: pets::CreatePetResult) -> Self {
        match result.error {
            None => Self::success(Some(result.id.into())),
            Some(error) => Self::error(error),
        }
    }
}

impl From<pets::UpdatePetResult> for ResponseEnvelope<()> {
    fn from(result: pets::UpdatePetResult) -> Self {
        match result.error {
            None => Self::success(None),
            Some(error) => Self::error(error),
        }
    }
}

impl From<pets::DeletePetResult> for ResponseEnvelope<()> {
    fn from(result: pets::DeletePetResult) -> Self {
        match result.error {
            None => Self::success(None),
            Some(error) => Self::error(error),
        }
    }
}

impl From<pets::GetPetWithIdResult> for ResponseEnvelope<Pet> {
    fn from(result: pets::GetPetWithIdResult) -> Self {
        match result.error {
            None => Self::success(result.pet.map(Pet::from)),
            Some(error) => Self::error(error),
        }
    }
}

impl From<pets::SearchPetsDataResult> for ResponseEnvelope<SearchPetsResult> {
    fn from(result: pets::SearchPetsDataResult) -> Self {
        match result.error {
            None => Self::success(Some(result.result.into())),
            Some(error) => Self::error(error),
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Pet as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
}

impl From<pets::Pet> for Pet {
    fn from(pet: pets::Pet) -> Self {
        Self {
            id: pet.id.into(),
            name: pet.name,
        }
    }
}

/// Body of `POST /pets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPet {
    pub name: String,
}

impl From<NewPet> for pets::NewPet {
    fn from(pet: NewPet) -> Self {
        Self { name: pet.name }
    }
}

/// Body of `PUT /pets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePet {
    pub id: String,
    pub name: String,
}

impl From<UpdatePet> for pets::UpdatePet {
    fn from(pet: UpdatePet) -> Self {
        Self {
            id: pets::PetId::from(pet.id),
            name: pet.name,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPetsResult {
    pub pets: Vec<Pet>,
    pub total: usize,
    pub page: u8,
    pub page_size: u8,
}

impl From<pets::SearchPetsResult> for SearchPetsResult {
    fn from(result: pets::SearchPetsResult) -> Self {
        Self {
            pets: result.pets.into_iter().map(Pet::from).collect(),
            total: result.total,
            page: result.page,
            page_size: result.rows_per_page,
        }
    }
}
