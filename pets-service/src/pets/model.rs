//! Pet value types
//!
//! Requests, the persisted [`Pet`] shape, search filters and the per-operation
//! result types that endpoints hand to encoders.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::error::{PetError, ValidationError};

/// Default page used when a filter arrives without one.
pub const PAGE_NUMBER_DEFAULT: u8 = 1;

/// Default page size used when a filter arrives without one.
pub const ROWS_PER_PAGE_DEFAULT: u8 = 10;

/// Identifier of a pet.
///
/// The empty value means "absent" and is never assigned to a stored pet.
///
/// # Example
///
/// ```rust
/// use pets_service::pets::PetId;
///
/// let id = PetId::generate();
/// assert!(!id.is_empty());
/// assert!(PetId::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PetId(String);

impl PetId {
    /// Creates a fresh random identifier (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns true for the absent identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<PetId> for String {
    fn from(id: PetId) -> Self {
        id.0
    }
}

/// Data to request the creation of a pet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
}

impl NewPet {
    /// Builds the pet to persist, assigning it a new identifier.
    pub(crate) fn into_pet(self) -> Pet {
        Pet {
            id: PetId::generate(),
            name: self.name,
        }
    }
}

/// Data to request the update of an existing pet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePet {
    pub id: PetId,
    pub name: String,
}

impl UpdatePet {
    /// Runs every rule and reports all violations at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::default();

        if self.id.is_empty() {
            error.add_message("pet id cannot be empty");
        }

        if self.name.is_empty() {
            error.add_message("pet name cannot be empty");
        }

        if error.is_empty() {
            Ok(())
        } else {
            Err(error)
        }
    }
}

/// A stored pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
}

/// Fields a search can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderByField {
    /// No ordering requested; the service replaces it with [`OrderByField::Name`].
    #[default]
    Unset,
    Name,
}

impl OrderByField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for OrderByField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an `orderby` value names no known field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order by field: {0}")]
pub struct UnknownOrderByField(pub String);

impl FromStr for OrderByField {
    type Err = UnknownOrderByField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(Self::Unset),
            "name" => Ok(Self::Name),
            other => Err(UnknownOrderByField(other.to_string())),
        }
    }
}

/// Search criteria.
///
/// A filter without a name is invalid: searching with it yields an empty
/// result instead of reaching the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub name: String,
    pub order_by: OrderByField,
    pub page_number: u8,
    pub rows_per_page: u8,
}

impl QueryFilter {
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.name.is_empty()
    }

    /// Replaces unset ordering and zero paging values with their defaults.
    pub fn fill_default_values(&mut self) {
        if self.order_by == OrderByField::Unset {
            self.order_by = OrderByField::Name;
        }

        if self.page_number == 0 {
            self.page_number = PAGE_NUMBER_DEFAULT;
        }

        if self.rows_per_page == 0 {
            self.rows_per_page = ROWS_PER_PAGE_DEFAULT;
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPetsResult {
    pub pets: Vec<Pet>,
    pub total: usize,
    pub page: u8,
    pub rows_per_page: u8,
}

/// Outcome of the create operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePetResult {
    pub id: PetId,
    pub error: Option<String>,
}

/// Outcome of the update operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePetResult {
    pub error: Option<String>,
}

/// Outcome of the delete operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletePetResult {
    pub error: Option<String>,
}

/// Outcome of a lookup by id. `pet` is `None` both on failure and when the
/// pet does not exist; only `error` tells them apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPetWithIdResult {
    pub pet: Option<Pet>,
    pub error: Option<String>,
}

/// Outcome of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPetsDataResult {
    pub result: SearchPetsResult,
    pub error: Option<String>,
}

impl From<Result<PetId, PetError>> for CreatePetResult {
    fn from(outcome: Result<PetId, PetError>) -> Self {
        match outcome {
            Ok(id) => Self { id, error: None },
            Err(err) => Self {
                id: PetId::default(),
                error: Some(err.to_string()),
            },
        }
    }
}

impl From<Result<(), PetError>> for UpdatePetResult {
    fn from(outcome: Result<(), PetError>) -> Self {
        Self {
            error: outcome.err().map(|err| err.to_string()),
        }
    }
}

impl From<Result<(), PetError>> for DeletePetResult {
    fn from(outcome: Result<(), PetError>) -> Self {
        Self {
            error: outcome.err().map(|err| err.to_string()),
        }
    }
}

impl From<Result<Option<Pet>, PetError>> for GetPetWithIdResult {
    fn from(outcome: Result<Option<Pet>, PetError>) -> Self {
        match outcome {
            Ok(pet) => Self { pet, error: None },
            Err(err) => Self {
                pet: None,
                error: Some(err.to_string()),
            },
        }
    }
}

impl From<Result<SearchPetsResult, PetError>> for SearchPetsDataResult {
    fn from(outcome: Result<SearchPetsResult, PetError>) -> Self {
        match outcome {
            Ok(result) => Self {
                result,
                error: None,
            },
            Err(err) => Self {
                result: SearchPetsResult::default(),
                error: Some(err.to_string()),
            },
        }
    }
}
