//! Domain error taxonomy
//!
//! Store failures never reach callers as-is: the service logs the cause and
//! returns one of these coarse-grained variants instead.

use std::fmt;

use thiserror::Error;

/// Errors produced by the pets service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PetError {
    /// The store rejected a new pet
    #[error("unable to save pet in the repository")]
    SaveFailed,

    /// The store rejected an update
    #[error("unable to update pet in the repository")]
    UpdateFailed,

    /// Lookup or removal failed while deleting
    #[error("unable to delete pet")]
    DeleteFailed,

    /// Lookup by id failed
    #[error("unable to query pet")]
    QueryFailed,

    /// Search by filter failed
    #[error("unable to query pets")]
    SearchFailed,

    /// An operation that needs an id received the empty one
    #[error("pet id cannot be empty")]
    EmptyId,

    /// Update data broke one or more rules
    #[error("unable to update pet: {0}")]
    Invalid(ValidationError),
}

/// Every rule violation found while validating pet data.
///
/// Built by running all checks before returning, never partially.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    pub(crate) fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pet data: [{}]", self.messages.join(", "))
    }
}

impl From<ValidationError> for PetError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}
