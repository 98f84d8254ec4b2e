//! Persistence port for pets
//!
//! The service only knows the [`Storer`] capability; adapters under
//! [`crate::stores`] implement it. Adapters report failures as [`StoreError`],
//! which the service logs and replaces with a domain error.
//!
//! # Example
//!
//! ```rust,ignore
//! use pets_service::pets::{Pet, StoreResult, Storer};
//!
//! struct PostgresStore { pool: PgPool }
//!
//! #[async_trait::async_trait]
//! impl Storer for PostgresStore {
//!     async fn save(&self, pet: &Pet) -> StoreResult<()> {
//!         sqlx::query("INSERT INTO pets (id, name) VALUES ($1, $2)")
//!             .bind(pet.id.as_str())
//!             .bind(&pet.name)
//!             .execute(&self.pool)
//!             .await
//!             .map_err(|e| StoreError::backend(StoreOperation::Save, e.to_string()))?;
//!         Ok(())
//!     }
//!     // ... other methods
//! }
//! ```

use std::fmt;

use async_trait::async_trait;

use super::model::{Pet, PetId, QueryFilter, SearchPetsResult, UpdatePet};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence behavior the pets service depends on.
///
/// Implementations must be safe to share between concurrent requests; any
/// consistency guarantee (locking, last-write-wins) is theirs to provide.
#[async_trait]
pub trait Storer: Send + Sync {
    /// Persists a new pet.
    async fn save(&self, pet: &Pet) -> StoreResult<()>;

    /// Replaces the data of an existing pet.
    async fn update(&self, pet: &UpdatePet) -> StoreResult<()>;

    /// Removes a pet.
    async fn delete(&self, pet: &Pet) -> StoreResult<()>;

    /// Returns one page of pets matching an already defaulted filter.
    async fn query(&self, filter: &QueryFilter) -> StoreResult<SearchPetsResult>;

    /// Finds a pet by id.
    ///
    /// A missing pet is `Ok(None)`, not an error.
    async fn query_by_id(&self, id: &PetId) -> StoreResult<Option<Pet>>;
}

/// Store operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Save,
    Update,
    Delete,
    Query,
    QueryById,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Save => write!(f, "save"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Query => write!(f, "query"),
            Self::QueryById => write!(f, "query_by_id"),
        }
    }
}

/// Category of store failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// The pet the operation targets does not exist
    NotFound,
    /// A pet with the same id already exists
    AlreadyExists,
    /// The backend itself failed (connection, query, timeout)
    Backend,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::Backend => write!(f, "backend"),
        }
    }
}

/// Failure reported by a [`Storer`] adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub operation: StoreOperation,
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(
        operation: StoreOperation,
        kind: StoreErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(operation: StoreOperation, id: &PetId) -> Self {
        Self::new(
            operation,
            StoreErrorKind::NotFound,
            format!("pet {id} does not exist"),
        )
    }

    pub fn already_exists(id: &PetId) -> Self {
        Self::new(
            StoreOperation::Save,
            StoreErrorKind::AlreadyExists,
            format!("pet {id} already exists"),
        )
    }

    pub fn backend(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StoreErrorKind::Backend, message)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "store {} error during {}: {}",
            self.kind, self.operation, self.message
        )
    }
}

impl std::error::Error for StoreError {}
