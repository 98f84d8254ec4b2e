//! Pets business logic
//!
//! Validation, default values and the policies that decide what counts as an
//! error: deleting a missing pet succeeds, searching without a name returns
//! nothing.

use std::sync::Arc;

use super::error::PetError;
use super::model::{NewPet, Pet, PetId, QueryFilter, SearchPetsResult, UpdatePet};
use super::store::Storer;

/// Pets service.
///
/// Holds no state of its own; cloning it shares the underlying store.
#[derive(Clone)]
pub struct Service {
    storer: Arc<dyn Storer>,
}

impl Service {
    /// Creates a service backed by the given store.
    pub fn new(storer: Arc<dyn Storer>) -> Self {
        Self { storer }
    }

    /// Creates a pet and returns its newly assigned id.
    pub async fn create(&self, new_pet: NewPet) -> Result<PetId, PetError> {
        let pet = new_pet.into_pet();

        if let Err(e) = self.storer.save(&pet).await {
            tracing::error!(error = %e, "unable to create pet");
            return Err(PetError::SaveFailed);
        }

        tracing::debug!(id = %pet.id, "pet was created");

        Ok(pet.id)
    }

    /// Updates a pet after validating the request.
    pub async fn update(&self, pet: UpdatePet) -> Result<(), PetError> {
        pet.validate()?;

        if let Err(e) = self.storer.update(&pet).await {
            tracing::error!(id = %pet.id, error = %e, "unable to update pet");
            return Err(PetError::UpdateFailed);
        }

        Ok(())
    }

    /// Finds a pet by id. `Ok(None)` means the pet does not exist.
    pub async fn query_by_id(&self, id: &PetId) -> Result<Option<Pet>, PetError> {
        if id.is_empty() {
            return Err(PetError::EmptyId);
        }

        self.storer.query_by_id(id).await.map_err(|e| {
            tracing::error!(id = %id, error = %e, "unable to query pet by id");
            PetError::QueryFailed
        })
    }

    /// Deletes a pet. Deleting a pet that does not exist is a no-op.
    pub async fn delete(&self, id: &PetId) -> Result<(), PetError> {
        let pet = match self.query_by_id(id).await {
            Ok(Some(pet)) => pet,
            Ok(None) => {
                tracing::info!(id = %id, "unable to delete pet cause it does not exist");
                return Ok(());
            }
            Err(_) => return Err(PetError::DeleteFailed),
        };

        if let Err(e) = self.storer.delete(&pet).await {
            tracing::error!(id = %id, error = %e, "unable to delete pet");
            return Err(PetError::DeleteFailed);
        }

        Ok(())
    }

    /// Searches pets. A filter without a name yields an empty result.
    pub async fn query(&self, mut filter: QueryFilter) -> Result<SearchPetsResult, PetError> {
        if filter.is_invalid() {
            return Ok(SearchPetsResult::default());
        }

        filter.fill_default_values();

        self.storer.query(&filter).await.map_err(|e| {
            tracing::error!(filter = ?filter, error = %e, "unable to query pets by filter");
            PetError::SearchFailed
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pets::model::OrderByField;
    use crate::pets::store::{StoreError, StoreOperation, StoreResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store double that records every call and can be told to fail.
    #[derive(Default)]
    pub(crate) struct StorerMock {
        pub(crate) saved: Mutex<Vec<Pet>>,
        pub(crate) updated: Mutex<Vec<UpdatePet>>,
        pub(crate) deleted: Mutex<Vec<Pet>>,
        pub(crate) queries: Mutex<Vec<QueryFilter>>,
        pub(crate) lookups: Mutex<Vec<PetId>>,
        pub(crate) found: Option<Pet>,
        pub(crate) fail: bool,
        pub(crate) fail_delete_only: bool,
    }

    impl StorerMock {
        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub(crate) fn with_pet(pet: Pet) -> Self {
            Self {
                found: Some(pet),
                ..Self::default()
            }
        }

        fn check(&self, operation: StoreOperation) -> StoreResult<()> {
            if self.fail || (self.fail_delete_only && operation == StoreOperation::Delete) {
                return Err(StoreError::backend(operation, "database is down"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Storer for StorerMock {
        async fn save(&self, pet: &Pet) -> StoreResult<()> {
            self.check(StoreOperation::Save)?;
            self.saved.lock().unwrap().push(pet.clone());
            Ok(())
        }

        async fn update(&self, pet: &UpdatePet) -> StoreResult<()> {
            self.check(StoreOperation::Update)?;
            self.updated.lock().unwrap().push(pet.clone());
            Ok(())
        }

        async fn delete(&self, pet: &Pet) -> StoreResult<()> {
            self.check(StoreOperation::Delete)?;
            self.deleted.lock().unwrap().push(pet.clone());
            Ok(())
        }

        async fn query(&self, filter: &QueryFilter) -> StoreResult<SearchPetsResult> {
            self.queries.lock().unwrap().push(filter.clone());
            self.check(StoreOperation::Query)?;
            Ok(SearchPetsResult {
                pets: self.found.iter().cloned().collect(),
                total: usize::from(self.found.is_some()),
                page: filter.page_number,
                rows_per_page: filter.rows_per_page,
            })
        }

        async fn query_by_id(&self, id: &PetId) -> StoreResult<Option<Pet>> {
            self.lookups.lock().unwrap().push(id.clone());
            self.check(StoreOperation::QueryById)?;
            Ok(self.found.clone())
        }
    }

    fn drila() -> Pet {
        Pet {
            id: PetId::from("858455b7-e182-4122-a1b6-132c64d2f77b"),
            name: "drila".to_string(),
        }
    }

    fn service_with(storer: &Arc<StorerMock>) -> Service {
        Service::new(Arc::clone(storer) as Arc<dyn Storer>)
    }

    #[tokio::test]
    async fn test_create() {
        let storer = Arc::new(StorerMock::default());
        let service = service_with(&storer);

        let id = service
            .create(NewPet {
                name: "drila".to_string(),
            })
            .await
            .unwrap();

        let saved = storer.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, id);
        assert_eq!(saved[0].name, "drila");
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let storer = Arc::new(StorerMock::default());
        let service = service_with(&storer);

        let first = service.create(NewPet::default()).await.unwrap();
        let second = service.create(NewPet::default()).await.unwrap();

        assert!(!first.is_empty());
        assert!(!second.is_empty());
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_create_but_error() {
        let storer = Arc::new(StorerMock::failing());
        let service = service_with(&storer);

        let err = service
            .create(NewPet {
                name: "drila".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, PetError::SaveFailed);
        assert_eq!(err.to_string(), "unable to save pet in the repository");
        assert!(storer.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update() {
        let storer = Arc::new(StorerMock::default());
        let service = service_with(&storer);
        let update = UpdatePet {
            id: drila().id,
            name: "drila".to_string(),
        };

        service.update(update.clone()).await.unwrap();

        assert_eq!(*storer.updated.lock().unwrap(), vec![update]);
    }

    #[tokio::test]
    async fn test_update_aggregates_validation_errors() {
        let storer = Arc::new(StorerMock::default());
        let service = service_with(&storer);

        let err = service.update(UpdatePet::default()).await.unwrap_err();

        match err {
            PetError::Invalid(validation) => assert_eq!(validation.messages().len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(storer.updated.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_but_store_error() {
        let storer = Arc::new(StorerMock::failing());
        let service = service_with(&storer);
        let update = UpdatePet {
            id: drila().id,
            name: "drila".to_string(),
        };

        let err = service.update(update).await.unwrap_err();

        assert_eq!(err, PetError::UpdateFailed);
    }

    #[tokio::test]
    async fn test_query_by_id() {
        let storer = Arc::new(StorerMock::with_pet(drila()));
        let service = service_with(&storer);

        let pet = service.query_by_id(&drila().id).await.unwrap();

        assert_eq!(pet, Some(drila()));
    }

    #[tokio::test]
    async fn test_query_by_id_not_found_is_not_an_error() {
        let storer = Arc::new(StorerMock::default());
        let service = service_with(&storer);

        let pet = service.query_by_id(&PetId::from("unknown-id")).await.unwrap();

        assert!(pet.is_none());
    }

    #[tokio::test]
    async fn test_query_by_empty_id() {
        let storer = Arc::new(StorerMock::default());
        let service = service_with(&storer);

        let err = service.query_by_id(&PetId::default()).await.unwrap_err();

        assert_eq!(err, PetError::EmptyId);
        assert!(storer.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_by_id_but_store_error() {
        let storer = Arc::new(StorerMock::failing());
        let service = service_with(&storer);

        let err = service.query_by_id(&drila().id).await.unwrap_err();

        assert_eq!(err, PetError::QueryFailed);
    }

    #[tokio::test]
    async fn test_delete() {
        let storer = Arc::new(StorerMock::with_pet(drila()));
        let service = service_with(&storer);

        service.delete(&drila().id).await.unwrap();

        assert_eq!(*storer.deleted.lock().unwrap(), vec![drila()]);
    }

    #[tokio::test]
    async fn test_delete_missing_pet_is_a_no_op() {
        let storer = Arc::new(StorerMock::default());
        let service = service_with(&storer);

        service.delete(&PetId::from("unknown-id")).await.unwrap();

        assert_eq!(storer.lookups.lock().unwrap().len(), 1);
        assert!(storer.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_with_empty_id() {
        let storer = Arc::new(StorerMock::default());
        let service = service_with(&storer);

        let err = service.delete(&PetId::default()).await.unwrap_err();

        assert_eq!(err, PetError::DeleteFailed);
    }

    #[tokio::test]
    async fn test_delete_but_store_error() {
        let storer = Arc::new(StorerMock {
            fail_delete_only: true,
            ..StorerMock::with_pet(drila())
        });
        let service = service_with(&storer);

        let err = service.delete(&drila().id).await.unwrap_err();

        assert_eq!(err, PetError::DeleteFailed);
        assert_eq!(err.to_string(), "unable to delete pet");
    }

    #[tokio::test]
    async fn test_query_without_name_skips_store() {
        let storer = Arc::new(StorerMock::with_pet(drila()));
        let service = service_with(&storer);

        let result = service.query(QueryFilter::default()).await.unwrap();

        assert_eq!(result, SearchPetsResult::default());
        assert!(storer.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_fills_defaults_before_store() {
        let storer = Arc::new(StorerMock::with_pet(drila()));
        let service = service_with(&storer);

        let result = service
            .query(QueryFilter {
                name: "drila".to_string(),
                ..QueryFilter::default()
            })
            .await
            .unwrap();

        let queries = storer.queries.lock().unwrap();
        assert_eq!(
            queries[0],
            QueryFilter {
                name: "drila".to_string(),
                order_by: OrderByField::Name,
                page_number: 1,
                rows_per_page: 10,
            }
        );
        assert_eq!(result.pets, vec![drila()]);
        assert_eq!(result.total, 1);
    }

    #[tokio::test]
    async fn test_query_but_store_error() {
        let storer = Arc::new(StorerMock::failing());
        let service = service_with(&storer);

        let err = service
            .query(QueryFilter {
                name: "drila".to_string(),
                ..QueryFilter::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, PetError::SearchFailed);
    }
}
