//! In-memory [`Storer`] backed by a concurrent map
//!
//! Concurrent writers to the same pet race; the last write wins.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::pets::{
    NewPet, OrderByField, Pet, PetId, QueryFilter, SearchPetsResult, StoreError, StoreOperation,
    StoreResult, Storer, UpdatePet,
};

/// Pets kept in process memory.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pets: Arc<DashMap<PetId, Pet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one pet per name.
    pub fn with_seed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for name in names {
            let pet = NewPet { name: name.into() }.into_pet();
            tracing::debug!(id = %pet.id, name = %pet.name, "seeding pet");
            store.pets.insert(pet.id.clone(), pet);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}

#[async_trait]
impl Storer for MemoryStore {
    async fn save(&self, pet: &Pet) -> StoreResult<()> {
        match self.pets.entry(pet.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::already_exists(&pet.id)),
            Entry::Vacant(slot) => {
                slot.insert(pet.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, pet: &UpdatePet) -> StoreResult<()> {
        let mut stored = self
            .pets
            .get_mut(&pet.id)
            .ok_or_else(|| StoreError::not_found(StoreOperation::Update, &pet.id))?;
        stored.name = pet.name.clone();
        Ok(())
    }

    async fn delete(&self, pet: &Pet) -> StoreResult<()> {
        self.pets.remove(&pet.id);
        Ok(())
    }

    async fn query(&self, filter: &QueryFilter) -> StoreResult<SearchPetsResult> {
        let needle = filter.name.to_lowercase();

        let mut matches: Vec<Pet> = self
            .pets
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .map(|entry| entry.value().clone())
            .collect();

        match filter.order_by {
            OrderByField::Name | OrderByField::Unset => {
                // Case-insensitive to agree with matching; ties fall back to id.
                matches.sort_by_cached_key(|pet| (pet.name.to_lowercase(), pet.id.clone()));
            }
        }

        let total = matches.len();
        let rows = usize::from(filter.rows_per_page);
        let offset = usize::from(filter.page_number.saturating_sub(1)) * rows;

        let pets = matches.into_iter().skip(offset).take(rows).collect();

        Ok(SearchPetsResult {
            pets,
            total,
            page: filter.page_number,
            rows_per_page: filter.rows_per_page,
        })
    }

    async fn query_by_id(&self, id: &PetId) -> StoreResult<Option<Pet>> {
        Ok(self.pets.get(id).map(|entry| entry.value().clone()))
    }
}
