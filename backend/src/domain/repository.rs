//! Generic in-memory repository mirrored to a [`CollectionStore`] key.
//!
//! Each repository keeps its collection in memory and rewrites the whole
//! collection under its store key on every mutation. Mutations are staged
//! against a copy first; the in-memory list only changes after the store
//! accepts the new document, so a failed write leaves both sides as they
//! were.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::ports::{CollectionStore, StoreError, StoreKey};
use super::{Error, Product, ProductId, Sale, SaleId, Supplier, SupplierId, User, UserId};

/// A persisted record with a stable identifier.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Identifier type.
    type Id: PartialEq + fmt::Display;

    /// Store key holding the collection.
    const KEY: StoreKey;

    /// Singular noun used in messages.
    const KIND: &'static str;

    /// Identifier of this record.
    fn entity_id(&self) -> &Self::Id;
}

impl Entity for Product {
    type Id = ProductId;
    const KEY: StoreKey = StoreKey::Products;
    const KIND: &'static str = "product";

    fn entity_id(&self) -> &ProductId {
        self.id()
    }
}

impl Entity for Supplier {
    type Id = SupplierId;
    const KEY: StoreKey = StoreKey::Suppliers;
    const KIND: &'static str = "supplier";

    fn entity_id(&self) -> &SupplierId {
        self.id()
    }
}

impl Entity for User {
    type Id = UserId;
    const KEY: StoreKey = StoreKey::Users;
    const KIND: &'static str = "user";

    fn entity_id(&self) -> &UserId {
        self.id()
    }
}

impl Entity for Sale {
    type Id = SaleId;
    const KEY: StoreKey = StoreKey::Sales;
    const KIND: &'static str = "sale";

    fn entity_id(&self) -> &SaleId {
        self.id()
    }
}

/// Map a store adapter failure to an internal domain error.
pub(crate) fn map_store_error(error: StoreError) -> Error {
    Error::internal(error.to_string())
}

/// A prepared collection change that has not been applied yet.
#[derive(Debug, Clone)]
pub(crate) struct Staged<E> {
    items: Vec<E>,
    payload: String,
    affected: E,
}

impl<E: Entity> Staged<E> {
    /// Key/value pair to hand to [`CollectionStore::save_all`].
    pub(crate) fn entry(&self) -> (StoreKey, String) {
        (E::KEY, self.payload.clone())
    }

    /// The record created, changed, or removed by this change.
    pub(crate) fn affected(&self) -> &E {
        &self.affected
    }
}

/// In-memory collection backed by one store key.
pub struct Repository<E, S> {
    store: Arc<S>,
    items: Vec<E>,
}

impl<E, S> Repository<E, S>
where
    E: Entity,
    S: CollectionStore,
{
    /// Load the collection, or seed it when the key is absent.
    ///
    /// `seed` runs only when the store has never held this key; its result
    /// is written back before the repository is returned. A present but
    /// empty collection is respected and not reseeded.
    pub fn open<F>(store: Arc<S>, seed: F) -> Result<Self, Error>
    where
        F: FnOnce() -> Result<Vec<E>, Error>,
    {
        let items = match store.load(E::KEY).map_err(map_store_error)? {
            Some(raw) => decode::<E>(&raw)?,
            None => {
                let seeded = seed()?;
                store
                    .save(E::KEY, &encode(&seeded)?)
                    .map_err(map_store_error)?;
                debug!(key = %E::KEY, count = seeded.len(), "seeded collection");
                seeded
            }
        };
        debug!(key = %E::KEY, count = items.len(), "collection loaded");
        Ok(Self { store, items })
    }

    /// Every record in stored order.
    pub fn list(&self) -> &[E] {
        &self.items
    }

    /// Look a record up by id.
    pub fn find(&self, id: &E::Id) -> Option<&E> {
        self.items.iter().find(|item| item.entity_id() == id)
    }

    /// Like [`Self::find`] but fails with [`super::ErrorCode::NotFound`].
    pub fn get(&self, id: &E::Id) -> Result<&E, Error> {
        self.find(id).ok_or_else(|| not_found::<E>(id))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn store(&self) -> &S {
        self.store.as_ref()
    }

    pub(crate) fn stage_insert(&self, entity: E) -> Result<Staged<E>, Error> {
        let mut items = self.items.clone();
        items.push(entity.clone());
        Self::staged(items, entity)
    }

    pub(crate) fn stage_update<F>(&self, id: &E::Id, change: F) -> Result<Staged<E>, Error>
    where
        F: FnOnce(&mut E) -> Result<(), Error>,
    {
        let mut items = self.items.clone();
        let target = items
            .iter_mut()
            .find(|item| item.entity_id() == id)
            .ok_or_else(|| not_found::<E>(id))?;
        change(target)?;
        let affected = target.clone();
        Self::staged(items, affected)
    }

    pub(crate) fn stage_remove(&self, id: &E::Id) -> Result<Staged<E>, Error> {
        let position = self
            .items
            .iter()
            .position(|item| item.entity_id() == id)
            .ok_or_else(|| not_found::<E>(id))?;
        let mut items = self.items.clone();
        let removed = items.remove(position);
        Self::staged(items, removed)
    }

    /// Write a staged change to the store, then apply it in memory.
    pub(crate) fn persist(&mut self, staged: Staged<E>) -> Result<E, Error> {
        self.store
            .save(E::KEY, &staged.payload)
            .map_err(map_store_error)?;
        Ok(self.commit(staged))
    }

    /// Apply a staged change whose payload the caller already stored.
    pub(crate) fn commit(&mut self, staged: Staged<E>) -> E {
        let Staged {
            items, affected, ..
        } = staged;
        self.items = items;
        affected
    }

    fn staged(items: Vec<E>, affected: E) -> Result<Staged<E>, Error> {
        let payload = encode(&items)?;
        Ok(Staged {
            items,
            payload,
            affected,
        })
    }
}

fn not_found<E: Entity>(id: &E::Id) -> Error {
    Error::not_found(format!("{} '{id}' not found", E::KIND))
        .with_details(json!({ "kind": E::KIND, "id": id.to_string() }))
}

fn encode<E: Entity>(items: &[E]) -> Result<String, Error> {
    serde_json::to_string(items)
        .map_err(|err| Error::internal(format!("failed to encode {}: {err}", E::KEY)))
}

fn decode<E: Entity>(raw: &str) -> Result<Vec<E>, Error> {
    serde_json::from_str(raw)
        .map_err(|err| Error::internal(format!("stored {} could not be decoded: {err}", E::KEY)))
}
