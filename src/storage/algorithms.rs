use super::{ResourceKind, ResourceStore, resource_id};
use crate::document::Algorithm;
use crate::error::{SessionError, StorageError};
use serde_json::Value;
use tracing::info;

const KIND: ResourceKind = ResourceKind::Algorithms;

/// An algorithm together with the id the store keeps it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAlgorithm {
    pub id: String,
    pub algorithm: Algorithm,
}

/// Typed access to the `algorithms` collection of a [`ResourceStore`].
pub struct AlgorithmRepository<'a, S: ResourceStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: ResourceStore + ?Sized> AlgorithmRepository<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    pub fn create(&mut self, algorithm: &Algorithm) -> Result<StoredAlgorithm, SessionError> {
        let body = algorithm.to_json_value()?;
        let stored = decode(self.store.create(KIND, body).into_result(KIND)?)?;
        info!(id = %stored.id, name = %stored.algorithm.name, "saved algorithm");
        Ok(stored)
    }

    pub fn update(
        &mut self,
        id: &str,
        algorithm: &Algorithm,
    ) -> Result<StoredAlgorithm, SessionError> {
        let body = algorithm.to_json_value()?;
        decode(self.store.update(KIND, id, body).into_result(KIND)?)
    }

    pub fn get(&self, id: &str) -> Result<StoredAlgorithm, SessionError> {
        decode(self.store.get(KIND, id).into_result(KIND)?)
    }

    /// Active algorithms, newest first.
    pub fn list(&self) -> Result<Vec<StoredAlgorithm>, SessionError> {
        self.store
            .list(KIND)
            .into_result(KIND)?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Soft-deletes the algorithm and returns its last stored state.
    pub fn delete(&mut self, id: &str) -> Result<StoredAlgorithm, SessionError> {
        let stored = decode(self.store.delete(KIND, id).into_result(KIND)?)?;
        info!(id = %stored.id, "deleted algorithm");
        Ok(stored)
    }
}

fn decode(resource: Value) -> Result<StoredAlgorithm, SessionError> {
    let id = resource_id(&resource)
        .ok_or_else(|| StorageError::Decode {
            kind: KIND,
            message: "resource has no id".to_string(),
        })?
        .to_string();
    let algorithm = Algorithm::from_json_value(resource)?;
    Ok(StoredAlgorithm { id, algorithm })
}
