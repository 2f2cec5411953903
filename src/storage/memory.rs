use super::{ACTIVE_FIELD, Envelope, ID_FIELD, ResourceKind, ResourceStore, resource_id};
use ahash::AHashMap;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::Value;
use tracing::debug;

/// A process-local [`ResourceStore`].
///
/// Resources keep their creation order; `list` returns active ones newest first
/// and `delete` only flips `isActive`. Templates created without a `code` get a
/// generated one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: AHashMap<ResourceKind, Vec<Value>>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_mut(&mut self, kind: ResourceKind, id: &str) -> Option<&mut Value> {
        self.collections
            .get_mut(&kind)?
            .iter_mut()
            .find(|resource| resource_id(resource) == Some(id))
    }

    fn generate_code(&self) -> String {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(5)
            .map(|c| char::from(c).to_ascii_lowercase())
            .collect();
        format!("{:x}-{}", self.next_id, suffix)
    }

    fn not_found(kind: ResourceKind) -> Envelope<Value> {
        Envelope::failure(format!("{} not found", kind))
    }
}

impl ResourceStore for MemoryStore {
    fn list(&self, kind: ResourceKind) -> Envelope<Vec<Value>> {
        let resources = self
            .collections
            .get(&kind)
            .map(|resources| {
                resources
                    .iter()
                    .rev()
                    .filter(|resource| resource.get(ACTIVE_FIELD) != Some(&Value::Bool(false)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Envelope::ok(resources)
    }

    fn get(&self, kind: ResourceKind, id: &str) -> Envelope<Value> {
        self.collections
            .get(&kind)
            .and_then(|resources| {
                resources
                    .iter()
                    .find(|resource| resource_id(resource) == Some(id))
            })
            .cloned()
            .map_or_else(|| Self::not_found(kind), Envelope::ok)
    }

    fn create(&mut self, kind: ResourceKind, body: Value) -> Envelope<Value> {
        let Value::Object(mut fields) = body else {
            return Envelope::failure(format!("{} body must be a JSON object", kind));
        };

        self.next_id += 1;
        let id = format!("{:024x}", self.next_id);
        if kind == ResourceKind::Templates {
            fields.insert("code".to_string(), Value::String(self.generate_code()));
        }
        fields.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        fields
            .entry(ACTIVE_FIELD.to_string())
            .or_insert(Value::Bool(true));

        let resource = Value::Object(fields);
        self.collections
            .entry(kind)
            .or_default()
            .push(resource.clone());
        debug!(kind = kind.as_str(), id = %id, "created resource");
        Envelope::ok(resource)
    }

    fn update(&mut self, kind: ResourceKind, id: &str, body: Value) -> Envelope<Value> {
        let Value::Object(fields) = body else {
            return Envelope::failure(format!("{} body must be a JSON object", kind));
        };
        let Some(Value::Object(existing)) = self.find_mut(kind, id) else {
            return Self::not_found(kind);
        };

        for (key, value) in fields {
            if key != ID_FIELD {
                existing.insert(key, value);
            }
        }
        debug!(kind = kind.as_str(), id, "updated resource");
        Envelope::ok(Value::Object(existing.clone()))
    }

    fn delete(&mut self, kind: ResourceKind, id: &str) -> Envelope<Value> {
        let Some(Value::Object(existing)) = self.find_mut(kind, id) else {
            return Self::not_found(kind);
        };

        existing.insert(ACTIVE_FIELD.to_string(), Value::Bool(false));
        debug!(kind = kind.as_str(), id, "soft-deleted resource");
        Envelope::ok(Value::Object(existing.clone()))
    }
}
