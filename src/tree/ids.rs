//! Node identifier generation.
//!
//! Identifiers are produced by an injected [`IdGenerator`] rather than derived
//! from wall-clock time. Every generator here returns an id it has never
//! returned before; the forest additionally skips ids that are already present
//! (e.g. ids that arrived through an import).

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Where a new node is going to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRequest<'a> {
    Root,
    Child { parent_id: &'a str, index: usize },
}

pub trait IdGenerator: Send {
    /// Returns an id this generator has not handed out before.
    fn generate(&mut self, request: IdRequest<'_>) -> String;

    /// Marks an id as taken so it is never generated later.
    fn reserve(&mut self, _id: &str) {}
}

/// Reproduces the builder's readable `root-<n>` and `<parent>-child-<index>` ids.
///
/// The index starts at the parent's current child count and is bumped past any
/// id that was already issued or reserved, so deleting a sibling can never
/// cause an id to be handed out twice.
#[derive(Debug, Default)]
pub struct ChildIndexIds {
    issued: AHashSet<String>,
    next_root: u64,
}

impl ChildIndexIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim(&mut self, mut candidate: impl FnMut() -> String) -> String {
        loop {
            let id = candidate();
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

impl IdGenerator for ChildIndexIds {
    fn generate(&mut self, request: IdRequest<'_>) -> String {
        match request {
            IdRequest::Root => {
                let mut next = self.next_root;
                let id = self.claim(|| {
                    next += 1;
                    format!("root-{}", next)
                });
                self.next_root = next;
                id
            }
            IdRequest::Child { parent_id, index } => {
                let mut index = index;
                self.claim(|| {
                    let id = format!("{}-child-{}", parent_id, index);
                    index += 1;
                    id
                })
            }
        }
    }

    fn reserve(&mut self, id: &str) {
        self.issued.insert(id.to_string());
    }
}

/// Monotonic `node-<n>` ids, independent of tree position.
///
/// Reserving `node-<n>` moves the counter past `n`, so ids that arrived through
/// an import are not handed out again once their nodes are removed.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self, _request: IdRequest<'_>) -> String {
        self.next += 1;
        format!("node-{}", self.next)
    }

    fn reserve(&mut self, id: &str) {
        if let Some(n) = id
            .strip_prefix("node-")
            .and_then(|n| n.parse::<u64>().ok())
        {
            self.next = self.next.max(n);
        }
    }
}

/// Random 64-bit ids, for hosts that merge nodes from several sources.
#[derive(Debug, Default)]
pub struct RandomIds {
    issued: AHashSet<String>,
}

impl RandomIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for RandomIds {
    fn generate(&mut self, _request: IdRequest<'_>) -> String {
        loop {
            let id = format!("node-{:016x}", rand::random::<u64>());
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    fn reserve(&mut self, id: &str) {
        self.issued.insert(id.to_string());
    }
}

/// Selects one of the built-in generators from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    ChildIndex,
    Sequential,
    Random,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::ChildIndex => Box::new(ChildIndexIds::new()),
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
            IdStrategy::Random => Box::new(RandomIds::new()),
        }
    }
}
