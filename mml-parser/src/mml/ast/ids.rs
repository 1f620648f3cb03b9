//! Node id generation
//!
//!     Generated ids are `c_<8 hex>` for containers and `n_<8 hex>` for content.
//!     The generator remembers every id it has seen in a document (parsed, created
//!     or generated), including ids of deleted nodes, so an id is never handed
//!     out twice within a session.

use super::node::NodeKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;

#[derive(Clone)]
pub struct IdGenerator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl IdGenerator {
    /// Generator seeded from the OS
    pub fn new() -> Self {
        IdGenerator {
            rng: StdRng::from_os_rng(),
            issued: HashSet::new(),
        }
    }

    /// Deterministic generator, for reproducible output
    pub fn seeded(seed: u64) -> Self {
        IdGenerator {
            rng: StdRng::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    /// Claim an existing id. Returns false if it was already taken.
    pub fn reserve(&mut self, id: &str) -> bool {
        self.issued.insert(id.to_string())
    }

    pub fn is_issued(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    /// A fresh id for a node of `kind`
    pub fn generate(&mut self, kind: NodeKind) -> String {
        loop {
            let id = format!("{}_{:08x}", kind.id_prefix(), self.rng.random::<u32>());
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("issued", &self.issued.len())
            .finish()
    }
}
