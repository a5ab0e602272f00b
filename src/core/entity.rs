//! Card instance identification.
//!
//! Every physical card token in a duel gets an `InstanceId` when it enters
//! play. Instance IDs are distinct from catalog `CardId`s: three copies of the
//! same catalog card are three instances.
//!
//! ## Allocation
//!
//! IDs come from a process-wide counter, so two duels started in the same
//! process never share an instance ID. Replays never allocate: they start from
//! a snapshot whose instances already carry their IDs.
//!
//! ```
//! use duel_engine::core::InstanceId;
//!
//! let a = InstanceId::fresh();
//! let b = InstanceId::fresh();
//! assert_ne!(a, b);
//! ```

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier for one card token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// Allocate a new, never-before-seen instance ID.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for InstanceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}
