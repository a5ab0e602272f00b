//! Card system: instances and the catalog boundary.
//!
//! ## Key Types
//!
//! - `CardId`: Opaque catalog identifier
//! - `CardInstance`: One card token in a duel (zone, position, owner)
//! - `Zone`, `Position`: Where a card is and how it is placed
//! - `CardCatalog`: Read-only metadata lookup supplied by the host

pub mod catalog;
pub mod instance;

pub use catalog::{CardCatalog, CardData, InMemoryCatalog};
pub use instance::{CardId, CardInstance, Position, Zone};
