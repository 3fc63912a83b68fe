//! Stored customization snapshot.
//!
//! - [`types`] — serializable shape kept in the local store
//! - [`serialization`] — save preconditions, encode/decode, fail-open restore

pub mod serialization;
pub mod types;

pub use serialization::RestoreOutcome;
pub use types::StoredCustomization;
