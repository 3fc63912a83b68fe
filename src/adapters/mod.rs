//! Concrete collaborators for the traits in [`crate::ports`].
//!
//! - [`store`]  — in-memory and file-backed local stores
//! - [`orders`] — in-process order book (sink + lookup)
//! - [`notify`] — tracing/recording notifiers and a counting navigator
//! - [`sheet`]  — in-memory spreadsheet relay and failure log
//! - [`assets`] — bundled jersey images

pub mod assets;
pub mod notify;
pub mod orders;
pub mod sheet;
pub mod store;

pub use assets::StaticAssets;
pub use notify::{CountingNavigator, RecordingNotifier, TracingNotifier};
pub use orders::MemoryOrderBook;
pub use sheet::{MemoryFailureLog, MemorySheet};
pub use store::{FileStore, MemoryStore};
