//! Sift Core Runtime
//!
//! This crate provides the host-facing primitives shared by the Sift
//! combobox engine:
//!
//! - **Input Events**: Keyboard, text, focus and pointer events delivered by the host
//! - **Notifications**: An outbox of events the engine dispatches back to the host
//! - **Mutation Batching**: Coalesces structural changes into one reconciliation per turn
//! - **Deferred Timers**: Cancellable, clock-driven callbacks (typeahead reset)
//!
//! # Example
//!
//! ```rust
//! use sift_core::batch::{MutationBatch, Mutation};
//! use slotmap::{DefaultKey, SlotMap};
//!
//! let mut nodes: SlotMap<DefaultKey, &str> = SlotMap::new();
//! let a = nodes.insert("a");
//! let b = nodes.insert("b");
//!
//! let mut batch = MutationBatch::new();
//! batch.record(Mutation::Inserted(a));
//! batch.record(Mutation::Inserted(b));
//!
//! // Two insertions, one pending record set
//! let record = batch.take().unwrap();
//! assert_eq!(record.inserted().count(), 2);
//! assert!(batch.take().is_none());
//! ```

pub mod batch;
pub mod error;
pub mod events;
pub mod notify;
pub mod timer;

pub use batch::{BatchRecord, Mutation, MutationBatch};
pub use error::{Result, SiftError};
pub use events::{Event, EventData, EventResponse, KeyCode, Modifiers};
pub use notify::Outbox;
pub use timer::DeferredTimer;
