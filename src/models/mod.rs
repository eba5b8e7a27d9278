//! Domain models for TaskMaster.
//!
//! There is a single entity: [`Task`]. Its `status` and `priority` fields
//! are closed enums carrying the domain rank orders consumed by the sort
//! policy in [`crate::query`] and the display labels consumed by the
//! terminal views in [`crate::ui`].

mod task;

pub use task::*;
