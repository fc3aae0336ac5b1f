//! Task model and view derivation for tally.
//!
//! Everything in this crate is pure: no filesystem access, no wall-clock reads
//! outside of [`clock::SystemClock`].

pub mod clock;
pub mod draft;
pub mod error;
pub mod task;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use draft::Draft;
pub use error::CoreError;
pub use task::{Priority, Task, TaskId};
pub use view::{derive_view, FilterMode, SortMode, Stats, View, ViewParams};
