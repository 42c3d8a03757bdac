//! Weekly operating-hours and time-slot-limit constraint engine.
//!
//! A caller (typically a settings UI) owns a tree of [`model::DaySetting`]
//! values and expresses every edit as "replace this day with the result of
//! an engine operation". Operations are pure over their inputs: each one
//! returns a fresh value graph, or leaves the input untouched with a stated
//! [`engine::Refusal`]. The only injected non-determinism is identifier
//! generation via [`id::IdSource`].
//!
//! Times are minute-precision with a 48-hour addressable range, so a window
//! can run past midnight (hour 24..=47 means "+1 day").

pub mod engine;
pub mod id;
pub mod limits;
pub mod model;

// Re-exports for the common call surface.
pub use engine::{LimitPatch, LimitSession, Outcome, Refusal, ValidationReport};
pub use id::{IdSource, UlidGen};
