mod conflict;
mod error;
mod mutations;
mod queries;
mod session;

pub use conflict::first_overlap;
pub use error::{Outcome, Refusal, ValidationReport};
pub use mutations::{
    clear_all_day, copy_week, generate_window, remove_window, set_all_day, set_open,
};
pub use queries::{will_consolidate, window_warnings};
pub use session::{LimitPatch, LimitSession};
