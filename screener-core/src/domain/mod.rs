//! Domain types — the typed record view and the decision attached to it.

mod decision;
mod record;

pub use decision::{Action, Decision};
pub use record::Record;
