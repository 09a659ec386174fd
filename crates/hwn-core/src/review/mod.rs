//! Review API payload handling: shape validation and status translation.

pub mod status;
pub mod types;
pub mod validate;

pub use status::translate;
pub use types::{Homework, ReviewSnapshot, Verdict};
pub use validate::validate;
