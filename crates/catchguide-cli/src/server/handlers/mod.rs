//! API request handlers.

mod identify;
mod status;
mod tip;

pub use identify::*;
pub use status::*;
pub use tip::*;
