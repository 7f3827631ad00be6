//! Helper functions
//!
//! Text sanitizing, date parsing and filename derivation shared by the
//! content pipeline.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
