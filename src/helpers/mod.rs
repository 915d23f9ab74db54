//! Helper functions shared by route builders

mod text;
mod url;

pub use text::*;
pub use url::*;
