pub mod cache;
pub mod fallback;
pub mod gist;
pub mod services;

pub use crate::domain::model::*;
pub use crate::domain::ports::{ContentFetcher, SourceProvider};
pub use crate::domain::section::Section;
pub use crate::utils::error::Result;
