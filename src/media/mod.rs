//! Media module for post representation and file resolution.

pub mod item;
pub mod parser;

pub use item::{compare_post_ids, FileRef, PostRecord};
pub use parser::{resolve_posts, LocationIndex, ResolveOptions};
