//! Content module - CMS entries, feeds, reference resolution and front-matter

mod entry;
mod frontmatter;
mod post;
mod resolve;
pub mod store;

pub use entry::{is_null_marker, reference_uid, Entry};
pub use frontmatter::{select_featured, Document, FrontMatterAssembler};
pub use post::{most_recent, ProcessedPost};
pub use resolve::ReferenceResolver;
pub use store::{ContentStore, Feed};
