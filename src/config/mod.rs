//! Configuration module

mod site;

pub use site::EntryPolicy;
pub use site::ExcerptConfig;
pub use site::ExcerptStrategy;
pub use site::ReferencePolicy;
pub use site::SiteConfig;
