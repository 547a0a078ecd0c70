//! Services implementing the allocation and lookup core.

pub mod allocator;
pub mod resolver;
pub mod url_validator;

pub use allocator::TokenAllocator;
pub use resolver::Resolver;
pub use url_validator::UrlValidator;
