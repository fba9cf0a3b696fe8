pub mod base;
#[cfg(test)]
pub mod fake;
pub mod http_backend;

// Re-export from base.rs so we can do "use crate::backend::*;"
pub use base::*;
pub use http_backend::HttpBackend;
