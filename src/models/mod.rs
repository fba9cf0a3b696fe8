pub mod dashboard;
pub mod user;

// Re-export so we can do "use crate::models::*;"
pub use dashboard::*;
pub use user::*;
