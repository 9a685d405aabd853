pub mod fixtures;
pub mod shared;

// Re-export commonly used items
pub use fixtures::*;
pub use shared::init_tracing;
