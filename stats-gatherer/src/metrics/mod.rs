pub mod collection_data;
pub mod summary;

// Re-export the main types for easy access
pub use collection_data::*;
pub use summary::*;
