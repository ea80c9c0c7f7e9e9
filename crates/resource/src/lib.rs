//! Resource providers for the tagpress render pipeline.
//!
//! - [`FilesystemResourceProvider`]: loads font files relative to a base directory
//! - [`InMemoryResourceProvider`]: re-exported from `tagpress-traits`

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use tagpress_traits::InMemoryResourceProvider;
