//! Infrastructure layer - External I/O and persistence

pub mod backend;
pub mod config;
pub mod fs_backend;
pub mod mem_backend;
pub mod repository;

pub use backend::StorageBackend;
pub use config::Config;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use repository::{DiaryRepository, FileSystemRepository};
