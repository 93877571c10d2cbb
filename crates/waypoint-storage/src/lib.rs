//! Storage abstraction for the waypoint site generator.
//!
//! This crate provides a [`Storage`] trait for the narrow set of operations
//! the page writer needs: read a file to a string, write a file, create a
//! directory tree. Keeping the port this small enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (local filesystem today, object stores later)
//! - **Clean separation** between rendering logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `read_to_string()`, `write_file()` and
//!   `create_dir_all()` methods
//! - [`FsStorage`] implementation backed by the local filesystem
//! - [`MemStorage`] for testing (behind `mock` feature flag)
//!
//! Writes are async; reads are synchronous because the only reader is
//! startup-time template loading.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use waypoint_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new();
//! storage.create_dir_all(Path::new("build/android")).await?;
//! storage.write_file(Path::new("build/android.html"), page.as_bytes()).await?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mem;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mem::MemStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
