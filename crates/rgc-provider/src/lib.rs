//! Content provider abstraction for rgc.
//!
//! This crate provides a [`ContentProvider`] trait that serves directory
//! listings and file text for a project tree, plus two implementations:
//! [`LocalProvider`] (a checkout on disk) and `MemoryProvider` (pre-loaded
//! files, behind the `memory` feature). The GitHub provider lives in
//! `rgc-github`.
//!
//! # Example
//!
//! ```no_run
//! use rgc_provider::{ContentProvider, LocalProvider};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = LocalProvider::new(".")?;
//! for entry in provider.list_directory("").await? {
//!     println!("{} ({} bytes)", entry.path, entry.size_bytes);
//! }
//! # Ok(())
//! # }
//! ```

mod provider;
pub use provider::{join_path, ContentProvider, DirEntry, ProviderError, ProviderErrorKind};

#[cfg(feature = "native")]
pub mod native;
#[cfg(feature = "native")]
pub use native::LocalProvider;

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "memory")]
pub use memory::MemoryProvider;
