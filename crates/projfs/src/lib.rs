//! ProjFS - an in-memory project tree mirroring a storage backend
//!
//! The tree keeps one node per backend entry, routes every mutation
//! through a preview/commit protocol, and reconciles external changes
//! by polling registered watchers.
//!
//! Set PROJFS_LOG to control logging:
//! - PROJFS_LOG=off (default) - silent
//! - PROJFS_LOG=info - basic operations
//! - PROJFS_LOG=debug - detailed diagnostics

// Error types
pub mod error;

// Logical path helpers
pub mod path;

// Storage backend trait
pub mod io;

// Local disk backend
pub mod local;

// In-memory backend for tests
pub mod memory;

// Preview/commit events, validators and observers
pub mod events;

// Arena nodes
pub mod node;

// Polling change watchers
pub mod watch;

// File providers and the node factory
pub mod factory;

// The tree itself
pub mod tree;

// Persisted project document
pub mod project;

#[cfg(test)]
mod tests;

// Re-export key types
pub use error::{Error, Result};
pub use events::{Observer, PreviewAction, PreviewEvent, TreeEvent, Validator, Verdict};
pub use factory::{FileProvider, NodeFactory, UnknownFilePolicy};
pub use io::Backend;
pub use local::LocalBackend;
pub use memory::MemoryBackend;
pub use node::{Node, NodeId, NodeKind};
pub use path::ROOT_PATH;
pub use project::{Project, ProjectDoc};
pub use tree::Tree;
