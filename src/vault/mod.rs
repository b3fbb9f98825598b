//! Vault module — the persisted name -> envelope mapping.
//!
//! This module provides:
//! - JSON encoding of the mapping (`format`)
//! - The filesystem capability and its real/in-memory impls (`fs`)
//! - The confirmation / hidden-input capability (`prompt`)
//! - `VaultStore` with put, get, delete and list (`store`)

pub mod format;
pub mod fs;
pub mod prompt;
pub mod store;

// Re-export the most commonly used items.
pub use format::SecretMap;
pub use fs::{MemoryFs, OsFs, VaultFs};
pub use prompt::{Answer, Prompter, ScriptedPrompter};
pub use store::{validate_secret_name, Outcome, VaultStore};
