//! Shared utilities

pub mod atomic;
pub mod concurrent;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod fs;

pub use atomic::Atomic;
pub use concurrent::concurrent_map;
pub use config::UserConfig;
pub use context::GlobalContext;
pub use diagnostic::Diagnostic;
