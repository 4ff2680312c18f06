//! curaios-common — Shared types, errors, and confidence constants used across all CurAIos crates.

pub mod error;
pub mod entities;
pub mod confidence;
pub mod text;

// Re-export commonly used types
pub use entities::{AuthorityId, EntityKind, ResolvedEntity, Source};
pub use error::{CuraiosError, Result};
pub use text::capitalize;
