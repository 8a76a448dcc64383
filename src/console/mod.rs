//! Console entry point.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Console`] | One running session: connection plus navigation |
//! | [`ConsoleBuilder`] | Fluent startup builder |
//! | [`ConsoleOptions`] | Port, endpoint and request settings |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for console startup.
pub mod builder;

/// Core console implementation.
pub mod core;

/// Console options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ConsoleBuilder;
pub use core::Console;
pub use options::ConsoleOptions;
