// src/core/mod.rs

//! # Core
//!
//! The command runtime: registration, resolution, invocation and output capture.
//!
//! - **`console`**: owns the registry, writer, reader, hooks and output cache.
//! - **`registry`**: registered commands and the memoized name/alias resolver.
//! - **`invocation`**: binds a command into a callable action and defines the
//!   dependency-injection `Container` seam.
//! - **`command`**: the `Command` trait and the `Context` handlers run with.
//! - **`output_cache`**: outputs captured by silent runs, keyed by a hash of the call.
//! - **`theme`** and **`color`**: named styles and their ANSI rendering.
//! - **`errors`**: the crate-wide error type.

pub mod color;
pub mod command;
pub mod console;
pub mod errors;
pub mod invocation;
pub mod output_cache;
pub mod registry;
pub mod theme;
