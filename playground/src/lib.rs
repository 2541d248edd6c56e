//! UV Playground
//!
//! Local tutorial server: serves the playground page and exposes `POST /exec`
//! so the page can run a small allow-listed set of shell commands (mostly
//! `uv`) and show their output.
//!
//! The allow-list is a prefix check, not a sandbox. See [`guard`].
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use uv_playground::{serve, ServerConfig};
//!
//! serve(ServerConfig { port: 3000, ..Default::default() }).await?;
//! ```

pub mod guard;
pub mod handlers;
pub mod init;
pub mod params;
pub mod server;
pub mod types;

pub use guard::CommandGuard;
pub use params::ExecRequest;
pub use server::{create_router, serve, AppState, ServerConfig};
pub use types::{Config, ExecError, ExecResult};
