//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast → stop accepting → drain in-flight requests → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - One broadcast channel; every long-running task subscribes

pub mod shutdown;

pub use shutdown::Shutdown;
