//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → path.rs (normalize path, build `<METHOD><path>` candidate)
//!     → router.rs (scan routes in registration order)
//!     → matcher.rs (Ant pattern match per route)
//!     → Return: matched Route or None
//!
//! Route Compilation (at startup / reload):
//!     RouteConfig[]
//!     → normalize path, uppercase method
//!     → compile Pattern(method + path)
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod path;
pub mod router;

pub use matcher::{Matcher, PatternMatcher};
pub use router::{Route, RouteResponse, Router};
