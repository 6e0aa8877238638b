//! Ant-style route matching and a static route server built on it.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pattern;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pattern::Pattern;
pub use routing::Router;
