//! usersearch Core Library
//!
//! Wire contract shared by the search client and the reference server:
//! - Request, response and error-body types
//! - Sort direction encoding and reason-code sentinels
//! - Client and server configuration

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::{ClientConfig, ServerConfig};
pub use models::*;
