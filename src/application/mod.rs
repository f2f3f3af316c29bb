// Application layer - use cases and orchestration over the repository.

pub mod config;
pub mod credentials;
pub mod error;
pub mod service;

pub use config::*;
pub use credentials::*;
pub use error::*;
pub use service::*;
