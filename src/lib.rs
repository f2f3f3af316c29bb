pub mod application;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod storage;

pub use application::TrackerService;
pub use domain::*;
pub use storage::Repository;
