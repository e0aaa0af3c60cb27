//! CLI command implementations

pub mod branches;
pub mod cache;
pub mod config;
pub mod install;

pub use branches::execute as branches;
pub use cache::execute as cache;
pub use config::execute as config;
pub use install::execute as install;
