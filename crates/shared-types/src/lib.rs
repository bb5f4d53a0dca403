pub mod access;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod role;
pub mod site;

pub use access::*;
pub use config::*;
pub use error::*;
pub use models::*;
pub use navigation::*;
pub use role::*;
pub use site::*;
