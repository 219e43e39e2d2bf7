pub mod alert;
pub mod config;
pub mod error;

pub use alert::*;
pub use config::Profile;
pub use error::*;
