pub mod binding;
pub mod config;
pub mod error;
pub mod parameter;
pub mod request;

pub use binding::*;
pub use config::*;
pub use error::*;
pub use parameter::*;
pub use request::*;
