pub mod binder;
pub mod extract;
pub mod provider;
pub mod target;

pub use binder::*;
pub use extract::*;
pub use provider::*;
pub use target::*;
