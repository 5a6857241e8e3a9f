pub mod diagnostic;
pub mod lookup;

pub use diagnostic::*;
pub use lookup::*;
