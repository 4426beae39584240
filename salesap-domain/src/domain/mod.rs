pub mod deal;
pub mod error;
pub mod relation;

pub use deal::*;
pub use error::*;
pub use relation::*;
