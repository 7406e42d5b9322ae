mod core;
mod domain;

pub use self::core::*;
pub use domain::*;
