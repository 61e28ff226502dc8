pub mod common;
pub mod generation;
pub mod parameters;

pub use common::*;
pub use generation::*;
pub use parameters::*;
