pub mod attempt;
pub mod trace;

pub use attempt::*;
pub use trace::*;
