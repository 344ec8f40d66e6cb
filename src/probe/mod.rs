pub mod connect;
pub mod socket;

pub use connect::*;
pub use socket::*;
