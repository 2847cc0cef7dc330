//! Reference data rows read from the backend database

pub mod bus;
pub mod route;

pub use bus::Bus;
pub use route::Route;
