//! Remote API features, one module per resource. Each feature keeps its wire
//! types next to the client functions that use them.

pub mod applications;
pub mod bookings;
pub mod idp;
