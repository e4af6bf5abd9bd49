pub mod client;

pub use self::client::{booking_path, update_booking};
