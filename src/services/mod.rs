pub mod apns;
pub mod token;
pub mod transport;
