pub mod notification;
pub mod payload;
pub mod signing;
pub mod token;
