pub mod auth;
pub mod events;
pub mod orders;
pub mod payment_methods;
pub mod reporting;
pub mod tickets;
