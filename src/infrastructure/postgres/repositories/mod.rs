pub mod events;
pub mod orders;
pub mod payment_methods;
pub mod reporting;
pub mod sessions;
pub mod tickets;
pub mod users;
