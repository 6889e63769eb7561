pub mod auth;
pub mod enums;
pub mod events;
pub mod orders;
pub mod pagination;
pub mod payment_methods;
pub mod reporting;
pub mod tickets;
pub mod users;
