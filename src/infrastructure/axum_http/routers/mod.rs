pub mod auth;
pub mod company;
pub mod events;
pub mod tickets;
pub mod users;
