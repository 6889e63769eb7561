pub mod events;
pub mod order_items;
pub mod orders;
pub mod payment_methods;
pub mod sessions;
pub mod ticket_types;
pub mod ticket_validations;
pub mod tickets;
pub mod users;
