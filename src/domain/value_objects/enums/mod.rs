pub mod order_statuses;
pub mod payment_method_types;
pub mod ticket_statuses;
pub mod user_roles;
pub mod validation_methods;
