use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::order_items::InsertOrderItemEntity;
use crate::domain::entities::orders::InsertOrderEntity;
use crate::domain::entities::tickets::InsertTicketEntity;
use crate::domain::repositories::events::EventRepository;
use crate::domain::repositories::orders::{CreateOrderOutcome, OrderRepository};
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::ticket_statuses::TicketStatus;
use crate::domain::value_objects::orders::{
    CreateOrderModel, CreatedOrderDto, OrderDto, OrderItemDto, OrderWithItemsDto,
    generate_order_number,
};
use crate::domain::value_objects::pagination::{PageQuery, Pagination};
use crate::domain::value_objects::tickets::{
    IssuedTicketDto, TicketDto, build_qr_payload, generate_ticket_number,
};

const DEFAULT_ORDERS_PER_PAGE: i64 = 20;
const MAX_ORDERS_PER_PAGE: i64 = 20;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),
    #[error("Event {0} not found")]
    EventNotFound(Uuid),
    #[error("Ticket type {0} not found")]
    TicketTypeNotFound(Uuid),
    #[error("Not enough tickets available")]
    InsufficientInventory {
        ticket_type_id: Uuid,
        requested: i32,
        available: i32,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl OrderError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            OrderError::Validation(_) => StatusCode::BAD_REQUEST,
            OrderError::EventNotFound(_) | OrderError::TicketTypeNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            OrderError::InsufficientInventory { .. } => StatusCode::CONFLICT,
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type OrderResult<T> = std::result::Result<T, OrderError>;

pub struct OrderUseCase<O, E, U>
where
    O: OrderRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    order_repo: Arc<O>,
    event_repo: Arc<E>,
    user_repo: Arc<U>,
}

impl<O, E, U> OrderUseCase<O, E, U>
where
    O: OrderRepository + Send + Sync + 'static,
    E: EventRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(order_repo: Arc<O>, event_repo: Arc<E>, user_repo: Arc<U>) -> Self {
        Self {
            order_repo,
            event_repo,
            user_repo,
        }
    }

    /// Turns a cart into a persisted order, its line items, and one ticket
    /// per purchased seat. Either everything commits or nothing does.
    pub async fn create_order(
        &self,
        user_id: Uuid,
        create_order_model: CreateOrderModel,
    ) -> OrderResult<CreatedOrderDto> {
        if create_order_model.items.is_empty() {
            return Err(OrderError::Validation("Order has no items".to_string()));
        }
        if create_order_model.payment_method.trim().is_empty() {
            return Err(OrderError::Validation(
                "paymentMethod is required".to_string(),
            ));
        }
        for item in &create_order_model.items {
            if item.quantity <= 0 {
                return Err(OrderError::Validation(
                    "quantity must be a positive number".to_string(),
                ));
            }
        }

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "orders: failed to load buyer");
                OrderError::Internal(err)
            })?
            .ok_or_else(|| OrderError::Internal(anyhow!("authenticated user has no row")))?;

        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let mut total_amount_minor: i64 = 0;
        let mut items = Vec::with_capacity(create_order_model.items.len());
        let mut tickets = Vec::new();

        // Line items fail fast on the first unknown reference; nothing is
        // written until every line has been priced. Unit prices come from
        // the ticket-type row, never from the client.
        for line in &create_order_model.items {
            let event = self
                .event_repo
                .find_active_by_id(line.event_id)
                .await
                .map_err(|err| {
                    error!(%user_id, db_error = ?err, "orders: failed to load event");
                    OrderError::Internal(err)
                })?
                .ok_or_else(|| {
                    warn!(%user_id, event_id = %line.event_id, "orders: unknown event in cart");
                    OrderError::EventNotFound(line.event_id)
                })?;

            let ticket_type = self
                .event_repo
                .find_ticket_type(line.ticket_type_id)
                .await
                .map_err(|err| {
                    error!(%user_id, db_error = ?err, "orders: failed to load ticket type");
                    OrderError::Internal(err)
                })?
                .filter(|ticket_type| ticket_type.event_id == event.id)
                .ok_or_else(|| {
                    warn!(
                        %user_id,
                        ticket_type_id = %line.ticket_type_id,
                        "orders: unknown ticket type in cart"
                    );
                    OrderError::TicketTypeNotFound(line.ticket_type_id)
                })?;

            let unit_price_minor = ticket_type.price_minor;
            let total_price_minor = unit_price_minor * line.quantity;
            total_amount_minor += i64::from(total_price_minor);

            items.push(InsertOrderItemEntity {
                id: Uuid::new_v4(),
                order_id,
                event_id: event.id,
                ticket_type_id: ticket_type.id,
                quantity: line.quantity,
                unit_price_minor,
                total_price_minor,
                created_at: now,
            });

            for _ in 0..line.quantity {
                let ticket_id = Uuid::new_v4();
                let ticket_number = generate_ticket_number();
                let qr_code = build_qr_payload(ticket_id, event.id, &ticket_number);
                tickets.push(InsertTicketEntity {
                    id: ticket_id,
                    order_id,
                    event_id: event.id,
                    ticket_type_id: ticket_type.id,
                    ticket_number,
                    qr_code,
                    event_name: event.title.clone(),
                    event_location: event.venue.clone(),
                    event_date: event.event_date,
                    holder_name: Some(user.full_name()),
                    holder_email: Some(user.email.clone()),
                    seat_number: None,
                    section: None,
                    status: TicketStatus::Valid.to_string(),
                    created_at: now,
                });
            }
        }

        let order = InsertOrderEntity {
            id: order_id,
            user_id,
            order_number: generate_order_number(),
            total_amount_minor,
            status: OrderStatus::Pending.to_string(),
            payment_method: Some(create_order_model.payment_method.clone()),
            payment_ref: None,
            billing_address: create_order_model.billing_address.clone(),
            created_at: now,
            updated_at: now,
        };

        let ticket_count = tickets.len();
        let outcome = self
            .order_repo
            .create_order(order, items, tickets)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "orders: create order transaction failed");
                OrderError::Internal(err)
            })?;

        match outcome {
            CreateOrderOutcome::Created { order, tickets } => {
                info!(
                    %user_id,
                    order_id = %order.id,
                    order_number = %order.order_number,
                    ticket_count,
                    "orders: order created"
                );
                Ok(CreatedOrderDto {
                    order: OrderDto::from(order),
                    tickets: tickets
                        .into_iter()
                        .map(|ticket| IssuedTicketDto {
                            id: ticket.id,
                            ticket_number: ticket.ticket_number,
                            qr_code: ticket.qr_code,
                            event_name: ticket.event_name,
                            event_date: ticket.event_date,
                            event_location: ticket.event_location,
                        })
                        .collect(),
                })
            }
            CreateOrderOutcome::InsufficientInventory {
                ticket_type_id,
                requested,
                available,
            } => {
                warn!(
                    %user_id,
                    %ticket_type_id,
                    requested,
                    available,
                    "orders: insufficient inventory"
                );
                Err(OrderError::InsufficientInventory {
                    ticket_type_id,
                    requested,
                    available,
                })
            }
        }
    }

    pub async fn list_orders(
        &self,
        user_id: Uuid,
        page_query: PageQuery,
    ) -> OrderResult<(Vec<OrderWithItemsDto>, Pagination)> {
        let (page, per_page) = page_query.resolve(DEFAULT_ORDERS_PER_PAGE, MAX_ORDERS_PER_PAGE);
        let offset = Pagination::offset(page, per_page);

        let (orders, total) = self
            .order_repo
            .list_by_user(user_id, per_page, offset)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "orders: failed to list orders");
                OrderError::Internal(err)
            })?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self
                .order_repo
                .items_with_event_titles(order.id)
                .await
                .map_err(|err| {
                    error!(%user_id, order_id = %order.id, db_error = ?err, "orders: failed to load order items");
                    OrderError::Internal(err)
                })?;

            result.push(OrderWithItemsDto {
                order: OrderDto::from(order),
                items: items
                    .into_iter()
                    .map(|(item, event_name)| OrderItemDto {
                        event_id: item.event_id,
                        event_name,
                        ticket_type_id: item.ticket_type_id,
                        quantity: item.quantity,
                        unit_price_minor: item.unit_price_minor,
                        total_price_minor: item.total_price_minor,
                    })
                    .collect(),
            });
        }

        Ok((result, Pagination::new(page, per_page, total)))
    }

    pub async fn list_tickets(&self, user_id: Uuid) -> OrderResult<Vec<TicketDto>> {
        let tickets = self
            .order_repo
            .tickets_by_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "orders: failed to list tickets");
                OrderError::Internal(err)
            })?;

        Ok(tickets.into_iter().map(TicketDto::from).collect())
    }
}

#[cfg(test)]
mod tests;
