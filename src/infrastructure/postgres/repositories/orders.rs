use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use diesel::{Connection, PgConnection, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::domain::entities::order_items::{InsertOrderItemEntity, OrderItemEntity};
use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::entities::tickets::{InsertTicketEntity, TicketEntity};
use crate::domain::repositories::orders::{CreateOrderOutcome, OrderRepository};
use crate::domain::value_objects::orders::generate_order_number;
use crate::domain::value_objects::tickets::{build_qr_payload, generate_ticket_number};
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{events, order_items, orders, ticket_types, tickets},
};

const NUMBER_GENERATION_ATTEMPTS: u32 = 5;

/// Errors private to the create-order transaction. `Insufficient` rolls the
/// transaction back like any other error and is translated into an outcome
/// by the caller.
enum CreateOrderTxError {
    Insufficient {
        ticket_type_id: Uuid,
        requested: i32,
        available: i32,
    },
    Db(diesel::result::Error),
    Other(anyhow::Error),
}

impl From<diesel::result::Error> for CreateOrderTxError {
    fn from(err: diesel::result::Error) -> Self {
        CreateOrderTxError::Db(err)
    }
}

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    /// Locks the inventory rows for one line and decrements them, or bails
    /// out when the requested quantity is no longer there.
    fn reserve_inventory(
        tx: &mut PgConnection,
        item: &InsertOrderItemEntity,
    ) -> Result<(), CreateOrderTxError> {
        let (quantity_available, quantity_sold) = ticket_types::table
            .find(item.ticket_type_id)
            .select((ticket_types::quantity_available, ticket_types::quantity_sold))
            .for_update()
            .first::<(i32, i32)>(tx)?;

        if quantity_available < item.quantity {
            return Err(CreateOrderTxError::Insufficient {
                ticket_type_id: item.ticket_type_id,
                requested: item.quantity,
                available: quantity_available,
            });
        }

        update(ticket_types::table.find(item.ticket_type_id))
            .set((
                ticket_types::quantity_available.eq(quantity_available - item.quantity),
                ticket_types::quantity_sold.eq(quantity_sold + item.quantity),
            ))
            .execute(tx)?;

        let available_tickets = events::table
            .find(item.event_id)
            .select(events::available_tickets)
            .for_update()
            .first::<i32>(tx)?;

        if available_tickets < item.quantity {
            return Err(CreateOrderTxError::Insufficient {
                ticket_type_id: item.ticket_type_id,
                requested: item.quantity,
                available: available_tickets,
            });
        }

        update(events::table.find(item.event_id))
            .set(events::available_tickets.eq(available_tickets - item.quantity))
            .execute(tx)?;

        Ok(())
    }

    fn order_number_exists(tx: &mut PgConnection, number: &str) -> Result<bool, diesel::result::Error> {
        diesel::select(diesel::dsl::exists(
            orders::table.filter(orders::order_number.eq(number)),
        ))
        .get_result::<bool>(tx)
    }

    fn ticket_number_exists(tx: &mut PgConnection, number: &str) -> Result<bool, diesel::result::Error> {
        diesel::select(diesel::dsl::exists(
            tickets::table.filter(tickets::ticket_number.eq(number)),
        ))
        .get_result::<bool>(tx)
    }
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn create_order(
        &self,
        insert_order_entity: InsertOrderEntity,
        items: Vec<InsertOrderItemEntity>,
        tickets_to_issue: Vec<InsertTicketEntity>,
    ) -> Result<CreateOrderOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<CreateOrderOutcome, CreateOrderTxError, _>(|tx| {
            for item in &items {
                Self::reserve_inventory(tx, item)?;
            }

            // The random six-digit suffix can collide; regenerate until the
            // number is free instead of trusting luck.
            let mut order = insert_order_entity;
            let mut attempts = 0;
            while Self::order_number_exists(tx, &order.order_number)? {
                attempts += 1;
                if attempts >= NUMBER_GENERATION_ATTEMPTS {
                    return Err(CreateOrderTxError::Other(anyhow!(
                        "could not generate a unique order number"
                    )));
                }
                order.order_number = generate_order_number();
            }

            let mut issued = tickets_to_issue;
            let mut batch_numbers: HashSet<String> = HashSet::new();
            for ticket in issued.iter_mut() {
                let mut attempts = 0;
                while batch_numbers.contains(&ticket.ticket_number)
                    || Self::ticket_number_exists(tx, &ticket.ticket_number)?
                {
                    attempts += 1;
                    if attempts >= NUMBER_GENERATION_ATTEMPTS {
                        return Err(CreateOrderTxError::Other(anyhow!(
                            "could not generate a unique ticket number"
                        )));
                    }
                    ticket.ticket_number = generate_ticket_number();
                    ticket.qr_code =
                        build_qr_payload(ticket.id, ticket.event_id, &ticket.ticket_number);
                }
                batch_numbers.insert(ticket.ticket_number.clone());
            }

            let order_row = insert_into(orders::table)
                .values(&order)
                .returning(OrderEntity::as_returning())
                .get_result::<OrderEntity>(tx)?;

            insert_into(order_items::table).values(&items).execute(tx)?;

            let ticket_rows = insert_into(tickets::table)
                .values(&issued)
                .returning(TicketEntity::as_returning())
                .get_results::<TicketEntity>(tx)?;

            Ok(CreateOrderOutcome::Created {
                order: order_row,
                tickets: ticket_rows,
            })
        });

        match result {
            Ok(outcome) => Ok(outcome),
            Err(CreateOrderTxError::Insufficient {
                ticket_type_id,
                requested,
                available,
            }) => Ok(CreateOrderOutcome::InsufficientInventory {
                ticket_type_id,
                requested,
                available,
            }),
            Err(CreateOrderTxError::Db(err)) => Err(err.into()),
            Err(CreateOrderTxError::Other(err)) => Err(err),
        }
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<OrderEntity>, i64)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = orders::table
            .filter(orders::user_id.eq(user_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        let results = orders::table
            .filter(orders::user_id.eq(user_id))
            .order(orders::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        Ok((results, total))
    }

    async fn items_with_event_titles(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<(OrderItemEntity, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = order_items::table
            .inner_join(events::table)
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::created_at.asc())
            .select((OrderItemEntity::as_select(), events::title))
            .load::<(OrderItemEntity, String)>(&mut conn)?;

        Ok(results)
    }

    async fn tickets_by_user(&self, user_id: Uuid) -> Result<Vec<TicketEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = tickets::table
            .inner_join(orders::table)
            .filter(orders::user_id.eq(user_id))
            .order(tickets::created_at.desc())
            .select(TicketEntity::as_select())
            .load::<TicketEntity>(&mut conn)?;

        Ok(results)
    }
}
