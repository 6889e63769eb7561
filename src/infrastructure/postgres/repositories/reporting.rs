use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::sum;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::order_items::OrderItemEntity;
use crate::domain::entities::orders::OrderEntity;
use crate::domain::entities::tickets::TicketEntity;
use crate::domain::entities::users::UserEntity;
use crate::domain::repositories::reporting::{
    AnalyticsTotals, PeriodTotals, ReportingRepository,
};
use crate::domain::value_objects::reporting::{
    AttendeeDto, CustomerDto, CustomerOrderDto, DashboardDto, RecentEventDto, TopEventDto,
};
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{events, order_items, orders, ticket_types, tickets, users},
};

const RECENT_EVENTS_LIMIT: i64 = 5;

pub struct ReportingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ReportingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ReportingRepository for ReportingPostgres {
    async fn dashboard(&self, company_id: Uuid) -> Result<DashboardDto> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total_events = events::table
            .filter(events::company_id.eq(company_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        let active_events = events::table
            .filter(events::company_id.eq(company_id))
            .filter(events::is_active.eq(true))
            .count()
            .get_result::<i64>(&mut conn)?;

        let total_revenue_minor = order_items::table
            .inner_join(events::table)
            .filter(events::company_id.eq(company_id))
            .select(sum(order_items::total_price_minor))
            .first::<Option<i64>>(&mut conn)?
            .unwrap_or(0);

        let recent = events::table
            .filter(events::company_id.eq(company_id))
            .order(events::created_at.desc())
            .limit(RECENT_EVENTS_LIMIT)
            .select((
                events::id,
                events::title,
                events::event_date,
                events::is_active,
                events::total_tickets,
            ))
            .load::<(Uuid, String, DateTime<Utc>, bool, i32)>(&mut conn)?;

        let mut recent_events = Vec::with_capacity(recent.len());
        for (id, title, event_date, is_active, total_tickets) in recent {
            let tickets_sold = ticket_types::table
                .filter(ticket_types::event_id.eq(id))
                .select(sum(ticket_types::quantity_sold))
                .first::<Option<i64>>(&mut conn)?
                .unwrap_or(0);

            recent_events.push(RecentEventDto {
                id,
                title,
                event_date,
                is_active,
                tickets_sold,
                total_tickets,
            });
        }

        Ok(DashboardDto {
            total_events,
            active_events,
            total_revenue_minor,
            recent_events,
        })
    }

    async fn analytics_totals(&self, company_id: Uuid) -> Result<AnalyticsTotals> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let (revenue_minor, tickets_sold) = order_items::table
            .inner_join(events::table)
            .filter(events::company_id.eq(company_id))
            .select((
                sum(order_items::total_price_minor),
                sum(order_items::quantity),
            ))
            .first::<(Option<i64>, Option<i64>)>(&mut conn)?;

        let total_events = events::table
            .filter(events::company_id.eq(company_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        let active_events = events::table
            .filter(events::company_id.eq(company_id))
            .filter(events::is_active.eq(true))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(AnalyticsTotals {
            revenue_minor: revenue_minor.unwrap_or(0),
            tickets_sold: tickets_sold.unwrap_or(0),
            total_events,
            active_events,
        })
    }

    async fn top_events_by_revenue(
        &self,
        company_id: Uuid,
        limit: i64,
    ) -> Result<Vec<TopEventDto>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = order_items::table
            .inner_join(events::table)
            .filter(events::company_id.eq(company_id))
            .group_by((events::id, events::title))
            .select((
                events::id,
                events::title,
                sum(order_items::total_price_minor),
                sum(order_items::quantity),
            ))
            .load::<(Uuid, String, Option<i64>, Option<i64>)>(&mut conn)?;

        let mut top: Vec<TopEventDto> = rows
            .into_iter()
            .map(|(event_id, event_name, revenue, quantity)| TopEventDto {
                event_id,
                event_name,
                revenue_minor: revenue.unwrap_or(0),
                tickets_sold: quantity.unwrap_or(0),
            })
            .collect();

        top.sort_by(|a, b| b.revenue_minor.cmp(&a.revenue_minor));
        top.truncate(limit as usize);
        Ok(top)
    }

    async fn period_totals(
        &self,
        company_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<PeriodTotals> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let (revenue_minor, tickets_sold) = order_items::table
            .inner_join(orders::table)
            .inner_join(events::table)
            .filter(events::company_id.eq(company_id))
            .filter(orders::created_at.ge(since))
            .select((
                sum(order_items::total_price_minor),
                sum(order_items::quantity),
            ))
            .first::<(Option<i64>, Option<i64>)>(&mut conn)?;

        Ok(PeriodTotals {
            revenue_minor: revenue_minor.unwrap_or(0),
            tickets_sold: tickets_sold.unwrap_or(0),
        })
    }

    async fn customers(
        &self,
        company_id: Uuid,
        event_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CustomerDto>, i64)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = order_items::table
            .inner_join(orders::table.inner_join(users::table))
            .inner_join(events::table)
            .filter(events::company_id.eq(company_id))
            .select((
                OrderItemEntity::as_select(),
                OrderEntity::as_select(),
                UserEntity::as_select(),
                events::title,
            ))
            .load::<(OrderItemEntity, OrderEntity, UserEntity, String)>(&mut conn)?;

        // Folded in memory: the per-customer aggregation (orders, spend,
        // last purchase) is awkward to express as one grouped query.
        let mut by_customer: HashMap<Uuid, (CustomerDto, std::collections::HashSet<Uuid>)> =
            HashMap::new();
        for (item, order, buyer, event_name) in rows {
            if let Some(event_id) = event_id {
                if item.event_id != event_id {
                    continue;
                }
            }

            let entry = by_customer.entry(buyer.id).or_insert_with(|| {
                (
                    CustomerDto {
                        id: buyer.id,
                        customer_name: buyer.full_name(),
                        email: buyer.email.clone(),
                        phone: buyer.phone.clone(),
                        total_orders: 0,
                        total_spent_minor: 0,
                        last_purchase: None,
                        orders: vec![],
                    },
                    std::collections::HashSet::new(),
                )
            });

            let (customer, order_ids) = entry;
            order_ids.insert(order.id);
            customer.total_orders = order_ids.len() as i64;
            customer.total_spent_minor += i64::from(item.total_price_minor);
            customer.last_purchase = Some(match customer.last_purchase {
                Some(current) if current > order.created_at => current,
                _ => order.created_at,
            });
            customer.orders.push(CustomerOrderDto {
                order_id: order.id,
                order_number: order.order_number.clone(),
                event_name,
                quantity: item.quantity,
                total_paid_minor: i64::from(item.total_price_minor),
                purchase_date: order.created_at,
            });
        }

        let mut customers: Vec<CustomerDto> = by_customer
            .into_values()
            .map(|(customer, _)| customer)
            .collect();
        customers.sort_by(|a, b| b.total_spent_minor.cmp(&a.total_spent_minor));

        let total = customers.len() as i64;
        let page: Vec<CustomerDto> = customers
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn attendees(
        &self,
        event_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<AttendeeDto>, i64)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = tickets::table
            .filter(tickets::event_id.eq(event_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        let rows = tickets::table
            .inner_join(orders::table.inner_join(users::table))
            .filter(tickets::event_id.eq(event_id))
            .order(tickets::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select((
                TicketEntity::as_select(),
                OrderEntity::as_select(),
                UserEntity::as_select(),
            ))
            .load::<(TicketEntity, OrderEntity, UserEntity)>(&mut conn)?;

        let attendees = rows
            .into_iter()
            .map(|(ticket, order, buyer)| AttendeeDto {
                ticket_id: ticket.id,
                ticket_number: ticket.ticket_number,
                customer_name: buyer.full_name(),
                customer_email: buyer.email,
                customer_phone: buyer.phone,
                holder_name: ticket.holder_name,
                seat_number: ticket.seat_number,
                section: ticket.section,
                status: ticket.status,
                purchase_date: order.created_at,
                used_at: ticket.used_at,
            })
            .collect();

        Ok((attendees, total))
    }
}
