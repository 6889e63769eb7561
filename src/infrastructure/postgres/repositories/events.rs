use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::Pg;
use diesel::{Connection, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::events::{EventEntity, InsertEventEntity};
use crate::domain::entities::ticket_types::{InsertTicketTypeEntity, TicketTypeEntity};
use crate::domain::repositories::events::EventRepository;
use crate::domain::value_objects::events::EventFilter;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{events, order_items, ticket_types},
};

pub struct EventPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl EventPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    fn apply_filters(filter: &EventFilter) -> events::BoxedQuery<'static, Pg> {
        let mut query = events::table
            .filter(events::is_active.eq(true))
            .into_boxed();

        if let Some(category) = &filter.category {
            query = query.filter(events::category.ilike(format!("%{}%", category)));
        }
        if let Some(city) = &filter.city {
            query = query.filter(events::city.ilike(format!("%{}%", city)));
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                events::title
                    .ilike(pattern.clone())
                    .or(events::description.ilike(pattern.clone()))
                    .or(events::venue.ilike(pattern)),
            );
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(events::event_date.ge(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(events::event_date.le(date_to));
        }

        query
    }
}

#[async_trait]
impl EventRepository for EventPostgres {
    async fn create_with_default_ticket_type(
        &self,
        insert_event_entity: InsertEventEntity,
        default_ticket_type: InsertTicketTypeEntity,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<Uuid, diesel::result::Error, _>(|tx| {
            let event_id: Uuid = insert_into(events::table)
                .values(&insert_event_entity)
                .returning(events::id)
                .get_result::<Uuid>(tx)?;

            insert_into(ticket_types::table)
                .values(&default_ticket_type)
                .execute(tx)?;

            Ok(event_id)
        })?;

        Ok(result)
    }

    async fn list_public(
        &self,
        filter: EventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<EventEntity>, i64)> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let total = Self::apply_filters(&filter)
            .count()
            .get_result::<i64>(&mut conn)?;

        let results = Self::apply_filters(&filter)
            .order(events::event_date.asc())
            .limit(limit)
            .offset(offset)
            .load::<EventEntity>(&mut conn)?;

        Ok((results, total))
    }

    async fn find_active_by_id(&self, event_id: Uuid) -> Result<Option<EventEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = events::table
            .find(event_id)
            .filter(events::is_active.eq(true))
            .select(EventEntity::as_select())
            .first::<EventEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_owned_by(
        &self,
        event_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<EventEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = events::table
            .find(event_id)
            .filter(events::company_id.eq(company_id))
            .select(EventEntity::as_select())
            .first::<EventEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<EventEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = events::table
            .filter(events::company_id.eq(company_id))
            .order(events::created_at.desc())
            .select(EventEntity::as_select())
            .load::<EventEntity>(&mut conn)?;

        Ok(results)
    }

    async fn ticket_types_of(&self, event_id: Uuid) -> Result<Vec<TicketTypeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = ticket_types::table
            .filter(ticket_types::event_id.eq(event_id))
            .order(ticket_types::created_at.asc())
            .select(TicketTypeEntity::as_select())
            .load::<TicketTypeEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_ticket_type(&self, ticket_type_id: Uuid) -> Result<Option<TicketTypeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = ticket_types::table
            .find(ticket_type_id)
            .select(TicketTypeEntity::as_select())
            .first::<TicketTypeEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn add_ticket_type(
        &self,
        insert_ticket_type_entity: InsertTicketTypeEntity,
    ) -> Result<TicketTypeEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(ticket_types::table)
            .values(&insert_ticket_type_entity)
            .returning(TicketTypeEntity::as_returning())
            .get_result::<TicketTypeEntity>(&mut conn)?;

        Ok(result)
    }

    async fn toggle_active(&self, event_id: Uuid, company_id: Uuid) -> Result<Option<bool>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let current = events::table
            .find(event_id)
            .filter(events::company_id.eq(company_id))
            .select(events::is_active)
            .first::<bool>(&mut conn)
            .optional()?;

        let Some(is_active) = current else {
            return Ok(None);
        };

        update(events::table.find(event_id))
            .set((
                events::is_active.eq(!is_active),
                events::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(Some(!is_active))
    }

    async fn has_order_items(&self, event_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = diesel::select(diesel::dsl::exists(
            order_items::table.filter(order_items::event_id.eq(event_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(result)
    }

    async fn delete(&self, event_id: Uuid, company_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(
            events::table
                .find(event_id)
                .filter(events::company_id.eq(company_id)),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn distinct_categories(&self) -> Result<Vec<String>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = events::table
            .filter(events::is_active.eq(true))
            .filter(events::category.is_not_null())
            .select(events::category)
            .distinct()
            .load::<Option<String>>(&mut conn)?;

        let mut categories: Vec<String> = results.into_iter().flatten().collect();
        categories.sort();
        Ok(categories)
    }

    async fn distinct_cities(&self) -> Result<Vec<String>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = events::table
            .filter(events::is_active.eq(true))
            .filter(events::city.is_not_null())
            .select(events::city)
            .distinct()
            .load::<Option<String>>(&mut conn)?;

        let mut cities: Vec<String> = results.into_iter().flatten().collect();
        cities.sort();
        Ok(cities)
    }

    async fn featured(&self, limit: i64) -> Result<Vec<EventEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = events::table
            .filter(events::is_active.eq(true))
            .filter(events::event_date.gt(Utc::now()))
            .order(events::created_at.desc())
            .limit(limit)
            .select(EventEntity::as_select())
            .load::<EventEntity>(&mut conn)?;

        Ok(results)
    }
}
