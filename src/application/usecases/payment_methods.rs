use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::repositories::payment_methods::PaymentMethodRepository;
use crate::domain::value_objects::enums::payment_method_types::PaymentMethodType;
use crate::domain::value_objects::payment_methods::{
    CreatePaymentMethodModel, PaymentMethodDto, UpdatePaymentMethodModel,
};

#[derive(Debug, Error)]
pub enum PaymentMethodError {
    #[error("{0}")]
    Validation(String),
    #[error("Payment method not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentMethodError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentMethodError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentMethodError::NotFound => StatusCode::NOT_FOUND,
            PaymentMethodError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PaymentMethodResult<T> = std::result::Result<T, PaymentMethodError>;

pub struct PaymentMethodUseCase<P>
where
    P: PaymentMethodRepository + Send + Sync + 'static,
{
    payment_method_repo: Arc<P>,
}

impl<P> PaymentMethodUseCase<P>
where
    P: PaymentMethodRepository + Send + Sync + 'static,
{
    pub fn new(payment_method_repo: Arc<P>) -> Self {
        Self {
            payment_method_repo,
        }
    }

    pub async fn list(&self, user_id: Uuid) -> PaymentMethodResult<Vec<PaymentMethodDto>> {
        let methods = self
            .payment_method_repo
            .list_active_by_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "payment_methods: failed to list");
                PaymentMethodError::Internal(err)
            })?;

        Ok(methods.into_iter().map(PaymentMethodDto::from).collect())
    }

    pub async fn add(
        &self,
        user_id: Uuid,
        create_payment_method_model: CreatePaymentMethodModel,
    ) -> PaymentMethodResult<PaymentMethodDto> {
        let method_type = PaymentMethodType::from_str(&create_payment_method_model.method_type)
            .ok_or_else(|| {
                PaymentMethodError::Validation(format!(
                    "Unknown payment method type: {}",
                    create_payment_method_model.method_type
                ))
            })?;

        if let Some(month) = create_payment_method_model.expiry_month {
            if !(1..=12).contains(&month) {
                return Err(PaymentMethodError::Validation(
                    "expiryMonth must be between 1 and 12".to_string(),
                ));
            }
        }

        let method = self
            .payment_method_repo
            .insert(create_payment_method_model.to_entity(user_id, method_type))
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "payment_methods: failed to insert");
                PaymentMethodError::Internal(err)
            })?;

        info!(%user_id, payment_method_id = %method.id, "payment_methods: method added");
        Ok(PaymentMethodDto::from(method))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        payment_method_id: Uuid,
        update_payment_method_model: UpdatePaymentMethodModel,
    ) -> PaymentMethodResult<()> {
        if !update_payment_method_model.is_default {
            // The only mutable attribute is the default flag.
            return Ok(());
        }

        let updated = self
            .payment_method_repo
            .set_default(user_id, payment_method_id)
            .await
            .map_err(|err| {
                error!(%user_id, %payment_method_id, db_error = ?err, "payment_methods: failed to set default");
                PaymentMethodError::Internal(err)
            })?;
        if !updated {
            return Err(PaymentMethodError::NotFound);
        }

        info!(%user_id, %payment_method_id, "payment_methods: default updated");
        Ok(())
    }

    pub async fn delete(
        &self,
        user_id: Uuid,
        payment_method_id: Uuid,
    ) -> PaymentMethodResult<()> {
        let deleted = self
            .payment_method_repo
            .soft_delete(user_id, payment_method_id)
            .await
            .map_err(|err| {
                error!(%user_id, %payment_method_id, db_error = ?err, "payment_methods: failed to delete");
                PaymentMethodError::Internal(err)
            })?;
        if !deleted {
            return Err(PaymentMethodError::NotFound);
        }

        info!(%user_id, %payment_method_id, "payment_methods: method deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
