use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::voucher;

use super::domain::{NewVoucher, VoucherChanges};
use super::repository::{EventRepository, VoucherRepository};
use crate::errors::ServiceError;

/// Vouchers hang off an event; every call first checks the caller owns that event.
pub struct VoucherService<V: VoucherRepository, E: EventRepository> {
    vouchers: Arc<V>,
    events: Arc<E>,
}

impl<V: VoucherRepository, E: EventRepository> VoucherService<V, E> {
    pub fn new(vouchers: Arc<V>, events: Arc<E>) -> Self { Self { vouchers, events } }

    async fn ensure_event(&self, owner: Uuid, event_id: Uuid) -> Result<(), ServiceError> {
        match self.events.find(owner, event_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("event")),
        }
    }

    pub async fn list(&self, owner: Uuid, event_id: Uuid) -> Result<Vec<voucher::Model>, ServiceError> {
        self.ensure_event(owner, event_id).await?;
        self.vouchers.list_by_event(event_id).await
    }

    pub async fn get(&self, owner: Uuid, event_id: Uuid, id: Uuid) -> Result<voucher::Model, ServiceError> {
        self.ensure_event(owner, event_id).await?;
        self.vouchers
            .find(event_id, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("voucher"))
    }

    #[instrument(skip(self, input), fields(event_id = %event_id, code = %input.code))]
    pub async fn create(&self, owner: Uuid, event_id: Uuid, input: NewVoucher) -> Result<voucher::Model, ServiceError> {
        self.ensure_event(owner, event_id).await?;
        let created = self.vouchers.insert(event_id, input).await?;
        info!(voucher_id = %created.id, "voucher_created");
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(event_id = %event_id, voucher_id = %id))]
    pub async fn update(
        &self,
        owner: Uuid,
        event_id: Uuid,
        id: Uuid,
        changes: VoucherChanges,
    ) -> Result<voucher::Model, ServiceError> {
        self.ensure_event(owner, event_id).await?;
        if self.vouchers.update(event_id, id, changes).await? == 0 {
            return Err(ServiceError::not_found("voucher"));
        }
        self.get(owner, event_id, id).await
    }

    #[instrument(skip(self), fields(event_id = %event_id, voucher_id = %id))]
    pub async fn delete(&self, owner: Uuid, event_id: Uuid, id: Uuid) -> Result<(), ServiceError> {
        self.ensure_event(owner, event_id).await?;
        if self.vouchers.delete(event_id, id).await? == 0 {
            return Err(ServiceError::not_found("voucher"));
        }
        info!("voucher_deleted");
        Ok(())
    }
}
