use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::enterprise;

use super::domain::{EnterpriseChanges, NewEnterprise};
use super::repository::EnterpriseRepository;
use crate::errors::ServiceError;

pub struct EnterpriseService<R: EnterpriseRepository> {
    repo: Arc<R>,
}

impl<R: EnterpriseRepository> EnterpriseService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get(&self, id: Uuid) -> Result<enterprise::Model, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("enterprise"))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewEnterprise) -> Result<enterprise::Model, ServiceError> {
        let created = self.repo.insert(input).await?;
        info!(enterprise_id = %created.id, "enterprise_created");
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(enterprise_id = %id))]
    pub async fn update(&self, id: Uuid, changes: EnterpriseChanges) -> Result<enterprise::Model, ServiceError> {
        if self.repo.update(id, changes).await? == 0 {
            return Err(ServiceError::not_found("enterprise"));
        }
        self.get(id).await
    }
}
