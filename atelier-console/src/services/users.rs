use async_trait::async_trait;
use atelier_core::RequestError;
use atelier_core::api::{utils, v1};
use atelier_model::{ListParams, Paginated, User, UserId};
use std::sync::Arc;

use crate::api_client::ApiClient;

#[async_trait]
pub trait UserAdminService: Send + Sync {
    /// One server-filtered page of accounts.
    async fn list_users(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<User>, RequestError>;

    /// Suspend an account.
    async fn ban_user(&self, id: UserId) -> Result<(), RequestError>;

    async fn activate_user(&self, id: UserId) -> Result<(), RequestError>;
}

#[derive(Debug, Clone)]
pub struct UserAdminApiAdapter {
    client: Arc<ApiClient>,
}

impl UserAdminApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserAdminService for UserAdminApiAdapter {
    async fn list_users(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<User>, RequestError> {
        self.client
            .get(v1::users::COLLECTION, &params.to_query_pairs())
            .await
    }

    async fn ban_user(&self, id: UserId) -> Result<(), RequestError> {
        let path = utils::replace_param(v1::users::BAN, "{id}", id.to_string());
        self.client.post_no_content(&path, &serde_json::json!({})).await
    }

    async fn activate_user(&self, id: UserId) -> Result<(), RequestError> {
        let path =
            utils::replace_param(v1::users::ACTIVATE, "{id}", id.to_string());
        self.client.post_no_content(&path, &serde_json::json!({})).await
    }
}
