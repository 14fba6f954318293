use async_trait::async_trait;
use atelier_core::RequestError;
use atelier_core::api::v1;
use atelier_model::CurrentUser;
use std::sync::Arc;

use crate::api_client::ApiClient;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// The staff member the session token belongs to.
    async fn current_user(&self) -> Result<CurrentUser, RequestError>;
}

#[derive(Debug, Clone)]
pub struct AuthApiAdapter {
    client: Arc<ApiClient>,
}

impl AuthApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for AuthApiAdapter {
    async fn current_user(&self) -> Result<CurrentUser, RequestError> {
        self.client.get(v1::auth::ME, &[]).await
    }
}
