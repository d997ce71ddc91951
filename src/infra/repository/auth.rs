use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::domain::ports::repositories::AuthRepository;
use crate::infra::storage::settings::PreferenceStore;
use crate::shared::errors::Fault;

const PHONE_KEY: &str = "phone";

/// Remembers the phone number the user registered with.
pub struct AuthRepositoryImpl {
    store: Arc<PreferenceStore>,
}

impl AuthRepositoryImpl {
    pub fn new(store: Arc<PreferenceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    #[instrument(name = "login", skip_all)]
    async fn login(&self, phone: &str) -> Result<(), Fault> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(Fault::Fatal("Phone number must not be empty.".into()));
        }
        self.store.set(PHONE_KEY, phone.to_owned()).await?;
        info!("Phone number registered.");
        Ok(())
    }

    async fn registered_phone(&self) -> Result<Option<String>, Fault> {
        Ok(self.store.get(PHONE_KEY))
    }
}
