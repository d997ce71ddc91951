use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::StreamExt;
use opendal::Operator;
use tokio::sync::{watch, Mutex};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, instrument};

use super::table::{read_document, write_document};
use crate::domain::models::AppLanguage;
use crate::domain::ports::repositories::{AppSettingsDataSource, FaultStream};
use crate::shared::errors::Fault;

pub const PREFERENCES_FILE: &str = "settings/preferences.json";

type Preferences = BTreeMap<String, String>;

/// String-keyed preferences persisted as one JSON object.
pub struct PreferenceStore {
    op: Operator,
    values: watch::Sender<Preferences>,
    write_lock: Mutex<()>,
}

impl PreferenceStore {
    pub async fn open(op: Operator) -> Result<Self, Fault> {
        let values: Preferences = read_document(&op, PREFERENCES_FILE).await?.unwrap_or_default();
        let (values, _) = watch::channel(values);
        Ok(Self { op, values, write_lock: Mutex::new(()) })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    #[instrument(name = "set_preference", skip(self, value))]
    pub async fn set(&self, key: &str, value: String) -> Result<(), Fault> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.values.borrow().clone();
        next.insert(key.to_owned(), value);
        write_document(&self.op, PREFERENCES_FILE, &next).await?;
        debug!("Preference stored.");
        self.values.send_replace(next);
        Ok(())
    }

    /// Current value of `key`, then its value after every committed edit.
    pub fn observe(&self, key: &str) -> FaultStream<Option<String>> {
        let key = key.to_owned();
        WatchStream::new(self.values.subscribe())
            .map(move |values| Ok(values.get(&key).cloned()))
            .boxed()
    }
}

const LOCALE_KEY: &str = "locale";
const DEFAULT_LOCALE: &str = "az";

pub struct AppSettingsDataSourceImpl {
    store: Arc<PreferenceStore>,
}

impl AppSettingsDataSourceImpl {
    pub fn new(store: Arc<PreferenceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AppSettingsDataSource for AppSettingsDataSourceImpl {
    async fn get_app_language(&self) -> Result<AppLanguage, Fault> {
        let locale = self.store.get(LOCALE_KEY).unwrap_or_else(|| DEFAULT_LOCALE.into());
        Ok(AppLanguage::of(&locale))
    }

    async fn set_app_language(&self, language: AppLanguage) -> Result<(), Fault> {
        self.store.set(LOCALE_KEY, language.name().into()).await
    }

    fn observe_language(&self) -> FaultStream<AppLanguage> {
        self.store
            .observe(LOCALE_KEY)
            .map(|locale| {
                locale.map(|locale| AppLanguage::of(locale.as_deref().unwrap_or(DEFAULT_LOCALE)))
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use opendal::services;

    use super::*;

    async fn settings() -> anyhow::Result<(Operator, AppSettingsDataSourceImpl)> {
        let op = Operator::new(services::Memory::default())?.finish();
        let store = Arc::new(PreferenceStore::open(op.clone()).await?);
        Ok((op, AppSettingsDataSourceImpl::new(store)))
    }

    #[tokio::test]
    async fn language_defaults_to_azerbaijani() -> anyhow::Result<()> {
        let (_, settings) = settings().await?;
        assert_eq!(settings.get_app_language().await?, AppLanguage::AZ);
        Ok(())
    }

    #[tokio::test]
    async fn saved_language_is_persisted_and_observed() -> anyhow::Result<()> {
        let (op, settings) = settings().await?;
        let mut languages = settings.observe_language();
        assert_eq!(languages.next().await.transpose()?, Some(AppLanguage::AZ));

        settings.set_app_language(AppLanguage::EN).await?;
        assert_eq!(languages.next().await.transpose()?, Some(AppLanguage::EN));
        assert_eq!(settings.get_app_language().await?, AppLanguage::EN);

        let reopened = PreferenceStore::open(op).await?;
        assert_eq!(reopened.get(LOCALE_KEY).as_deref(), Some("EN"));
        Ok(())
    }
}
