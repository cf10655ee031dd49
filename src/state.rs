use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::domain::Broadcaster;
use crate::services::{
    ApplicationService, AuthService, IpoService, StoreApplicationService, StoreAuthService,
    StoreIpoService,
};

/// Process-wide state: the store, the broadcaster, and the domain services
/// wired on top of them. Cloning is cheap; everything inside is shared.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub broadcaster: Broadcaster,

    pub ipo_service: Arc<dyn IpoService>,

    pub auth_service: Arc<dyn AuthService>,

    pub application_service: Arc<dyn ApplicationService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let broadcaster = Broadcaster::new(config.general.event_bus_buffer_size);
        Self::with_broadcaster(config, broadcaster).await
    }

    /// Builds state around an externally owned broadcaster, so tests can
    /// subscribe before the server is up.
    pub async fn with_broadcaster(
        config: Config,
        broadcaster: Broadcaster,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let security = config.security.clone();
        let config = Arc::new(RwLock::new(config));

        let ipo_service = Arc::new(StoreIpoService::new(store.clone(), broadcaster.clone()))
            as Arc<dyn IpoService + Send + Sync + 'static>;

        let auth_service = Arc::new(StoreAuthService::new(store.clone(), security))
            as Arc<dyn AuthService + Send + Sync + 'static>;

        let application_service = Arc::new(StoreApplicationService::new(store.clone()))
            as Arc<dyn ApplicationService + Send + Sync + 'static>;

        Ok(Self {
            config,
            store,
            broadcaster,
            ipo_service,
            auth_service,
            application_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
