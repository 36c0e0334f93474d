use std::sync::Arc;

use api::{ApiClient, RecordClient};

use crate::config::Config;
use crate::storage::FileStore;

pub struct State {
    pub config: Config,
    pub records: RecordClient,
    pub api: ApiClient,
    pub storage: FileStore,
}

impl State {
    pub fn new() -> Arc<Self> {
        Self::from_config(Config::load())
    }

    pub fn from_config(config: Config) -> Arc<Self> {
        let records = RecordClient::new(config.base_url.clone());
        let api = ApiClient::new(config.base_url.clone());
        let storage = FileStore::new(&config.storage_dir);

        Arc::new(Self {
            config,
            records,
            api,
            storage,
        })
    }
}
