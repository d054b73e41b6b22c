//! Wires configuration, the JSON store and the document service together.

use std::{path::PathBuf, sync::Arc, time::Duration};

use docseq_config::{Config, ConfigManager, StrategyKind};
use docseq_core::{
    AllocatorSettings, AtomicCounter, DocumentService, DocumentStore, OptimisticRetry,
    SequenceAllocator, SequenceStrategy, SystemClock,
};
use docseq_storage_json::{JsonDocumentStore, DEFAULT_STORE_FILE};
use tracing::info;

use crate::{errors::AppError, utils::paths::app_data_dir};

/// Everything a command needs: resolved paths, config and the service.
pub struct AppContext {
    pub home: PathBuf,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store_path: PathBuf,
    pub service: DocumentService,
}

impl AppContext {
    pub fn open(home: Option<PathBuf>) -> Result<Self, AppError> {
        let home = app_data_dir(home);
        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        let config = config_manager.load()?;
        let store_path = config
            .store_file
            .clone()
            .unwrap_or_else(|| home.join(DEFAULT_STORE_FILE));
        let store = Arc::new(JsonDocumentStore::open(store_path.clone())?);
        let service = build_service(&config, store)?;
        info!(
            home = %home.display(),
            store = %store_path.display(),
            strategy = %config.strategy,
            "docseq context opened"
        );
        Ok(Self {
            home,
            config_manager,
            config,
            store_path,
            service,
        })
    }
}

pub fn strategy_for(kind: StrategyKind) -> Box<dyn SequenceStrategy> {
    match kind {
        StrategyKind::OptimisticRetry => Box::new(OptimisticRetry),
        StrategyKind::AtomicCounter => Box::new(AtomicCounter),
    }
}

pub fn settings_for(config: &Config) -> AllocatorSettings {
    AllocatorSettings {
        max_attempts: config.max_attempts,
        backoff: Duration::from_millis(config.backoff_ms),
        sequence_width: config.sequence_width,
        overflow: config.overflow,
    }
}

/// Builds a [`DocumentService`] over `store` using the configured strategy and limits.
pub fn build_service(
    config: &Config,
    store: Arc<dyn DocumentStore>,
) -> Result<DocumentService, AppError> {
    let allocator =
        SequenceAllocator::new(store, strategy_for(config.strategy), settings_for(config))?;
    Ok(DocumentService::new(allocator, Arc::new(SystemClock)))
}
