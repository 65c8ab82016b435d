use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::kitchen::KitchenFeed;
use crate::utils::AppError;

/// Shared application state
///
/// Cloned into every handler; all fields are cheap shallow copies (the
/// pool and the feed are internally reference-counted).
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub kitchen: KitchenFeed,
}

impl ServerState {
    /// Initialize the state: ensure the working directory exists, open the
    /// database (running migrations) and create the kitchen feed.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::internal(format!(
                "Failed to create work directory {}: {e}",
                config.work_dir
            ))
        })?;

        let db = DbService::new(&config.database_path).await?;
        let kitchen = KitchenFeed::new(config.kitchen_feed_capacity);

        Ok(Self {
            config: config.clone(),
            db,
            kitchen,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }
}
