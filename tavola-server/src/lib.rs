//! Tavola Server - restaurant bookkeeping core
//!
//! Order lifecycle, recipe-driven inventory, payments, loyalty and a
//! kitchen event feed over a single SQLite database.
//!
//! # Module structure
//!
//! ```text
//! tavola-server/src/
//! ├── core/          # Config, shared state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Pool, migrations, repositories
//! ├── orders/        # Lifecycle state machine and money math
//! ├── payments/      # Append-only payment ledger
//! ├── inventory/     # Deduction engine and recipe resolver
//! ├── loyalty/       # Point accrual and redemption
//! ├── kitchen/       # In-process event feed
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod inventory;
pub mod kitchen;
pub mod loyalty;
pub mod orders;
pub mod payments;
pub mod utils;

pub use crate::core::{build_router, Config, Server, ServerState};
pub use kitchen::KitchenFeed;
pub use utils::{AppError, AppResult};

pub use utils::logger::init_logger_with_file;

/// Load .env, create the working directory and initialize logging.
pub fn setup_environment() -> std::io::Result<()> {
    let _ = dotenv::dotenv();
    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    if config.log_to_file {
        std::fs::create_dir_all(config.log_dir())?;
        init_logger_with_file(
            Some(&config.log_level),
            config.log_dir().to_str(),
        );
    } else {
        init_logger_with_file(Some(&config.log_level), None);
    }
    Ok(())
}
