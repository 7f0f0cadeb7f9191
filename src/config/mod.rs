//! Layered configuration.
//!
//! Tiers, lowest priority first, merged field by field:
//! 1. **Defaults** - `Config::default()`
//! 2. **Project** - `$CWD/task-store/config.yaml`
//! 3. **User** - `~/.task-store/config.yaml`
//! 4. **Environment** - `TASK_STORE_*` variables
//!
//! CLI flags are applied on top by the binary.
//!
//! ## Environment Variables
//! - `TASK_STORE_CONFIG_PATH` - Explicit config file (replaces tiers 1-3)
//! - `TASK_STORE_DB_PATH` - Database path
//! - `TASK_STORE_HOST` - Listen address
//! - `TASK_STORE_PORT` - Listen port
//! - `TASK_STORE_USER_DIR` - User config dir (default: `~/.task-store`)
//! - `TASK_STORE_PROJECT_DIR` - Project config dir (default: `./task-store`)

mod loader;
mod merge;
mod types;

pub use loader::{ConfigLoader, ConfigPaths, ConfigTier, apply_overrides};
pub use merge::{deep_merge, deep_merge_all};
pub use types::*;
