pub mod config;
pub mod errors;
pub mod guard;
pub mod headless;
pub mod host;
pub mod intent;
pub mod intercept;
pub mod messages;
pub mod models;
pub mod reader;
pub mod resolver;
pub mod toast;

#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(feature = "server")]
pub mod app;
#[cfg(feature = "server")]
pub mod fixture;
#[cfg(feature = "server")]
pub mod handlers;
#[cfg(feature = "server")]
pub mod state;
#[cfg(feature = "server")]
pub mod storage;
#[cfg(feature = "server")]
pub mod ui;

pub use config::{RewardSchedule, ToastConfig};
pub use guard::{ClaimGuard, Outcome};
pub use models::{ClaimIntent, Snapshot, ToastKind};

#[cfg(feature = "server")]
pub use app::router;
#[cfg(feature = "server")]
pub use state::AppState;
#[cfg(feature = "server")]
pub use storage::{load_data, resolve_data_path, resolve_pkg_dir};
