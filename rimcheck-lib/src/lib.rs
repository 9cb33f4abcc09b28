pub mod error;
pub mod mods_config;
pub mod reconcile;
pub mod settings;
pub mod workshop;

pub use error::CheckError;
pub use mods_config::{VANILLA_PACKAGE_IDS, read_active_mods};
pub use reconcile::{ActiveMod, ExtraMod, Reconciliation, reconcile};
pub use settings::{Settings, SettingsOverrides, config_path};
pub use workshop::{SkippedDir, WorkshopScan, scan_workshop_dir};
