//! Configuration system for e-Tax Sahayak
//!
//! All configuration is defined once in `schemas.rs` using the
//! `config_struct!` macro, loaded from `data/config.toml`, and accessed
//! through the thread-safe helpers in `utils.rs`.

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{AiConfig, Config, PortalConfig, ServerConfig};
pub use utils::{
    load_config, load_config_from_path, save_config, update_config_section, with_config,
    CONFIG_FILE_PATH,
};
