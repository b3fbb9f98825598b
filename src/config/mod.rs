//! User-level configuration (`~/.config/deevault/config.toml`).

pub mod settings;

pub use settings::Settings;
