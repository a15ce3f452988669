pub mod app_config;
pub mod sessions;

pub use app_config::Config;
pub use sessions::SessionRegistry;
