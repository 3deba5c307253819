mod manager;

pub use manager::{ConfigFile, ConfigManager, EndpointConfig};
