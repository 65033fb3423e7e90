use std::net::SocketAddr;
use std::path::PathBuf;

use crate::coords::LatLng;
use crate::feedback::FeedSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub park_csv_path: PathBuf,
    pub toilet_csv_path: PathBuf,
    pub feedback_api_url: String,
    pub feedback_schema: FeedSchema,
    pub feedback_revalidate_secs: u64,
    pub feedback_timeout_secs: u64,
    pub feedback_max_retries: u32,
    pub feedback_form_url: String,
    pub user_agent: String,
    pub map_center: LatLng,
    pub map_zoom: u8,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("park_csv_path", &self.park_csv_path)
            .field("toilet_csv_path", &self.toilet_csv_path)
            .field("feedback_api_url", &"[redacted]")
            .field("feedback_schema", &self.feedback_schema)
            .field("feedback_revalidate_secs", &self.feedback_revalidate_secs)
            .field("feedback_timeout_secs", &self.feedback_timeout_secs)
            .field("feedback_max_retries", &self.feedback_max_retries)
            .field("feedback_form_url", &self.feedback_form_url)
            .field("user_agent", &self.user_agent)
            .field("map_center", &self.map_center)
            .field("map_zoom", &self.map_zoom)
            .finish()
    }
}
