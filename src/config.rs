use serde::{Deserialize, Serialize};

/// Application configuration, resolved at compile time from .env (see build.rs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_title: String,
    pub demo_cleaner_password: String,
    pub auto_refresh_seconds: u32,
    pub enable_logging: bool,
    pub latency_min_ms: u32,
    pub latency_max_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_title: "LakeClean".to_string(),
            demo_cleaner_password: "clean123".to_string(),
            auto_refresh_seconds: 30,
            enable_logging: true,
            latency_min_ms: 200,
            latency_max_ms: 500,
        }
    }
}

impl AppConfig {
    /// Load configuration from compile-time environment variables.
    pub fn from_env() -> Self {
        Self {
            app_title: option_env!("APP_TITLE").unwrap_or("LakeClean").to_string(),
            demo_cleaner_password: option_env!("DEMO_CLEANER_PASSWORD")
                .unwrap_or("clean123")
                .to_string(),
            auto_refresh_seconds: option_env!("AUTO_REFRESH_SECONDS")
                .unwrap_or("30")
                .parse()
                .unwrap_or(30),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            latency_min_ms: option_env!("LATENCY_MIN_MS")
                .unwrap_or("200")
                .parse()
                .unwrap_or(200),
            latency_max_ms: option_env!("LATENCY_MAX_MS")
                .unwrap_or("500")
                .parse()
                .unwrap_or(500),
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}
