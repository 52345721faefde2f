use super::*;

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.smard.de/app/chart_data".to_string(),
            region: "DE".to_string(),
            resolution: "quarterhour".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            console_level: None,
            file_level: None,
            file: "/tmp/selene.log".to_string(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zone_id: crate::smard::zones::DEFAULT_ZONE_ID.to_string(),
            threshold: 0.0,
            timezone: "Europe/Berlin".to_string(),
            poll_interval_minutes: 30,
            feed: FeedConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
