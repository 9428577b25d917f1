use crate::engine::EngineConfig;
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Path to the shift roster JSON; the file must exist at startup.
    pub shift_roster: String,

    // Scheduling policy
    pub shift_start_hour: u32,
    pub grace_minutes: i64,
    pub default_shift_hours: f64,

    // Rate limiting
    pub rate_report_per_min: u32,
    pub rate_update_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            shift_roster: env::var("SHIFT_ROSTER").unwrap_or_else(|_| "shift_hour.json".to_string()),

            shift_start_hour: env::var("SHIFT_START_HOUR")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .unwrap(),
            grace_minutes: env::var("GRACE_MINUTES")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap(),
            default_shift_hours: env::var("DEFAULT_SHIFT_HOURS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),

            rate_report_per_min: env::var("RATE_REPORT_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_update_per_min: env::var("RATE_UPDATE_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            shift_start_hour: self.shift_start_hour,
            grace_minutes: self.grace_minutes,
            default_shift_hours: self.default_shift_hours,
            default_sunday_duty: false,
        }
    }
}
