use std::env;

use crate::engine::simulation::NetworkSimulator;
use crate::error::AppError;
use crate::models::booking::GeoPoint;
use crate::models::session::VendorSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub event_buffer_size: usize,
    pub sim_delay_ms: u64,
    pub sim_failure_rate: f64,
    pub fallback_location: GeoPoint,
    pub vendor_id: String,
    pub vendor_name: String,
    pub vendor_phone: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        let sim_failure_rate: f64 = parse_or_default("SIM_FAILURE_RATE", 0.0)?;
        if !(0.0..=1.0).contains(&sim_failure_rate) {
            return Err(AppError::Internal(format!(
                "invalid SIM_FAILURE_RATE: {sim_failure_rate} is outside [0, 1]"
            )));
        }

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format,
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            sim_delay_ms: parse_or_default("SIM_DELAY_MS", 0)?,
            sim_failure_rate,
            fallback_location: GeoPoint {
                lat: parse_or_default("FALLBACK_LAT", 28.6139)?,
                lng: parse_or_default("FALLBACK_LNG", 77.2090)?,
            },
            vendor_id: env::var("VENDOR_ID").unwrap_or_else(|_| "vendor-001".to_string()),
            vendor_name: env::var("VENDOR_NAME")
                .unwrap_or_else(|_| "Green Scrap Co".to_string()),
            vendor_phone: env::var("VENDOR_PHONE")
                .unwrap_or_else(|_| "+91 90000 00000".to_string()),
        })
    }

    pub fn simulator(&self) -> NetworkSimulator {
        NetworkSimulator::new(self.sim_delay_ms, self.sim_failure_rate)
    }

    pub fn session(&self) -> VendorSession {
        VendorSession::new(
            self.vendor_id.clone(),
            self.vendor_name.clone(),
            self.vendor_phone.clone(),
        )
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
