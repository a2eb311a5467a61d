use std::env;
use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;
use governor::Quota;
use log::warn;

use crate::models::staff::StaffRoster;

pub const DEFAULT_SERVER_ADDRESS: &str = "play.toxicraft.fun:25569";

/// `host:port` of the Minecraft server being watched. Fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress(String);

impl ServerAddress {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        let (host, port) = match raw.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (raw, None),
        };

        if host.is_empty() {
            return Err(format!("Invalid server address '{}': missing host", raw));
        }
        if host.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(format!("Invalid server address '{}': bad host", raw));
        }
        if let Some(port) = port {
            if port.parse::<u16>().is_err() {
                return Err(format!("Invalid server address '{}': bad port", raw));
            }
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path version of the status API. `2` returns bare player names,
/// `3` returns `{name, uuid}` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V2,
    V3,
}

impl ApiVersion {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::V2 => "2",
            Self::V3 => "3",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "2" => Some(Self::V2),
            "3" => Some(Self::V3),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub server_address: ServerAddress,

    // Status API
    pub status_api_base: String,
    pub status_api_version: ApiVersion,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,

    // Avatars
    pub avatar_base: String,
    pub avatar_size: u32,

    // Badges
    pub staff: StaffRoster,

    // Manual refresh rate limiting
    pub refresh_period_secs: u64,
    pub refresh_burst_limit: u32,

    pub bind_address: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: ServerAddress(DEFAULT_SERVER_ADDRESS.to_string()),
            status_api_base: "https://api.mcsrvstat.us".to_string(),
            status_api_version: ApiVersion::V2,
            poll_interval_secs: 60,
            request_timeout_secs: 10,
            avatar_base: "https://mc-heads.net/avatar".to_string(),
            avatar_size: 64,
            staff: StaffRoster::default(),
            refresh_period_secs: 5,
            refresh_burst_limit: 3,
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let server_address = match env::var("SERVER_ADDRESS") {
            Ok(raw) => ServerAddress::parse(&raw).unwrap_or_else(|e| {
                warn!("{}, falling back to {}", e, defaults.server_address);
                defaults.server_address.clone()
            }),
            Err(_) => defaults.server_address.clone(),
        };

        let status_api_version = match env::var("STATUS_API_VERSION") {
            Ok(raw) => ApiVersion::parse(&raw).unwrap_or_else(|| {
                warn!("Unsupported STATUS_API_VERSION '{}', using 2", raw);
                ApiVersion::V2
            }),
            Err(_) => defaults.status_api_version,
        };

        let mut staff = env::var("STAFF_ROSTER")
            .map(|v| StaffRoster::parse(&v))
            .unwrap_or_default();
        if let Ok(owner) = env::var("OWNER_IGN") {
            staff = staff.with_owner(owner);
        }

        Self {
            server_address,

            status_api_base: env::var("STATUS_API_BASE")
                .unwrap_or(defaults.status_api_base),

            status_api_version,

            poll_interval_secs: env_or("POLL_INTERVAL_SECS", defaults.poll_interval_secs),

            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),

            avatar_base: env::var("AVATAR_BASE")
                .unwrap_or(defaults.avatar_base),

            avatar_size: env_or("AVATAR_SIZE", defaults.avatar_size),

            staff,

            refresh_period_secs: env_or("REFRESH_PERIOD_SECS", defaults.refresh_period_secs),

            refresh_burst_limit: env_or("REFRESH_BURST_LIMIT", defaults.refresh_burst_limit),

            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or(defaults.bind_address),

            port: env_or("PORT", defaults.port),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn refresh_quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.refresh_burst_limit).unwrap_or(NonZeroU32::MIN);
        Quota::with_period(Duration::from_secs(self.refresh_period_secs.max(1)))
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst)
    }

    pub fn bind(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
