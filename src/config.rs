/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, JWT_SECRET, CORS 許可、deadline など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 第 1 コマンドライン引数で PORT を上書き
 */
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Upper bound for `TOKEN_TTL_SECONDS` (10 years).
pub const MAX_TOKEN_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub jwt_secret: String,
    pub token_ttl_seconds: u64,

    pub persistence_timeout: Duration,
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the database url (credentials) or the signing secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("database_max_connections", &self.database_max_connections)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("persistence_timeout", &self.persistence_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port_arg = std::env::args().nth(1);
        Self::from_lookup(|key| std::env::var(key).ok(), port_arg.as_deref())
    }

    /// Build from an arbitrary variable source. `port_arg` wins over `PORT`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        port_arg: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let port: u16 = match port_arg.map(str::to_string).or_else(|| lookup("PORT")) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_seconds = parse_or(&lookup, "TOKEN_TTL_SECONDS", 86_400_u64)?;
        if token_ttl_seconds == 0 || token_ttl_seconds > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Invalid("TOKEN_TTL_SECONDS"));
        }

        let persistence_timeout_seconds = parse_or(&lookup, "PERSISTENCE_TIMEOUT_SECONDS", 5_u64)?;
        if persistence_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("PERSISTENCE_TIMEOUT_SECONDS"));
        }

        let request_timeout_seconds = parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 30_u64)?;
        let body_limit_bytes = parse_or(&lookup, "BODY_LIMIT_BYTES", 1024 * 1024_usize)?;

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            jwt_secret,
            token_ttl_seconds,
            persistence_timeout: Duration::from_secs(persistence_timeout_seconds),
            request_timeout: Duration::from_secs(request_timeout_seconds),
            body_limit_bytes,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid(key))
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(
        pairs: &[(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/mygram"),
        ("JWT_SECRET", "secret"),
    ];

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = Config::from_lookup(lookup_from(&REQUIRED), None).unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.token_ttl_seconds, 86_400);
        assert_eq!(config.persistence_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.body_limit_bytes, 1024 * 1024);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn port_argument_overrides_env() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "3000"));

        let config = Config::from_lookup(lookup_from(&vars), Some("9090")).unwrap();
        assert_eq!(config.addr.port(), 9090);

        let config = Config::from_lookup(lookup_from(&vars), None).unwrap();
        assert_eq!(config.addr.port(), 3000);
    }

    #[test]
    fn missing_secret_fails_startup() {
        let err = Config::from_lookup(lookup_from(&REQUIRED[..1]), None).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn unparseable_values_are_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PERSISTENCE_TIMEOUT_SECONDS", "soon"));

        let err = Config::from_lookup(lookup_from(&vars), None).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PERSISTENCE_TIMEOUT_SECONDS"));
    }

    #[test]
    fn token_ttl_must_stay_within_bounds() {
        for ttl in ["0", "315360001", "10000000000000000"] {
            let mut vars = REQUIRED.to_vec();
            vars.push(("TOKEN_TTL_SECONDS", ttl));

            let err = Config::from_lookup(lookup_from(&vars), None).unwrap_err();
            assert_eq!(err, ConfigError::Invalid("TOKEN_TTL_SECONDS"), "ttl {ttl}");
        }

        let mut vars = REQUIRED.to_vec();
        vars.push(("TOKEN_TTL_SECONDS", "315360000"));
        let config = Config::from_lookup(lookup_from(&vars), None).unwrap();
        assert_eq!(config.token_ttl_seconds, MAX_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn production_reads_cors_allowlist() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("APP_ENV", "production"));
        vars.push(("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"));

        let config = Config::from_lookup(lookup_from(&vars), None).unwrap();
        assert!(config.app_env.is_production());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }
}
