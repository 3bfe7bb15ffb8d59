//! Server configuration read from the environment.

use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SERVICE_NAME: &str = "robotposition-api";

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// PostgreSQL connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Pool size (`DATABASE_MAX_CONNECTIONS`).
    pub max_connections: u32,
    /// OTLP gRPC collector endpoint (`OTEL_EXPORTER_OTLP_ENDPOINT`).
    /// Span export is disabled when unset.
    pub otlp_endpoint: Option<String>,
    /// Service name reported to the collector (`OTEL_SERVICE_NAME`).
    pub service_name: String,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Config("DATABASE_URL environment variable must be set".to_owned())
            })?;
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a valid u32: {e}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty());
        let service_name =
            lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_owned());

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            otlp_endpoint,
            service_name,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
