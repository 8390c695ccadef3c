use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use cadence_application::ValidationOptions;
use cadence_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub validation_options: ValidationOptions,
    pub extra_tokens: Vec<String>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let validation_options = match env::var("ACTION_VALIDATION_VISIBILITY")
            .unwrap_or_else(|_| "respect".to_owned())
            .trim()
        {
            "respect" => ValidationOptions::default(),
            "ignore" => ValidationOptions::legacy(),
            other => {
                return Err(AppError::Validation(format!(
                    "ACTION_VALIDATION_VISIBILITY must be either 'respect' or 'ignore', got '{other}'"
                )));
            }
        };

        let extra_tokens = env::var("TOKEN_VOCABULARY")
            .map(|value| parse_token_list(value.as_str()))
            .unwrap_or_default();

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            validation_options,
            extra_tokens,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_token_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}
