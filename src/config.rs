use std::env;

pub const DEFAULT_GEOCODER_URL: &str = "https://geocode-maps.yandex.ru/1.x";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub geocoder_api_key: String,
    pub geocoder_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let geocoder_api_key = env::var("GEOCODER_API_KEY").unwrap_or_default();
        let geocoder_base_url =
            env::var("GEOCODER_BASE_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());
        Ok(Self {
            database_url,
            host,
            port,
            geocoder_api_key,
            geocoder_base_url,
        })
    }
}
