use std::env;

#[derive(Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub token_file: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let request_timeout_secs = env::var("PORTAL_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Self {
            api_base_url: env::var("PORTAL_API_BASE_URL").expect("PORTAL_API_BASE_URL must be set"),
            request_timeout_secs,
            token_file: env::var("PORTAL_TOKEN_FILE")
                .unwrap_or_else(|_| ".portal_token".to_string()),
        }
    }
}
