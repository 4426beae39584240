use envconfig::Envconfig;
use salesap_domain::{InternalError, SalesapError};
use std::{
    fmt::{Display, Formatter},
    net::SocketAddr,
};

#[derive(Envconfig, Clone)] // Intentionally no Debug so secret is not printed
pub struct WebhookConfig {
    /// Shared secret. Callers must present it and every CRM request carries it.
    #[envconfig(from = "API_TOKEN")]
    pub api_token: String,
    #[envconfig(from = "SALESAP_API_URL", default = "https://api.salesap.ru/v1")]
    pub salesap_api_url: String,
    #[envconfig(from = "SERVER_ADDRESS", default = "0.0.0.0:8000")]
    pub address: SocketAddr,
    #[envconfig(from = "HTTP_CLIENT_TIMEOUT_SECS", default = "30")]
    pub http_client_timeout_secs: u64,
    #[envconfig(from = "WORKER_THREADS")]
    pub worker_threads: Option<usize>,
}

impl WebhookConfig {
    pub fn deals_url(&self) -> String {
        format!("{}/deals", self.base_url())
    }

    pub fn relations_url(&self) -> String {
        format!("{}/relations", self.base_url())
    }

    /// Tokio worker count: `WORKER_THREADS` when set, else one per CPU.
    pub fn runtime_worker_threads(&self) -> Result<usize, SalesapError> {
        match self.worker_threads {
            Some(0) => Err(InternalError::configuration_error(
                "WORKER_THREADS must be at least 1",
            )),
            Some(threads) => Ok(threads),
            None => Ok(num_cpus::get()),
        }
    }

    fn base_url(&self) -> &str {
        self.salesap_api_url.trim_end_matches('/')
    }
}

impl Display for WebhookConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "API_TOKEN: ****")?;
        writeln!(f, "SALESAP_API_URL: {}", self.salesap_api_url)?;
        writeln!(f, "SERVER_ADDRESS: {}", self.address)?;
        writeln!(
            f,
            "HTTP_CLIENT_TIMEOUT_SECS: {}",
            self.http_client_timeout_secs
        )?;
        writeln!(f, "WORKER_THREADS: {:?}", self.worker_threads)
    }
}
