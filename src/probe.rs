use std::time::{Duration, Instant};
use reqwest::blocking::Client;
use tracing::{debug, warn};
use crate::error::{MirrorError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Measures how long a mirror takes to answer.
pub trait LatencyProbe {
    fn ping(&self, url: &str) -> Result<Duration>;
}

/// Times a single HTTP GET. Any response, whatever its status, counts as reachable.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<HttpProbe> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("regmirror/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MirrorError::ProbeSetup {
                timeout_ms: timeout.as_millis(),
                reason: e.to_string(),
            })?;
        Ok(HttpProbe { client })
    }
}

impl LatencyProbe for HttpProbe {
    fn ping(&self, url: &str) -> Result<Duration> {
        let start = Instant::now();
        let response = self.client.get(url).send().map_err(|e| {
            warn!(url, error = %e, "probe failed");
            MirrorError::ProbeFailure {
                url: url.to_string(),
                reason: if e.is_timeout() { "timed out".to_string() } else { e.to_string() },
            }
        })?;
        let elapsed = start.elapsed();
        debug!(url, status = %response.status(), ?elapsed, "probe answered");
        Ok(elapsed)
    }
}
