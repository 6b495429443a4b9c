use super::Requester;
use crate::analytics::record::{RequestRecord, TRANSPORT_FAILURE_STATUS};
use crate::error::StrainError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tokio::time::{timeout, Instant};
use tracing::{debug, trace};

/// Header carrying the launch index of the unit, lets the target correlate requests.
pub const UNIT_HEADER: &str = "x-strain-unit";

#[derive(Debug)]
pub struct HttpRequester {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl HttpRequester {
    /// `timeout` bounds the whole exchange, connect and body read included.
    pub fn new(url: &str, timeout: Duration, connect_timeout: Duration) -> Result<Self, StrainError> {
        let url = Url::parse(url).map_err(|_| StrainError::CannotParseUrl(url.to_owned()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StrainError::UnsupportedUrlScheme(url.scheme().to_owned()));
        }

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(StrainError::CannotCreateHttpClient)?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    /// Returns the status code and the number of body bytes read.
    async fn exchange(&self, unit: u32) -> (u16, u64) {
        let mut response = match self
            .client
            .get(self.url.clone())
            .header(UNIT_HEADER, unit)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                debug!("Unit #{unit} → transport failure: {error}");
                return (TRANSPORT_FAILURE_STATUS, 0);
            }
        };

        let status_code = response.status().as_u16();
        let mut byte_size = 0;
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => byte_size += chunk.len() as u64,
                Ok(None) => break,
                Err(error) => {
                    debug!("Unit #{unit} → failed to read body after status {status_code}: {error}");
                    byte_size = 0;
                    break;
                }
            }
        }

        (status_code, byte_size)
    }
}

#[async_trait]
impl Requester for HttpRequester {
    async fn request(&self, unit: u32) -> RequestRecord {
        let start = Instant::now();
        let (status_code, byte_size) = match timeout(self.timeout, self.exchange(unit)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!("Unit #{unit} → timed out after {:?}", self.timeout);
                (TRANSPORT_FAILURE_STATUS, 0)
            }
        };
        let latency = start.elapsed();
        trace!("Unit #{unit} → status {status_code}, {byte_size} bytes in {latency:?}");

        RequestRecord::new(unit, latency, byte_size, status_code)
    }

    fn target(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_unparsable_url() {
        let result = HttpRequester::new("not a url", Duration::from_secs(1), Duration::from_secs(1));
        assert!(matches!(result, Err(StrainError::CannotParseUrl(_))));
    }

    #[test]
    fn should_reject_non_http_scheme() {
        let result = HttpRequester::new(
            "ftp://localhost/file",
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(StrainError::UnsupportedUrlScheme(scheme)) if scheme == "ftp"));
    }

    #[tokio::test]
    async fn should_encode_refused_connection_as_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let requester = HttpRequester::new(
            &format!("http://{address}/"),
            Duration::from_secs(5),
            Duration::from_secs(1),
        )
        .unwrap();
        let record = requester.request(7).await;

        assert_eq!(record.unit, 7);
        assert_eq!(record.status_code, TRANSPORT_FAILURE_STATUS);
        assert_eq!(record.byte_size, 0);
        assert!(record.is_transport_failure());
    }
}
