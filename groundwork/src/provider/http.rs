//! HTTP client abstraction for testability

use std::time::Duration;

use super::types::ProviderError;

/// Default timeout for provider requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
///
/// The Nominatim usage policy requires an identifying agent string.
const USER_AGENT: &str = concat!("groundwork/", env!("CARGO_PKG_VERSION"));

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request with query parameters.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `query` - Query parameters appended to the URL
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError>;

    /// Performs an HTTP POST request with a form-encoded body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `form` - Form fields sent as `application/x-www-form-urlencoded`
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
        (**self).get(url, query)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
        (**self).post_form(url, form)
    }
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn read_response(
        response: reqwest::blocking::Response,
        url: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| ProviderError::Http(format!("Failed to read response: {}", e)))
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| ProviderError::Http(format!("Request failed: {}", e)))?;

        Self::read_response(response, url)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .map_err(|e| ProviderError::Http(format!("Request failed: {}", e)))?;

        Self::read_response(response, url)
    }
}

#[cfg(test)]
pub mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Mock HTTP client answering every request with one canned response.
    pub struct MockHttpClient {
        pub response: Result<Vec<u8>, ProviderError>,
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, _url: &str, _query: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
            self.response.clone()
        }

        fn post_form(&self, _url: &str, _form: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
            self.response.clone()
        }
    }

    /// Mock HTTP client answering requests from a queue, in order.
    pub struct SequencedHttpClient {
        responses: Mutex<VecDeque<Result<Vec<u8>, ProviderError>>>,
    }

    impl SequencedHttpClient {
        pub fn new(responses: Vec<Result<Vec<u8>, ProviderError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }

        fn next(&self) -> Result<Vec<u8>, ProviderError> {
            self.responses
                .lock()
                .expect("response queue poisoned")
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::Http("no scripted response left".into())))
        }
    }

    impl HttpClient for SequencedHttpClient {
        fn get(&self, _url: &str, _query: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
            self.next()
        }

        fn post_form(&self, _url: &str, _form: &[(&str, &str)]) -> Result<Vec<u8>, ProviderError> {
            self.next()
        }
    }

    #[test]
    fn test_mock_client_success() {
        let mock = MockHttpClient {
            response: Ok(vec![1, 2, 3, 4]),
        };

        let result = mock.get("http://example.com", &[]);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_mock_client_error() {
        let mock = MockHttpClient {
            response: Err(ProviderError::Http("Test error".to_string())),
        };

        let result = mock.post_form("http://example.com", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_sequenced_client_answers_in_order() {
        let mock = SequencedHttpClient::new(vec![Ok(vec![1]), Ok(vec![2])]);

        assert_eq!(mock.get("http://example.com", &[]).unwrap(), vec![1]);
        assert_eq!(mock.post_form("http://example.com", &[]).unwrap(), vec![2]);
        assert!(mock.get("http://example.com", &[]).is_err());
    }
}
