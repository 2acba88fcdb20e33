use crate::errors::ConvertError;
use reqwest::Client;
use std::time::Duration;

/// Browser-like user agent; some sites refuse requests from obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/91.0.4472.124 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a reqwest client with the fixed user agent and timeout
pub fn build_client() -> Result<Client, ConvertError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ConvertError::Client {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that the fixed client configuration builds
    #[test]
    fn test_build_client() {
        assert!(build_client().is_ok());
    }
}
