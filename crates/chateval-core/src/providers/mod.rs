pub mod completion;
pub mod llm;

/// User agent for outbound harness requests.
pub(crate) const USER_AGENT_VALUE: &str = concat!("chateval/", env!("CARGO_PKG_VERSION"));

pub(crate) fn http_client(timeout: std::time::Duration) -> crate::EvalResult<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

    let mut default_headers = HeaderMap::new();
    default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(default_headers)
        .build()
        .map_err(|e| crate::EvalError::Http {
            message: format!("failed to create HTTP client: {}", e),
        })
}
