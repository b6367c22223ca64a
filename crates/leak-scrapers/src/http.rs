//! Status handling shared by network-backed scrapers.

use leak_core::text::truncate_on_char_boundary;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::ScraperError;

/// Upper bound on the response body echoed into an error message.
const MAX_ERROR_BODY: usize = 512;

/// Wait applied when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Pass 2xx responses through and map everything else to a [`ScraperError`].
///
/// A 429 becomes [`ScraperError::RateLimited`]; any other failure status
/// becomes [`ScraperError::Api`] carrying the start of the response body.
///
/// # Errors
///
/// Returns the mapped [`ScraperError`] for any non-success status.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ScraperError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ScraperError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }
    Err(ScraperError::Api {
        status: status.as_u16(),
        message: error_body(resp).await,
    })
}

/// Read a failed response's body for an error message, capped in length.
async fn error_body(resp: reqwest::Response) -> String {
    let mut body = resp.text().await.unwrap_or_default();
    truncate_on_char_boundary(&mut body, MAX_ERROR_BODY);
    body
}

/// `Retry-After` in delta-seconds form; dates and garbage fall back to the default.
fn retry_after_secs(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, retry_after: Option<&str>, body: &str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body.to_string()).unwrap())
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = check_response(response(200, None, "[]")).await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn too_many_requests_honours_retry_after_seconds() {
        let err = check_response(response(429, Some(" 30 "), "")).await.unwrap_err();
        assert!(matches!(err, ScraperError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn too_many_requests_with_http_date_uses_default_wait() {
        let resp = response(429, Some("Wed, 21 Oct 2015 07:28:00 GMT"), "");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            ScraperError::RateLimited {
                retry_after_secs: DEFAULT_RETRY_AFTER_SECS
            }
        ));
    }

    #[tokio::test]
    async fn failure_status_carries_capped_body() {
        let body = "<html>".repeat(1000);
        match check_response(response(503, None, &body)).await.unwrap_err() {
            ScraperError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message.len(), MAX_ERROR_BODY);
                assert!(message.starts_with("<html>"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
