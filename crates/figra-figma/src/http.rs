//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 with `Retry-After`, other non-success
//! statuses as [`FigmaError::Api`]) so request methods only build requests
//! and map bodies.

use crate::error::FigmaError;

/// Seconds to wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Check an HTTP response for error statuses, returning it unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FigmaError> {
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(FigmaError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(FigmaError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, retry_after: Option<&str>, body: &str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body.to_string()).unwrap())
    }

    #[test]
    fn retry_after_header_is_used() {
        let resp = mock_response(429, Some("120"), "");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn retry_after_falls_back_when_missing_or_garbage() {
        assert_eq!(parse_retry_after(&mock_response(429, None, "")), 60);
        assert_eq!(
            parse_retry_after(&mock_response(429, Some("soon"), "")),
            60
        );
    }

    #[tokio::test]
    async fn rate_limit_maps_to_rate_limited() {
        let err = check_response(mock_response(429, Some("5"), ""))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FigmaError::RateLimited {
                retry_after_secs: 5
            }
        ));
    }

    #[tokio::test]
    async fn not_found_keeps_status_and_body() {
        let err = check_response(mock_response(404, None, "{\"status\":404,\"err\":\"Not found\"}"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Not found"));
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, None, "{}")).await.is_ok());
    }
}
