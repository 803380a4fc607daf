//! Unsplash API client
//!
//! The gallery only talks to [`PhotoSource`]; [`UnsplashClient`] is the
//! production implementation backed by `reqwest`.

pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
pub use models::{ErrorBody, Photo, SearchResponse};

/// Photo search endpoint
pub const SEARCH_URL: &str = "https://api.unsplash.com/search/photos";
/// Results requested per search
pub const PER_PAGE: u32 = 12;
/// API version pinned through the `Accept-Version` header
pub const API_VERSION: &str = "v1";
/// Banner text when the API did not explain the failure
pub const FALLBACK_ERROR: &str = "Erro ao carregar imagens.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned status {status}: {}", .errors.join(", "))]
    Status { status: u16, errors: Vec<String> },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown to the user: the API's own error list when it sent one
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { errors, .. } if !errors.is_empty() => errors.join(", "),
            _ => FALLBACK_ERROR.to_string(),
        }
    }
}

/// Anything that can answer photo searches and serve image bytes
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Search photos matching `query`, one fixed-size page
    async fn search(&self, query: &str) -> Result<Vec<Photo>, ApiError>;

    /// Fetch the raw bytes behind an image URL
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError>;
}

/// Shared handle passed into async tasks
pub type SharedSource = Arc<dyn PhotoSource>;

/// Production client for api.unsplash.com
pub struct UnsplashClient {
    http: reqwest::Client,
    search_url: String,
    access_key: String,
}

impl UnsplashClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("search-shots/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            search_url: config.api_url.clone(),
            access_key: config.access_key.clone(),
        })
    }
}

#[async_trait]
impl PhotoSource for UnsplashClient {
    async fn search(&self, query: &str) -> Result<Vec<Photo>, ApiError> {
        info!("🔍 Unsplash: searching '{}'", query);

        let response = self
            .http
            .get(&self.search_url)
            .query(&[
                ("query", query.to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("client_id", self.access_key.clone()),
            ])
            .header("Accept-Version", API_VERSION)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Unsplash API error response ({}): {}", status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                errors: parse_errors(&body),
            });
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        debug!(
            "Unsplash returned {} of {} results ({} pages) for '{}'",
            parsed.results.len(),
            parsed.total,
            parsed.total_pages,
            query
        );
        Ok(parsed.results)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                errors: Vec::new(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

/// Pull the `errors` list out of a failure body, if it has one
pub fn parse_errors(body: &str) -> Vec<String> {
    serde_json::from_str::<ErrorBody>(body)
        .map(|body| body.errors)
        .unwrap_or_default()
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    const ONE_PHOTO: &str = r#"{
        "total": 1,
        "total_pages": 1,
        "results": [{
            "id": "p1",
            "urls": {"regular": "https://img/p1-regular", "full": "https://img/p1-full"},
            "alt_description": "red car on a street",
            "user": {
                "name": "Ana",
                "username": "ana",
                "profile_image": {"medium": "https://img/ana"},
                "links": {"html": "https://unsplash.com/@ana"}
            },
            "likes": 7
        }]
    }"#;

    /// Answer a single HTTP request with `status` and `body`, handing back
    /// the request head (request line plus headers) as received.
    fn serve_once(status: &str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let status = status.to_string();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut head = String::new();
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                head.push_str(&line);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            head
        });

        (format!("http://{}/search/photos", addr), handle)
    }

    fn client_for(api_url: String) -> UnsplashClient {
        let config = Config {
            access_key: "KEY".to_string(),
            api_url,
            debounce: crate::config::DEFAULT_DEBOUNCE,
            download_dir: None,
        };
        UnsplashClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_search_request_shape_and_results() {
        let (url, server) = serve_once("200 OK", ONE_PHOTO);
        let client = client_for(url);

        let photos = client.search(" red car ").await.unwrap();
        let head = server.join().unwrap();

        let request_line = head.lines().next().unwrap();
        assert_eq!(
            request_line,
            "GET /search/photos?query=+red+car+&per_page=12&client_id=KEY HTTP/1.1"
        );
        assert!(head.to_ascii_lowercase().contains("accept-version: v1\r\n"));

        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].id, "p1");
        assert_eq!(photos[0].title(), "red car on a street");
        assert_eq!(photos[0].user.username, "ana");
    }

    #[tokio::test]
    async fn test_search_error_body_becomes_banner_text() {
        let (url, server) = serve_once(
            "401 Unauthorized",
            r#"{"errors":["OAuth error: The access token is invalid","Try again"]}"#,
        );
        let client = client_for(url);

        let err = client.search("cats").await.unwrap_err();
        server.join().unwrap();

        match &err {
            ApiError::Status { status, errors } => {
                assert_eq!(*status, 401);
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected a status error, got {:?}", other),
        }
        assert_eq!(
            err.user_message(),
            "OAuth error: The access token is invalid, Try again"
        );
    }

    #[tokio::test]
    async fn test_search_error_without_body_uses_fallback() {
        let (url, server) = serve_once("503 Service Unavailable", "<html>down</html>");
        let client = client_for(url);

        let err = client.search("cats").await.unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, ApiError::Status { status: 503, .. }));
        assert_eq!(err.user_message(), FALLBACK_ERROR);
    }

    #[test]
    fn test_user_message_joins_api_errors() {
        let err = ApiError::Status {
            status: 401,
            errors: vec!["OAuth error".to_string(), "Token expired".to_string()],
        };
        assert_eq!(err.user_message(), "OAuth error, Token expired");
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::Status {
            status: 500,
            errors: Vec::new(),
        };
        assert_eq!(err.user_message(), FALLBACK_ERROR);

        let err = ApiError::Decode("expected value at line 1".to_string());
        assert_eq!(err.user_message(), "Erro ao carregar imagens.");
    }

    #[test]
    fn test_parse_errors_tolerates_garbage() {
        assert_eq!(parse_errors(r#"{"errors":["Rate Limit Exceeded"]}"#), vec!["Rate Limit Exceeded"]);
        assert!(parse_errors("<html>Bad gateway</html>").is_empty());
        assert!(parse_errors("").is_empty());
    }

    #[tokio::test]
    async fn test_client_rejects_unreachable_host() {
        let config = Config {
            access_key: "key".to_string(),
            api_url: "http://127.0.0.1:9/search/photos".to_string(),
            debounce: crate::config::DEFAULT_DEBOUNCE,
            download_dir: None,
        };
        let client = UnsplashClient::new(&config).unwrap();

        let err = client.search("mountains").await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
        assert_eq!(err.user_message(), FALLBACK_ERROR);
    }
}
