use super::Fetcher;
use crate::config::FetchConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::time::timeout;

/// Common alternative WebDriver endpoints tried when the configured one refuses
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Fetches rendered page source through pooled WebDriver sessions.
///
/// A session serves one fetch at a time; idle sessions are parked in the
/// pool and reused. Sessions are opened lazily, so a run whose URLs all fail
/// before fetching never talks to the WebDriver server.
pub struct WebDriverFetcher {
    webdriver_url: String,
    timeout_secs: u64,
    idle: Mutex<Vec<Client>>,
    sessions: Semaphore,
}

impl WebDriverFetcher {
    pub fn new(config: &FetchConfig, max_sessions: usize) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            timeout_secs: config.timeout_secs,
            idle: Mutex::new(Vec::new()),
            sessions: Semaphore::new(max_sessions.max(1)),
        }
    }

    /// Takes an idle session or opens a new one
    async fn checkout(&self) -> Option<Client> {
        if let Some(client) = self.idle.lock().await.pop() {
            return Some(client);
        }
        connect_to_webdriver(&self.webdriver_url).await
    }

    async fn checkin(&self, client: Client) {
        self.idle.lock().await.push(client);
    }

    async fn load_source(&self, client: &Client, url: &str) -> Result<String, FetchError> {
        let webdriver_error = |e: fantoccini::error::CmdError| FetchError::WebDriver {
            url: url.to_string(),
            message: e.to_string(),
        };

        let navigation = async {
            client.goto(url).await.map_err(webdriver_error)?;
            client.source().await.map_err(webdriver_error)
        };

        match timeout(Duration::from_secs(self.timeout_secs), navigation).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout_secs,
            }),
        }
    }
}

/// Connects to the WebDriver instance, falling back to well-known endpoints
async fn connect_to_webdriver(webdriver_url: &str) -> Option<Client> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Some(client);
        }
        Err(e) => {
            ::log::error!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
        }
    }

    for url in FALLBACK_WEBDRIVER_URLS {
        if url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Some(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    None
}

/// Session errors mean the client is dead and must not go back to the pool
fn is_session_lost(error: &FetchError) -> bool {
    match error {
        FetchError::WebDriver { message, .. } => {
            message.contains("Unable to find session") || message.contains("invalid session id")
        }
        FetchError::Timeout { .. } => true,
        _ => false,
    }
}

#[async_trait]
impl Fetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let _permit = self
            .sessions
            .acquire()
            .await
            .map_err(|_| FetchError::NoSession {
                url: url.to_string(),
            })?;

        let Some(client) = self.checkout().await else {
            return Err(FetchError::NoSession {
                url: url.to_string(),
            });
        };

        ::log::debug!("WebDriver navigating to {}", url);
        let result = self.load_source(&client, url).await;

        match &result {
            Err(e) if is_session_lost(e) => {
                ::log::warn!("Dropping WebDriver session after: {}", e);
                if let Err(e) = client.close().await {
                    ::log::debug!("Failed to close broken session: {}", e);
                }
            }
            _ => self.checkin(client).await,
        }

        result
    }

    fn name(&self) -> &'static str {
        "webdriver"
    }

    async fn shutdown(&self) {
        let clients: Vec<Client> = self.idle.lock().await.drain(..).collect();
        ::log::debug!("Closing {} WebDriver sessions", clients.len());

        for client in clients {
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver client: {}", e);
            }
        }
    }
}
