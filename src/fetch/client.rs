use async_trait::async_trait;
use reqwest::{Request, Response};

/// Transport used to load the feed. Swappable so callers can wrap or stub it.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
