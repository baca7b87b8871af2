//! HTTP [`Transport`].

use async_trait::async_trait;

/// Executes HTTP requests for a [`Client`](crate::Client).
///
/// Timeouts and connection reuse are the transport's concern. Dropping the returned future must abort the request.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Executes the request.
	///
	/// Returning `Ok(None)` is reported as [`Error::NilResponse`](crate::Error::NilResponse).
	async fn execute(&self, request: reqwest::Request) -> Result<Option<reqwest::Response>, reqwest::Error>;
}

#[async_trait]
impl Transport for reqwest::Client {
	async fn execute(&self, request: reqwest::Request) -> Result<Option<reqwest::Response>, reqwest::Error> {
		reqwest::Client::execute(self, request).await.map(Some)
	}
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
	async fn execute(&self, request: reqwest::Request) -> Result<Option<reqwest::Response>, reqwest::Error> {
		(**self).execute(request).await
	}
}
