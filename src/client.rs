//! [`Client`] for the [Fixer](https://fixer.io/documentation) API.

use std::{fmt, sync::Arc, time::Duration};

use chrono::NaiveDate;
use reqwest::{
	header::{HeaderValue, ACCEPT, USER_AGENT},
	Method, StatusCode,
};
use url::{form_urlencoded, Url};

use crate::{
	filter::Filter,
	response::{Links, Response},
	transport::Transport,
	Error,
};

/// The default base URL.
pub const DEFAULT_BASE_URL: &str = "https://data.fixer.io/api/";

/// The default `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("fixer-rs/", env!("CARGO_PKG_VERSION"));

/// The default request timeout of the built-in transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// How much of an error response body is drained before it's released.
const DRAIN_LIMIT: usize = 64;

/// Foreign exchange rates client.
///
/// The client is immutable and cheap to clone; clones share the transport.
///
/// # Examples
/// ```no_run
/// # async fn run() -> Result<(), fixer::Error> {
/// use fixer::{filter, currency::list::*};
///
/// let client = fixer::Client::builder().access_key("…").build()?;
/// let response = client.latest([filter::base(USD), filter::symbols([EUR, GBP])]).await?;
/// for (currency, rate) in &response.rates { println!("{currency}: {rate}"); }
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct Client {
	transport: Arc<dyn Transport>,
	base_url: Url,
	user_agent: HeaderValue,
	access_key: Option<String>,
}

impl Client {
	/// Creates a [`Client`] with the default configuration.
	pub fn new() -> Result<Self, Error> { Self::builder().build() }

	/// Creates a [`ClientBuilder`].
	pub fn builder() -> ClientBuilder { ClientBuilder::default() }

	/// The configured base URL.
	pub fn base_url(&self) -> &Url { &self.base_url }

	/// Latest foreign exchange reference rates.
	pub async fn latest(&self, filters: impl IntoIterator<Item = Filter>) -> Result<Response, Error> {
		self.get("latest", Filter::merge(filters)).await
	}

	/// Historical rates for the given day.
	pub async fn date(&self, date: NaiveDate, filters: impl IntoIterator<Item = Filter>) -> Result<Response, Error> {
		let path = date.format("%Y-%m-%d").to_string();
		self.get(&path, Filter::merge(filters)).await
	}

	async fn get(&self, path: &str, filter: Filter) -> Result<Response, Error> {
		let request = self.request(path, &filter)?;
		let url = request.url().to_string();
		tracing::debug!(path, ?filter, "requesting rates");

		let response = self.transport.execute(request).await?.ok_or(Error::NilResponse)?;
		let mut response = decode(response).await?;
		response.links = Links::new(self.base_url.as_str(), &url);
		Ok(response)
	}

	fn request(&self, path: &str, filter: &Filter) -> Result<reqwest::Request, Error> {
		let mut url = self.base_url.join(path)?;
		let mut query = form_urlencoded::Serializer::new(String::new());
		filter.write_query(self.access_key.as_deref(), &mut query);
		let query = query.finish();
		url.set_query((!query.is_empty()).then_some(query.as_str()));

		let mut request = reqwest::Request::new(Method::GET, url);
		let headers = request.headers_mut();
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
		headers.insert(USER_AGENT, self.user_agent.clone());
		Ok(request)
	}
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Client")
			.field("base_url", &self.base_url.as_str())
			.field("user_agent", &self.user_agent)
			.field("access_key", &self.access_key.as_ref().map(|_| "…"))
			.finish_non_exhaustive()
	}
}

/// Classifies the response, then decodes the body of a successful one.
async fn decode(response: reqwest::Response) -> Result<Response, Error> {
	let status = response.status();
	tracing::trace!(%status, "received response");

	if let Some(error) = Error::from_status(status) {
		drain(response).await;
		return Err(error);
	}
	if status != StatusCode::OK {
		let body = response.text().await?;
		return Err(Error::UnexpectedStatus { status, body });
	}

	let body = response.bytes().await?;
	Ok(serde_json::from_slice(&body)?)
}

/// Reads up to [`DRAIN_LIMIT`] bytes of the body so the connection can be reused.
async fn drain(mut response: reqwest::Response) {
	let mut drained = 0;
	while drained < DRAIN_LIMIT {
		match response.chunk().await {
			Ok(Some(chunk)) => drained += chunk.len(),
			_ => break,
		}
	}
}

/// [`Client`] builder.
///
/// Setters apply in call order.
pub struct ClientBuilder {
	transport: Option<Arc<dyn Transport>>,
	/// [`None`] until overridden, meaning [`DEFAULT_BASE_URL`].
	base_url: Option<Url>,
	user_agent: String,
	access_key: Option<String>,
	timeout: Duration,
}

impl Default for ClientBuilder {
	fn default() -> Self {
		Self {
			transport: None,
			base_url: None,
			user_agent: DEFAULT_USER_AGENT.to_owned(),
			access_key: None,
			timeout: DEFAULT_TIMEOUT,
		}
	}
}

impl ClientBuilder {
	/// Sets the [`Transport`].
	pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
		let transport: Arc<dyn Transport> = Arc::new(transport);
		self.transport = Some(transport);
		self
	}

	/// Sets the [`reqwest::Client`] used as the transport.
	pub fn http_client(self, client: reqwest::Client) -> Self { self.transport(client) }

	/// Sets the base URL.
	///
	/// An invalid URL is ignored, keeping the previous one. See [`ClientBuilder::try_base_url`].
	///
	/// Request paths are resolved relative to it, so a base path must end with `/` to be kept.
	pub fn base_url(mut self, url: &str) -> Self {
		match Url::parse(url) {
			Ok(url) => self.base_url = Some(url),
			Err(error) => tracing::debug!(url, %error, "ignoring invalid base url"),
		}
		self
	}

	/// Sets the base URL, failing if it's invalid.
	pub fn try_base_url(mut self, url: &str) -> Result<Self, Error> {
		let parsed = Url::parse(url).map_err(|source| Error::InvalidBaseUrl { url: url.to_owned(), source })?;
		self.base_url = Some(parsed);
		Ok(self)
	}

	/// Sets the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();
		self
	}

	/// Sets the [access key](https://fixer.io/documentation#authentication) sent with every request.
	pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
		self.access_key = Some(access_key.into());
		self
	}

	/// Sets the request timeout of the default transport.
	///
	/// Has no effect with a custom [`transport`](ClientBuilder::transport).
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Builds the [`Client`].
	pub fn build(self) -> Result<Client, Error> {
		let transport: Arc<dyn Transport> = match self.transport {
			Some(transport) => transport,
			None => Arc::new(reqwest::Client::builder().timeout(self.timeout).build()?),
		};
		let base_url = match self.base_url {
			Some(base_url) => base_url,
			None => Url::parse(DEFAULT_BASE_URL)?,
		};
		Ok(Client {
			transport,
			base_url,
			user_agent: HeaderValue::from_str(&self.user_agent)?,
			access_key: self.access_key,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use async_trait::async_trait;

	use super::*;
	use crate::{currency::list::*, filter};

	const BODY: &str = r#"{"success":true,"date":"2020-01-01","base":"USD","rates":{"EUR":0.9}}"#;

	enum Reply {
		Status(u16, &'static str),
		Nil,
		Hang,
	}

	struct Mock {
		reply: Reply,
		requests: Mutex<Vec<reqwest::Request>>,
	}

	impl Mock {
		fn new(reply: Reply) -> Arc<Self> { Arc::new(Self { reply, requests: Mutex::default() }) }

		fn urls(&self) -> Vec<String> {
			self.requests.lock().unwrap().iter().map(|request| request.url().to_string()).collect()
		}
	}

	#[async_trait]
	impl Transport for Mock {
		async fn execute(&self, request: reqwest::Request) -> Result<Option<reqwest::Response>, reqwest::Error> {
			self.requests.lock().unwrap().push(request);
			match self.reply {
				Reply::Status(status, body) => {
					let response = http::Response::builder().status(status).body(body).unwrap();
					Ok(Some(response.into()))
				}
				Reply::Nil => Ok(None),
				Reply::Hang => std::future::pending().await,
			}
		}
	}

	fn client(mock: &Arc<Mock>) -> Client {
		Client::builder().transport(mock.clone()).access_key("key").build().unwrap()
	}

	#[tokio::test]
	async fn test_latest() {
		let mock = Mock::new(Reply::Status(200, BODY));
		let response = client(&mock).latest([filter::base(USD), filter::symbols([EUR])]).await.unwrap();
		let url = "https://data.fixer.io/api/latest?access_key=key&base=USD&symbols=EUR";
		assert_eq!(mock.urls(), [url]);
		assert_eq!(response.rates["EUR"], 0.9);
		assert_eq!(response.base, Some(USD));
		assert_eq!(response.links.self_url(), Some(url));
		assert_eq!(response.links.base_url(), Some(DEFAULT_BASE_URL));
	}

	#[tokio::test]
	async fn test_date() {
		let mock = Mock::new(Reply::Status(200, BODY));
		let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
		let response = client(&mock)
			.date(date, [filter::symbols([SEK, DKK]), filter::base(EUR), filter::base(USD)])
			.await
			.unwrap();
		let url = "https://data.fixer.io/api/2020-01-01?access_key=key&base=USD&symbols=DKK%2CSEK";
		assert_eq!(mock.urls(), [url]);
		assert_eq!(response.date, Some(date));
		assert_eq!(response.links.self_url(), Some(url));
	}

	#[tokio::test]
	async fn test_headers() {
		let mock = Mock::new(Reply::Status(200, BODY));
		let client = Client::builder().transport(mock.clone()).user_agent("test-agent").build().unwrap();
		client.latest([]).await.unwrap();
		let requests = mock.requests.lock().unwrap();
		let request = &requests[0];
		assert_eq!(request.method(), &Method::GET);
		assert_eq!(request.url().as_str(), "https://data.fixer.io/api/latest");
		assert_eq!(request.headers()[ACCEPT], "application/json");
		assert_eq!(request.headers()[USER_AGENT], "test-agent");
	}

	#[tokio::test]
	async fn test_base_url() {
		let mock = Mock::new(Reply::Status(200, BODY));
		let client = Client::builder()
			.transport(mock.clone())
			.base_url("http://localhost:8080/v1/")
			.base_url("not a url")
			.build()
			.unwrap();
		assert_eq!(client.base_url().as_str(), "http://localhost:8080/v1/");
		let response = client.latest([]).await.unwrap();
		assert_eq!(response.links.base_url(), Some("http://localhost:8080/v1/"));
		assert_eq!(response.links.self_url(), Some("http://localhost:8080/v1/latest"));
		assert!(matches!(Client::builder().try_base_url("not a url"), Err(Error::InvalidBaseUrl { .. })));
	}

	#[tokio::test]
	async fn test_typed_errors() {
		for (status, expected) in [(401, "Unauthorized"), (404, "Not Found"), (422, "Unprocessable Entity"), (500, "Internal Server Error")] {
			let mock = Mock::new(Reply::Status(status, "{\"success\":false}"));
			let error = client(&mock).latest([]).await.unwrap_err();
			assert_eq!(error.to_string(), expected);
			assert_eq!(error.status().map(|status| status.as_u16()), Some(status));
		}
		let mock = Mock::new(Reply::Status(404, ""));
		assert!(matches!(client(&mock).latest([]).await, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_unexpected_status() {
		let mock = Mock::new(Reply::Status(503, "maintenance"));
		let error = client(&mock).latest([]).await.unwrap_err();
		let message = error.to_string();
		assert!(message.contains("503 Service Unavailable"));
		assert!(message.contains("maintenance"));
		match error {
			Error::UnexpectedStatus { status, body } => {
				assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
				assert_eq!(body, "maintenance");
			}
			error => panic!("unexpected error: {error}"),
		}
	}

	#[tokio::test]
	async fn test_status_before_decode() {
		let mock = Mock::new(Reply::Status(201, BODY));
		assert!(matches!(client(&mock).latest([]).await, Err(Error::UnexpectedStatus { .. })));
	}

	#[tokio::test]
	async fn test_nil_response() {
		let mock = Mock::new(Reply::Nil);
		assert!(matches!(client(&mock).latest([]).await, Err(Error::NilResponse)));
	}

	#[tokio::test]
	async fn test_decode_error() {
		let mock = Mock::new(Reply::Status(200, "{\"success\":"));
		assert!(matches!(client(&mock).latest([]).await, Err(Error::Decode(_))));
	}

	#[tokio::test]
	async fn test_decode_trailing_bytes() {
		let mock = Mock::new(Reply::Status(200, r#"{"success":true,"date":"2020-01-01","base":"USD","rates":{}} extra"#));
		assert!(matches!(client(&mock).latest([]).await, Err(Error::Decode(_))));
	}

	#[tokio::test]
	async fn test_api_error() {
		let mock = Mock::new(Reply::Status(200, r#"{"success":false,"error":{"code":101,"type":"missing_access_key","info":"You have not supplied an API Access Key."}}"#));
		let response = client(&mock).latest([filter::base(EUR)]).await.unwrap();
		assert!(!response.success);
		assert!(response.rates.is_empty());
		let error = response.error.unwrap();
		assert_eq!(error.code, 101);
		assert_eq!(error.kind.as_deref(), Some("missing_access_key"));
		assert_eq!(response.links.self_url(), Some("https://data.fixer.io/api/latest?access_key=key&base=EUR"));
	}

	#[tokio::test]
	async fn test_long_error_body() {
		const LONG: &str = "not found, not found, not found, not found, not found, not found, not found, not found, not found";
		assert!(LONG.len() > DRAIN_LIMIT);
		let mock = Mock::new(Reply::Status(404, LONG));
		let client = client(&mock);
		assert!(matches!(client.latest([]).await, Err(Error::NotFound)));
		assert!(matches!(client.latest([]).await, Err(Error::NotFound)));
		assert_eq!(mock.urls().len(), 2);
	}

	#[test]
	fn test_default_base_url() {
		let mock = Mock::new(Reply::Nil);
		let client = Client::builder().transport(mock).build().unwrap();
		assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
	}

	#[tokio::test]
	async fn test_cancel() {
		let mock = Mock::new(Reply::Hang);
		let client = client(&mock);
		let result = tokio::time::timeout(Duration::from_millis(20), client.latest([])).await;
		assert!(result.is_err());
		assert_eq!(mock.urls().len(), 1);
	}

	#[test]
	fn test_debug_hides_access_key() {
		let client = Client::builder().access_key("secret").build().unwrap();
		assert!(!format!("{client:?}").contains("secret"));
	}
}
