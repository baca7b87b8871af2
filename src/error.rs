//! [`Error`] type.

use reqwest::StatusCode;

/// An error from the API or from the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The access key is missing or invalid (`401`).
	#[error("Unauthorized")]
	Unauthorized,
	/// The requested resource does not exist (`404`).
	#[error("Not Found")]
	NotFound,
	/// The request parameters were rejected (`422`).
	#[error("Unprocessable Entity")]
	UnprocessableEntity,
	/// The service failed (`500`).
	#[error("Internal Server Error")]
	InternalServerError,
	/// The transport completed without an error and without a response.
	#[error("Unexpected nil response")]
	NilResponse,
	/// Any other non-success status.
	#[error("Unexpected status: {status}: {body}")]
	UnexpectedStatus {
		/// The response status.
		status: StatusCode,
		/// The response body text.
		body: String,
	},
	/// HTTP error.
	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),
	/// Failed to decode the response.
	#[error("failed to decode the response: {0}")]
	Decode(#[from] serde_json::Error),
	/// Failed to build the request URL.
	#[error("failed to build the request url: {0}")]
	Url(#[from] url::ParseError),
	/// The base URL could not be parsed.
	#[error("invalid base url {url:?}: {source}")]
	InvalidBaseUrl {
		/// The rejected URL string.
		url: String,
		/// The parse error.
		source: url::ParseError,
	},
	/// The user agent is not a valid header value.
	#[error("invalid user agent: {0}")]
	InvalidUserAgent(#[from] reqwest::header::InvalidHeaderValue),
}

impl Error {
	/// Maps a status to its typed error.
	///
	/// Returns [`None`] for success statuses and for statuses that need the body to be described,
	/// see [`Error::UnexpectedStatus`].
	pub fn from_status(status: StatusCode) -> Option<Self> {
		match status {
			StatusCode::UNAUTHORIZED => Some(Self::Unauthorized),
			StatusCode::NOT_FOUND => Some(Self::NotFound),
			StatusCode::UNPROCESSABLE_ENTITY => Some(Self::UnprocessableEntity),
			StatusCode::INTERNAL_SERVER_ERROR => Some(Self::InternalServerError),
			_ => None,
		}
	}

	/// Gets the status the error was mapped from, if any.
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
			Self::NotFound => Some(StatusCode::NOT_FOUND),
			Self::UnprocessableEntity => Some(StatusCode::UNPROCESSABLE_ENTITY),
			Self::InternalServerError => Some(StatusCode::INTERNAL_SERVER_ERROR),
			Self::UnexpectedStatus { status, .. } => Some(*status),
			Self::Http(error) => error.status(),
			_ => None,
		}
	}
}
