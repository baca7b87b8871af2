//! Rates [`Response`] envelope.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// The decoded body of a rates request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
	/// Whether the service reports success.
	pub success: bool,
	/// The logical failure reported by the service, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<ApiError>,
	/// The unix time the rates were collected at.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<i64>,
	/// Whether the rates are historical (set for date requests).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub historical: Option<bool>,
	/// The date of the rates, absent on logical failure.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub date: Option<NaiveDate>,
	/// The currency the rates are expressed against, absent on logical failure.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub base: Option<Currency>,
	/// Rate per currency, empty on logical failure.
	#[serde(default)]
	pub rates: BTreeMap<Currency, f64>,
	/// Request metadata, filled in by the client.
	#[serde(default)]
	pub links: Links,
}

impl Response {
	/// Gets the rate for the given currency.
	///
	/// The base currency is always `1.0`, even if the service omitted it.
	pub fn rate(&self, currency: &str) -> Option<f64> {
		self.rates.get(currency).copied().or_else(|| {
			self.base.as_ref().filter(|base| base.as_str() == currency).map(|_| 1.0)
		})
	}

	/// Converts an amount between currencies.
	///
	/// Returns [`None`] if either the `from` or `to` currencies are missing.
	pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
		let from_value = self.rate(from)?;
		let to_value = self.rate(to)?;
		Some(amount * (to_value / from_value))
	}
}

/// A logical failure reported by the service in a success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
	/// The error code.
	pub code: i64,
	/// The error description.
	#[serde(default)]
	pub info: String,
	/// The error type.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
}

/// Links about a [`Response`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links(pub BTreeMap<String, String>);

impl Links {
	/// The key of the request URL.
	pub const SELF: &'static str = "self";
	/// The key of the configured base URL.
	pub const BASE: &'static str = "base";

	pub(crate) fn new(base: &str, this: &str) -> Self {
		Self(BTreeMap::from([(Self::BASE.to_owned(), base.to_owned()), (Self::SELF.to_owned(), this.to_owned())]))
	}

	/// Gets the link by key.
	pub fn get(&self, key: &str) -> Option<&str> { self.0.get(key).map(String::as_str) }

	/// The exact URL that was requested.
	pub fn self_url(&self) -> Option<&str> { self.get(Self::SELF) }

	/// The base URL the client was configured with.
	pub fn base_url(&self) -> Option<&str> { self.get(Self::BASE) }
}
