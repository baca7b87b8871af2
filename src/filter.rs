//! Query [`Filter`]s.
//!
//! # Examples
//! ```
//! # use fixer::{filter, currency::list::*};
//! let filter = filter::Filter::merge([filter::base(USD), filter::symbols([EUR, GBP])]);
//! assert_eq!(filter.symbols(), Some("EUR,GBP"));
//! ```

use url::form_urlencoded;

use crate::currency::{Currencies, Currency};

/// A query fragment narrowing a request.
#[derive(Debug, Hash, Default, Clone, PartialEq, Eq)]
pub struct Filter {
	/// The `base` parameter.
	base: Option<String>,
	/// The `symbols` parameter, already rendered.
	symbols: Option<String>,
}

/// Sets the base currency the rates are expressed against.
pub fn base(currency: impl Into<Currency>) -> Filter {
	Filter { base: Some(currency.into().as_str().to_owned()), symbols: None }
}

/// Limits the rates to the given currencies.
///
/// The codes are rendered with [`Currencies::render`].
pub fn symbols(currencies: impl IntoIterator<Item = Currency>) -> Filter {
	let currencies: Currencies = currencies.into_iter().collect();
	Filter { base: None, symbols: Some(currencies.render()) }
}

impl Filter {
	/// Merges fragments in order.
	///
	/// For every key the last non-empty value wins.
	pub fn merge(fragments: impl IntoIterator<Item = Filter>) -> Self {
		fragments.into_iter().fold(Self::default(), |mut merged, fragment| {
			if let Some(base) = fragment.base.filter(|base| !base.is_empty()) {
				merged.base = Some(base);
			}
			if let Some(symbols) = fragment.symbols.filter(|symbols| !symbols.is_empty()) {
				merged.symbols = Some(symbols);
			}
			merged
		})
	}

	/// Gets the `base` value.
	#[inline] pub fn base(&self) -> Option<&str> { self.base.as_deref() }

	/// Gets the `symbols` value.
	#[inline] pub fn symbols(&self) -> Option<&str> { self.symbols.as_deref() }

	/// Gets whether the filter sets no parameter.
	pub fn is_empty(&self) -> bool { self.base.is_none() && self.symbols.is_none() }

	/// Writes the query parameters, with the access key if given.
	///
	/// Keys are written in sorted order and absent values are omitted.
	pub(crate) fn write_query<T: form_urlencoded::Target>(&self, access_key: Option<&str>, query: &mut form_urlencoded::Serializer<'_, T>) {
		if self.is_empty() && access_key.is_none() { return; }
		let pairs = [("access_key", access_key), ("base", self.base()), ("symbols", self.symbols())];
		for (key, value) in pairs {
			if let Some(value) = value.filter(|value| !value.is_empty()) {
				query.append_pair(key, value);
			}
		}
	}
}
