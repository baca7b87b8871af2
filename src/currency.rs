//! [Currency codes](Currency).

use std::{
	borrow::{Borrow, Cow},
	convert::Infallible,
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// [Currency code](https://en.wikipedia.org/wiki/ISO_4217).
///
/// The code is passed through verbatim, no validation is performed against a list of known currencies.
/// It's recommended to use the constants in the [`list`] module.
#[derive(Debug, Hash, Clone, PartialEq, PartialOrd, Eq, Ord)]
pub struct Currency(Cow<'static, str>);

/// The default currency is [`USD`](list::USD).
impl Default for Currency { #[inline] fn default() -> Self { list::USD } }

impl Currency {
	/// Creates a new [`Currency`] from any code.
	pub fn new(code: impl Into<String>) -> Self { Self(Cow::Owned(code.into())) }

	/// Creates a new [`Currency`] from a static code.
	pub const fn new_static(code: &'static str) -> Self { Self(Cow::Borrowed(code)) }

	/// Gets the code.
	#[inline] pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for Currency {
	fn from(value: &str) -> Self { Self::new(value) }
}

impl From<String> for Currency {
	fn from(value: String) -> Self { Self::new(value) }
}

impl FromStr for Currency {
	type Err = Infallible;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(s.into()) }
}

impl AsRef<str> for Currency {
	#[inline] fn as_ref(&self) -> &str { self.as_str() }
}

// Lets maps keyed by `Currency` be queried with a plain `&str`.
impl Borrow<str> for Currency {
	#[inline] fn borrow(&self) -> &str { self.as_str() }
}

impl Display for Currency {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result { self.as_str().fmt(f) }
}

impl Serialize for Currency {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Currency {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer).map(Self::new)
	}
}

/// An ordered collection of [`Currency`] values.
#[derive(Debug, Hash, Default, Clone, PartialEq, Eq)]
pub struct Currencies(pub Vec<Currency>);

impl Currencies {
	/// Renders the currencies as a query value.
	///
	/// The codes are sorted ascending and joined with `,`. Repeated codes are kept.
	///
	/// # Examples
	/// ```
	/// # use fixer::currency::{Currencies, list::*};
	/// assert_eq!(Currencies(vec![SEK, DKK]).render(), "DKK,SEK");
	/// assert_eq!(Currencies::default().render(), "");
	/// ```
	pub fn render(&self) -> String {
		if self.is_empty() { return String::new(); }
		let mut codes: Vec<&str> = self.0.iter().map(Currency::as_str).collect();
		codes.sort_unstable();
		codes.join(",")
	}

	/// Gets whether there are no currencies.
	#[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl From<Vec<Currency>> for Currencies {
	fn from(value: Vec<Currency>) -> Self { Self(value) }
}

impl FromIterator<Currency> for Currencies {
	fn from_iter<T: IntoIterator<Item = Currency>>(iter: T) -> Self { Self(iter.into_iter().collect()) }
}

impl Display for Currencies {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result { self.render().fmt(f) }
}

/// Common currency constants.
pub mod list {
	use super::Currency;

	macro_rules! defcurrency {
		($($id:ident),* $(,)?) => {
			$(
				#[doc = concat!("The `", stringify!($id), "` currency.")]
				pub const $id: Currency = Currency::new_static(stringify!($id));
			)*

			/// All the listed currencies.
			pub const ARRAY: &[Currency] = &[$($id),*];
		};
	}

	defcurrency!(
		AUD, BGN, BRL, CAD, CHF, CNY, CZK, DKK, EUR, GBP, HKD, HRK, HUF, IDR, ILS, INR, ISK, JPY,
		KRW, MXN, MYR, NOK, NZD, PHP, PLN, RON, RUB, SEK, SGD, THB, TRY, USD, ZAR,
	);
}
