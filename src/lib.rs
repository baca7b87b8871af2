//! [Fixer](https://fixer.io/) foreign exchange rates API library.
//!
//! # Examples
//! ```no_run
//! # async fn run() -> Result<(), fixer::Error> {
//! use fixer::{filter, currency::list::*};
//!
//! let client = fixer::Client::builder().access_key("…").build()?;
//! let response = client.latest([filter::base(USD), filter::symbols([EUR, SEK])]).await?;
//! println!("1 USD = {:?} EUR", response.rate("EUR"));
//! # Ok(()) }
//! ```
//!
//! # Logging
//! The library never prints or installs a subscriber. It only emits [`tracing`](https://docs.rs/tracing)
//! events: `debug` for each request (path and filter, never the access key) and for an ignored base URL,
//! `trace` for each response status. They are silent unless the application installs a subscriber.

#![deny(missing_docs)]

pub mod client;
pub mod currency;
pub mod error;
pub mod filter;
pub mod response;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use currency::{Currencies, Currency};
pub use error::Error;
pub use filter::Filter;
pub use response::{ApiError, Links, Response};
pub use transport::Transport;
