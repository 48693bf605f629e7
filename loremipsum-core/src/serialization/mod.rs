//! Persistence of frozen samples.
//!
//! A locator such as `file:///tmp/lorem.bin` or `json://lorem.json` is
//! split into a scheme and a path; the scheme selects a registered `Codec`.
//! A locator without `://` is a plain path handled by the `file` scheme.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::model::frozen::FrozenSample;

/// Compact binary codec (postcard), registered as `file`.
pub mod binary;

/// Human-readable codec (serde_json), registered as `json`.
pub mod json;

pub use binary::BinaryCodec;
pub use json::JsonCodec;

/// Scheme used when a locator has none.
pub const DEFAULT_SCHEME: &str = "file";

/// A parsed `scheme://path` string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locator<'a> {
	pub scheme: &'a str,
	pub path: &'a str,
}

impl<'a> Locator<'a> {
	/// Splits a locator. Schemes are matched case-sensitively.
	pub fn parse(locator: &'a str) -> Self {
		match locator.split_once("://") {
			Some((scheme, path)) => Self { scheme, path },
			None => Self { scheme: DEFAULT_SCHEME, path: locator },
		}
	}
}

impl fmt::Display for Locator<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}://{}", self.scheme, self.path)
	}
}

/// Reads and writes frozen samples on one storage medium.
pub trait Codec: Send + Sync {
	/// Reads the frozen sample stored at `path`.
	///
	/// # Errors
	/// I/O and decoding errors.
	fn load(&self, path: &str) -> Result<FrozenSample>;

	/// Stores `frozen` at `path`.
	///
	/// # Errors
	/// I/O and encoding errors.
	fn dump(&self, frozen: &FrozenSample, path: &str) -> Result<()>;
}

/// Registry resolving locator schemes to codecs.
///
/// `Schemes::default()` knows `file` (binary) and `json`.
pub struct Schemes {
	codecs: HashMap<String, Box<dyn Codec>>,
}

impl Default for Schemes {
	fn default() -> Self {
		let mut schemes = Self::empty();
		schemes.register(DEFAULT_SCHEME, Box::new(BinaryCodec));
		schemes.register("json", Box::new(JsonCodec));
		schemes
	}
}

impl Schemes {
	/// A registry without any codec.
	pub fn empty() -> Self {
		Self { codecs: HashMap::new() }
	}

	/// Registers (or replaces) the codec of `scheme`.
	pub fn register(&mut self, scheme: &str, codec: Box<dyn Codec>) {
		self.codecs.insert(scheme.to_owned(), codec);
	}

	/// Registered scheme names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Resolves the codec of `scheme`.
	///
	/// # Errors
	/// `Error::UnsupportedScheme` when nothing is registered for it.
	pub fn get(&self, scheme: &str) -> Result<&dyn Codec> {
		self.codecs
			.get(scheme)
			.map(|codec| codec.as_ref())
			.ok_or_else(|| Error::UnsupportedScheme(scheme.to_owned()))
	}

	/// Loads the frozen sample at `locator`.
	///
	/// # Errors
	/// `Error::UnsupportedScheme`, then any codec error.
	pub fn load(&self, locator: &str) -> Result<FrozenSample> {
		let locator = Locator::parse(locator);
		let frozen = self.get(locator.scheme)?.load(locator.path)?;
		debug!("Loaded sample from {locator}");
		Ok(frozen)
	}

	/// Stores `frozen` at `locator`.
	///
	/// # Errors
	/// `Error::UnsupportedScheme`, then any codec error.
	pub fn dump(&self, frozen: &FrozenSample, locator: &str) -> Result<()> {
		let locator = Locator::parse(locator);
		self.get(locator.scheme)?.dump(frozen, locator.path)?;
		debug!("Dumped sample to {locator}");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn locator_splits_scheme() {
		assert_eq!(Locator::parse("json://out/lorem.json"), Locator { scheme: "json", path: "out/lorem.json" });
		assert_eq!(Locator::parse("file:///tmp/a.bin"), Locator { scheme: "file", path: "/tmp/a.bin" });
		assert_eq!(Locator::parse("lorem.bin"), Locator { scheme: "file", path: "lorem.bin" });
	}

	#[test]
	fn unknown_scheme_is_rejected() {
		let schemes = Schemes::default();
		assert!(matches!(schemes.load("ftp://host/x"), Err(Error::UnsupportedScheme(s)) if s == "ftp"));
		assert!(matches!(Schemes::empty().get("file"), Err(Error::UnsupportedScheme(_))));
	}

	#[test]
	fn default_registry_names() {
		assert_eq!(Schemes::default().names(), vec!["file", "json"]);
	}
}
