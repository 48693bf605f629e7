use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building, loading or storing a sample.
///
/// Generation itself never fails once a `Sample` exists: a word length
/// missing from the dictionary is reported as `None`, not as an error.
#[derive(Debug, Error)]
pub enum Error {
	/// Neither a frozen sample nor the full set of ingredients was supplied.
	#[error("Missing argument: {0}")]
	MissingArgument(&'static str),

	/// The lexicon produced an empty dictionary.
	#[error("Invalid lexicon")]
	InvalidLexicon,

	/// The sample text produced no usable chain.
	#[error("Invalid sample text: {0}")]
	InvalidText(String),

	/// No codec is registered for the locator scheme.
	#[error("Unsupported scheme '{0}'")]
	UnsupportedScheme(String),

	/// File system failure inside a codec.
	#[error("I/O error on '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Binary (postcard) encoding or decoding failure.
	#[error("Binary codec error: {0}")]
	Binary(#[from] postcard::Error),

	/// JSON encoding or decoding failure.
	#[error("JSON codec error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Wraps an I/O error with the path it happened on.
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}

	/// Returns `true` for the two invalid-model variants.
	pub fn is_invalid_model(&self) -> bool {
		matches!(self, Self::InvalidLexicon | Self::InvalidText(_))
	}
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
