use crate::error::Result;
use crate::io::{read_text, write_bytes};
use crate::model::frozen::FrozenSample;

use super::Codec;

/// Stores frozen samples as pretty-printed JSON files.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
	fn load(&self, path: &str) -> Result<FrozenSample> {
		Ok(serde_json::from_str(&read_text(path)?)?)
	}

	fn dump(&self, frozen: &FrozenSample, path: &str) -> Result<()> {
		let text = serde_json::to_string_pretty(frozen)?;
		write_bytes(path, text.as_bytes())
	}
}
