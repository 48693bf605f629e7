use crate::error::Result;
use crate::io::{read_bytes, write_bytes};
use crate::model::frozen::FrozenSample;

use super::Codec;

/// Stores frozen samples as postcard-encoded files.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
	fn load(&self, path: &str) -> Result<FrozenSample> {
		let bytes = read_bytes(path)?;
		Ok(postcard::from_bytes(&bytes)?)
	}

	fn dump(&self, frozen: &FrozenSample, path: &str) -> Result<()> {
		let bytes = postcard::to_stdvec(frozen)?;
		write_bytes(path, &bytes)
	}
}
