use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::model::chain::{State, Transition};
use crate::model::sample::Sample;

/// Canonical, order-independent snapshot of a `Sample`.
///
/// This is the exchange format of every codec. `Sample::freeze` always
/// produces sorted sequences:
/// - `chains` sorted by state, each transition list sorted
/// - `dictionary` sorted by length, each word list sorted
/// - `starts` sorted without duplicates
///
/// `Sample::thawed` accepts the same data in any order.
///
/// Floats are compared and hashed bit for bit, which keeps `Eq` and `Hash`
/// consistent with each other.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FrozenSample {
	pub text: String,
	pub lexicon: String,
	pub word_delimiters: String,
	pub sentence_delimiters: String,
	pub incipit: String,
	pub sentence_mean: f64,
	pub sentence_sigma: f64,
	pub paragraph_mean: f64,
	pub paragraph_sigma: f64,
	pub chains: Vec<(State, Vec<Transition>)>,
	pub dictionary: Vec<(usize, Vec<String>)>,
	pub starts: Vec<State>,
}

impl FrozenSample {
	fn float_bits(&self) -> [u64; 4] {
		[
			self.sentence_mean.to_bits(),
			self.sentence_sigma.to_bits(),
			self.paragraph_mean.to_bits(),
			self.paragraph_sigma.to_bits(),
		]
	}
}

impl PartialEq for FrozenSample {
	fn eq(&self, other: &Self) -> bool {
		self.text == other.text
			&& self.lexicon == other.lexicon
			&& self.word_delimiters == other.word_delimiters
			&& self.sentence_delimiters == other.sentence_delimiters
			&& self.incipit == other.incipit
			&& self.float_bits() == other.float_bits()
			&& self.chains == other.chains
			&& self.dictionary == other.dictionary
			&& self.starts == other.starts
	}
}

impl Eq for FrozenSample {}

impl Hash for FrozenSample {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.text.hash(state);
		self.lexicon.hash(state);
		self.word_delimiters.hash(state);
		self.sentence_delimiters.hash(state);
		self.incipit.hash(state);
		self.float_bits().hash(state);
		self.chains.hash(state);
		self.dictionary.hash(state);
		self.starts.hash(state);
	}
}

impl Sample {
	/// Returns the canonical frozen form of this sample.
	pub fn freeze(&self) -> FrozenSample {
		let statistics = self.statistics();
		FrozenSample {
			text: self.text().to_owned(),
			lexicon: self.lexicon().to_owned(),
			word_delimiters: self.word_delimiters().to_owned(),
			sentence_delimiters: self.sentence_delimiters().to_owned(),
			incipit: self.incipit().to_owned(),
			sentence_mean: statistics.sentence_mean,
			sentence_sigma: statistics.sentence_sigma,
			paragraph_mean: statistics.paragraph_mean,
			paragraph_sigma: statistics.paragraph_sigma,
			chains: self.chain().entries().map(|(state, list)| (state, list.to_vec())).collect(),
			dictionary: self.dictionary().entries().map(|(length, words)| (length, words.to_vec())).collect(),
			starts: self.chain().starts().collect(),
		}
	}
}

impl TryFrom<FrozenSample> for Sample {
	type Error = crate::error::Error;

	fn try_from(frozen: FrozenSample) -> Result<Self, Self::Error> {
		Self::thawed(frozen)
	}
}

impl From<&Sample> for FrozenSample {
	fn from(sample: &Sample) -> Self {
		sample.freeze()
	}
}
