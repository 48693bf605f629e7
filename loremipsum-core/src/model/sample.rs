use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::debug;

use crate::error::{Error, Result};
use crate::model::chain::{START_STATE, State, Transition, WordLengthChain};
use crate::model::dictionary::Dictionary;
use crate::model::frozen::FrozenSample;
use crate::model::generation_input::Defaults;
use crate::model::variate::{mean, sigma};
use crate::serialization::Schemes;

/// Punctuation stripped from the end of words during analysis.
pub const DEFAULT_WORD_DELIMITERS: &str = ",.;:!?";

/// Punctuation closing a sentence.
pub const DEFAULT_SENTENCE_DELIMITERS: &str = ".!?";

/// Name under which the bundled sample is exposed.
pub const LOREM_IPSUM: &str = "lorem";

const LOREM_IPSUM_TEXT: &str = include_str!("../../data/sample.txt");
const LOREM_IPSUM_LEXICON: &str = include_str!("../../data/lexicon.txt");

/// Inputs and everything derived from their structure.
///
/// Shared between a sample and the samples derived from it through
/// `with_defaults`, so the chain and the dictionary are never copied.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct Analysis {
	pub(crate) text: String,
	pub(crate) lexicon: String,
	pub(crate) word_delimiters: String,
	pub(crate) sentence_delimiters: String,
	pub(crate) dictionary: Dictionary,
	pub(crate) chain: WordLengthChain,
}

impl Analysis {
	/// Rejects analyses no sentence could be generated from.
	fn validate(&self) -> Result<()> {
		if self.dictionary.is_empty() {
			return Err(Error::InvalidLexicon);
		}
		if self.chain.is_empty() {
			return Err(Error::InvalidText("no word transitions".to_owned()));
		}
		if self.chain.openings().is_empty() {
			return Err(Error::InvalidText("no usable sentence start".to_owned()));
		}
		Ok(())
	}
}

/// Length distributions of the analysed text.
///
/// Compared and hashed bit for bit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Statistics {
	/// Mean sentence length, in words.
	pub sentence_mean: f64,
	pub sentence_sigma: f64,
	/// Mean paragraph length, in sentences.
	pub paragraph_mean: f64,
	pub paragraph_sigma: f64,
}

impl Statistics {
	fn bits(&self) -> [u64; 4] {
		[
			self.sentence_mean.to_bits(),
			self.sentence_sigma.to_bits(),
			self.paragraph_mean.to_bits(),
			self.paragraph_sigma.to_bits(),
		]
	}
}

impl PartialEq for Statistics {
	fn eq(&self, other: &Self) -> bool {
		self.bits() == other.bits()
	}
}

impl Eq for Statistics {}

impl Hash for Statistics {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.bits().hash(state);
	}
}

/// The statistical model generated text is based on.
///
/// A sample is built once, either by analysing a text and a lexicon
/// (`cooked`) or by decoding a frozen form (`thawed`), and is never mutated
/// afterwards. Generated sentences follow the paragraph, sentence and word
/// length distributions and the punctuation of the analysed text; the words
/// themselves come from the lexicon.
///
/// Sample text is a number of paragraphs separated by blank lines. Each
/// paragraph holds sentences closed by one of the sentence delimiters, and
/// sentences hold words separated by white space.
///
/// ## Invariants
/// - The dictionary and the chain are non-empty
/// - At least one state both opens a sentence and has transitions
/// - `hash` is the hash of the other fields
#[derive(Clone, Debug)]
pub struct Sample {
	analysis: Arc<Analysis>,
	statistics: Statistics,
	incipit: String,
	hash: u64,
}

impl Sample {
	/// Starts a `SampleBuilder`.
	pub fn builder() -> SampleBuilder {
		SampleBuilder::default()
	}

	/// Analyses `text` and indexes `lexicon`.
	///
	/// # Errors
	/// - `Error::InvalidLexicon` if the lexicon holds no word
	/// - `Error::InvalidText` if the text yields no word transition
	pub fn cooked(text: &str, lexicon: &str, word_delimiters: &str, sentence_delimiters: &str) -> Result<Self> {
		let text = text.trim().to_owned();
		let word_delimiters = word_delimiters.trim().to_owned();
		let sentence_delimiters = sentence_delimiters.trim().to_owned();

		let mut chain = WordLengthChain::new();
		let mut state: State = START_STATE;
		let mut incipit: Option<String> = None;
		let mut sentence_lens: Vec<usize> = Vec::new();
		let mut paragraph_lens: Vec<usize> = Vec::new();

		for paragraph in split_paragraphs(&text) {
			let mut sentence_count = 0;
			for sentence in split_sentences(&paragraph, &sentence_delimiters) {
				sentence_count += 1;
				incipit.get_or_insert_with(|| sentence.trim().to_owned());

				let mut word_count = 0;
				for raw in sentence.split_whitespace() {
					word_count += 1;
					let (word, delimiter) = strip_delimiters(raw, &word_delimiters);
					let length = word.chars().count();
					if length == 0 {
						continue;
					}
					chain.record(state, Transition::new(length, delimiter));
					state = (state.1, length);
				}
				sentence_lens.push(word_count);
			}
			paragraph_lens.push(sentence_count);
		}

		let statistics = Statistics {
			sentence_mean: mean(&sentence_lens),
			sentence_sigma: sigma(&sentence_lens),
			paragraph_mean: mean(&paragraph_lens),
			paragraph_sigma: sigma(&paragraph_lens),
		};

		let analysis = Analysis {
			dictionary: Dictionary::from_lexicon(lexicon),
			lexicon: lexicon.trim().to_owned(),
			text,
			word_delimiters,
			sentence_delimiters,
			chain: chain.seal(),
		};
		analysis.validate()?;

		debug!(
			"Cooked sample: {} paragraphs, {} sentences, {} chain states, {} word lengths",
			paragraph_lens.len(),
			sentence_lens.len(),
			analysis.chain.len(),
			analysis.dictionary.len()
		);

		Ok(Self::assemble(Arc::new(analysis), statistics, incipit.unwrap_or_default()))
	}

	/// Rebuilds a sample from its frozen form.
	///
	/// Entries may come in any order; they are re-sorted and validated
	/// exactly like a freshly cooked sample.
	///
	/// # Errors
	/// Same as `cooked`.
	pub fn thawed(frozen: FrozenSample) -> Result<Self> {
		let analysis = Analysis {
			text: frozen.text,
			lexicon: frozen.lexicon,
			word_delimiters: frozen.word_delimiters,
			sentence_delimiters: frozen.sentence_delimiters,
			dictionary: Dictionary::from_entries(frozen.dictionary),
			chain: WordLengthChain::from_parts(frozen.chains, frozen.starts),
		};
		analysis.validate()?;

		debug!(
			"Thawed sample: {} chain states, {} word lengths",
			analysis.chain.len(),
			analysis.dictionary.len()
		);

		let statistics = Statistics {
			sentence_mean: frozen.sentence_mean,
			sentence_sigma: frozen.sentence_sigma,
			paragraph_mean: frozen.paragraph_mean,
			paragraph_sigma: frozen.paragraph_sigma,
		};
		Ok(Self::assemble(Arc::new(analysis), statistics, frozen.incipit))
	}

	/// Cooks the bundled lorem-ipsum text and lexicon.
	///
	/// # Errors
	/// Only if the bundled data were invalid.
	pub fn lorem_ipsum() -> Result<Self> {
		Self::cooked(
			LOREM_IPSUM_TEXT,
			LOREM_IPSUM_LEXICON,
			DEFAULT_WORD_DELIMITERS,
			DEFAULT_SENTENCE_DELIMITERS,
		)
	}

	/// Loads a frozen sample through the default codec registry.
	///
	/// # Errors
	/// Codec, I/O and validation errors.
	pub fn load(locator: &str) -> Result<Self> {
		Self::thawed(Schemes::default().load(locator)?)
	}

	/// Freezes this sample and stores it through the default codec registry.
	///
	/// # Errors
	/// Codec and I/O errors.
	pub fn dump(&self, locator: &str) -> Result<()> {
		Schemes::default().dump(&self.freeze(), locator)
	}

	/// Returns a new sample sharing this one's analysis, with the fields
	/// set in `defaults` replaced.
	pub fn with_defaults(&self, defaults: &Defaults) -> Self {
		let statistics = Statistics {
			sentence_mean: defaults.sentence_mean.unwrap_or(self.statistics.sentence_mean),
			sentence_sigma: defaults.sentence_sigma.unwrap_or(self.statistics.sentence_sigma),
			paragraph_mean: defaults.paragraph_mean.unwrap_or(self.statistics.paragraph_mean),
			paragraph_sigma: defaults.paragraph_sigma.unwrap_or(self.statistics.paragraph_sigma),
		};
		let incipit = defaults.incipit.clone().unwrap_or_else(|| self.incipit.clone());
		Self::assemble(Arc::clone(&self.analysis), statistics, incipit)
	}

	fn assemble(analysis: Arc<Analysis>, statistics: Statistics, incipit: String) -> Self {
		let mut hasher = DefaultHasher::new();
		analysis.hash(&mut hasher);
		statistics.hash(&mut hasher);
		incipit.hash(&mut hasher);
		Self { analysis, statistics, incipit, hash: hasher.finish() }
	}

	pub fn text(&self) -> &str {
		&self.analysis.text
	}

	pub fn lexicon(&self) -> &str {
		&self.analysis.lexicon
	}

	pub fn word_delimiters(&self) -> &str {
		&self.analysis.word_delimiters
	}

	pub fn sentence_delimiters(&self) -> &str {
		&self.analysis.sentence_delimiters
	}

	pub fn dictionary(&self) -> &Dictionary {
		&self.analysis.dictionary
	}

	pub fn chain(&self) -> &WordLengthChain {
		&self.analysis.chain
	}

	/// Literal first sentence of the analysed text.
	pub fn incipit(&self) -> &str {
		&self.incipit
	}

	pub fn statistics(&self) -> &Statistics {
		&self.statistics
	}

	/// `true` when both samples share the same analysis allocation.
	pub fn shares_analysis(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.analysis, &other.analysis)
	}
}

impl PartialEq for Sample {
	/// Structural comparison; differing cached hashes only short-circuit.
	fn eq(&self, other: &Self) -> bool {
		self.hash == other.hash
			&& self.statistics == other.statistics
			&& self.incipit == other.incipit
			&& (Arc::ptr_eq(&self.analysis, &other.analysis) || self.analysis == other.analysis)
	}
}

impl Eq for Sample {}

impl Hash for Sample {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.hash);
	}
}

/// Collects the optional inputs of a `Sample`.
///
/// A frozen form takes precedence over the four ingredients. Without it,
/// all of `text`, `lexicon`, `word_delimiters` and `sentence_delimiters`
/// must be set; an empty string counts as set.
#[derive(Clone, Debug, Default)]
pub struct SampleBuilder {
	frozen: Option<FrozenSample>,
	text: Option<String>,
	lexicon: Option<String>,
	word_delimiters: Option<String>,
	sentence_delimiters: Option<String>,
}

impl SampleBuilder {
	pub fn frozen(mut self, frozen: FrozenSample) -> Self {
		self.frozen = Some(frozen);
		self
	}

	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	pub fn lexicon(mut self, lexicon: impl Into<String>) -> Self {
		self.lexicon = Some(lexicon.into());
		self
	}

	pub fn word_delimiters(mut self, delimiters: impl Into<String>) -> Self {
		self.word_delimiters = Some(delimiters.into());
		self
	}

	pub fn sentence_delimiters(mut self, delimiters: impl Into<String>) -> Self {
		self.sentence_delimiters = Some(delimiters.into());
		self
	}

	/// Thaws or cooks the sample.
	///
	/// # Errors
	/// - `Error::MissingArgument` naming the first missing ingredient
	/// - Any error of `Sample::thawed` / `Sample::cooked`
	pub fn build(self) -> Result<Sample> {
		if let Some(frozen) = self.frozen {
			return Sample::thawed(frozen);
		}
		let text = self.text.ok_or(Error::MissingArgument("text"))?;
		let lexicon = self.lexicon.ok_or(Error::MissingArgument("lexicon"))?;
		let word_delimiters = self.word_delimiters.ok_or(Error::MissingArgument("word_delimiters"))?;
		let sentence_delimiters = self
			.sentence_delimiters
			.ok_or(Error::MissingArgument("sentence_delimiters"))?;
		Sample::cooked(&text, &lexicon, &word_delimiters, &sentence_delimiters)
	}
}

/// Groups non-blank lines into paragraphs.
fn split_paragraphs(text: &str) -> Vec<String> {
	let mut paragraphs = Vec::new();
	let mut current: Vec<&str> = Vec::new();
	for line in text.lines() {
		if line.trim().is_empty() {
			if !current.is_empty() {
				paragraphs.push(current.join("\n"));
				current.clear();
			}
		} else {
			current.push(line);
		}
	}
	if !current.is_empty() {
		paragraphs.push(current.join("\n"));
	}
	paragraphs
}

/// Cuts a paragraph after every sentence delimiter.
///
/// Text after the last delimiter is not a sentence and is dropped.
fn split_sentences<'a>(paragraph: &'a str, delimiters: &str) -> Vec<&'a str> {
	let mut sentences = Vec::new();
	let mut start = 0;
	for (index, c) in paragraph.char_indices() {
		if delimiters.contains(c) {
			let end = index + c.len_utf8();
			sentences.push(&paragraph[start..end]);
			start = end;
		}
	}
	sentences
}

/// Removes trailing delimiters from a word.
///
/// The reported delimiter is the first char of the stripped run, so
/// `"what?!"` gives `("what", Some('?'))`.
fn strip_delimiters<'a>(raw: &'a str, delimiters: &str) -> (&'a str, Option<char>) {
	let word = raw.trim_end_matches(|c| delimiters.contains(c));
	(word, raw[word.len()..].chars().next())
}
