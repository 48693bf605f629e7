use std::sync::Arc;

use log::trace;
use rand::Rng;

use crate::error::Result;
use crate::model::chain::State;
use crate::model::generation_input::{Defaults, ParagraphInput, SentenceInput};
use crate::model::sample::Sample;
use crate::model::variate::{clamp_length, positive_length};

/// Generates random strings of plausible text.
///
/// The text follows a random walk over the sample's word-length chain:
/// only paragraph, sentence and word lengths and some basic punctuation
/// come from the analysed text. Words come from the lexicon, picked by
/// length.
///
/// # Responsibilities
/// - Pick single words, optionally of a given length
/// - Walk the chain into sentences of a target length
/// - Group sentences into paragraphs
/// - Derive generators with altered statistics (`with_defaults`)
///
/// A generator only holds a shared reference to its sample. Every random
/// choice is drawn from the `Rng` passed to the call, so a seeded source
/// reproduces the same text.
#[derive(Clone, Debug)]
pub struct Generator {
	sample: Arc<Sample>,
}

impl Generator {
	/// Creates a generator over an owned or shared sample.
	pub fn new(sample: impl Into<Arc<Sample>>) -> Self {
		Self { sample: sample.into() }
	}

	/// Creates a generator over the bundled lorem-ipsum sample.
	///
	/// # Errors
	/// Only if the bundled data were invalid.
	pub fn lorem_ipsum() -> Result<Self> {
		Ok(Self::new(Sample::lorem_ipsum()?))
	}

	pub fn sample(&self) -> &Sample {
		&self.sample
	}

	/// Returns a generator over a copy of the sample with some defaults
	/// replaced.
	///
	/// The chain and the dictionary are shared, not copied; this generator
	/// and its sample are left untouched.
	///
	/// ```
	/// use loremipsum_core::model::generation_input::{Defaults, SentenceInput};
	/// use loremipsum_core::model::generator::Generator;
	/// use loremipsum_core::model::variate::make_rng;
	///
	/// let generator = Generator::lorem_ipsum().unwrap();
	/// let short = generator.with_defaults(&Defaults {
	/// 	sentence_mean: Some(0.9),
	/// 	sentence_sigma: Some(0.9),
	/// 	..Defaults::default()
	/// });
	/// let mut rng = make_rng(Some(1));
	/// assert_eq!(short.generate_sentences(3, SentenceInput::default(), &mut rng).count(), 3);
	/// ```
	pub fn with_defaults(&self, defaults: &Defaults) -> Self {
		Self::new(self.sample.with_defaults(defaults))
	}

	/// Selects a random word from the lexicon.
	///
	/// - `Some(length)`: a word of exactly that length, or `None` when the
	///   lexicon has no such word
	/// - `None`: a word of a uniformly chosen present length
	pub fn generate_word<R: Rng + ?Sized>(&self, length: Option<usize>, rng: &mut R) -> Option<&str> {
		self.sample.dictionary().choose(length, rng)
	}

	/// Lazily yields `amount` results of `generate_word`.
	pub fn generate_words<'a, R: Rng + ?Sized>(
		&'a self,
		amount: usize,
		length: Option<usize>,
		rng: &'a mut R,
	) -> Words<'a, R> {
		Words { generator: self, length, remaining: amount, rng }
	}

	/// Generates a single sentence.
	///
	/// # Behavior
	/// - Target length is `sentence_len`, or drawn from the (possibly
	///   overridden) sentence mean and sigma, clamped to `MAX_LENGTH`
	/// - With `incipit`, the sample's first sentence opens the result,
	///   truncated to the target length
	/// - Each step picks a transition, drops it if its delimiter would end
	///   the sentence early, then picks a word of the closest length that
	///   differs from the previous word whenever possible
	/// - The result is capitalized, trailing punctuation is replaced by a
	///   period
	///
	/// # Returns
	/// `(word_count, text)`
	pub fn generate_sentence<R: Rng + ?Sized>(&self, input: &SentenceInput, rng: &mut R) -> (usize, String) {
		let sample = &*self.sample;
		let statistics = sample.statistics();
		let target = match input.sentence_len {
			Some(len) => clamp_length(len),
			None => positive_length(
				input.sentence_mean.unwrap_or(statistics.sentence_mean),
				input.sentence_sigma.unwrap_or(statistics.sentence_sigma),
				rng,
			),
		};

		let chain = sample.chain();
		let dictionary = sample.dictionary();
		let sentence_delimiters = sample.sentence_delimiters();

		let mut words: Vec<String> = Vec::new();
		if input.incipit {
			words.extend(sample.incipit().split_whitespace().take(target).map(str::to_owned));
		}

		let mut state: Option<State> = None;
		let mut previous_word: Option<&str> = None;
		while words.len() < target {
			// Unknown (or no) state: restart from a sentence opening
			let current = match state {
				Some(state) if chain.contains(&state) => state,
				_ => match chain.choose_opening(rng) {
					Some(opening) => opening,
					None => break,
				},
			};

			let Some(transition) = chain.choose_transition(&current, rng) else {
				break;
			};
			let delimiter = transition.delimiter.filter(|d| !sentence_delimiters.contains(*d));
			let Some(length) = dictionary.closest_length(transition.length) else {
				break;
			};
			let Some(word) = dictionary.choose_distinct(length, previous_word, rng) else {
				break;
			};
			trace!("{current:?} -> {} ({word:?}, {delimiter:?})", transition.length);

			previous_word = Some(word);
			let mut token = word.to_owned();
			token.extend(delimiter);
			words.push(token);
			state = Some((current.1, transition.length));
		}

		let text = finish_sentence(&words.join(" "), sample.word_delimiters(), sentence_delimiters);
		(words.len(), text)
	}

	/// Lazily yields `amount` sentences.
	///
	/// Only the first sentence honors `input.incipit`.
	pub fn generate_sentences<'a, R: Rng + ?Sized>(
		&'a self,
		amount: usize,
		input: SentenceInput,
		rng: &'a mut R,
	) -> Sentences<'a, R> {
		Sentences { generator: self, input, remaining: amount, rng }
	}

	/// Generates a single paragraph.
	///
	/// The sentence count is `paragraph_len`, or drawn from the (possibly
	/// overridden) paragraph mean and sigma, clamped to `MAX_LENGTH`.
	/// Sentences follow `input.sentence`.
	///
	/// # Returns
	/// `(sentence_count, word_count, text)`
	pub fn generate_paragraph<R: Rng + ?Sized>(&self, input: &ParagraphInput, rng: &mut R) -> (usize, usize, String) {
		let statistics = self.sample.statistics();
		let target = match input.paragraph_len {
			Some(len) => clamp_length(len),
			None => positive_length(
				input.paragraph_mean.unwrap_or(statistics.paragraph_mean),
				input.paragraph_sigma.unwrap_or(statistics.paragraph_sigma),
				rng,
			),
		};

		let mut word_count = 0;
		let mut sentences = Vec::new();
		for (count, text) in self.generate_sentences(target, input.sentence.clone(), rng) {
			word_count += count;
			sentences.push(text);
		}
		(target, word_count, sentences.join(" "))
	}

	/// Lazily yields `amount` paragraphs.
	///
	/// Only the first paragraph honors `input.sentence.incipit`.
	pub fn generate_paragraphs<'a, R: Rng + ?Sized>(
		&'a self,
		amount: usize,
		input: ParagraphInput,
		rng: &'a mut R,
	) -> Paragraphs<'a, R> {
		Paragraphs { generator: self, input, remaining: amount, rng }
	}
}

impl From<Sample> for Generator {
	fn from(sample: Sample) -> Self {
		Self::new(sample)
	}
}

/// Capitalizes the first char, replaces trailing punctuation with a period.
///
/// Only the first char changes case: the rest is not lowercased, so proper
/// nouns and an incipit keep their case.
fn finish_sentence(text: &str, word_delimiters: &str, sentence_delimiters: &str) -> String {
	let trimmed = text.trim_end_matches(|c: char| {
		c.is_whitespace() || word_delimiters.contains(c) || sentence_delimiters.contains(c)
	});
	let mut chars = trimmed.chars();
	let mut sentence: String = match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	};
	sentence.push('.');
	sentence
}

/// Iterator returned by `Generator::generate_words`.
pub struct Words<'a, R: ?Sized> {
	generator: &'a Generator,
	length: Option<usize>,
	remaining: usize,
	rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Iterator for Words<'a, R> {
	type Item = Option<&'a str>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		self.remaining -= 1;
		Some(self.generator.generate_word(self.length, &mut *self.rng))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<R: Rng + ?Sized> ExactSizeIterator for Words<'_, R> {}

/// Iterator returned by `Generator::generate_sentences`.
pub struct Sentences<'a, R: ?Sized> {
	generator: &'a Generator,
	input: SentenceInput,
	remaining: usize,
	rng: &'a mut R,
}

impl<R: Rng + ?Sized> Iterator for Sentences<'_, R> {
	type Item = (usize, String);

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		self.remaining -= 1;
		let sentence = self.generator.generate_sentence(&self.input, &mut *self.rng);
		self.input.incipit = false;
		Some(sentence)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<R: Rng + ?Sized> ExactSizeIterator for Sentences<'_, R> {}

/// Iterator returned by `Generator::generate_paragraphs`.
pub struct Paragraphs<'a, R: ?Sized> {
	generator: &'a Generator,
	input: ParagraphInput,
	remaining: usize,
	rng: &'a mut R,
}

impl<R: Rng + ?Sized> Iterator for Paragraphs<'_, R> {
	type Item = (usize, usize, String);

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}
		self.remaining -= 1;
		let paragraph = self.generator.generate_paragraph(&self.input, &mut *self.rng);
		self.input.sentence.incipit = false;
		Some(paragraph)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.remaining, Some(self.remaining))
	}
}

impl<R: Rng + ?Sized> ExactSizeIterator for Paragraphs<'_, R> {}
