//! Sample analysis and text generation.
//!
//! - Word-length Markov chain (`WordLengthChain`)
//! - Length-indexed lexicon (`Dictionary`)
//! - The immutable statistical model (`Sample`) and its frozen form
//! - Generation parameters (`SentenceInput`, `ParagraphInput`, `Defaults`)
//! - The high-level generation interface (`Generator`)

/// Word-length Markov chain with its sentence start states.
pub mod chain;

/// Lexicon words indexed by length, with closest-length lookup.
pub mod dictionary;

/// Canonical snapshot of a sample, exchanged with the codecs.
pub mod frozen;

/// Optional generation parameters and sample overrides.
pub mod generation_input;

/// Words, sentences and paragraphs from a sample.
pub mod generator;

/// Corpus analysis and the immutable statistical model.
pub mod sample;

/// Mean, sigma and normally distributed lengths.
pub mod variate;
