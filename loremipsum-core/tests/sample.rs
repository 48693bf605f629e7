//! Corpus analysis, validation and freeze/thaw behavior

use loremipsum_core::model::chain::Transition;
use loremipsum_core::model::generation_input::Defaults;
use loremipsum_core::{Error, Sample};

const TEXT: &str = "Ab cd. Ef ghi.\n\nJkl mn op.";
const LEXICON: &str = "a b c dd ee ff ggg hhh iii";
const WORD_DELIMITERS: &str = ",.;:!?";
const SENTENCE_DELIMITERS: &str = ".!?";

fn sample() -> Sample {
	Sample::cooked(TEXT, LEXICON, WORD_DELIMITERS, SENTENCE_DELIMITERS).unwrap()
}

#[test]
fn test_statistics_match_hand_computed_values() {
	let statistics = *sample().statistics();

	// Sentence lengths [2, 2, 3], paragraph lengths [2, 1]
	assert!((statistics.sentence_mean - 7.0 / 3.0).abs() < 1e-12);
	assert!((statistics.sentence_sigma - (2.0_f64 / 9.0).sqrt()).abs() < 1e-12);
	assert!((statistics.paragraph_mean - 1.5).abs() < 1e-12);
	assert!((statistics.paragraph_sigma - 0.5).abs() < 1e-12);
}

#[test]
fn test_chain_follows_word_lengths() {
	let sample = sample();
	let chain = sample.chain();

	assert_eq!(chain.get(&(0, 0)), Some(&[Transition::new(2, None)][..]));
	assert_eq!(chain.get(&(0, 2)), Some(&[Transition::new(2, Some('.'))][..]));
	assert_eq!(
		chain.get(&(2, 2)),
		Some(&[Transition::new(2, None), Transition::new(3, Some('.'))][..])
	);
	assert_eq!(chain.get(&(3, 2)), Some(&[Transition::new(2, Some('.'))][..]));
	assert_eq!(chain.len(), 6);
	assert_eq!(chain.starts().collect::<Vec<_>>(), vec![(0, 0), (0, 2), (2, 2), (3, 2)]);
	assert_eq!(chain.openings(), &[(0, 0), (0, 2), (2, 2), (3, 2)]);
}

#[test]
fn test_inputs_are_trimmed_and_incipit_recorded() {
	let sample = Sample::cooked("\n  Ab cd. Ef ghi.  \n", " a bb \n", " ,. ", ".").unwrap();
	assert_eq!(sample.text(), "Ab cd. Ef ghi.");
	assert_eq!(sample.lexicon(), "a bb");
	assert_eq!(sample.word_delimiters(), ",.");
	assert_eq!(sample.incipit(), "Ab cd.");
}

#[test]
fn test_missing_ingredient_is_reported() {
	let result = Sample::builder().text(TEXT).word_delimiters(",").sentence_delimiters(".").build();
	assert!(matches!(result, Err(Error::MissingArgument("lexicon"))));

	let result = Sample::builder().build();
	assert!(matches!(result, Err(Error::MissingArgument("text"))));
}

#[test]
fn test_builder_cooks_and_prefers_frozen() {
	let cooked = Sample::builder()
		.text(TEXT)
		.lexicon(LEXICON)
		.word_delimiters(WORD_DELIMITERS)
		.sentence_delimiters(SENTENCE_DELIMITERS)
		.build()
		.unwrap();
	assert_eq!(cooked, sample());

	let frozen = Sample::lorem_ipsum().unwrap().freeze();
	let thawed = Sample::builder().frozen(frozen).text(TEXT).build().unwrap();
	assert_eq!(thawed, Sample::lorem_ipsum().unwrap());
}

#[test]
fn test_empty_lexicon_is_invalid() {
	let result = Sample::cooked(TEXT, "", WORD_DELIMITERS, SENTENCE_DELIMITERS);
	assert!(matches!(result, Err(Error::InvalidLexicon)));

	let result = Sample::builder()
		.text(TEXT)
		.lexicon("  \n ")
		.word_delimiters(WORD_DELIMITERS)
		.sentence_delimiters(SENTENCE_DELIMITERS)
		.build();
	assert!(result.unwrap_err().is_invalid_model());
}

#[test]
fn test_text_without_transitions_is_invalid() {
	for text in ["", "no sentence delimiter here", "... !!! ???"] {
		let result = Sample::cooked(text, LEXICON, WORD_DELIMITERS, SENTENCE_DELIMITERS);
		assert!(matches!(result, Err(Error::InvalidText(_))), "text {text:?} should be rejected");
	}
}

#[test]
fn test_thaw_accepts_any_ordering() {
	let original = Sample::lorem_ipsum().unwrap();
	let mut frozen = original.freeze();

	frozen.chains.reverse();
	for (_, transitions) in &mut frozen.chains {
		transitions.reverse();
	}
	frozen.dictionary.reverse();
	for (_, words) in &mut frozen.dictionary {
		words.reverse();
	}
	frozen.starts.reverse();
	if let Some(first) = frozen.starts.first().copied() {
		frozen.starts.push(first);
	}

	let thawed = Sample::thawed(frozen).unwrap();
	assert_eq!(thawed, original);
	assert_eq!(thawed.freeze(), original.freeze());
}

#[test]
fn test_equality_is_structural() {
	let a = sample();
	let b = sample();
	assert_eq!(a, b);
	assert!(!a.shares_analysis(&b));

	let other = Sample::cooked(TEXT, "a b c dd ee ff ggg hhh", WORD_DELIMITERS, SENTENCE_DELIMITERS).unwrap();
	assert_ne!(a, other);
}

#[test]
fn test_with_defaults_copies_and_shares() {
	let original = sample();
	let derived = original.with_defaults(&Defaults {
		sentence_mean: Some(9.0),
		incipit: Some("Xy zz.".to_owned()),
		..Defaults::default()
	});

	assert!(derived.shares_analysis(&original));
	assert_eq!(derived.statistics().sentence_mean, 9.0);
	assert_eq!(derived.statistics().sentence_sigma, original.statistics().sentence_sigma);
	assert_eq!(derived.incipit(), "Xy zz.");
	assert!((original.statistics().sentence_mean - 7.0 / 3.0).abs() < 1e-12);
	assert_eq!(original.incipit(), "Ab cd.");
	assert_ne!(derived, original);
}
