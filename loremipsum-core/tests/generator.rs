//! Sentence and paragraph generation over small and bundled samples

use loremipsum_core::model::generation_input::{Defaults, ParagraphInput, SentenceInput};
use loremipsum_core::model::variate::{MAX_LENGTH, make_rng};
use loremipsum_core::{Generator, Sample};

fn small() -> Generator {
	Generator::new(Sample::cooked("Ab cd. Ef ghi.\n\nJkl mn op.", "a b c dd ee ff ggg hhh iii", ",.;:!?", ".!?").unwrap())
}

fn lorem() -> Generator {
	Generator::lorem_ipsum().unwrap()
}

fn bare_words(text: &str) -> Vec<String> {
	text.split_whitespace()
		.map(|w| w.trim_end_matches(|c: char| ",.;:!?".contains(c)).to_lowercase())
		.collect()
}

#[test]
fn test_word_of_known_length() {
	let generator = small();
	let mut rng = make_rng(Some(1));
	for _ in 0..20 {
		let word = generator.generate_word(Some(3), &mut rng).unwrap();
		assert_eq!(word.chars().count(), 3);
		assert!(generator.generate_word(None, &mut rng).is_some());
	}
}

#[test]
fn test_word_of_unknown_length_is_none() {
	let generator = small();
	let mut rng = make_rng(Some(1));
	assert_eq!(generator.generate_word(Some(42), &mut rng), None);

	let words: Vec<_> = generator.generate_words(4, Some(42), &mut rng).collect();
	assert_eq!(words, vec![None; 4]);
}

#[test]
fn test_sentence_has_exact_length() {
	let generator = lorem();
	let mut rng = make_rng(Some(2));
	for len in 0..40 {
		let (count, text) = generator.generate_sentence(&SentenceInput::with_len(len), &mut rng);
		assert_eq!(count, len);
		if len > 0 {
			assert_eq!(text.split_whitespace().count(), len);
		}
		assert!(text.ends_with('.'));
	}
}

#[test]
fn test_sentence_shape() {
	let generator = lorem();
	let mut rng = make_rng(Some(3));
	for (count, text) in generator.generate_sentences(50, SentenceInput::default(), &mut rng) {
		assert!(count >= 1);
		assert_eq!(text.split_whitespace().count(), count);
		assert!(text.chars().next().is_some_and(char::is_uppercase));
		// Sentence delimiters only appear at the very end
		let body = &text[..text.len() - 1];
		assert!(!body.contains(['.', '!', '?']), "premature end in {text:?}");
		assert!(!body.ends_with(','));
	}
}

#[test]
fn test_incipit_opens_sentence() {
	let generator = small();
	let mut rng = make_rng(Some(4));

	let input = SentenceInput { sentence_len: Some(2), incipit: true, ..SentenceInput::default() };
	assert_eq!(generator.generate_sentence(&input, &mut rng), (2, "Ab cd.".to_owned()));

	let input = SentenceInput { sentence_len: Some(1), incipit: true, ..SentenceInput::default() };
	assert_eq!(generator.generate_sentence(&input, &mut rng), (1, "Ab.".to_owned()));

	let input = SentenceInput { sentence_len: Some(5), incipit: true, ..SentenceInput::default() };
	let (count, text) = generator.generate_sentence(&input, &mut rng);
	assert_eq!(count, 5);
	assert!(text.starts_with("Ab cd. "));
}

#[test]
fn test_incipit_only_on_first_sentence() {
	let generator = lorem();
	let mut rng = make_rng(Some(5));
	let input = SentenceInput { sentence_len: Some(3), incipit: true, ..SentenceInput::default() };
	let sentences: Vec<_> = generator.generate_sentences(20, input, &mut rng).collect();

	assert_eq!(sentences.len(), 20);
	assert_eq!(sentences[0].1, "Lorem ipsum dolor.");
	assert!(sentences[1..].iter().all(|(_, text)| text != "Lorem ipsum dolor."));
}

#[test]
fn test_no_adjacent_repetition() {
	let generator = Generator::new(
		Sample::cooked(
			"A b c d e f g. A b c d, e f g h i j.\n\nA b c.",
			"a b c d e f",
			",.;:!?",
			".!?",
		)
		.unwrap(),
	);
	let mut rng = make_rng(Some(6));
	for _ in 0..200 {
		let (_, text) = generator.generate_sentence(&SentenceInput::with_len(12), &mut rng);
		let words = bare_words(&text);
		assert!(words.windows(2).all(|pair| pair[0] != pair[1]), "repetition in {text:?}");
	}
}

#[test]
fn test_paragraph_has_exact_sentence_count() {
	let generator = lorem();
	let mut rng = make_rng(Some(7));
	for len in 1..12 {
		let (count, words, text) = generator.generate_paragraph(&ParagraphInput::with_len(len), &mut rng);
		assert_eq!(count, len);
		assert_eq!(text.matches('.').count(), len);
		assert_eq!(text.split_whitespace().count(), words);
	}
}

#[test]
fn test_paragraphs_sequence() {
	let generator = lorem();
	let mut rng = make_rng(Some(8));
	let input = ParagraphInput {
		sentence: SentenceInput { incipit: true, ..SentenceInput::default() },
		..ParagraphInput::default()
	};
	let paragraphs = generator.generate_paragraphs(6, input, &mut rng);
	assert_eq!(paragraphs.len(), 6);

	let paragraphs: Vec<_> = paragraphs.collect();
	assert!(paragraphs[0].2.starts_with("Lorem"));
	for (count, _, text) in &paragraphs {
		assert!(*count >= 1);
		assert_eq!(text.matches('.').count(), *count);
	}
}

#[test]
fn test_seeded_output_is_reproducible() {
	let generator = lorem();
	let run = |seed| {
		let mut rng = make_rng(Some(seed));
		generator
			.generate_paragraphs(3, ParagraphInput::default(), &mut rng)
			.map(|(_, _, text)| text)
			.collect::<Vec<_>>()
	};
	assert_eq!(run(99), run(99));
	assert_ne!(run(99), run(100));
}

#[test]
fn test_thawed_sample_generates_same_text() {
	let cooked = lorem();
	let thawed = Generator::new(Sample::thawed(cooked.sample().freeze()).unwrap());
	let mut a = make_rng(Some(12));
	let mut b = make_rng(Some(12));
	let left: Vec<_> = cooked.generate_sentences(10, SentenceInput::default(), &mut a).collect();
	let right: Vec<_> = thawed.generate_sentences(10, SentenceInput::default(), &mut b).collect();
	assert_eq!(left, right);
}

#[test]
fn test_with_defaults_drives_lengths() {
	let generator = lorem();
	let fixed = generator.with_defaults(&Defaults {
		sentence_mean: Some(4.0),
		sentence_sigma: Some(0.0),
		paragraph_mean: Some(2.0),
		paragraph_sigma: Some(0.0),
		..Defaults::default()
	});
	let mut rng = make_rng(Some(13));

	for (count, _) in fixed.generate_sentences(10, SentenceInput::default(), &mut rng) {
		assert_eq!(count, 5);
	}
	let (sentences, words, _) = fixed.generate_paragraph(&ParagraphInput::default(), &mut rng);
	assert_eq!((sentences, words), (3, 15));

	// Explicit inputs still win over the derived defaults
	let (count, _) = fixed.generate_sentence(&SentenceInput::with_len(2), &mut rng);
	assert_eq!(count, 2);

	assert!(fixed.sample().shares_analysis(generator.sample()));
	assert_ne!(generator.sample().statistics().sentence_sigma, 0.0);
}

#[test]
fn test_input_overrides_sample_statistics() {
	let generator = lorem();
	let mut rng = make_rng(Some(14));
	let input = SentenceInput { sentence_mean: Some(-2.0), sentence_sigma: Some(0.0), ..SentenceInput::default() };
	let (count, _) = generator.generate_sentence(&input, &mut rng);
	assert_eq!(count, 3);
}

#[test]
fn test_huge_mean_is_clamped() {
	let generator = small();
	let mut rng = make_rng(Some(15));
	let input = SentenceInput { sentence_mean: Some(1e300), sentence_sigma: Some(0.0), ..SentenceInput::default() };
	let (count, _) = generator.generate_sentence(&input, &mut rng);
	assert_eq!(count, MAX_LENGTH);

	let input = ParagraphInput {
		paragraph_mean: Some(1e300),
		paragraph_sigma: Some(0.0),
		sentence: SentenceInput::with_len(1),
		..ParagraphInput::default()
	};
	let (sentences, words, _) = generator.generate_paragraph(&input, &mut rng);
	assert_eq!(sentences, MAX_LENGTH);
	assert_eq!(words, MAX_LENGTH);
}

#[test]
fn test_huge_length_is_clamped() {
	let generator = small();
	let mut rng = make_rng(Some(16));
	let (count, text) = generator.generate_sentence(&SentenceInput::with_len(usize::MAX), &mut rng);
	assert_eq!(count, MAX_LENGTH);
	assert_eq!(text.split_whitespace().count(), MAX_LENGTH);

	let mut input = ParagraphInput::with_len(usize::MAX);
	input.sentence = SentenceInput::with_len(1);
	let (sentences, _, _) = generator.generate_paragraph(&input, &mut rng);
	assert_eq!(sentences, MAX_LENGTH);
}
