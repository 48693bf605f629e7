/// Parameters of a single sentence.
///
/// Override precedence: an explicit `sentence_len` wins over
/// `sentence_mean` / `sentence_sigma`, which win over the sample statistics.
///
/// # Fields
/// - `sentence_len`: exact number of words
/// - `sentence_mean`, `sentence_sigma`: replace the sample distribution
/// - `incipit`: open with the literal first sentence of the sample
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SentenceInput {
	pub sentence_len: Option<usize>,
	pub sentence_mean: Option<f64>,
	pub sentence_sigma: Option<f64>,
	pub incipit: bool,
}

impl SentenceInput {
	/// Input asking for exactly `len` words.
	pub fn with_len(len: usize) -> Self {
		Self { sentence_len: Some(len), ..Self::default() }
	}
}

/// Parameters of a single paragraph.
///
/// `paragraph_len` wins over `paragraph_mean` / `paragraph_sigma`. The
/// nested `sentence` input applies to every sentence of the paragraph,
/// except that only the first sentence may honor `incipit`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphInput {
	pub paragraph_len: Option<usize>,
	pub paragraph_mean: Option<f64>,
	pub paragraph_sigma: Option<f64>,
	pub sentence: SentenceInput,
}

impl ParagraphInput {
	/// Input asking for exactly `len` sentences.
	pub fn with_len(len: usize) -> Self {
		Self { paragraph_len: Some(len), ..Self::default() }
	}
}

/// Replacement values for a derived sample (see `Generator::with_defaults`).
///
/// Unset fields keep the original sample's value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Defaults {
	pub sentence_mean: Option<f64>,
	pub sentence_sigma: Option<f64>,
	pub paragraph_mean: Option<f64>,
	pub paragraph_sigma: Option<f64>,
	pub incipit: Option<String>,
}
