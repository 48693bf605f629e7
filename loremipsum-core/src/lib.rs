//! Placeholder text generation library.
//!
//! Text is generated so that it has a similar distribution of paragraph,
//! sentence and word lengths and punctuation as a sample text, while the
//! words themselves come from a separate lexicon.
//!
//! - `model::sample::Sample`: analysis of a sample text into a model
//! - `model::generator::Generator`: words, sentences and paragraphs
//! - `serialization`: frozen models stored through scheme-selected codecs
//!
//! ```
//! use loremipsum_core::model::generation_input::ParagraphInput;
//! use loremipsum_core::model::generator::Generator;
//! use loremipsum_core::model::variate::make_rng;
//!
//! let generator = Generator::lorem_ipsum().unwrap();
//! let mut rng = make_rng(Some(42));
//! let (sentences, _, text) = generator.generate_paragraph(&ParagraphInput::with_len(3), &mut rng);
//! assert_eq!(sentences, 3);
//! assert!(text.ends_with('.'));
//! ```

/// Error type shared by the crate.
pub mod error;

/// File helpers used by the codecs and the binaries.
pub mod io;

/// Sample models and text generation.
pub mod model;

/// Load and dump frozen samples by locator scheme.
pub mod serialization;

pub use error::{Error, Result};
pub use model::generator::Generator;
pub use model::sample::Sample;
