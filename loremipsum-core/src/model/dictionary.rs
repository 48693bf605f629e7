use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;

/// Words usable in generated output, indexed by their length in chars.
///
/// Buckets are kept sorted so that iteration, lookup and random choice never
/// depend on insertion order: a dictionary built from a lexicon and one
/// rebuilt from a frozen form behave the same under the same random source.
///
/// ## Invariants
/// - No bucket is empty
/// - Every bucket is sorted
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dictionary {
	buckets: BTreeMap<usize, Vec<String>>,
}

impl Dictionary {
	/// Splits a lexicon on whitespace and indexes each word by length.
	///
	/// Repeated words are kept: they weigh the random choice.
	pub fn from_lexicon(lexicon: &str) -> Self {
		Self::from_entries(
			lexicon
				.split_whitespace()
				.map(|word| (word.chars().count(), vec![word.to_owned()])),
		)
	}

	/// Rebuilds a dictionary from `(length, words)` pairs in any order.
	///
	/// Pairs sharing a length are merged; empty buckets are dropped.
	pub fn from_entries<I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (usize, Vec<String>)>,
	{
		let mut buckets: BTreeMap<usize, Vec<String>> = BTreeMap::new();
		for (length, words) in entries {
			if !words.is_empty() {
				buckets.entry(length).or_default().extend(words);
			}
		}
		for words in buckets.values_mut() {
			words.sort_unstable();
		}
		Self { buckets }
	}

	pub fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}

	/// Number of distinct word lengths.
	pub fn len(&self) -> usize {
		self.buckets.len()
	}

	/// Word lengths present, in ascending order.
	pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
		self.buckets.keys().copied()
	}

	/// Words of exactly `length` chars.
	pub fn get(&self, length: usize) -> Option<&[String]> {
		self.buckets.get(&length).map(Vec::as_slice)
	}

	/// Sorted `(length, words)` pairs.
	pub(crate) fn entries(&self) -> impl Iterator<Item = (usize, &[String])> + '_ {
		self.buckets.iter().map(|(length, words)| (*length, words.as_slice()))
	}

	/// The present length closest to `target`.
	///
	/// Ties between a shorter and a longer length resolve to the shorter one.
	pub fn closest_length(&self, target: usize) -> Option<usize> {
		self.lengths().min_by_key(|length| (length.abs_diff(target), *length))
	}

	/// Picks a random word of the given length, or of a random present length.
	///
	/// Returns `None` when `length` is not in the dictionary.
	pub fn choose<R: Rng + ?Sized>(&self, length: Option<usize>, rng: &mut R) -> Option<&str> {
		let length = match length {
			Some(length) => length,
			None => self.lengths().collect::<Vec<_>>().choose(rng).copied()?,
		};
		self.buckets.get(&length)?.choose(rng).map(String::as_str)
	}

	/// Picks a random word of `length` that differs from `previous`.
	///
	/// Falls back to `previous` itself only when the bucket holds nothing
	/// else. Choosing uniformly among the differing entries matches the
	/// distribution of redrawing until the word changes, without the loop.
	pub fn choose_distinct<R: Rng + ?Sized>(
		&self,
		length: usize,
		previous: Option<&str>,
		rng: &mut R,
	) -> Option<&str> {
		let words = self.buckets.get(&length)?;
		let word = words.choose(rng)?;
		match previous {
			Some(previous) if word == previous && words.len() > 1 => {
				let others: Vec<&String> = words.iter().filter(|w| *w != previous).collect();
				Some(others.choose(rng).copied().unwrap_or(word).as_str())
			}
			_ => Some(word.as_str()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::variate::make_rng;

	#[test]
	fn indexes_by_char_count() {
		let dictionary = Dictionary::from_lexicon("a bb ccc été dd\n e");
		assert_eq!(dictionary.len(), 3);
		assert_eq!(dictionary.get(1), Some(&["a".to_owned(), "e".to_owned()][..]));
		assert_eq!(dictionary.get(2), Some(&["bb".to_owned(), "dd".to_owned()][..]));
		assert_eq!(dictionary.get(3), Some(&["ccc".to_owned(), "été".to_owned()][..]));
		assert!(dictionary.get(4).is_none());
	}

	#[test]
	fn whitespace_lexicon_is_empty() {
		assert!(Dictionary::from_lexicon(" \n\t ").is_empty());
	}

	#[test]
	fn closest_length_prefers_shorter_on_tie() {
		let dictionary = Dictionary::from_lexicon("ab abcd abcdefgh");
		assert_eq!(dictionary.closest_length(3), Some(2));
		assert_eq!(dictionary.closest_length(4), Some(4));
		assert_eq!(dictionary.closest_length(6), Some(4));
		assert_eq!(dictionary.closest_length(7), Some(8));
		assert_eq!(dictionary.closest_length(0), Some(2));
		assert_eq!(Dictionary::default().closest_length(3), None);
	}

	#[test]
	fn unknown_length_yields_none() {
		let dictionary = Dictionary::from_lexicon("one two");
		let mut rng = make_rng(Some(1));
		assert_eq!(dictionary.choose(Some(9), &mut rng), None);
		assert!(dictionary.choose(None, &mut rng).is_some());
	}

	#[test]
	fn distinct_choice_avoids_previous() {
		let dictionary = Dictionary::from_lexicon("aa bb");
		let mut rng = make_rng(Some(5));
		for _ in 0..100 {
			assert_eq!(dictionary.choose_distinct(2, Some("aa"), &mut rng), Some("bb"));
		}
	}

	#[test]
	fn distinct_choice_keeps_lone_candidate() {
		let dictionary = Dictionary::from_lexicon("aa aa");
		let mut rng = make_rng(Some(5));
		assert_eq!(dictionary.choose_distinct(2, Some("aa"), &mut rng), Some("aa"));
	}

	#[test]
	fn entries_merge_and_sort() {
		let dictionary = Dictionary::from_entries(vec![
			(2, vec!["zz".to_owned()]),
			(1, vec![]),
			(2, vec!["aa".to_owned()]),
		]);
		assert_eq!(dictionary, Dictionary::from_lexicon("aa zz"));
	}
}
