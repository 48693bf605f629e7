use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Lengths of the two words preceding a position, oldest first.
pub type State = (usize, usize);

/// The state before the first word of the corpus.
pub const START_STATE: State = (0, 0);

/// One observed step of the chain: the length of the next word and the
/// punctuation that trailed it, if any.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
	pub length: usize,
	pub delimiter: Option<char>,
}

impl Transition {
	pub fn new(length: usize, delimiter: Option<char>) -> Self {
		Self { length, delimiter }
	}
}

/// Markov chain over word lengths.
///
/// Each `State` maps to every transition observed after it. Repeated
/// transitions are kept, so a uniform pick over the list follows the
/// observed frequencies.
///
/// ## Responsibilities
/// - Accumulate transitions while a corpus is analysed
/// - Track which states may open a sentence
/// - Pick transitions and opening states at random
///
/// ## Invariants (once sealed)
/// - Every transition list is non-empty and sorted
/// - `openings` is the sorted intersection of the transition keys and `starts`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WordLengthChain {
	transitions: BTreeMap<State, Vec<Transition>>,
	starts: BTreeSet<State>,
	openings: Vec<State>,
}

impl Default for WordLengthChain {
	fn default() -> Self {
		Self {
			transitions: BTreeMap::new(),
			starts: BTreeSet::from([START_STATE]),
			openings: Vec::new(),
		}
	}
}

impl WordLengthChain {
	/// Creates an empty chain whose only start state is `(0, 0)`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuilds a chain from entries in any order, then seals it.
	///
	/// Entries sharing a state are merged and empty lists are dropped.
	pub fn from_parts<T, S>(transitions: T, starts: S) -> Self
	where
		T: IntoIterator<Item = (State, Vec<Transition>)>,
		S: IntoIterator<Item = State>,
	{
		let mut chain = Self {
			transitions: BTreeMap::new(),
			starts: starts.into_iter().collect(),
			openings: Vec::new(),
		};
		for (state, list) in transitions {
			if !list.is_empty() {
				chain.transitions.entry(state).or_default().extend(list);
			}
		}
		chain.seal()
	}

	/// Records that a word of `transition.length` followed `state`.
	///
	/// A trailing delimiter closes a clause, so `state` becomes a valid
	/// sentence opening.
	pub fn record(&mut self, state: State, transition: Transition) {
		self.transitions.entry(state).or_default().push(transition);
		if transition.delimiter.is_some() {
			self.starts.insert(state);
		}
	}

	/// Sorts every transition list and computes the opening states.
	pub fn seal(mut self) -> Self {
		for list in self.transitions.values_mut() {
			list.sort_unstable();
		}
		self.openings = self
			.starts
			.iter()
			.filter(|state| self.transitions.contains_key(state))
			.copied()
			.collect();
		self
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Number of distinct states with outgoing transitions.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	/// Transitions observed after `state`.
	pub fn get(&self, state: &State) -> Option<&[Transition]> {
		self.transitions.get(state).map(Vec::as_slice)
	}

	pub fn contains(&self, state: &State) -> bool {
		self.transitions.contains_key(state)
	}

	/// Sorted `(state, transitions)` pairs.
	pub(crate) fn entries(&self) -> impl Iterator<Item = (State, &[Transition])> + '_ {
		self.transitions.iter().map(|(state, list)| (*state, list.as_slice()))
	}

	/// Sentence start states, sorted.
	pub fn starts(&self) -> impl Iterator<Item = State> + '_ {
		self.starts.iter().copied()
	}

	/// States that both open a sentence and have transitions.
	pub fn openings(&self) -> &[State] {
		&self.openings
	}

	/// Picks a random transition out of `state`.
	pub fn choose_transition<R: Rng + ?Sized>(&self, state: &State, rng: &mut R) -> Option<Transition> {
		self.transitions.get(state)?.choose(rng).copied()
	}

	/// Picks a random opening state.
	pub fn choose_opening<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<State> {
		self.openings.choose(rng).copied()
	}
}
