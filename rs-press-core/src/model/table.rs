use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::debug;

use serde::{Deserialize, Serialize};

use super::distribution::Distribution;
use super::token::{Context, Sentence, Token, to_tokens};

/// Below this many sentences the corpus is counted on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

/// Number of chunks per CPU when counting in parallel.
const CHUNK_FACTOR: usize = 8;

/// Mapping from context to the distribution of the token that follows it.
///
/// Built once by a training call and read-only afterwards: generation only
/// ever borrows it immutably.
///
/// # Invariants
/// - The start context is always present
/// - After [`TransitionTable::normalize`], every distribution with at least
///   one observation sums to 1.0
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TransitionTable {
	states: HashMap<Context, Distribution>,
}

impl TransitionTable {
	/// Creates a table holding only the start context, whose distribution
	/// knows the sentinel with a zero weight.
	pub fn new() -> Self {
		Self::with_start(&[Token::Sentinel])
	}

	/// Same as [`TransitionTable::new`] with a custom start context.
	pub(crate) fn with_start(start: &[Token]) -> Self {
		let mut distribution = Distribution::new();
		distribution.reserve(Token::Sentinel);

		let mut states = HashMap::new();
		states.insert(Context::from(start), distribution);
		Self { states }
	}

	/// Builds a multi-order table from tokenized sentences.
	///
	/// For every sentence:
	/// - the first token is observed under the start context
	/// - for each order `k` in `1..=order`, every run of `k` tokens is a
	///   context for the token following it
	/// - for each order `k`, the final `k` tokens (the whole sentence when it
	///   is shorter) precede the sentinel
	///
	/// Empty sentences are skipped. Weights are normalized at the end.
	pub fn build(corpus: &[Sentence], order: usize) -> Self {
		let mut table = count_in_parallel(corpus, &[Token::Sentinel], |table, sentence| {
			table.count_sentence(sentence, order)
		});
		table.normalize();
		debug!(
			"built transition table: order={}, sentences={}, contexts={}",
			order,
			corpus.len(),
			table.len()
		);
		table
	}

	/// Accumulates the observations of one sentence (see [`TransitionTable::build`]).
	fn count_sentence(&mut self, sentence: &[String], order: usize) {
		if sentence.is_empty() {
			return;
		}
		let tokens = to_tokens(sentence);
		let len = tokens.len();

		self.observe(&[Token::Sentinel], tokens[0].clone());

		for k in 1..=order {
			for i in 0..len - 1 {
				if i + k >= len {
					continue;
				}
				self.observe(&tokens[i..i + k], tokens[i + k].clone());
			}

			// The tail of the sentence precedes its end
			self.observe(&tokens[len.saturating_sub(k)..], Token::Sentinel);
		}
	}

	/// Records `candidate` under `context`, creating the distribution on first use.
	pub(crate) fn observe(&mut self, context: &[Token], candidate: Token) {
		match self.states.get_mut(context) {
			Some(distribution) => distribution.observe(candidate),
			None => {
				let mut distribution = Distribution::new();
				distribution.observe(candidate);
				self.states.insert(Context::from(context), distribution);
			}
		}
	}

	/// Normalizes every distribution of the table.
	pub(crate) fn normalize(&mut self) {
		for distribution in self.states.values_mut() {
			distribution.normalize();
		}
	}

	/// Adds the raw counts of `other` into this table.
	///
	/// Only meaningful before normalization.
	pub(crate) fn merge(&mut self, other: &Self) {
		for (context, distribution) in &other.states {
			if let Some(existing) = self.states.get_mut(context) {
				existing.merge(distribution);
			} else {
				self.states.insert(context.clone(), distribution.clone());
			}
		}
	}

	pub fn get(&self, context: &[Token]) -> Option<&Distribution> {
		self.states.get(context)
	}

	pub fn contains(&self, context: &[Token]) -> bool {
		self.states.contains_key(context)
	}

	/// Number of distinct contexts, the start context included.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// A table always holds the start context, so it is never empty.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn contexts(&self) -> impl Iterator<Item = (&Context, &Distribution)> {
		self.states.iter()
	}
}

/// Counts `corpus` into a fresh table starting at `start`, using `count`
/// for each sentence.
///
/// Large corpora are split into `cpus * CHUNK_FACTOR` chunks, each counted on
/// its own thread into a partial table. Partial tables are merged on the
/// calling thread. Counts are exact, so the result does not depend on the
/// chunking. The returned table is not normalized.
pub(crate) fn count_in_parallel<F>(corpus: &[Sentence], start: &[Token], count: F) -> TransitionTable
where
	F: Fn(&mut TransitionTable, &[String]) + Sync,
{
	if corpus.len() < PARALLEL_THRESHOLD {
		let mut table = TransitionTable::with_start(start);
		for sentence in corpus {
			count(&mut table, sentence);
		}
		return table;
	}

	let chunks = num_cpus::get() * CHUNK_FACTOR;
	let chunk_size = corpus.len().div_ceil(chunks);
	debug!("counting {} sentences in chunks of {}", corpus.len(), chunk_size);

	let (tx, rx) = mpsc::channel();
	let count = &count;
	thread::scope(|scope| {
		for chunk in corpus.chunks(chunk_size) {
			let tx = tx.clone();
			scope.spawn(move || {
				let mut partial = TransitionTable::with_start(start);
				for sentence in chunk {
					count(&mut partial, sentence);
				}
				// The receiver outlives the scope, sending cannot fail
				let _ = tx.send(partial);
			});
		}
	});
	drop(tx);

	let mut table = TransitionTable::with_start(start);
	for partial in rx.iter() {
		table.merge(&partial);
	}
	table
}
