use std::fmt;
use std::str::FromStr;

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::error::{PressError, Result};
use super::crude::CrudeModel;
use super::sampler;
use super::table::TransitionTable;
use super::token::{Sentence, Token, to_tokens};

/// Contract shared by every Markov engine.
///
/// An engine is built once from a tokenized corpus and is read-only
/// afterwards. Implementations are fully substitutable behind
/// [`crate::text::TextMaker`].
pub trait MarkovEngine {
	/// Builds the engine from tokenized sentences. `order` must be >= 1.
	fn build(corpus: &[Sentence], order: usize) -> Self
	where
		Self: Sized;

	/// Maximum context length the engine conditions on.
	fn order(&self) -> usize;

	/// Whether `word` was observed during training, i.e. can end a seed.
	fn knows(&self, word: &str) -> bool;

	/// Generates one sentence, continuing `seed` (empty for a fresh start).
	///
	/// A non-empty seed is the beginning of the returned sentence.
	fn generate<R: Rng + ?Sized>(&self, seed: &[String], rng: &mut R) -> Sentence;
}

/// Multi-order Markov chain with backoff to shorter contexts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BackoffModel {
	order: usize,
	table: TransitionTable,
}

impl BackoffModel {
	pub fn table(&self) -> &TransitionTable {
		&self.table
	}
}

impl MarkovEngine for BackoffModel {
	fn build(corpus: &[Sentence], order: usize) -> Self {
		Self { order, table: TransitionTable::build(corpus, order) }
	}

	fn order(&self) -> usize {
		self.order
	}

	fn knows(&self, word: &str) -> bool {
		self.table.contains(&[Token::from(word)])
	}

	fn generate<R: Rng + ?Sized>(&self, seed: &[String], rng: &mut R) -> Sentence {
		sampler::generate(&self.table, &to_tokens(seed), self.order, rng)
	}
}

/// Closed set of available engines.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
	/// Single fixed-order table, see [`CrudeModel`].
	Crude,
	/// Multi-order table with backoff, see [`BackoffModel`].
	#[default]
	Backoff,
}

/// Nickname lookup table.
const STRATEGIES: &[(&str, Strategy)] = &[
	("crude", Strategy::Crude),
	("backoff", Strategy::Backoff),
];

impl Strategy {
	pub const ALL: [Strategy; 2] = [Strategy::Crude, Strategy::Backoff];

	pub fn nickname(self) -> &'static str {
		match self {
			Strategy::Crude => "crude",
			Strategy::Backoff => "backoff",
		}
	}
}

impl FromStr for Strategy {
	type Err = PressError;

	fn from_str(name: &str) -> Result<Self> {
		let name = name.trim().to_lowercase();
		STRATEGIES
			.iter()
			.find(|(nickname, _)| *nickname == name)
			.map(|(_, strategy)| *strategy)
			.ok_or(PressError::UnknownNickname { kind: "strategy", name })
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.nickname())
	}
}

/// A trained engine, tagged by strategy.
///
/// This is what a trained [`crate::text::TextMaker`] owns and what gets
/// persisted to disk.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Model {
	Crude(CrudeModel),
	Backoff(BackoffModel),
}

impl Model {
	/// Builds the engine selected by `strategy`.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn build(strategy: Strategy, corpus: &[Sentence], order: usize) -> Result<Self> {
		if order == 0 {
			return Err(PressError::InvalidNgramSize(order));
		}
		Ok(match strategy {
			Strategy::Crude => Model::Crude(CrudeModel::build(corpus, order)),
			Strategy::Backoff => Model::Backoff(BackoffModel::build(corpus, order)),
		})
	}

	pub fn strategy(&self) -> Strategy {
		match self {
			Model::Crude(_) => Strategy::Crude,
			Model::Backoff(_) => Strategy::Backoff,
		}
	}

	pub fn order(&self) -> usize {
		match self {
			Model::Crude(model) => model.order(),
			Model::Backoff(model) => model.order(),
		}
	}

	pub fn knows(&self, word: &str) -> bool {
		match self {
			Model::Crude(model) => model.knows(word),
			Model::Backoff(model) => model.knows(word),
		}
	}

	pub fn table(&self) -> &TransitionTable {
		match self {
			Model::Crude(model) => model.table(),
			Model::Backoff(model) => model.table(),
		}
	}

	pub fn generate<R: Rng + ?Sized>(&self, seed: &[String], rng: &mut R) -> Sentence {
		match self {
			Model::Crude(model) => model.generate(seed, rng),
			Model::Backoff(model) => model.generate(seed, rng),
		}
	}

	/// Serializes the model with `postcard`.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		Ok(postcard::from_bytes(bytes)?)
	}
}
