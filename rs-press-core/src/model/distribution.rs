use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

use super::token::Token;

/// Weighted set of candidate next tokens for one context.
///
/// During training the weights are raw observation counts; after
/// [`Distribution::normalize`] they are probabilities summing to 1.0.
/// The `Sentinel` candidate means "the sequence ends here".
///
/// Candidates are kept ordered so that, for a given random value,
/// sampling always walks them in the same order.
///
/// ## Invariants
/// - Weights are never negative
/// - Once normalized, weights of a distribution with at least one
///   observation sum to 1.0 (within floating tolerance)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Distribution {
	weights: BTreeMap<Token, f64>,
}

impl Distribution {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more observation of `candidate`.
	pub fn observe(&mut self, candidate: Token) {
		*self.weights.entry(candidate).or_insert(0.0) += 1.0;
	}

	/// Registers `candidate` with a zero weight if it is not present yet.
	pub(crate) fn reserve(&mut self, candidate: Token) {
		self.weights.entry(candidate).or_insert(0.0);
	}

	/// Sum of all weights.
	pub fn total(&self) -> f64 {
		self.weights.values().sum()
	}

	pub fn len(&self) -> usize {
		self.weights.len()
	}

	pub fn is_empty(&self) -> bool {
		self.weights.is_empty()
	}

	/// Weight of `candidate`, 0.0 when it was never observed.
	pub fn probability(&self, candidate: &Token) -> f64 {
		self.weights.get(candidate).copied().unwrap_or(0.0)
	}

	/// Iterates candidates in sampling order.
	pub fn candidates(&self) -> impl Iterator<Item = (&Token, f64)> {
		self.weights.iter().map(|(token, weight)| (token, *weight))
	}

	/// Divides each weight by the total, turning counts into probabilities.
	///
	/// A distribution whose total is zero is left untouched.
	pub fn normalize(&mut self) {
		let total = self.total();
		if total == 0.0 {
			return;
		}
		for weight in self.weights.values_mut() {
			*weight /= total;
		}
	}

	/// Adds the weights of `other` into this distribution.
	///
	/// Used to combine partial counts built in parallel, before normalization.
	pub fn merge(&mut self, other: &Self) {
		for (candidate, weight) in &other.weights {
			*self.weights.entry(candidate.clone()).or_insert(0.0) += *weight;
		}
	}

	/// Picks a candidate by weighted random sampling.
	///
	/// Draws `u` in [0, 1) and walks the candidates, subtracting each
	/// probability from `u` until it falls inside one. If rounding leaves
	/// `u` unspent after the last candidate, the most probable candidate
	/// seen is returned instead.
	///
	/// Returns `None` only when no candidate has a positive weight.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		let mut u: f64 = rng.random();

		let mut best: Option<&Token> = None;
		let mut best_probability = 0.0;
		for (candidate, probability) in self.candidates() {
			if probability > best_probability {
				best_probability = probability;
				best = Some(candidate);
			}
			if u < probability {
				return Some(candidate);
			}
			u -= probability;
		}

		best
	}
}
