use log::debug;

use rand::Rng;

use serde::{Deserialize, Serialize};

use super::engine::MarkovEngine;
use super::table::{TransitionTable, count_in_parallel};
use super::token::{Sentence, Token, to_tokens};

/// Single-order Markov chain.
///
/// Every context holds exactly `order` tokens. Sentences are left-padded
/// with `order` sentinels, so generation starts from the all-sentinel
/// context, and end with one sentinel candidate. There is no backoff: an
/// unknown context ends the sentence.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CrudeModel {
	order: usize,
	table: TransitionTable,
}

impl CrudeModel {
	fn padding(order: usize) -> Vec<Token> {
		vec![Token::Sentinel; order]
	}

	fn count_sentence(table: &mut TransitionTable, sentence: &[String], order: usize) {
		if sentence.is_empty() {
			return;
		}
		let mut padded = Self::padding(order);
		padded.extend(to_tokens(sentence));
		padded.push(Token::Sentinel);

		for window in padded.windows(order + 1) {
			table.observe(&window[..order], window[order].clone());
		}
	}

	pub fn table(&self) -> &TransitionTable {
		&self.table
	}
}

impl MarkovEngine for CrudeModel {
	fn build(corpus: &[Sentence], order: usize) -> Self {
		let start = Self::padding(order);
		let mut table = count_in_parallel(corpus, &start, |table, sentence| {
			Self::count_sentence(table, sentence, order)
		});
		table.normalize();
		debug!("built crude model: order={}, contexts={}", order, table.len());
		Self { order, table }
	}

	fn order(&self) -> usize {
		self.order
	}

	fn knows(&self, word: &str) -> bool {
		self.table
			.contexts()
			.any(|(context, _)| context.tokens().last().and_then(Token::as_word) == Some(word))
	}

	fn generate<R: Rng + ?Sized>(&self, seed: &[String], rng: &mut R) -> Sentence {
		let mut context = Self::padding(self.order);
		context.extend(to_tokens(seed));

		let mut sentence: Sentence = seed.to_vec();
		loop {
			let key = &context[context.len() - self.order..];
			let Some(distribution) = self.table.get(key) else {
				break;
			};
			match distribution.sample(rng) {
				Some(Token::Word(word)) => {
					sentence.push(word.clone());
					context.push(Token::Word(word.clone()));
				}
				Some(Token::Sentinel) | None => break,
			}
		}
		sentence
	}
}
