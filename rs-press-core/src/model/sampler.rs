use rand::Rng;

use super::distribution::Distribution;
use super::table::TransitionTable;
use super::token::{Sentence, Token, is_start};

/// Finds the distribution for the longest known suffix of `context`.
///
/// Suffixes of length `min(len, order)` down to 0 are tried, dropping the
/// oldest token each time. The start context is looked up as is, never
/// truncated. Returns `None` when no suffix is a key of the table.
pub(crate) fn lookup<'t>(table: &'t TransitionTable, context: &[Token], order: usize) -> Option<&'t Distribution> {
	if is_start(context) {
		return table.get(context);
	}

	let longest = context.len().min(order);
	(0..=longest)
		.rev()
		.find_map(|k| table.get(&context[context.len() - k..]))
}

/// Generates one sentence by walking the table from `seed`.
///
/// An empty `seed` starts from the start context. Otherwise the returned
/// sentence begins with the seed words, followed by the generated tokens.
/// The sentinel is never part of it.
///
/// Generation stops when the sentinel is sampled or when no context suffix
/// is known.
pub fn generate<R: Rng + ?Sized>(table: &TransitionTable, seed: &[Token], order: usize, rng: &mut R) -> Sentence {
	let mut context: Vec<Token> = if seed.is_empty() {
		vec![Token::Sentinel]
	} else {
		seed.to_vec()
	};

	let mut sentence: Sentence = seed.iter().filter_map(Token::as_word).map(str::to_owned).collect();
	loop {
		let Some(distribution) = lookup(table, &context, order) else {
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
