use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// A sentence as produced by tokenizers and emitted by generators.
pub type Sentence = Vec<String>;

/// An element of a context or a candidate of a distribution.
///
/// `Sentinel` marks both "start of sequence" (as the sole occupant of the
/// start context) and "sequence ends here" (as a candidate). Being its own
/// variant, it can never collide with a real word.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
	Sentinel,
	Word(String),
}

impl Token {
	/// Returns the word carried by this token, `None` for the sentinel.
	pub fn as_word(&self) -> Option<&str> {
		match self {
			Token::Word(word) => Some(word),
			Token::Sentinel => None,
		}
	}
}

impl From<&str> for Token {
	fn from(word: &str) -> Self {
		Token::Word(word.to_owned())
	}
}

impl From<String> for Token {
	fn from(word: String) -> Self {
		Token::Word(word)
	}
}

/// Converts a tokenized sentence into word tokens.
pub(crate) fn to_tokens(sentence: &[String]) -> Vec<Token> {
	sentence.iter().cloned().map(Token::Word).collect()
}

/// An ordered tuple of tokens conditioning the next-token prediction.
///
/// Contexts are stored owned in tables but can be looked up by `&[Token]`
/// through the `Borrow` implementation, so the sampler never allocates a key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Context(Vec<Token>);

impl Context {
	/// The order-0 context: "start of sequence".
	pub fn start() -> Self {
		Self(vec![Token::Sentinel])
	}

	pub fn tokens(&self) -> &[Token] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Whether this is the start context.
	pub fn is_start(&self) -> bool {
		is_start(&self.0)
	}
}

impl From<&[Token]> for Context {
	fn from(tokens: &[Token]) -> Self {
		Self(tokens.to_vec())
	}
}

impl From<Vec<Token>> for Context {
	fn from(tokens: Vec<Token>) -> Self {
		Self(tokens)
	}
}

impl Borrow<[Token]> for Context {
	fn borrow(&self) -> &[Token] {
		&self.0
	}
}

pub(crate) fn is_start(tokens: &[Token]) -> bool {
	matches!(tokens, [Token::Sentinel])
}
