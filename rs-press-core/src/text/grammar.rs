use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PressError, Result};
use crate::model::Sentence;

/// Splits raw text into sentences of tokens.
pub trait SentenceTokenizer: fmt::Debug + Send + Sync {
	fn tokenize(&self, text: &str) -> Vec<Sentence>;
}

/// Joins sentences of tokens back into text.
pub trait Joiner: fmt::Debug + Send + Sync {
	fn join(&self, sentences: &[Sentence]) -> String;
}

/// One sentence per non-blank line, tokens separated by whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl SentenceTokenizer for WhitespaceTokenizer {
	fn tokenize(&self, text: &str) -> Vec<Sentence> {
		text.lines()
			.map(|line| line.split_whitespace().map(str::to_owned).collect::<Sentence>())
			.filter(|sentence| !sentence.is_empty())
			.collect()
	}
}

/// Tokens and sentences all separated by a single space.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceJoiner;

impl Joiner for WhitespaceJoiner {
	fn join(&self, sentences: &[Sentence]) -> String {
		sentences
			.iter()
			.filter(|sentence| !sentence.is_empty())
			.map(|sentence| sentence.join(" "))
			.collect::<Vec<_>>()
			.join(" ")
	}
}

/// Tokens separated by a single space, one sentence per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NewlineJoiner;

impl Joiner for NewlineJoiner {
	fn join(&self, sentences: &[Sentence]) -> String {
		sentences
			.iter()
			.map(|sentence| sentence.join(" "))
			.collect::<Vec<_>>()
			.join("\n")
	}
}

/// Light cleanup applied to joined text.
#[derive(Debug, Default, Clone, Copy)]
pub struct Proofreader;

impl Proofreader {
	/// Removes the whitespace before phrase-ending punctuation
	/// (`" ."` becomes `"."`) when the punctuation is followed by
	/// whitespace or ends the text.
	///
	/// The whitespace following a punctuation mark belongs to that match, so
	/// in `"a . . b"` only the first mark is pulled back.
	pub fn format(&self, text: &str) -> String {
		let chars: Vec<char> = text.chars().collect();
		let mut out = String::with_capacity(text.len());

		let mut i = 0;
		while i < chars.len() {
			let c = chars[i];
			let next = chars.get(i + 1).copied();
			let after = chars.get(i + 2).copied();
			let ends_phrase = c.is_whitespace()
				&& next.is_some_and(is_phrase_end)
				&& after.is_none_or(char::is_whitespace);

			if let (true, Some(mark)) = (ends_phrase, next) {
				out.push(mark);
				out.extend(after);
				i += 3;
			} else {
				out.push(c);
				i += 1;
			}
		}
		out
	}
}

fn is_phrase_end(c: char) -> bool {
	matches!(c, '.' | ',' | '!' | '?' | ':' | ';')
}

/// Available tokenizers, by nickname.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenizerKind {
	#[default]
	Whitespace,
}

impl TokenizerKind {
	pub fn create(self) -> Box<dyn SentenceTokenizer> {
		match self {
			TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
		}
	}
}

impl FromStr for TokenizerKind {
	type Err = PressError;

	fn from_str(name: &str) -> Result<Self> {
		match name.trim().to_lowercase().as_str() {
			"whitespace" | "just_whitespace" => Ok(TokenizerKind::Whitespace),
			other => Err(PressError::UnknownNickname { kind: "tokenizer", name: other.to_owned() }),
		}
	}
}

/// Available joiners, by nickname.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JoinerKind {
	#[default]
	Whitespace,
	Newline,
}

impl JoinerKind {
	pub fn create(self) -> Box<dyn Joiner> {
		match self {
			JoinerKind::Whitespace => Box::new(WhitespaceJoiner),
			JoinerKind::Newline => Box::new(NewlineJoiner),
		}
	}
}

impl FromStr for JoinerKind {
	type Err = PressError;

	fn from_str(name: &str) -> Result<Self> {
		match name.trim().to_lowercase().as_str() {
			"whitespace" | "just_whitespace" => Ok(JoinerKind::Whitespace),
			"newline" => Ok(JoinerKind::Newline),
			other => Err(PressError::UnknownNickname { kind: "joiner", name: other.to_owned() }),
		}
	}
}
