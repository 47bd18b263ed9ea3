use thiserror::Error;

/// Errors surfaced by text makers, engines and model persistence.
///
/// Every failure is reported synchronously; nothing in the crate retries.
#[derive(Debug, Error)]
pub enum PressError {
	/// Training or configuration change attempted on an already trained text maker.
	/// The instance is left unchanged.
	#[error("locked! {operation} is not allowed once the text maker has been trained")]
	Locked { operation: &'static str },

	/// Generation attempted before any successful training call.
	#[error("text maker has not been trained yet")]
	NotTrained,

	/// The trailing token of a seed was never observed during training.
	#[error("could not continue from seed: {0:?} was never observed")]
	UnknownSeed(String),

	#[error("ngram size must be >= 1, got {0}")]
	InvalidNgramSize(usize),

	/// A nickname (strategy, tokenizer, joiner) did not resolve to a known variant.
	#[error("unknown {kind} nickname {name:?}")]
	UnknownNickname { kind: &'static str, name: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("model encoding failed: {0}")]
	Codec(#[from] postcard::Error),
}

pub type Result<T> = std::result::Result<T, PressError>;
