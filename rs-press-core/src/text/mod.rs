//! Text-level adapters around the Markov engines.

/// Tokenizer and joiner collaborators, and the proofreader.
///
/// Text makers do no parsing of their own: splitting text into sentences of
/// tokens, and joining them back, is delegated to these.
pub mod grammar;

/// The `TextMaker` adapter: lifecycle, configuration and generation.
pub mod text_maker;

pub use grammar::{Joiner, JoinerKind, NewlineJoiner, Proofreader, SentenceTokenizer, TokenizerKind, WhitespaceJoiner, WhitespaceTokenizer};
pub use text_maker::{DEFAULT_NGRAM_SIZE, TextMaker, TextMakerConfig};
