use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::error::{PressError, Result};
use crate::io;
use crate::model::{Model, Sentence, Strategy};
use super::grammar::{JoinerKind, Joiner, Proofreader, SentenceTokenizer, TokenizerKind};

/// Default maximum context length.
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// Construction parameters of a [`TextMaker`].
///
/// Missing fields take their default value when deserialized.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct TextMakerConfig {
	/// Engine used to model the text.
	pub strategy: Strategy,

	/// Maximum context length (must be >= 1).
	pub ngram_size: usize,

	/// How raw text is split into sentences of tokens.
	pub tokenizer: TokenizerKind,

	/// How generated sentences are joined back into text.
	pub joiner: JoinerKind,
}

impl Default for TextMakerConfig {
	fn default() -> Self {
		Self {
			strategy: Strategy::default(),
			ngram_size: DEFAULT_NGRAM_SIZE,
			tokenizer: TokenizerKind::default(),
			joiner: JoinerKind::default(),
		}
	}
}

/// Two-state lifecycle: a text maker is trained at most once.
#[derive(Debug)]
enum Lifecycle {
	Untrained,
	Trained(Model),
}

/// Common interface for making sentences out of a text model.
///
/// A `TextMaker` adapts one engine ([`Strategy`]) and its collaborators
/// (tokenizer, joiner) behind a single contract:
/// - configure while untrained (`set_ngram_size`, `set_tokenizer`, `set_joiner`)
/// - `train` exactly once, which locks the instance for good
/// - `generate` as many sentences as needed
///
/// Generation only borrows the trained model, so a trained instance can be
/// shared between threads as long as each caller brings its own random
/// source.
#[derive(Debug)]
pub struct TextMaker {
	strategy: Strategy,
	ngram_size: usize,
	tokenizer: Arc<dyn SentenceTokenizer>,
	joiner: Arc<dyn Joiner>,
	proofreader: Proofreader,
	lifecycle: Lifecycle,
}

impl TextMaker {
	/// Creates an untrained text maker with the default collaborators.
	///
	/// # Errors
	/// Returns an error if `ngram_size` is 0.
	pub fn new(strategy: Strategy, ngram_size: usize) -> Result<Self> {
		Self::from_config(&TextMakerConfig { strategy, ngram_size, ..TextMakerConfig::default() })
	}

	/// Creates an untrained text maker from a configuration.
	pub fn from_config(config: &TextMakerConfig) -> Result<Self> {
		if config.ngram_size == 0 {
			return Err(PressError::InvalidNgramSize(config.ngram_size));
		}
		Ok(Self {
			strategy: config.strategy,
			ngram_size: config.ngram_size,
			tokenizer: Arc::from(config.tokenizer.create()),
			joiner: Arc::from(config.joiner.create()),
			proofreader: Proofreader,
			lifecycle: Lifecycle::Untrained,
		})
	}

	/// Wraps an already trained model, e.g. one loaded from disk.
	///
	/// Strategy and ngram size are taken from the model. The returned
	/// instance is locked.
	pub fn from_model(model: Model, config: &TextMakerConfig) -> Self {
		if model.strategy() != config.strategy || model.order() != config.ngram_size {
			warn!(
				"model was built with strategy={} ngram_size={}, config asked for strategy={} ngram_size={}",
				model.strategy(),
				model.order(),
				config.strategy,
				config.ngram_size
			);
		}
		Self {
			strategy: model.strategy(),
			ngram_size: model.order(),
			tokenizer: Arc::from(config.tokenizer.create()),
			joiner: Arc::from(config.joiner.create()),
			proofreader: Proofreader,
			lifecycle: Lifecycle::Trained(model),
		}
	}

	/// Central lock check, run first by every mutating operation.
	fn ensure_untrained(&self, operation: &'static str) -> Result<()> {
		match self.lifecycle {
			Lifecycle::Untrained => Ok(()),
			Lifecycle::Trained(_) => Err(PressError::Locked { operation }),
		}
	}

	pub fn is_locked(&self) -> bool {
		matches!(self.lifecycle, Lifecycle::Trained(_))
	}

	pub fn strategy(&self) -> Strategy {
		self.strategy
	}

	pub fn ngram_size(&self) -> usize {
		self.ngram_size
	}

	/// Changes the maximum context length.
	///
	/// # Errors
	/// - `Locked` if the text maker is trained
	/// - `InvalidNgramSize` if `ngram_size` is 0
	pub fn set_ngram_size(&mut self, ngram_size: usize) -> Result<()> {
		self.ensure_untrained("changing ngram_size")?;
		if ngram_size == 0 {
			return Err(PressError::InvalidNgramSize(ngram_size));
		}
		self.ngram_size = ngram_size;
		Ok(())
	}

	pub fn set_tokenizer<T: SentenceTokenizer + 'static>(&mut self, tokenizer: T) -> Result<()> {
		self.ensure_untrained("changing the tokenizer")?;
		self.tokenizer = Arc::new(tokenizer);
		Ok(())
	}

	pub fn set_joiner<J: Joiner + 'static>(&mut self, joiner: J) -> Result<()> {
		self.ensure_untrained("changing the joiner")?;
		self.joiner = Arc::new(joiner);
		Ok(())
	}

	/// Tokenizes `text` and builds the model from it, then locks.
	///
	/// Returns the tokenized input, mostly useful to compare with the output.
	///
	/// # Errors
	/// Returns `Locked` if the text maker was already trained; the existing
	/// model is kept.
	pub fn train(&mut self, text: &str) -> Result<Vec<Sentence>> {
		self.ensure_untrained("train")?;
		let sentences = self.tokenizer.tokenize(text);
		self.train_tokenized(sentences)
	}

	/// Builds the model from already tokenized sentences, then locks.
	pub fn train_tokenized(&mut self, sentences: Vec<Sentence>) -> Result<Vec<Sentence>> {
		self.ensure_untrained("train")?;
		let model = Model::build(self.strategy, &sentences, self.ngram_size)?;
		debug!(
			"trained {} text maker: ngram_size={}, sentences={}, contexts={}",
			self.strategy,
			self.ngram_size,
			sentences.len(),
			model.table().len()
		);
		self.lifecycle = Lifecycle::Trained(model);
		Ok(sentences)
	}

	/// Returns the trained model.
	///
	/// # Errors
	/// Returns `NotTrained` before training.
	pub fn model(&self) -> Result<&Model> {
		match &self.lifecycle {
			Lifecycle::Trained(model) => Ok(model),
			Lifecycle::Untrained => Err(PressError::NotTrained),
		}
	}

	/// Generates `count` independent sentences.
	///
	/// # Errors
	/// Returns `NotTrained` before training.
	pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<Sentence>> {
		let model = self.model()?;
		Ok((0..count).map(|_| model.generate(&[], rng)).collect())
	}

	/// Generates `count` independent sentences, each continuing `seed`.
	///
	/// Only the last seed token has to be known by the model; an empty seed
	/// is the same as [`TextMaker::generate`]. Every returned sentence starts
	/// with the seed words.
	///
	/// # Errors
	/// - `NotTrained` before training
	/// - `UnknownSeed` if the last seed token was never observed
	pub fn generate_with_seed<R: Rng + ?Sized>(
		&self,
		seed: &[String],
		count: usize,
		rng: &mut R,
	) -> Result<Vec<Sentence>> {
		let model = self.model()?;
		if let Some(last) = seed.last() {
			if !model.knows(last) {
				return Err(PressError::UnknownSeed(last.clone()));
			}
		}
		Ok((0..count).map(|_| model.generate(seed, rng)).collect())
	}

	/// Creates an untrained copy with the same configuration and collaborators.
	///
	/// # Errors
	/// Returns `Locked` if this instance is trained: a copy must never share
	/// a model.
	pub fn try_clone(&self) -> Result<Self> {
		self.ensure_untrained("clone")?;
		Ok(Self {
			strategy: self.strategy,
			ngram_size: self.ngram_size,
			tokenizer: Arc::clone(&self.tokenizer),
			joiner: Arc::clone(&self.joiner),
			proofreader: self.proofreader,
			lifecycle: Lifecycle::Untrained,
		})
	}

	/// Joins sentences into text with the configured joiner, optionally
	/// running the proofreader on the result.
	pub fn join(&self, sentences: &[Sentence], proofread: bool) -> String {
		let text = self.joiner.join(sentences);
		if proofread { self.proofreader.format(&text) } else { text }
	}

	/// Writes the trained model to `path`.
	///
	/// # Errors
	/// Returns `NotTrained` before training, or any I/O or encoding error.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let bytes = self.model()?.to_bytes()?;
		std::fs::write(&path, &bytes)?;
		info!("saved model to {} ({} bytes)", path.as_ref().display(), bytes.len());
		Ok(())
	}

	/// Reads a model written by [`TextMaker::save`]; the result is locked.
	pub fn load<P: AsRef<Path>>(path: P, config: &TextMakerConfig) -> Result<Self> {
		let bytes = std::fs::read(&path)?;
		let model = Model::from_bytes(&bytes)?;
		info!("loaded {} model from {}", model.strategy(), path.as_ref().display());
		Ok(Self::from_model(model, config))
	}

	/// Trains on a text file, caching the model next to it.
	///
	/// If `<stem>.bin` exists beside `path` it is loaded instead of reading
	/// the text. Otherwise the text is read, trained on, and the model saved
	/// to `<stem>.bin` for the next time.
	pub fn from_text_file<P: AsRef<Path>>(path: P, config: &TextMakerConfig) -> Result<Self> {
		let binary_path = io::model_cache_path(&path)?;
		if binary_path.exists() {
			return Self::load(binary_path, config);
		}

		let mut text_maker = Self::from_config(config)?;
		text_maker.train(&io::read_file(&path)?)?;
		debug!("trained '{}' from {}", io::corpus_name(&path)?, path.as_ref().display());
		text_maker.save(binary_path)?;
		Ok(text_maker)
	}
}
