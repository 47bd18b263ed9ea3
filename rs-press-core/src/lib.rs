//! Markov-chain text generation library.
//!
//! This crate provides a word-level sentence generator including:
//! - Multi-order transition tables with backoff sampling
//! - A simpler fixed-order engine behind the same contract
//! - A `TextMaker` adapter owning the train-once lifecycle and the
//!   tokenizer/joiner collaborators
//! - Compact on-disk persistence of trained models
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rs_press_core::model::Strategy;
//! use rs_press_core::text::TextMaker;
//!
//! let mut text_maker = TextMaker::new(Strategy::Backoff, 2)?;
//! text_maker.train("Foo is better than bar .")?;
//!
//! let sentences = text_maker.generate(1, &mut StdRng::seed_from_u64(0))?;
//! assert_eq!(text_maker.join(&sentences, true), "Foo is better than bar.");
//! # Ok::<(), rs_press_core::PressError>(())
//! ```

/// Core Markov models and generation logic.
pub mod model;

/// Text makers and their collaborators.
pub mod text;

/// I/O utilities (file loading, path helpers).
pub mod io;

mod error;

pub use error::{PressError, Result};
