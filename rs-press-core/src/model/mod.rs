//! Markov-chain modeling and generation engine.
//!
//! - Tokens, contexts and the sentinel (`token`)
//! - Normalized next-token distributions (`distribution`)
//! - Transition tables and their multi-order builder (`table`)
//! - Backoff sampling (`sampler`)
//! - Interchangeable engines behind one contract (`engine`, `crude`)

/// Engine contract, backoff engine, strategy selection and the trained `Model`.
pub mod engine;

/// Single fixed-order engine without backoff.
pub mod crude;

/// Mapping from context to next-token distribution.
///
/// Handles sentence ingestion for every order up to N, parallel counting,
/// merging of partial counts and normalization.
pub mod table;

/// Sentence generation from a transition table with order backoff.
pub mod sampler;

/// Weighted candidate set for one context, with weighted random sampling.
pub mod distribution;

/// Token, sentinel and context types.
pub mod token;

pub use engine::{BackoffModel, MarkovEngine, Model, Strategy};
pub use crude::CrudeModel;
pub use token::{Context, Sentence, Token};
