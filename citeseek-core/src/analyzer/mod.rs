//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Trims and lower-cases raw text
//! - **Tokenizer**: Splits normalized text into alphanumeric tokens

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{normalize, TextNormalizer};
pub use tokenizer::{tokenize, TokenSet, Tokenizer};
