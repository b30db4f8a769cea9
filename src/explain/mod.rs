//! Path explanation module
//!
//! Turns a found path of page identifiers into human-readable evidence: one
//! sentence per hop, extracted from the hop's source page. Runs strictly
//! after the search and is independent of it.

mod sentence;

pub use sentence::{explain, extract_sentence, ExplainError, HopReport, Sentence};
