//! Completion system for the fscli REPL
//!
//! Completion replays the query grammar over whatever has been typed so far
//! and stops where the parser would run out of input. It is error-tolerant:
//! malformed or incomplete input yields no suggestions, never an error.
//!
//! # Architecture
//!
//! - **TokenStream**: tokens before the cursor, with cursor awareness
//! - **GrammarReplay**: determines the completion context from the token sequence
//! - **Context**: standardized representation of what to complete
//! - **CollectionCache**: collection names per base path, fetched in the background
//! - **Provider**: supplies collection names to the engine
//! - **Engine**: orchestrates the entire completion flow
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use fscli::repl::completion::{CollectionCache, CompletionEngine};
//! use fscli::store::JsonStore;
//!
//! let cache = CollectionCache::new(Arc::new(JsonStore::empty()));
//! let engine = CompletionEngine::new(Arc::new(cache));
//!
//! let suggestions = engine.suggest("QUERY users S");
//! assert_eq!(suggestions[0].text, "SELECT");
//! ```

mod cache;
mod context;
mod engine;
mod fsm;
mod provider;
mod token_stream;

pub use cache::CollectionCache;
pub use context::CompletionContext;
pub use engine::{CompletionEngine, Suggestion};
pub use provider::CandidateProvider;
