//! Document rewriting engine for the legacy JSON-LD dialect.
//!
//! A JSON-LD document mixes ordinary JSON data with a *context* describing
//! how local short names resolve to absolute IRIs, and with reserved markers
//! (`@id`, `@type`, `@value`, `@language`, `@list`, `@set`, `@graph`) that
//! attach semantic meaning to the surrounding structure. This crate
//! implements the four document operations of the early dialect over generic
//! [`json_syntax::Value`] trees:
//!
//!   - **expansion** — canonicalize a document so that every property is an
//!     absolute IRI and every value is a fully qualified literal or node;
//!   - **compaction** — the inverse, applying a user-provided context to
//!     produce short names;
//!   - **context merging** — fold an ordered list of contexts into a single
//!     effective context, honoring the IRI replacement rule;
//!   - **context URL resolution** — replace string `@context` references with
//!     their fetched content, through an injected [`ContextResolver`].
//!
//! The entry point is the [`Processor`] trait, implemented on
//! [`json_syntax::Value`]:
//!
//! ```
//! use json_ld_lite::{NoResolver, Processor};
//! use json_ld_lite::json_syntax::{Parse, Value};
//!
//! # #[async_std::main]
//! # async fn main() {
//! let (document, _) = Value::parse_str(
//! 	r#"
//! 	{
//! 		"@context": {"name": "http://xmlns.com/foaf/0.1/name"},
//! 		"name": "Tim"
//! 	}"#,
//! )
//! .expect("unable to parse document");
//!
//! // No remote context is referenced, `NoResolver` will not be called.
//! let expanded = document.expand(&NoResolver).await.expect("expansion failed");
//!
//! assert_eq!(
//! 	expanded,
//! 	Value::parse_str(r#"{"http://xmlns.com/foaf/0.1/name": [{"@value": "Tim"}]}"#)
//! 		.unwrap()
//! 		.0
//! );
//! # }
//! ```
//!
//! Framing, normalization and triple emission are not part of this engine;
//! the corresponding [`Processor`] operations fail with
//! [`Error::NotImplemented`].
pub use json_syntax;
pub use json_syntax::{Object, Value};

mod compaction;
mod context;
mod error;
mod expansion;
mod keyword;
mod literal;
mod loader;
mod processor;
mod utils;

pub use context::{is_absolute_iri, is_fetchable_url, Context, Keywords};
pub use error::{Error, ErrorCode};
pub use keyword::{is_framing_keyword, is_keyword, Keyword};
pub use loader::{
	resolve_context_urls, use_url_resolver, ContextResolver, LoadError, LoadErrorCause,
	MapResolver, NoResolver, UrlResolver,
};
pub use processor::{merge_contexts, Options, Processor};
pub use utils::{
	add_value, get_context_value, get_values, has_property, has_value, remove_property,
	remove_value,
};
