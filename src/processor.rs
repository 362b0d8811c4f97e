//! The public document operations.
use json_syntax::{Object, Value};

use crate::compaction::compact_element;
use crate::context::Context;
use crate::error::Error;
use crate::expansion::expand_element;
use crate::loader::{resolve_context_urls, ContextResolver};
use crate::utils::clone_sorted;

/// Operation options.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
	/// Prune the compaction context down to the terms actually used by the
	/// output. Accepted, and currently ignored.
	pub optimize: bool,
}

/// The document operations.
///
/// Each operation clones its input, resolves every remote `@context`
/// reference through the given resolver, then runs the synchronous rewrite
/// core. Framing, normalization and RDF emission are not supported by this
/// engine and fail with [`Error::NotImplemented`].
pub trait Processor {
	/// Expands the document: every property becomes an absolute IRI, every
	/// value a fully qualified literal or node, and `@context` entries are
	/// consumed.
	#[allow(async_fn_in_trait)]
	async fn expand(&self, resolver: &impl ContextResolver) -> Result<Value, Error>;

	/// Compacts the document under the given context.
	#[allow(async_fn_in_trait)]
	async fn compact(
		&self,
		context: &Value,
		resolver: &impl ContextResolver,
	) -> Result<Value, Error> {
		self.compact_with(context, Options::default(), resolver).await
	}

	/// Compacts the document under the given context, with options.
	#[allow(async_fn_in_trait)]
	async fn compact_with(
		&self,
		context: &Value,
		options: Options,
		resolver: &impl ContextResolver,
	) -> Result<Value, Error>;

	#[allow(async_fn_in_trait)]
	async fn frame(
		&self,
		_frame: &Value,
		_resolver: &impl ContextResolver,
	) -> Result<Value, Error> {
		Err(Error::NotImplemented("framing"))
	}

	#[allow(async_fn_in_trait)]
	async fn normalize(&self, _resolver: &impl ContextResolver) -> Result<Value, Error> {
		Err(Error::NotImplemented("normalization"))
	}

	#[allow(async_fn_in_trait)]
	async fn to_rdf(&self, _resolver: &impl ContextResolver) -> Result<Value, Error> {
		Err(Error::NotImplemented("triple emission"))
	}
}

impl Processor for Value {
	async fn expand(&self, resolver: &impl ContextResolver) -> Result<Value, Error> {
		let mut input = clone_sorted(self);
		resolve_context_urls(&mut input, resolver).await?;
		expand_element(&Context::new(), None, &input)
	}

	async fn compact_with(
		&self,
		context: &Value,
		options: Options,
		resolver: &impl ContextResolver,
	) -> Result<Value, Error> {
		let mut input = clone_sorted(self);
		resolve_context_urls(&mut input, resolver).await?;

		let context_value = resolve_bare_context(context, resolver).await?;

		// Pre-compaction: the input is brought to expanded form first, and
		// the target context is merged. Failures here are compaction errors.
		let expanded = expand_element(&Context::new(), None, &input)?;
		let ctx = Context::from_value(&context_value)
			.map_err(|e| Error::Compact(Box::new(e)))?;

		let result = compact_element(&ctx, None, &expanded)?;

		let ctx = optimize_context(ctx, &result, options.optimize);
		match result {
			Value::Object(map) if !ctx.is_empty() => {
				let mut out = Object::default();
				out.insert("@context".into(), Value::Object(ctx.into_object()));
				for entry in map.entries() {
					out.insert(entry.key.clone(), entry.value.clone());
				}
				Ok(Value::Object(out))
			}
			other => Ok(other),
		}
	}
}

/// Merges an ordered pair of contexts into a single effective context,
/// resolving remote references in both.
///
/// Either argument may be a definition map, an array of contexts (folded
/// left over the empty context) or a bare context URL.
pub async fn merge_contexts(
	ctx1: &Value,
	ctx2: &Value,
	resolver: &impl ContextResolver,
) -> Result<Value, Error> {
	let first = resolve_bare_context(ctx1, resolver).await?;
	let second = resolve_bare_context(ctx2, resolver).await?;

	let merged = Context::from_value(&first)?.merged(&second)?;
	Ok(Value::Object(merged.into_object()))
}

/// Runs the URL resolution pass over a bare context value, by wrapping it
/// into a document of its own.
async fn resolve_bare_context(
	context: &Value,
	resolver: &impl ContextResolver,
) -> Result<Value, Error> {
	let mut wrapped = {
		let mut o = Object::default();
		o.insert("@context".into(), clone_sorted(context));
		Value::Object(o)
	};
	resolve_context_urls(&mut wrapped, resolver).await?;

	match wrapped {
		Value::Object(mut map) => Ok(map
			.remove_unique("@context")
			.ok()
			.flatten()
			.map(|entry| entry.value)
			.unwrap_or(Value::Null)),
		_ => Ok(Value::Null),
	}
}

/// Prunes the compaction context down to the terms used by the output.
///
/// Pruning is currently a stub: the merged context is returned unchanged and
/// the `optimize` flag has no effect.
fn optimize_context(context: Context, _output: &Value, _optimize: bool) -> Context {
	context
}
