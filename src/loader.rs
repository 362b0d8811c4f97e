//! Context URL resolution.
//!
//! Remote `@context` references are resolved before any rewrite runs: a
//! discovery traversal collects every URL, all fetches are issued through the
//! injected [`ContextResolver`] capability and settled concurrently, then a
//! substitution traversal replaces each URL string with the fetched context.
use std::collections::HashMap;

use futures::future;
use indexmap::IndexSet;
use iref::{Iri, IriBuf};
use json_syntax::{Object, Parse, Value};
use log::debug;

use crate::context::is_fetchable_url;
use crate::error::Error;

pub type LoadErrorCause = Box<dyn std::error::Error + Send + Sync>;

/// Context URL fetch error.
#[derive(Debug, thiserror::Error)]
#[error("loading context `{target}` failed: {cause}")]
pub struct LoadError {
	pub target: IriBuf,
	pub cause: LoadErrorCause,
}

impl LoadError {
	pub fn new(target: IriBuf, cause: impl 'static + std::error::Error + Send + Sync) -> Self {
		Self {
			target,
			cause: Box::new(cause),
		}
	}
}

/// Context document fetcher.
///
/// The resolver is an injected capability: it is given the URL of a remote
/// context and returns the JSON document behind it (or its text, which is
/// then parsed). Resolvers may be shared between operations and must
/// tolerate reentrant use.
pub trait ContextResolver {
	#[allow(async_fn_in_trait)]
	async fn resolve(&self, url: &Iri) -> Result<Value, LoadError>;
}

impl<'l, L: ContextResolver> ContextResolver for &'l L {
	async fn resolve(&self, url: &Iri) -> Result<Value, LoadError> {
		L::resolve(self, url).await
	}
}

#[derive(Debug, thiserror::Error)]
#[error("context URL resolution is not implemented")]
struct NoResolverError;

/// The default resolver: every fetch fails with `not implemented`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResolver;

impl ContextResolver for NoResolver {
	async fn resolve(&self, url: &Iri) -> Result<Value, LoadError> {
		Err(LoadError::new(url.to_owned(), NoResolverError))
	}
}

#[derive(Debug, thiserror::Error)]
#[error("no document registered for this URL")]
struct NotRegistered;

/// Resolver backed by a table of pre-loaded documents. No network call is
/// performed and the returned content can be trusted.
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
	documents: HashMap<IriBuf, Value>,
}

impl MapResolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the document served for the given URL.
	pub fn insert(&mut self, url: IriBuf, document: Value) {
		self.documents.insert(url, document);
	}
}

impl ContextResolver for MapResolver {
	async fn resolve(&self, url: &Iri) -> Result<Value, LoadError> {
		self.documents
			.get(url)
			.cloned()
			.ok_or_else(|| LoadError::new(url.to_owned(), NotRegistered))
	}
}

/// A named resolver, installed through [`use_url_resolver`].
#[derive(Clone, Debug)]
pub enum UrlResolver {
	None(NoResolver),
	Map(MapResolver),
}

impl ContextResolver for UrlResolver {
	async fn resolve(&self, url: &Iri) -> Result<Value, LoadError> {
		match self {
			Self::None(r) => r.resolve(url).await,
			Self::Map(r) => r.resolve(url).await,
		}
	}
}

/// Installs a resolver by kind name, forwarding `params` to its constructor.
///
/// Built-in kinds: `"none"` (no parameters) and `"map"` (alternating
/// URL / inline JSON document pairs). Requesting any other kind fails with
/// [`Error::UnknownUrlResolver`].
pub fn use_url_resolver(kind: &str, params: &[&str]) -> Result<UrlResolver, Error> {
	match kind {
		"none" => Ok(UrlResolver::None(NoResolver)),
		"map" => {
			let mut resolver = MapResolver::new();
			for pair in params.chunks(2) {
				let [url, source] = pair else {
					return Err(Error::InvalidUrl(pair[0].to_owned()));
				};

				let iri = IriBuf::new((*url).to_owned())
					.map_err(|_| Error::InvalidUrl((*url).to_owned()))?;
				let document = Value::parse_str(source)
					.map_err(|_| Error::InvalidUrl((*url).to_owned()))?
					.0;
				resolver.insert(iri, document);
			}
			Ok(UrlResolver::Map(resolver))
		}
		_ => Err(Error::UnknownUrlResolver(kind.to_owned())),
	}
}

/// Replaces every string `@context` reference in `document` with the content
/// fetched through `resolver`.
///
/// The document is fully traversed before any fetch is issued; each unique
/// URL is fetched at most once, all fetches settle before substitution, and
/// substitution is driven by a second traversal so its outcome never depends
/// on fetch completion order. Failures are accumulated: a single failure is
/// reported as itself, several as the aggregate [`Error::ContextUrls`].
pub async fn resolve_context_urls(
	document: &mut Value,
	resolver: &impl ContextResolver,
) -> Result<(), Error> {
	let mut urls: IndexSet<String> = IndexSet::new();
	collect_urls(document, &mut urls);

	if urls.is_empty() {
		return Ok(());
	}

	debug!("resolving {} context URL(s)", urls.len());

	let fetches: Vec<_> = urls
		.iter()
		.map(|url| fetch_context(url.as_str(), resolver))
		.collect();
	let outcomes = future::join_all(fetches).await;

	let mut table: HashMap<String, Value> = HashMap::new();
	let mut errors = Vec::new();
	for (url, outcome) in urls.iter().zip(outcomes) {
		match outcome {
			Ok(context) => {
				table.insert(url.clone(), context);
			}
			Err(e) => errors.push(e),
		}
	}

	if !errors.is_empty() {
		return Err(if errors.len() == 1 {
			errors.remove(0)
		} else {
			Error::ContextUrls(errors)
		});
	}

	let replaced = substitute_urls(&*document, &table);
	*document = replaced;
	Ok(())
}

/// Fetches one context URL: validates the URL, invokes the resolver, parses
/// string payloads and extracts the `@context` entry of the fetched map.
async fn fetch_context(url: &str, resolver: &impl ContextResolver) -> Result<Value, Error> {
	if !is_fetchable_url(url) {
		return Err(Error::InvalidUrl(url.to_owned()));
	}

	let iri = IriBuf::new(url.to_owned()).map_err(|_| Error::InvalidUrl(url.to_owned()))?;

	debug!("fetching context: {url}");
	let document = resolver.resolve(&iri).await?;

	let document = match document {
		Value::String(s) => {
			Value::parse_str(s.as_str())
				.map_err(|_| Error::InvalidUrl(url.to_owned()))?
				.0
		}
		other => other,
	};

	match document {
		Value::Object(mut map) => Ok(map
			.remove_unique("@context")
			.map_err(|_| Error::InvalidUrl(url.to_owned()))?
			.map(|entry| entry.value)
			.unwrap_or_else(|| Value::Object(Object::default()))),
		_ => Err(Error::InvalidUrl(url.to_owned())),
	}
}

fn collect_urls(value: &Value, urls: &mut IndexSet<String>) {
	match value {
		Value::Array(items) => {
			for item in items {
				collect_urls(item, urls);
			}
		}
		Value::Object(map) => {
			for entry in map.entries() {
				if entry.key.as_str() == "@context" {
					match &entry.value {
						Value::String(s) => {
							urls.insert(s.as_str().to_owned());
						}
						Value::Array(items) => {
							for item in items {
								if let Some(s) = item.as_str() {
									urls.insert(s.to_owned());
								}
							}
						}
						_ => (),
					}
				}

				collect_urls(&entry.value, urls);
			}
		}
		_ => (),
	}
}

fn substitute_urls(value: &Value, table: &HashMap<String, Value>) -> Value {
	match value {
		Value::Array(items) => {
			Value::Array(items.iter().map(|item| substitute_urls(item, table)).collect())
		}
		Value::Object(map) => {
			let mut out = Object::default();
			for entry in map.entries() {
				let replaced = if entry.key.as_str() == "@context" {
					substitute_context(&entry.value, table)
				} else {
					substitute_urls(&entry.value, table)
				};
				out.insert(entry.key.clone(), replaced);
			}
			Value::Object(out)
		}
		other => other.clone(),
	}
}

fn substitute_context(value: &Value, table: &HashMap<String, Value>) -> Value {
	match value {
		Value::String(s) => table
			.get(s.as_str())
			.cloned()
			.unwrap_or_else(|| value.clone()),
		Value::Array(items) => Value::Array(
			items
				.iter()
				.map(|item| substitute_context(item, table))
				.collect(),
		),
		other => substitute_urls(other, table),
	}
}
