//! Context model: term definitions, keyword aliases and coercion lookups.
use indexmap::IndexMap;
use json_syntax::{Object, Value};

use crate::error::Error;
use crate::keyword::{is_keyword, Keyword};

mod iri;
mod merge;

pub use iri::{is_absolute_iri, is_fetchable_url};

/// A merged JSON-LD context.
///
/// Term definitions are kept in their raw JSON form and consumed read-only by
/// the rewriters; every lookup interprets the stored definitions on the fly.
#[derive(Clone, Debug, Default)]
pub struct Context {
	defs: Object,
}

impl Context {
	/// The empty context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a context from a JSON value: a definition map, or an array of
	/// definition maps folded left over the empty context.
	pub fn from_value(value: &Value) -> Result<Self, Error> {
		Ok(Self {
			defs: merge::merge_into(&Object::default(), value)?,
		})
	}

	/// Merges `local` into this context, honoring the IRI replacement rule.
	pub fn merged(&self, local: &Value) -> Result<Self, Error> {
		Ok(Self {
			defs: merge::merge_into(&self.defs, local)?,
		})
	}

	pub fn as_object(&self) -> &Object {
		&self.defs
	}

	pub fn into_object(self) -> Object {
		self.defs
	}

	pub fn is_empty(&self) -> bool {
		self.defs.is_empty()
	}

	/// Raw definition of the given term, if any.
	pub fn entry(&self, term: &str) -> Option<&Value> {
		self.defs.get_unique(term).ok().flatten()
	}

	/// Looks up one facet of a term definition: its `@id`, `@type`,
	/// `@container` or `@language`.
	///
	/// A string definition carries only an `@id`; a definition map is indexed
	/// by the requested keyword. This is a single lookup, the returned value
	/// is not IRI expanded.
	pub fn get(&self, term: &str, kind: Keyword) -> Result<Option<String>, Error> {
		let Some(entry) = self.entry(term) else {
			return Ok(None);
		};

		match entry {
			Value::Null => Ok(None),
			Value::String(s) => Ok(match kind {
				Keyword::Id => Some(s.as_str().to_owned()),
				_ => None,
			}),
			Value::Object(map) => {
				let value = map
					.get_unique(kind.into_str())
					.map_err(|_| Error::InvalidContext(term.to_owned()))?;
				match value {
					None => Ok(None),
					Some(v) => match v.as_str() {
						Some(s) => Ok(Some(s.to_owned())),
						None => Err(Error::InvalidContext(term.to_owned())),
					},
				}
			}
			_ => Err(Error::InvalidContext(term.to_owned())),
		}
	}

	/// Same as [`Self::get`], but IRI-expands an `@id` or `@type` result
	/// through the context (keywords such as the `@id` type marker are
	/// returned as is).
	pub fn get_expanded(&self, term: &str, kind: Keyword) -> Result<Option<String>, Error> {
		match self.get(term, kind)? {
			Some(value) => {
				if matches!(kind, Keyword::Id | Keyword::Type) && !is_keyword(&value) {
					Ok(Some(self.expand_term(&value)?))
				} else {
					Ok(Some(value))
				}
			}
			None => Ok(None),
		}
	}

	/// Finds the term defining the given property.
	///
	/// The property may be a term of this context, or an IRI some term of this
	/// context expands to (the compactor looks definitions up by expanded
	/// property).
	fn definition_term<'a>(&'a self, property: &'a str) -> Result<Option<&'a str>, Error> {
		if self.entry(property).is_some() {
			return Ok(Some(property));
		}

		for entry in self.defs.entries() {
			let term = entry.key.as_str();
			if self.expand_term(term)? == property {
				return Ok(Some(term));
			}
		}

		Ok(None)
	}

	/// Coercion type declared for the given property, expanded to an IRI
	/// (or the `@id` marker).
	pub fn coerce_type(&self, property: &str) -> Result<Option<String>, Error> {
		match self.definition_term(property)? {
			Some(term) => self.get_expanded(term, Keyword::Type),
			None => Ok(None),
		}
	}

	/// Container declared for the given property.
	pub fn container(&self, property: &str) -> Result<Option<String>, Error> {
		match self.definition_term(property)? {
			Some(term) => self.get(term, Keyword::Container),
			None => Ok(None),
		}
	}

	/// Default language declared for the given property.
	pub fn language(&self, property: &str) -> Result<Option<String>, Error> {
		match self.definition_term(property)? {
			Some(term) => self.get(term, Keyword::Language),
			None => Ok(None),
		}
	}

	/// Builds the keyword alias table of this context.
	///
	/// The table starts as the identity; every context entry whose value is a
	/// built-in keyword registers the entry key as the alias of that keyword,
	/// later entries overriding earlier ones. The table is recomputed on each
	/// call, contexts carry no cache.
	pub fn keywords(&self) -> Keywords {
		let mut table = Keywords::default();
		for entry in self.defs.entries() {
			if let Some(s) = entry.value.as_str() {
				if let Ok(keyword) = Keyword::try_from(s) {
					table.set(keyword, entry.key.as_str());
				}
			}
		}
		table
	}
}

/// Bidirectional keyword alias table of a context.
#[derive(Clone, Debug, Default)]
pub struct Keywords {
	aliases: IndexMap<Keyword, String>,
}

impl Keywords {
	/// The alias to emit for the given keyword, the keyword itself when no
	/// alias is defined.
	pub fn alias(&self, keyword: Keyword) -> &str {
		self.aliases
			.get(&keyword)
			.map(String::as_str)
			.unwrap_or(keyword.into_str())
	}

	/// The keyword a user key stands for: a registered alias, or the keyword
	/// itself.
	pub fn keyword(&self, key: &str) -> Option<Keyword> {
		for (keyword, alias) in &self.aliases {
			if alias == key {
				return Some(*keyword);
			}
		}

		Keyword::try_from(key).ok()
	}

	fn set(&mut self, keyword: Keyword, alias: &str) {
		self.aliases.insert(keyword, alias.to_owned());
	}
}
