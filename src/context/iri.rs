//! IRI expansion and compaction against a context.
use indexmap::IndexSet;

use super::Context;
use crate::error::Error;
use crate::keyword::Keyword;

impl Context {
	/// Expands a term, prefixed name or keyword alias into its final form.
	///
	/// A single rewriting step is applied repeatedly until the value
	/// stabilizes:
	///   1. a `prefix:suffix` pair whose prefix is defined becomes the prefix
	///      IRI concatenated with the suffix;
	///   2. a term defined in the context becomes its `@id` (one lookup, the
	///      next iteration takes care of further expansion);
	///   3. anything else is left unchanged.
	///
	/// Seeing the same intermediate value twice, or iterating more often than
	/// the context has entries, means the context is cyclical.
	pub fn expand_term(&self, term: &str) -> Result<String, Error> {
		let mut current = term.to_owned();
		let mut seen: IndexSet<String> = IndexSet::new();
		seen.insert(current.clone());

		let limit = self.as_object().len() + 1;
		for _ in 0..=limit {
			let next = self.expand_term_once(&current)?;
			if next == current {
				return Ok(current);
			}

			if !seen.insert(next.clone()) {
				break;
			}

			current = next;
		}

		Err(Error::CyclicalContext(term.to_owned()))
	}

	fn expand_term_once(&self, term: &str) -> Result<String, Error> {
		// A term containing a colon is split at the first colon. When the
		// prefix is defined, the result is the prefix IRI followed by the
		// suffix; otherwise the term may already be an absolute IRI and is
		// left alone.
		if let Some((prefix, suffix)) = term.split_once(':') {
			if self.entry(prefix).is_some() {
				if let Some(id) = self.get(prefix, Keyword::Id)? {
					return Ok(format!("{id}{suffix}"));
				}
			}

			return Ok(term.to_owned());
		}

		// A defined term becomes its `@id`. This also turns user aliases into
		// the keyword they stand for.
		if self.entry(term).is_some() {
			if let Some(id) = self.get(term, Keyword::Id)? {
				return Ok(id);
			}
		}

		Ok(term.to_owned())
	}

	/// Compacts an IRI to the shortest form this context permits.
	///
	/// Tried in order: an exact match against a defined term, a keyword
	/// alias, a strict-prefix match producing a `term:suffix` pair. Ties are
	/// broken by the first match in context order; exact terms take
	/// precedence over prefixes. An IRI nothing matches is returned
	/// unchanged.
	pub fn compact_iri(&self, iri: &str) -> Result<String, Error> {
		for entry in self.as_object().entries() {
			let term = entry.key.as_str();
			if self.expand_term(term)? == iri {
				return Ok(term.to_owned());
			}
		}

		if let Ok(keyword) = Keyword::try_from(iri) {
			return Ok(self.keywords().alias(keyword).to_owned());
		}

		for entry in self.as_object().entries() {
			let term = entry.key.as_str();
			if let Some(id) = self.get_expanded(term, Keyword::Id)? {
				if !id.is_empty() && iri.len() > id.len() && iri.starts_with(id.as_str()) {
					return Ok(format!("{term}:{}", &iri[id.len()..]));
				}
			}
		}

		Ok(iri.to_owned())
	}
}

/// An absolute IRI has the shape `\w+://\S+`.
///
/// The pattern is unanchored: any `://` occurrence immediately preceded by a
/// word character and followed by a non-empty, whitespace-free remainder
/// qualifies.
pub fn is_absolute_iri(value: &str) -> bool {
	for (i, _) in value.match_indices("://") {
		let word_before = value[..i]
			.chars()
			.next_back()
			.map(|c| c.is_ascii_alphanumeric() || c == '_')
			.unwrap_or(false);
		let rest = &value[i + 3..];

		if word_before && !rest.is_empty() && rest.chars().all(|c| !c.is_whitespace()) {
			return true;
		}
	}

	false
}

/// A context URL must additionally use an `http` or `https` scheme to be
/// fetchable.
pub fn is_fetchable_url(value: &str) -> bool {
	(value.starts_with("http://") || value.starts_with("https://")) && is_absolute_iri(value)
}
