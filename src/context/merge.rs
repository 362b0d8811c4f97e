//! Context merging.
use json_syntax::{Object, Value};

use crate::error::Error;

/// Merges the context value `local` into `base`.
///
/// `local` may be a definition map, an array of contexts folded left, or
/// null (merged as the empty map). Any other shape is an invalid context.
pub(crate) fn merge_into(base: &Object, local: &Value) -> Result<Object, Error> {
	match local {
		Value::Null => Ok(base.clone()),
		Value::Object(map) => merge_object(base, map),
		Value::Array(items) => {
			let mut merged = base.clone();
			for item in items {
				merged = merge_into(&merged, item)?;
			}
			Ok(merged)
		}
		_ => Err(Error::InvalidContext(
			"a context must be an object, an array or null".to_owned(),
		)),
	}
}

fn merge_object(base: &Object, local: &Object) -> Result<Object, Error> {
	let mut merged = base.clone();

	// IRI replacement: a later mapping to an already used IRI removes every
	// earlier term bound to that IRI.
	for entry in local.entries() {
		if let Some(iri) = defined_iri(&entry.value) {
			let replaced: Vec<_> = merged
				.entries()
				.iter()
				.filter(|e| defined_iri(&e.value) == Some(iri))
				.map(|e| e.key.clone())
				.collect();

			for key in replaced {
				merged
					.remove_unique(key.as_str())
					.map_err(|_| Error::InvalidContext(key.as_str().to_owned()))?;
			}
		}
	}

	// Overlay, later keys winning on collision.
	for entry in local.entries() {
		merged.insert(entry.key.clone(), entry.value.clone());
	}

	Ok(merged)
}

/// The IRI a context entry binds: the entry value itself for string
/// definitions, its `@id` for definition maps.
fn defined_iri(value: &Value) -> Option<&str> {
	match value {
		Value::String(s) => Some(s.as_str()),
		Value::Object(map) => map.get_unique("@id").ok().flatten().and_then(Value::as_str),
		_ => None,
	}
}
