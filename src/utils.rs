//! Helpers over generic JSON subjects and values.
use json_syntax::{Object, Value};

use crate::context::Context;
use crate::error::Error;
use crate::keyword::Keyword;

/// Deep clone rebuilding every object with its keys sorted alphabetically,
/// making traversal order, and therefore every output, deterministic.
pub(crate) fn clone_sorted(value: &Value) -> Value {
	match value {
		Value::Array(items) => Value::Array(items.iter().map(clone_sorted).collect()),
		Value::Object(map) => {
			let mut entries: Vec<(&str, &Value)> = map
				.entries()
				.iter()
				.map(|e| (e.key.as_str(), &e.value))
				.collect();
			entries.sort_by(|a, b| a.0.cmp(b.0));

			let mut out = Object::default();
			for (key, entry) in entries {
				out.insert(key.into(), clone_sorted(entry));
			}
			Value::Object(out)
		}
		other => other.clone(),
	}
}

/// Single-valued lookup, rejecting duplicate keys.
pub(crate) fn unique<'a>(map: &'a Object, key: &str) -> Result<Option<&'a Value>, Error> {
	map.get_unique(key)
		.map_err(|_| Error::DuplicateKey(key.to_owned()))
}

/// Returns `true` if the subject has the given property.
pub fn has_property(subject: &Object, property: &str) -> bool {
	subject.get_unique(property).ok().flatten().is_some()
}

/// Returns `true` if the subject has the given value for the given property:
/// the property is a sequence containing the value, or (for non-sequence
/// values) equals the value.
pub fn has_value(subject: &Object, property: &str, value: &Value) -> bool {
	match subject.get_unique(property).ok().flatten() {
		Some(Value::Array(items)) => items.contains(value),
		Some(existing) => !value.is_array() && existing == value,
		None => false,
	}
}

/// Adds a value to a subject.
///
/// An absent property is set to the value, or to a singleton array when
/// `always_array` is set. A present property is coerced to an array as needed
/// and the value appended. Array values are flattened in one by one.
/// Duplicates are not added.
pub fn add_value(subject: &mut Object, property: &str, value: Value, always_array: bool) {
	if always_array && subject.get_unique(property).ok().flatten().is_none() {
		subject.insert(property.into(), Value::Array(Vec::new()));
	}

	match value {
		Value::Array(values) => {
			for value in values {
				add_value(subject, property, value, false);
			}
		}
		value => {
			if has_value(subject, property, &value) {
				return;
			}

			let is_array = subject
				.get_unique(property)
				.ok()
				.flatten()
				.map(Value::is_array);

			match is_array {
				None => {
					subject.insert(property.into(), value);
				}
				Some(true) => {
					if let Some(Value::Array(items)) =
						subject.get_unique_mut(property).ok().flatten()
					{
						items.push(value);
					}
				}
				Some(false) => {
					let existing = subject
						.remove_unique(property)
						.ok()
						.flatten()
						.map(|e| e.value)
						.unwrap_or(Value::Null);
					subject.insert(property.into(), Value::Array(vec![existing, value]));
				}
			}
		}
	}
}

/// All values of a property, as a sequence.
pub fn get_values(subject: &Object, property: &str) -> Vec<Value> {
	match subject.get_unique(property).ok().flatten() {
		Some(Value::Array(items)) => items.clone(),
		Some(value) => vec![value.clone()],
		None => Vec::new(),
	}
}

/// Removes a property from a subject.
pub fn remove_property(subject: &mut Object, property: &str) {
	if subject.remove_unique(property).is_err() {
		// Duplicate entries: rebuild without the key.
		let kept: Vec<_> = subject
			.entries()
			.iter()
			.filter(|e| e.key.as_str() != property)
			.cloned()
			.collect();

		let mut out = Object::default();
		for entry in kept {
			out.insert(entry.key, entry.value);
		}
		*subject = out;
	}
}

/// Removes a value from a subject property. An emptied property is removed,
/// a remaining singleton collapses to a scalar unless `always_array` is set.
pub fn remove_value(subject: &mut Object, property: &str, value: &Value, always_array: bool) {
	let values: Vec<Value> = get_values(subject, property)
		.into_iter()
		.filter(|v| v != value)
		.collect();

	if values.is_empty() {
		remove_property(subject, property);
	} else if values.len() == 1 && !always_array {
		if let Some(single) = values.into_iter().next() {
			subject.insert(property.into(), single);
		}
	} else {
		subject.insert(property.into(), Value::Array(values));
	}
}

/// Looks up one facet of a term definition in a raw context value.
pub fn get_context_value(context: &Value, key: &str, kind: Keyword) -> Result<Option<String>, Error> {
	Context::from_value(context)?.get(key, kind)
}
