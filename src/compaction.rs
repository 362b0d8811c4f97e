//! Document compaction: the inverse of expansion, under a target context.
use json_syntax::{Object, Value};

use crate::context::{is_absolute_iri, Context};
use crate::error::Error;
use crate::keyword::{is_keyword, Keyword};
use crate::literal::compact_literal;
use crate::utils::{add_value, unique};

/// Compacts `element` under the merged target context.
pub(crate) fn compact_element(
	ctx: &Context,
	active_property: Option<&str>,
	element: &Value,
) -> Result<Value, Error> {
	match element {
		Value::Null => Ok(Value::Null),
		Value::Array(items) => Ok(Value::Array(compact_array(ctx, active_property, items)?)),
		Value::Object(map) => compact_object(ctx, active_property, element, map),
		_ => compact_literal(ctx, active_property, element),
	}
}

fn compact_array(
	ctx: &Context,
	active_property: Option<&str>,
	items: &[Value],
) -> Result<Vec<Value>, Error> {
	let mut result = Vec::with_capacity(items.len());
	for item in items {
		if item.is_array() {
			return Err(Error::NestedArray);
		}

		result.push(compact_element(ctx, active_property, item)?);
	}

	Ok(result)
}

fn compact_object(
	ctx: &Context,
	active_property: Option<&str>,
	element: &Value,
	map: &Object,
) -> Result<Value, Error> {
	// Expanded list objects: unwrap when the property's container restores
	// the list on expansion, rewrap under the `@list` alias otherwise.
	if let Some(list) = unique(map, "@list")? {
		let compacted = match list {
			Value::Null => Value::Null,
			Value::Array(items) => Value::Array(compact_array(ctx, active_property, items)?),
			_ => return Err(Error::InvalidList),
		};

		let list_container = match active_property {
			Some(property) => ctx.container(property)?.as_deref() == Some("@list"),
			None => false,
		};
		if list_container {
			return Ok(compacted);
		}

		let mut out = Object::default();
		out.insert(ctx.keywords().alias(Keyword::List).into(), compacted);
		return Ok(Value::Object(out));
	}

	// `@set` wrappers are erased.
	if let Some(set) = unique(map, "@set")? {
		return compact_element(ctx, active_property, set);
	}

	// Literal maps and lone references go to the value coercer.
	if unique(map, "@value")?.is_some() || (map.len() == 1 && unique(map, "@id")?.is_some()) {
		return compact_literal(ctx, active_property, element);
	}

	// Subjects.
	let mut result = Object::default();
	for entry in map.entries() {
		let key = entry.key.as_str();
		if key == "@context" {
			continue;
		}

		if is_keyword(key) {
			// Keyword entries keep their natural shape, emitted under the
			// context's alias for the keyword.
			let compacted_key = ctx.compact_iri(key)?;
			let compacted_value = compact_element(ctx, Some(key), &entry.value)?;
			result.insert(compacted_key.as_str().into(), compacted_value);
			continue;
		}

		// Drop keys that are neither defined terms nor absolute IRIs.
		if !is_absolute_iri(key) && ctx.entry(key).is_none() {
			continue;
		}

		let compacted_key = ctx.compact_iri(key)?;
		let compacted_value = compact_element(ctx, Some(key), &entry.value)?;
		let always_array = matches!(
			ctx.container(key)?.as_deref(),
			Some("@list") | Some("@set")
		);
		add_value(&mut result, compacted_key.as_str(), compacted_value, always_array);
	}

	Ok(Value::Object(result))
}
