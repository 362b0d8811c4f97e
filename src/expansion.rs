//! Document expansion: every property becomes an absolute IRI, every value a
//! fully qualified literal or node.
use json_syntax::{Object, Value};
use mown::Mown;

use crate::context::{is_absolute_iri, Context};
use crate::error::Error;
use crate::keyword::{is_framing_keyword, is_keyword};
use crate::literal::expand_literal;
use crate::utils::{add_value, unique};

/// Expands `element` under `active_context` and `active_property`.
pub(crate) fn expand_element(
	active_context: &Context,
	active_property: Option<&str>,
	element: &Value,
) -> Result<Value, Error> {
	match element {
		// If `element` is null, return null.
		Value::Null => Ok(Value::Null),

		// A bare string without an active property is a property name: return
		// its IRI expansion.
		Value::String(s) if active_property.is_none() => Ok(Value::String(
			active_context.expand_term(s.as_str())?.as_str().into(),
		)),

		Value::Array(items) => {
			let expanded = expand_array(active_context, active_property, items)?;

			// A plain array under a property with an `@list` container is
			// wrapped into a list object.
			if list_container(active_context, active_property)? {
				let mut out = Object::default();
				out.insert("@list".into(), Value::Array(expanded));
				Ok(Value::Object(out))
			} else {
				Ok(Value::Array(expanded))
			}
		}

		Value::Object(map) => expand_object(active_context, active_property, map),

		// Scalars are handed to the value coercer.
		_ => expand_literal(active_context, active_property, element),
	}
}

fn expand_array(
	ctx: &Context,
	active_property: Option<&str>,
	items: &[Value],
) -> Result<Vec<Value>, Error> {
	let mut result = Vec::with_capacity(items.len());
	for item in items {
		if item.is_array() {
			return Err(Error::NestedArray);
		}

		result.push(expand_element(ctx, active_property, item)?);
	}

	Ok(result)
}

fn list_container(ctx: &Context, active_property: Option<&str>) -> Result<bool, Error> {
	match active_property {
		Some(property) => Ok(ctx.container(property)?.as_deref() == Some("@list")),
		None => Ok(false),
	}
}

fn expand_object(
	active_context: &Context,
	active_property: Option<&str>,
	map: &Object,
) -> Result<Value, Error> {
	// A subject carrying its own `@context` replaces the active context for
	// the recursion.
	let active_context = match unique(map, "@context")? {
		Some(local) => Mown::Owned(active_context.merged(local)?),
		None => Mown::Borrowed(active_context),
	};
	let ctx = active_context.as_ref();

	// Expand every key first, so keyword aliases are recognized before the
	// structural branching below.
	let mut expanded_keys = Vec::with_capacity(map.len());
	for entry in map.entries() {
		expanded_keys.push(ctx.expand_term(entry.key.as_str())?);
	}

	// `@list` maps contain exactly a sequence or null.
	for (entry, expanded_key) in map.entries().iter().zip(&expanded_keys) {
		if expanded_key.as_str() == "@list" {
			return match &entry.value {
				Value::Null => {
					let mut out = Object::default();
					out.insert("@list".into(), Value::Null);
					Ok(Value::Object(out))
				}
				Value::Array(items) => {
					let expanded = expand_array(ctx, active_property, items)?;
					let mut out = Object::default();
					out.insert("@list".into(), Value::Array(expanded));
					Ok(Value::Object(out))
				}
				_ => Err(Error::InvalidList),
			};
		}
	}

	// `@set` wrappers are erased.
	for (entry, expanded_key) in map.entries().iter().zip(&expanded_keys) {
		if expanded_key.as_str() == "@set" {
			return expand_element(ctx, active_property, &entry.value);
		}
	}

	let mut result = Object::default();
	for (entry, expanded_key) in map.entries().iter().zip(&expanded_keys) {
		let key = entry.key.as_str();

		// The context entry was merged above.
		if key == "@context" {
			continue;
		}

		// Framing keywords are copied verbatim.
		if is_framing_keyword(key) {
			add_value(&mut result, key, entry.value.clone(), true);
			continue;
		}

		// Structural keywords keep their natural shape.
		if is_keyword(expanded_key.as_str()) {
			let expanded_value = match expanded_key.as_str() {
				// Literal content and language tags are already in final
				// form; re-coercing them would nest value objects.
				"@value" | "@language" => entry.value.clone(),
				_ => expand_element(ctx, Some(key), &entry.value)?,
			};
			result.insert(expanded_key.as_str().into(), expanded_value);
			continue;
		}

		// Drop keys that expand neither to an absolute IRI nor to a defined
		// term.
		if !is_absolute_iri(expanded_key.as_str()) && ctx.entry(key).is_none() {
			continue;
		}

		let expanded_value = expand_element(ctx, Some(key), &entry.value)?;
		add_value(&mut result, expanded_key.as_str(), expanded_value, true);
	}

	Ok(Value::Object(result))
}
