//! Scalar value coercion, in both rewrite directions.
use json_syntax::{Number, Object, Value};

use crate::context::Context;
use crate::error::Error;
use crate::keyword::Keyword;
use crate::utils::unique;

/// Expands a single scalar in light of its property's declared coercion.
pub(crate) fn expand_literal(
	ctx: &Context,
	property: Option<&str>,
	value: &Value,
) -> Result<Value, Error> {
	let Some(property) = property else {
		return Ok(value.clone());
	};

	// `@id` and `@type` values are IRI references themselves.
	let expanded_property = ctx.expand_term(property)?;
	if expanded_property == "@id" || expanded_property == "@type" {
		if let Some(s) = value.as_str() {
			return Ok(Value::String(ctx.expand_term(s)?.as_str().into()));
		}

		return Ok(value.clone());
	}

	match ctx.coerce_type(property)? {
		// An `@id` coercion turns the value into a node reference.
		Some(coerce) if coerce == "@id" => match value.as_str() {
			Some(s) => {
				let mut map = Object::default();
				map.insert("@id".into(), Value::String(ctx.expand_term(s)?.as_str().into()));
				Ok(Value::Object(map))
			}
			None => Ok(value.clone()),
		},
		// Any other coercion produces a typed literal.
		Some(coerce) => {
			let mut map = Object::default();
			map.insert("@type".into(), Value::String(coerce.as_str().into()));
			map.insert(
				"@value".into(),
				Value::String(stringified(value).as_str().into()),
			);
			Ok(Value::Object(map))
		}
		// Without a coercion, the scalar is wrapped as a value object.
		None => match value {
			// Uncoerced doubles are canonicalized.
			Value::Number(n) if is_double(n) => {
				let mut map = Object::default();
				map.insert(
					"@value".into(),
					Value::String(canonical_double(double_value(n)).as_str().into()),
				);
				Ok(Value::Object(map))
			}
			// Uncoerced strings pick up the property's default language.
			Value::String(s) => {
				let mut map = Object::default();
				if let Some(language) = ctx.language(property)? {
					map.insert("@language".into(), Value::String(language.as_str().into()));
				}
				map.insert("@value".into(), Value::String(s.clone()));
				Ok(Value::Object(map))
			}
			_ => {
				let mut map = Object::default();
				map.insert("@value".into(), value.clone());
				Ok(Value::Object(map))
			}
		},
	}
}

/// Compacts a single value in light of its property's declared coercion.
///
/// Non-map values are returned unchanged, except under `@id`/`@type`
/// properties where they are IRIs to compact.
pub(crate) fn compact_literal(
	ctx: &Context,
	property: Option<&str>,
	value: &Value,
) -> Result<Value, Error> {
	if let Some(property) = property {
		let expanded_property = ctx.expand_term(property)?;
		if expanded_property == "@id" || expanded_property == "@type" {
			if let Some(s) = value.as_str() {
				return Ok(Value::String(ctx.compact_iri(s)?.as_str().into()));
			}
		}
	}

	let Value::Object(map) = value else {
		return Ok(value.clone());
	};

	let coerce = match property {
		Some(p) => ctx.coerce_type(p)?,
		None => None,
	};

	// A lone `{@id}` reference.
	if map.len() == 1 {
		if let Some(id) = unique(map, "@id")?.and_then(Value::as_str) {
			let compacted = ctx.compact_iri(id)?;
			if coerce.as_deref() == Some("@id") {
				return Ok(Value::String(compacted.as_str().into()));
			}

			let mut out = Object::default();
			out.insert(
				ctx.keywords().alias(Keyword::Id).into(),
				Value::String(compacted.as_str().into()),
			);
			return Ok(Value::Object(out));
		}
	}

	// Literal maps.
	if let Some(literal) = unique(map, "@value")? {
		let value_type = unique(map, "@type")?.and_then(Value::as_str);
		let value_language = unique(map, "@language")?.and_then(Value::as_str);

		match &coerce {
			Some(coerce) if coerce == "@id" => {
				if let Some(s) = literal.as_str() {
					return Ok(Value::String(ctx.compact_iri(s)?.as_str().into()));
				}
			}
			Some(coerce) if value_type == Some(coerce.as_str()) => {
				// The context re-establishes the type; language information
				// would be lost.
				if value_language.is_some() {
					return Err(Error::TypedValueWithLanguage);
				}

				return Ok(literal.clone());
			}
			Some(_) => (),
			None => {
				// An untyped literal collapses to its raw value when its
				// language matches the property's default (both may be
				// absent).
				if value_type.is_none() {
					let language = match property {
						Some(property) => ctx.language(property)?,
						None => None,
					};

					if value_language == language.as_deref() {
						return Ok(literal.clone());
					}
				}
			}
		}

		// No coercion applies: rebuild the map, replacing keyword keys with
		// their aliases and compacting inner IRIs.
		return rebuild_literal(ctx, map);
	}

	Ok(value.clone())
}

fn rebuild_literal(ctx: &Context, map: &Object) -> Result<Value, Error> {
	let keywords = ctx.keywords();
	let mut out = Object::default();

	for entry in map.entries() {
		match entry.key.as_str() {
			"@value" => {
				out.insert(keywords.alias(Keyword::Value).into(), entry.value.clone());
			}
			"@language" => {
				out.insert(keywords.alias(Keyword::Language).into(), entry.value.clone());
			}
			"@type" => {
				let compacted = match entry.value.as_str() {
					Some(s) => Value::String(ctx.compact_iri(s)?.as_str().into()),
					None => entry.value.clone(),
				};
				out.insert(keywords.alias(Keyword::Type).into(), compacted);
			}
			"@id" => {
				let compacted = match entry.value.as_str() {
					Some(s) => Value::String(ctx.compact_iri(s)?.as_str().into()),
					None => entry.value.clone(),
				};
				out.insert(keywords.alias(Keyword::Id).into(), compacted);
			}
			_ => {
				out.insert(entry.key.clone(), entry.value.clone());
			}
		}
	}

	Ok(Value::Object(out))
}

fn stringified(value: &Value) -> String {
	match value {
		Value::Null => "null".to_owned(),
		Value::Boolean(true) => "true".to_owned(),
		Value::Boolean(false) => "false".to_owned(),
		Value::Number(n) if is_double(n) => canonical_double(double_value(n)),
		Value::Number(n) => n.as_str().to_owned(),
		Value::String(s) => s.as_str().to_owned(),
		_ => unreachable!("not a literal value"),
	}
}

/// A number is a double when its literal carries a fraction or an exponent.
fn is_double(n: &Number) -> bool {
	n.as_str().bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

fn double_value(n: &Number) -> f64 {
	n.as_str().parse().unwrap_or(0.0)
}

/// Canonical JSON-LD double form: a fixed fifteen-digit mantissa fraction and
/// a two-digit, zero-padded, signed exponent (`1.500000000000000e+00`).
pub(crate) fn canonical_double(value: f64) -> String {
	let formatted = format!("{value:.15e}");
	match formatted.split_once('e') {
		Some((mantissa, exponent)) => {
			let exponent: i32 = exponent.parse().unwrap_or(0);
			let sign = if exponent < 0 { '-' } else { '+' };
			format!("{mantissa}e{sign}{:02}", exponent.abs())
		}
		None => formatted,
	}
}

#[cfg(test)]
mod tests {
	use super::canonical_double;

	#[test]
	fn canonical_doubles() {
		assert_eq!(canonical_double(1.5), "1.500000000000000e+00");
		assert_eq!(canonical_double(-0.25), "-2.500000000000000e-01");
		assert_eq!(canonical_double(123456789.012345), "1.234567890123450e+08");
	}
}
