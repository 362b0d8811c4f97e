use json_ld_lite::{get_context_value, merge_contexts, Error, Keyword, NoResolver};
use json_syntax::{Parse, Value};

fn json(source: &str) -> Value {
	Value::parse_str(source).expect("invalid JSON").0
}

#[async_std::test]
async fn merging_the_empty_context_is_the_identity() {
	let context = json(r#"{"a": "http://x/a", "b": {"@id": "http://x/b"}}"#);
	let empty = json("{}");

	let merged = merge_contexts(&empty, &context, &NoResolver).await.unwrap();
	assert_eq!(merged, context);

	let merged = merge_contexts(&context, &empty, &NoResolver).await.unwrap();
	assert_eq!(merged, context);
}

#[async_std::test]
async fn merging_replaces_terms_bound_to_the_same_iri() {
	let ctx1 = json(r#"{"a": "http://x/i"}"#);
	let ctx2 = json(r#"{"b": "http://x/i"}"#);
	let merged = merge_contexts(&ctx1, &ctx2, &NoResolver).await.unwrap();
	assert_eq!(merged, json(r#"{"b": "http://x/i"}"#));
}

#[async_std::test]
async fn replacement_sees_through_definition_maps() {
	let ctx1 = json(r#"{"a": {"@id": "http://x/i", "@type": "@id"}}"#);
	let ctx2 = json(r#"{"b": {"@id": "http://x/i"}}"#);
	let merged = merge_contexts(&ctx1, &ctx2, &NoResolver).await.unwrap();
	assert_eq!(merged, json(r#"{"b": {"@id": "http://x/i"}}"#));
}

#[async_std::test]
async fn later_definitions_win() {
	let ctx1 = json(r#"{"a": "http://x/1"}"#);
	let ctx2 = json(r#"{"a": "http://x/2"}"#);
	let merged = merge_contexts(&ctx1, &ctx2, &NoResolver).await.unwrap();
	assert_eq!(merged, json(r#"{"a": "http://x/2"}"#));
}

#[async_std::test]
async fn context_arrays_fold_left() {
	let list = json(r#"[{"a": "http://x/a"}, {"b": "http://x/b"}]"#);
	let empty = json("{}");
	let merged = merge_contexts(&list, &empty, &NoResolver).await.unwrap();
	assert_eq!(merged, json(r#"{"a": "http://x/a", "b": "http://x/b"}"#));
}

#[async_std::test]
async fn scalar_contexts_are_rejected() {
	let err = merge_contexts(&json("5"), &json("{}"), &NoResolver)
		.await
		.unwrap_err();
	assert!(matches!(err, Error::InvalidContext(_)));
}

#[async_std::test]
async fn null_contexts_merge_as_empty() {
	let context = json(r#"{"a": "http://x/a"}"#);
	let merged = merge_contexts(&context, &json("null"), &NoResolver)
		.await
		.unwrap();
	assert_eq!(merged, context);
}

#[async_std::test]
async fn context_values_are_exposed() {
	let context = json(r#"{"n": {"@id": "http://x/n", "@type": "http://w/int"}}"#);
	assert_eq!(
		get_context_value(&context, "n", Keyword::Type).unwrap(),
		Some("http://w/int".to_owned())
	);
	assert_eq!(
		get_context_value(&context, "n", Keyword::Id).unwrap(),
		Some("http://x/n".to_owned())
	);
	assert_eq!(get_context_value(&context, "n", Keyword::Container).unwrap(), None);
	assert_eq!(get_context_value(&context, "m", Keyword::Id).unwrap(), None);
}
