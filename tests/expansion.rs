use json_ld_lite::{Error, NoResolver, Processor};
use json_syntax::{Parse, Value};

fn json(source: &str) -> Value {
	Value::parse_str(source).expect("invalid JSON").0
}

#[async_std::test]
async fn term_expansion() {
	let input = json(r#"{"@context": {"name": "http://x/name"}, "name": "Bob"}"#);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(expanded, json(r#"{"http://x/name": [{"@value": "Bob"}]}"#));
}

#[async_std::test]
async fn typed_coercion() {
	let input = json(
		r#"{
			"@context": {"n": {"@id": "http://x/n", "@type": "http://w/int"}},
			"n": "42"
		}"#,
	);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(
		expanded,
		json(r#"{"http://x/n": [{"@type": "http://w/int", "@value": "42"}]}"#)
	);
}

#[async_std::test]
async fn id_coercion() {
	let input = json(
		r#"{
			"@context": {"knows": {"@id": "http://x/k", "@type": "@id"}},
			"knows": "http://x/Alice"
		}"#,
	);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(expanded, json(r#"{"http://x/k": [{"@id": "http://x/Alice"}]}"#));
}

#[async_std::test]
async fn list_container() {
	let input = json(
		r#"{
			"@context": {"items": {"@id": "http://x/i", "@container": "@list"}},
			"items": [1, 2]
		}"#,
	);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(
		expanded,
		json(r#"{"http://x/i": [{"@list": [{"@value": 1}, {"@value": 2}]}]}"#)
	);
}

#[async_std::test]
async fn prefix_expansion() {
	let input = json(
		r#"{
			"@context": {"foaf": "http://xmlns.com/foaf/0.1/"},
			"foaf:name": "Bob"
		}"#,
	);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(
		expanded,
		json(r#"{"http://xmlns.com/foaf/0.1/name": [{"@value": "Bob"}]}"#)
	);
}

#[async_std::test]
async fn set_wrappers_are_erased() {
	let input = json(r#"{"@context": {"p": "http://x/p"}, "p": {"@set": [1, 2]}}"#);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(
		expanded,
		json(r#"{"http://x/p": [{"@value": 1}, {"@value": 2}]}"#)
	);
}

#[async_std::test]
async fn graph_contents_are_expanded() {
	let input = json(r#"{"@context": {"p": "http://x/p"}, "@graph": [{"p": "v"}]}"#);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(
		expanded,
		json(r#"{"@graph": [{"http://x/p": [{"@value": "v"}]}]}"#)
	);
}

#[async_std::test]
async fn undefined_terms_are_dropped() {
	let input = json(r#"{"@context": {"p": "http://x/p"}, "p": 1, "q": 2}"#);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(expanded, json(r#"{"http://x/p": [{"@value": 1}]}"#));
}

#[async_std::test]
async fn framing_keywords_are_preserved() {
	let input = json(r#"{"@context": {"p": "http://x/p"}, "@explicit": true, "p": 1}"#);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(
		expanded,
		json(r#"{"@explicit": [true], "http://x/p": [{"@value": 1}]}"#)
	);
}

#[async_std::test]
async fn keyword_aliases_are_resolved() {
	let input = json(r#"{"@context": {"id": "@id"}, "id": "http://x/a"}"#);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(expanded, json(r#"{"@id": "http://x/a"}"#));
}

#[async_std::test]
async fn doubles_are_canonicalized() {
	let input = json(r#"{"@context": {"p": "http://x/p"}, "p": 1.5}"#);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(
		expanded,
		json(r#"{"http://x/p": [{"@value": "1.500000000000000e+00"}]}"#)
	);
}

#[async_std::test]
async fn default_language_applies_to_strings() {
	let input = json(
		r#"{
			"@context": {"label": {"@id": "http://x/l", "@language": "en"}},
			"label": "hi"
		}"#,
	);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(
		expanded,
		json(r#"{"http://x/l": [{"@language": "en", "@value": "hi"}]}"#)
	);
}

#[async_std::test]
async fn expansion_is_idempotent() {
	let inputs = [
		r#"{"@context": {"name": "http://x/name"}, "name": "Bob"}"#,
		r#"{"@context": {"n": {"@id": "http://x/n", "@type": "http://w/int"}}, "n": "42"}"#,
		r#"{"@context": {"knows": {"@id": "http://x/k", "@type": "@id"}}, "knows": "http://x/Alice"}"#,
		r#"{"@context": {"items": {"@id": "http://x/i", "@container": "@list"}}, "items": [1, 2]}"#,
		r#"{"@context": {"p": "http://x/p"}, "@graph": [{"p": "v"}]}"#,
	];

	for input in inputs {
		let expanded = json(input).expand(&NoResolver).await.unwrap();
		let again = expanded.expand(&NoResolver).await.unwrap();
		assert_eq!(again, expanded, "expansion of {input} is not idempotent");
	}
}

#[async_std::test]
async fn cyclical_contexts_are_detected() {
	let input = json(r#"{"@context": {"a": "b", "b": "a"}, "a": "v"}"#);
	match input.expand(&NoResolver).await {
		Err(Error::CyclicalContext(_)) => (),
		other => panic!("expected a cyclical context error, got {other:?}"),
	}

	let input = json(r#"{"@context": {"a": "b", "b": "a"}, "b": "v"}"#);
	assert!(matches!(
		input.expand(&NoResolver).await,
		Err(Error::CyclicalContext(_))
	));
}

#[async_std::test]
async fn nested_arrays_are_rejected() {
	let input = json(r#"{"@context": {"p": "http://x/p"}, "p": [[1]]}"#);
	match input.expand(&NoResolver).await {
		Err(e) => assert_eq!(e.code(), json_ld_lite::ErrorCode::Syntax),
		Ok(v) => panic!("expected a syntax error, got {v:?}"),
	}

	let input = json("[[1]]");
	assert!(matches!(
		input.expand(&NoResolver).await,
		Err(Error::NestedArray)
	));
}

#[async_std::test]
async fn list_values_must_be_arrays() {
	let input = json(r#"{"@context": {"p": "http://x/p"}, "p": {"@list": 1}}"#);
	assert!(matches!(
		input.expand(&NoResolver).await,
		Err(Error::InvalidList)
	));
}

#[async_std::test]
async fn explicit_lists_are_preserved() {
	let input = json(r#"{"@context": {"p": "http://x/p"}, "p": {"@list": ["a"]}}"#);
	let expanded = input.expand(&NoResolver).await.unwrap();
	assert_eq!(
		expanded,
		json(r#"{"http://x/p": [{"@list": [{"@value": "a"}]}]}"#)
	);
}
