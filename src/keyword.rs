use std::convert::TryFrom;
use std::fmt;

#[derive(Clone, Copy, Debug)]
pub struct NotAKeyword<T>(pub T);

/// JSON-LD keywords interpreted by this engine.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Keyword {
	/// `@container`.
	/// Used to set the default container type for a term.
	Container,

	/// `@context`.
	/// Used to define the short-hand names that are used throughout a JSON-LD document.
	Context,

	/// `@graph`.
	/// Used to express a graph.
	Graph,

	/// `@id`.
	/// Used to uniquely identify node objects that are being described in the
	/// document with IRIs.
	Id,

	/// `@language`.
	/// Used to specify the language of a string value, or the default language
	/// of every string value of a term.
	Language,

	/// `@list`.
	/// Used to express an ordered set of data.
	List,

	/// `@set`.
	/// Used to express an unordered set of data.
	Set,

	/// `@type`.
	/// Used to set the type of a node or the datatype of a typed value.
	Type,

	/// `@value`.
	/// Used to specify the data that is associated with a particular property
	/// in the graph.
	Value,
}

impl Keyword {
	pub fn into_str(self) -> &'static str {
		use Keyword::*;
		match self {
			Container => "@container",
			Context => "@context",
			Graph => "@graph",
			Id => "@id",
			Language => "@language",
			List => "@list",
			Set => "@set",
			Type => "@type",
			Value => "@value",
		}
	}
}

impl<'a> TryFrom<&'a str> for Keyword {
	type Error = NotAKeyword<&'a str>;

	fn try_from(s: &'a str) -> Result<Keyword, NotAKeyword<&'a str>> {
		use Keyword::*;
		match s {
			"@container" => Ok(Container),
			"@context" => Ok(Context),
			"@graph" => Ok(Graph),
			"@id" => Ok(Id),
			"@language" => Ok(Language),
			"@list" => Ok(List),
			"@set" => Ok(Set),
			"@type" => Ok(Type),
			"@value" => Ok(Value),
			_ => Err(NotAKeyword(s)),
		}
	}
}

impl From<Keyword> for &'static str {
	fn from(k: Keyword) -> &'static str {
		k.into_str()
	}
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.into_str().fmt(f)
	}
}

pub fn is_keyword(s: &str) -> bool {
	Keyword::try_from(s).is_ok()
}

/// Framing keywords are carried through expansion verbatim, but are never
/// interpreted by the rewrite engine itself.
pub fn is_framing_keyword(s: &str) -> bool {
	matches!(s, "@embed" | "@explicit" | "@default" | "@omitDefault")
}
