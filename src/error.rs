use std::fmt;

use crate::loader::LoadError;

/// Error raised by the document operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("arrays of arrays are not permitted")]
	NestedArray,

	#[error("`@list` value must be an array or null")]
	InvalidList,

	#[error("duplicate key `{0}`")]
	DuplicateKey(String),

	#[error("cyclical context definition for `{0}`")]
	CyclicalContext(String),

	#[error("invalid context entry `{0}`")]
	InvalidContext(String),

	#[error("invalid context URL `{0}`")]
	InvalidUrl(String),

	#[error(transparent)]
	Load(#[from] LoadError),

	#[error("failed to resolve {} context URL(s)", .0.len())]
	ContextUrls(Vec<Error>),

	#[error("compaction failed: {0}")]
	Compact(#[source] Box<Error>),

	#[error("cannot compact a typed value carrying a language")]
	TypedValueWithLanguage,

	#[error("unknown URL resolver `{0}`")]
	UnknownUrlResolver(String),

	#[error("{0} is not implemented")]
	NotImplemented(&'static str),
}

/// Stable error kind identifiers the caller can switch on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ErrorCode {
	Syntax,
	CyclicalContext,
	InvalidContext,
	ContextUrl,
	InvalidUrl,
	UnknownUrlResolver,
	Compact,
	NotImplemented,
}

impl ErrorCode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Syntax => "SyntaxError",
			Self::CyclicalContext => "CyclicalContext",
			Self::InvalidContext => "InvalidContext",
			Self::ContextUrl => "ContextUrlError",
			Self::InvalidUrl => "InvalidUrl",
			Self::UnknownUrlResolver => "UnknownUrlResolver",
			Self::Compact => "CompactError",
			Self::NotImplemented => "NotImplemented",
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

impl Error {
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::NestedArray | Self::InvalidList | Self::DuplicateKey(_) => ErrorCode::Syntax,
			Self::CyclicalContext(_) => ErrorCode::CyclicalContext,
			Self::InvalidContext(_) => ErrorCode::InvalidContext,
			Self::InvalidUrl(_) => ErrorCode::InvalidUrl,
			Self::Load(_) | Self::ContextUrls(_) => ErrorCode::ContextUrl,
			Self::Compact(_) | Self::TypedValueWithLanguage => ErrorCode::Compact,
			Self::UnknownUrlResolver(_) => ErrorCode::UnknownUrlResolver,
			Self::NotImplemented(_) => ErrorCode::NotImplemented,
		}
	}
}
