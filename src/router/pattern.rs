//! Route pattern matching.
//!
//! A pattern is a `/`-separated template. Each segment is either a literal
//! (matched verbatim, case-sensitive), a named parameter (`:name`, matches any
//! single segment and binds its value), or the terminal wildcard suffix `/*`
//! (matches the base path itself and everything nested beneath it). The
//! literal pattern `*` is not matched here at all: it is the table-level
//! fallback, recognized by [`RoutePattern::is_fallback`] and resolved by the
//! router's second pass.
//!
//! Matching is pure: no state, no I/O, and a failed match is not an error.
//!
//! ## Example
//!
//! ```
//! use shoal::router::RoutePattern;
//!
//! let pattern = RoutePattern::new("/member/device/:deviceId/dashboard");
//! assert!(pattern.matches("/member/device/42/dashboard"));
//! assert_eq!(
//! 	pattern.params("/member/device/42/dashboard").get("deviceId"),
//! 	Some("42"),
//! );
//! ```

use std::collections::HashMap;

use super::params::RouteParams;

/// A declarative path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
	raw: String,
}

impl RoutePattern {
	/// Creates a pattern from its string form.
	///
	/// Patterns are not validated; a malformed segment (for example a bare
	/// `:`) behaves exactly as the segment-comparison rules dictate.
	pub fn new(pattern: impl Into<String>) -> Self {
		Self { raw: pattern.into() }
	}

	/// Returns the pattern string.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Returns `true` if this is the table fallback pattern `*`.
	pub fn is_fallback(&self) -> bool {
		self.raw == "*"
	}

	/// Returns `true` if this pattern ends in the `/*` wildcard suffix.
	pub fn is_wildcard(&self) -> bool {
		self.raw.ends_with("/*")
	}

	/// Decides whether `path` matches this pattern.
	///
	/// Wildcard patterns match their base path and any path nested below it.
	/// All other patterns require the same number of segments as the path,
	/// with every literal segment equal and every `:name` segment binding.
	/// Empty segments (from trailing or doubled slashes) are compared
	/// literally, never skipped.
	pub fn matches(&self, path: &str) -> bool {
		if self.is_wildcard() {
			let base = &self.raw[..self.raw.len() - 2];
			return match path.strip_prefix(base) {
				Some(rest) => rest.is_empty() || rest.starts_with('/'),
				None => false,
			};
		}

		let pattern_segments: Vec<&str> = self.raw.split('/').collect();
		let path_segments: Vec<&str> = path.split('/').collect();

		if pattern_segments.len() != path_segments.len() {
			return false;
		}

		pattern_segments
			.iter()
			.zip(&path_segments)
			.all(|(pat, seg)| pat.starts_with(':') || pat == seg)
	}

	/// Extracts the named-parameter bindings for a matching `path`.
	///
	/// Segment order decides which path value binds to which name. If the
	/// same `:name` appears twice, the last binding wins (undefined by the
	/// grammar, kept as-is). Wildcard patterns bind nothing.
	///
	/// Callers are expected to check [`matches`](Self::matches) first; on a
	/// non-matching path the result is whatever the index-wise walk yields.
	pub fn params(&self, path: &str) -> RouteParams {
		if self.is_wildcard() || self.is_fallback() {
			return RouteParams::empty();
		}

		let mut named = HashMap::new();
		let mut ordered = Vec::new();
		let path_segments: Vec<&str> = path.split('/').collect();

		for (i, pat) in self.raw.split('/').enumerate() {
			if let Some(name) = pat.strip_prefix(':') {
				if let Some(seg) = path_segments.get(i) {
					named.insert(name.to_string(), seg.to_string());
					ordered.push(seg.to_string());
				}
			}
		}

		RouteParams::new(named, ordered)
	}

	/// Builds a concrete path from this pattern and a parameter map.
	///
	/// Returns `None` for wildcard/fallback patterns or when a named
	/// parameter is missing from `params`.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		if self.is_wildcard() || self.is_fallback() {
			return None;
		}

		let mut segments = Vec::new();
		for pat in self.raw.split('/') {
			match pat.strip_prefix(':') {
				Some(name) => segments.push(params.get(name)?.as_str()),
				None => segments.push(pat),
			}
		}
		Some(segments.join("/"))
	}
}

impl From<&str> for RoutePattern {
	fn from(pattern: &str) -> Self {
		Self::new(pattern)
	}
}
