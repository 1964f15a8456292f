//! Route parameters and typed extraction.
//!
//! The resolver builds a [`RouteParams`] for every resolution pass and hands
//! it to the matched route's content producer explicitly; parameter flow is
//! plain dependency injection, not ambient context. The map is rebuilt (never
//! mutated) on each navigation and discarded when the route changes.
//!
//! On top of the raw string map, [`FromPath`] offers typed extraction in the
//! style of a backend `Path<T>` extractor:
//!
//! ```
//! use shoal::router::{FromPath, PathParams, RoutePattern};
//!
//! let pattern = RoutePattern::new("/member/device/:deviceId/dashboard");
//! let params = pattern.params("/member/device/42/dashboard");
//!
//! let PathParams(device_id) = PathParams::<u64>::from_path(&params).unwrap();
//! assert_eq!(device_id, 42);
//! ```

use std::collections::HashMap;
use std::ops::Deref;

use thiserror::Error;

/// The named-parameter bindings of the currently resolved route.
///
/// Empty when the active route has no named parameters (wildcard and fallback
/// routes included). Values are kept both by name and in pattern order, so
/// tuple extraction is positional and unaffected by duplicate names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
	named: HashMap<String, String>,
	ordered: Vec<String>,
}

impl RouteParams {
	/// Creates a parameter map from named bindings and pattern-ordered values.
	pub fn new(named: HashMap<String, String>, ordered: Vec<String>) -> Self {
		Self { named, ordered }
	}

	/// The empty map, used for routes without parameters.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Returns the value bound to `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.named.get(name).map(String::as_str)
	}

	/// Returns all named bindings.
	pub fn all(&self) -> &HashMap<String, String> {
		&self.named
	}

	/// Returns the bound values in pattern order.
	pub fn values(&self) -> &[String] {
		&self.ordered
	}

	/// Returns the number of bound values.
	pub fn len(&self) -> usize {
		self.ordered.len()
	}

	/// Returns `true` if no parameters are bound.
	pub fn is_empty(&self) -> bool {
		self.ordered.is_empty()
	}

	/// Iterates over the named bindings.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

/// Errors produced by typed parameter extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
	/// The pattern bound a different number of parameters than the target
	/// type consumes.
	#[error("expected {expected} path parameter(s), found {actual}")]
	CountMismatch {
		/// Parameters the target type consumes.
		expected: usize,
		/// Parameters actually bound.
		actual: usize,
	},
	/// A bound value failed to parse as the target type.
	#[error("path parameter {index} ({raw:?}) is not a valid {ty}: {message}")]
	ParseError {
		/// Position of the failing parameter in pattern order.
		index: usize,
		/// Name of the target type.
		ty: &'static str,
		/// The raw bound value.
		raw: String,
		/// The underlying parse error.
		message: String,
	},
}

/// Typed extraction from a [`RouteParams`].
pub trait FromPath: Sized {
	/// Extracts `Self` from the bound parameters.
	fn from_path(params: &RouteParams) -> Result<Self, PathError>;
}

/// Wrapper for destructuring typed path parameters.
///
/// ```
/// use shoal::router::{FromPath, PathParams, RouteParams};
/// # use std::collections::HashMap;
///
/// let params = RouteParams::new(
/// 	HashMap::from([("id".to_string(), "7".to_string())]),
/// 	vec!["7".to_string()],
/// );
/// let PathParams(id) = PathParams::<i64>::from_path(&params).unwrap();
/// assert_eq!(id, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathParams<T>(pub T);

impl<T> PathParams<T> {
	/// Unwraps the inner value.
	pub fn into_inner(self) -> T {
		self.0
	}
}

impl<T> Deref for PathParams<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<T: FromPath> FromPath for PathParams<T> {
	fn from_path(params: &RouteParams) -> Result<Self, PathError> {
		T::from_path(params).map(PathParams)
	}
}

fn parse_at<T>(params: &RouteParams, index: usize, ty: &'static str) -> Result<T, PathError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	let raw = &params.values()[index];
	raw.parse::<T>().map_err(|e| PathError::ParseError {
		index,
		ty,
		raw: raw.clone(),
		message: e.to_string(),
	})
}

macro_rules! impl_from_path_single {
	($($ty:ty => $name:expr),* $(,)?) => {
		$(
			impl FromPath for $ty {
				fn from_path(params: &RouteParams) -> Result<Self, PathError> {
					if params.len() != 1 {
						return Err(PathError::CountMismatch {
							expected: 1,
							actual: params.len(),
						});
					}
					parse_at::<$ty>(params, 0, $name)
				}
			}
		)*
	};
}

impl_from_path_single! {
	i32 => "i32",
	i64 => "i64",
	u32 => "u32",
	u64 => "u64",
	bool => "bool",
}

impl FromPath for String {
	fn from_path(params: &RouteParams) -> Result<Self, PathError> {
		if params.len() != 1 {
			return Err(PathError::CountMismatch {
				expected: 1,
				actual: params.len(),
			});
		}
		Ok(params.values()[0].clone())
	}
}

macro_rules! impl_from_path_tuple {
	($($idx:tt => $ty:ident),+ $(,)?) => {
		impl<$($ty),+> FromPath for ($($ty,)+)
		where
			$($ty: std::str::FromStr,)+
			$(<$ty as std::str::FromStr>::Err: std::fmt::Display,)+
		{
			fn from_path(params: &RouteParams) -> Result<Self, PathError> {
				let expected = [$($idx),+].len();
				if params.len() != expected {
					return Err(PathError::CountMismatch {
						expected,
						actual: params.len(),
					});
				}
				Ok((
					$(parse_at::<$ty>(params, $idx, std::any::type_name::<$ty>())?,)+
				))
			}
		}
	};
}

impl_from_path_tuple!(0 => A, 1 => B);
impl_from_path_tuple!(0 => A, 1 => B, 2 => C);
impl_from_path_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
