//! Path parameter extraction for typed route handlers.
//!
//! A matched route yields a [`ParamContext`]: the captured segment values in
//! pattern order plus the names of their `:name` tokens. Handlers either read
//! the raw strings or extract typed values through [`FromPath`] and
//! [`SingleFromPath`].

use std::ops::Deref;

use super::error::PathError;

/// Context for parameter extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamContext {
	/// Names of the pattern's parameter tokens, in order.
	names: Vec<String>,
	/// Parameter values in the order they appear in the pattern.
	values: Vec<String>,
}

impl ParamContext {
	/// Creates a new parameter context.
	pub fn new(names: Vec<String>, values: Vec<String>) -> Self {
		Self { names, values }
	}

	/// Returns the captured values in pattern order.
	pub fn values(&self) -> &[String] {
		&self.values
	}

	/// Returns the parameter names in pattern order.
	pub fn names(&self) -> &[String] {
		&self.names
	}

	/// Returns the value captured for `name`.
	///
	/// If a name repeats in the pattern, the first occurrence wins.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.names
			.iter()
			.position(|candidate| candidate == name)
			.and_then(|index| self.values.get(index))
			.map(String::as_str)
	}

	/// Returns `(name, value)` pairs in pattern order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.names
			.iter()
			.zip(&self.values)
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Returns the number of parameters.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns whether there are no parameters.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

/// Trait for extracting typed values from path parameters.
pub trait FromPath: Sized {
	/// Extracts Self from the parameter context.
	///
	/// # Errors
	///
	/// Returns [`PathError::CountMismatch`] if the number of parameters doesn't match.
	/// Returns [`PathError::ParseError`] if parameter parsing fails.
	fn from_path(ctx: &ParamContext) -> Result<Self, PathError>;
}

/// Single path parameter extractor.
///
/// # Example
///
/// ```
/// use staterouter_urls::client_router::Path;
///
/// let Path(id) = Path(42_u32);
/// assert_eq!(id, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
	/// Unwraps the inner value.
	pub fn into_inner(self) -> T {
		self.0
	}
}

impl<T> Deref for Path<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<T> AsRef<T> for Path<T> {
	fn as_ref(&self) -> &T {
		&self.0
	}
}

/// Parses the value at `index`, reporting failures with the target type name.
fn parse_at<T>(ctx: &ParamContext, index: usize) -> Result<T, PathError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	let raw = ctx.values.get(index).ok_or(PathError::CountMismatch {
		expected: index + 1,
		actual: ctx.values.len(),
	})?;

	raw.parse::<T>().map_err(|e| PathError::ParseError {
		param_index: index,
		param_type: std::any::type_name::<T>(),
		raw_value: raw.clone(),
		reason: e.to_string(),
	})
}

fn expect_count(ctx: &ParamContext, expected: usize) -> Result<(), PathError> {
	if ctx.values.len() != expected {
		return Err(PathError::CountMismatch {
			expected,
			actual: ctx.values.len(),
		});
	}
	Ok(())
}

// Macro for implementing FromPath for single-valued types
macro_rules! impl_from_path_for_single {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromPath for $ty {
				fn from_path(ctx: &ParamContext) -> Result<Self, PathError> {
					expect_count(ctx, 1)?;
					parse_at(ctx, 0)
				}
			}
		)*
	};
}

impl_from_path_for_single!(String, i32, i64, u32, u64, usize, bool);

impl<T: FromPath> FromPath for Path<T> {
	fn from_path(ctx: &ParamContext) -> Result<Self, PathError> {
		T::from_path(ctx).map(Path)
	}
}

/// Trait for extracting a single value at a specific index from path parameters.
///
/// This backs the multi-argument style:
/// `|state, Path(id): Path<u32>, Path(resource): Path<String>|`
pub trait SingleFromPath: Sized {
	/// Extracts a single value at the given index.
	fn from_path_at(ctx: &ParamContext, index: usize) -> Result<Self, PathError>;
}

impl<T> SingleFromPath for T
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	fn from_path_at(ctx: &ParamContext, index: usize) -> Result<Self, PathError> {
		parse_at(ctx, index)
	}
}

// Macro for implementing FromPath for tuples
macro_rules! impl_from_path_for_tuple {
	($count:expr; $($idx:tt => $ty:ident),+ $(,)?) => {
		impl<$($ty),+> FromPath for ($($ty,)+)
		where
			$($ty: std::str::FromStr,)+
			$(<$ty as std::str::FromStr>::Err: std::fmt::Display,)+
		{
			fn from_path(ctx: &ParamContext) -> Result<Self, PathError> {
				expect_count(ctx, $count)?;
				Ok(($(parse_at::<$ty>(ctx, $idx)?,)+))
			}
		}
	};
}

impl_from_path_for_tuple!(2; 0 => A, 1 => B);
impl_from_path_for_tuple!(3; 0 => A, 1 => B, 2 => C);
impl_from_path_for_tuple!(4; 0 => A, 1 => B, 2 => C, 3 => D);
