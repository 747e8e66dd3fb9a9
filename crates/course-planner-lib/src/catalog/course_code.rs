use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Serialize, Deserialize};

use super::DataIntegrityWarning;

fn course_code_pattern() -> &'static regex::Regex {
	static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		regex::Regex::new(r"^([A-Z]+)\s*([0-9]+[A-Z]*)$").expect("course code pattern is valid")
	})
}

/// A course in canonical `"<DEPT> <NUMBER>"` form, e.g. `"CSE 101"`.
///
/// Construction normalizes the input so two codes are equal exactly when their canonical strings are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseCode(String);

impl CourseCode {
	/// Accepts loosely written codes such as `"cse 101"`, `"CSE_101"`, `"CSE101"` or `" cse   101 "`.
	pub fn new(raw: &str) -> crate::Result<Self> {
		let cleaned = raw.trim().replace('_', " ").to_uppercase();
		let captures = course_code_pattern()
			.captures(&cleaned)
			.ok_or_else(|| crate::Error::Parse(format!("`{}` is not a course code", raw)))?;
		Ok(Self(format!("{} {}", &captures[1], &captures[2])))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The department prefix, `"CSE"` for `"CSE 101"`.
	pub fn department(&self) -> &str {
		self.0.split_once(' ').map(|(d, _)| d).unwrap_or(&self.0)
	}

	/// The course number including any letter suffix, `"15L"` for `"CSE 15L"`.
	pub fn number(&self) -> &str {
		self.0.split_once(' ').map(|(_, n)| n).unwrap_or("")
	}
}

impl std::str::FromStr for CourseCode {
	type Err = crate::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl TryFrom<String> for CourseCode {
	type Error = crate::Error;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(&value)
	}
}

impl From<CourseCode> for String {
	fn from(value: CourseCode) -> Self {
		value.0
	}
}

impl std::fmt::Display for CourseCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for CourseCode {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl std::borrow::Borrow<str> for CourseCode {
	fn borrow(&self) -> &str {
		&self.0
	}
}

/// Courses the student has already finished.
///
/// Fixed for the duration of a resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet(HashSet<CourseCode>);

impl CompletionSet {
	/// Parses user supplied course strings.
	///
	/// Strings that aren't course codes are left out and reported instead of failing the whole set.
	pub fn from_strings<I, S>(raw: I) -> (Self, Vec<DataIntegrityWarning>)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut set = HashSet::new();
		let mut warnings = Vec::new();
		for s in raw {
			let s = s.as_ref();
			if s.trim().is_empty() { continue; }
			match CourseCode::new(s) {
				Ok(code) => { set.insert(code); },
				Err(_) => warnings.push(DataIntegrityWarning::InvalidCourseCode(s.to_string())),
			}
		}
		(Self(set), warnings)
	}

	pub fn contains(&self, code: &CourseCode) -> bool {
		self.0.contains(code)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &CourseCode> {
		self.0.iter()
	}
}

impl FromIterator<CourseCode> for CompletionSet {
	fn from_iter<T: IntoIterator<Item = CourseCode>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}
