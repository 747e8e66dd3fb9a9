use serde::{Serialize, Deserialize};

use super::{CourseCode, CompletionSet};

/// A member of [`PrerequisiteSpec::AllOf`].
///
/// Nested `AllOf` has no variant, it is rejected when the catalog is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrerequisiteClause {
	Single(CourseCode),
	OneOf(Vec<CourseCode>),
}

impl PrerequisiteClause {
	/// `None` when the clause is satisfied, otherwise every course that could still satisfy it.
	pub fn unmet(&self, completed: &CompletionSet) -> Option<Vec<CourseCode>> {
		match self {
			PrerequisiteClause::Single(code) => {
				if completed.contains(code) { None } else { Some(vec![code.clone()]) }
			},
			PrerequisiteClause::OneOf(codes) => {
				/* Empty groups count as satisfied */
				if codes.is_empty() || codes.iter().any(|c| completed.contains(c)) {
					None
				} else {
					Some(codes.clone())
				}
			},
		}
	}

	pub fn as_vec(&self) -> Vec<&CourseCode> {
		match self {
			PrerequisiteClause::Single(code) => vec![code],
			PrerequisiteClause::OneOf(codes) => codes.iter().collect(),
		}
	}
}

/// What must be completed before a course can be taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrerequisiteSpec {
	#[default] None,
	Single(CourseCode),
	/// Any one of the courses.
	OneOf(Vec<CourseCode>),
	/// Every clause must be satisfied independently.
	///
	/// The missing courses of the unmet clauses are concatenated in clause order,
	/// a course named by two clauses is reported once.
	AllOf(Vec<PrerequisiteClause>),
}

impl PrerequisiteSpec {
	/// `None` when satisfied by `completed`, otherwise the missing courses.
	///
	/// For `OneOf` every not yet completed option is reported, not just one of them.
	/// `AllOf` reports the missing courses of each unmet clause in order, without repeats.
	pub fn unmet(&self, completed: &CompletionSet) -> Option<Vec<CourseCode>> {
		match self {
			PrerequisiteSpec::None => None,
			PrerequisiteSpec::Single(code) => PrerequisiteClause::Single(code.clone()).unmet(completed),
			PrerequisiteSpec::OneOf(codes) => PrerequisiteClause::OneOf(codes.clone()).unmet(completed),
			PrerequisiteSpec::AllOf(clauses) => {
				let mut missing = Vec::<CourseCode>::new();
				let mut any_unmet = false;
				for clause in clauses {
					if let Some(m) = clause.unmet(completed) {
						any_unmet = true;
						for code in m {
							if !missing.contains(&code) { missing.push(code); }
						}
					}
				}
				if any_unmet { Some(missing) } else { None }
			},
		}
	}

	/// Every course these prerequisites mention.
	pub fn as_vec(&self) -> Vec<&CourseCode> {
		match self {
			PrerequisiteSpec::None => vec![],
			PrerequisiteSpec::Single(code) => vec![code],
			PrerequisiteSpec::OneOf(codes) => codes.iter().collect(),
			PrerequisiteSpec::AllOf(clauses) => clauses.iter().flat_map(|c| c.as_vec()).collect(),
		}
	}
}
