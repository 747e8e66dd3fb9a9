use serde::{Serialize, Deserialize};

use crate::catalog::CourseCode;

/// A resolved requirement, shaped like the [`RequirementItem`](crate::catalog::RequirementItem) it came from.
///
/// Records in the urgent bucket never have `missing_prereqs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupResult {
	Single {
		code: CourseCode,
		#[serde(default, skip_serializing_if = "Vec::is_empty")]
		missing_prereqs: Vec<CourseCode>,
	},
	/// Urgent: the options that can be taken now. Future: the blocked options.
	ChooseOne {
		codes: Vec<CourseCode>,
		#[serde(default, skip_serializing_if = "Vec::is_empty")]
		missing_prereqs: Vec<CourseCode>,
	},
	/// `needed` more courses from `codes` are required, `eligible` are the ones takable now.
	AtLeast {
		needed: usize,
		codes: Vec<CourseCode>,
		#[serde(default, skip_serializing_if = "Vec::is_empty")]
		eligible: Vec<CourseCode>,
		#[serde(default, skip_serializing_if = "Vec::is_empty")]
		missing_prereqs: Vec<CourseCode>,
	},
}

impl GroupResult {
	pub fn single(code: CourseCode) -> Self {
		GroupResult::Single { code, missing_prereqs: Vec::new() }
	}

	/// Every course the record mentions, not counting its missing prerequisites.
	pub fn as_vec(&self) -> Vec<&CourseCode> {
		match self {
			GroupResult::Single { code, .. } => vec![code],
			GroupResult::ChooseOne { codes, .. }
			| GroupResult::AtLeast { codes, .. } => codes.iter().collect(),
		}
	}

	pub fn missing_prereqs(&self) -> &[CourseCode] {
		match self {
			GroupResult::Single { missing_prereqs, .. }
			| GroupResult::ChooseOne { missing_prereqs, .. }
			| GroupResult::AtLeast { missing_prereqs, .. } => missing_prereqs,
		}
	}

	pub fn is_group(&self) -> bool {
		!matches!(self, GroupResult::Single { .. })
	}
}

impl std::fmt::Display for GroupResult {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		fn join(codes: &[CourseCode]) -> String {
			codes.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ")
		}

		match self {
			GroupResult::Single { code, .. } => write!(f, "{}", code)?,
			GroupResult::ChooseOne { codes, .. } => write!(f, "one of {}", join(codes))?,
			GroupResult::AtLeast { needed, codes, eligible, .. } => {
				write!(f, "{} of {}", needed, join(codes))?;
				if !eligible.is_empty() && eligible.len() != codes.len() {
					write!(f, " (takable now: {})", join(eligible))?;
				}
			},
		}
		if !self.missing_prereqs().is_empty() {
			write!(f, " [missing {}]", join(self.missing_prereqs()))?;
		}
		Ok(())
	}
}
