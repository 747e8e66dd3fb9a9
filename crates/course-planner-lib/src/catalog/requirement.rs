use serde::{Serialize, Deserialize};

use super::CourseCode;

/// One entry in a program or college's list of requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementItem {
	/// Exactly this course is required.
	Single(CourseCode),
	/// Completing any one of the courses fulfills the requirement.
	ChooseOne(Vec<CourseCode>),
	/// Fulfilled once `count` distinct courses from `codes` are completed.
	AtLeast { count: usize, codes: Vec<CourseCode> },
}

impl RequirementItem {
	/// Convienience function to collapse this item into a vector of every course it mentions.
	pub fn as_vec(&self) -> Vec<&CourseCode> {
		match self {
			RequirementItem::Single(code) => vec![code],
			RequirementItem::ChooseOne(codes)
			| RequirementItem::AtLeast { codes, .. } => codes.iter().collect(),
		}
	}
}

/// Requirements of a declared program of study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRequirements {
	pub id: String,
	pub name: String,
	pub lower_division: Vec<RequirementItem>,
	pub upper_division: Vec<RequirementItem>,
}

/// General education requirements of a college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeRequirements {
	pub id: String,
	pub requirements: Vec<RequirementItem>,
}
