use serde::{Serialize, Deserialize};

use super::CourseCode;

/// Problems in the data that are worked around rather than failing the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DataIntegrityWarning {
	/// Referenced but has no prerequisite entry, treated as having no prerequisites.
	#[error("course `{0}` has no catalog entry")]
	UnknownCourse(CourseCode),
	/// The entry was unusable and the course is treated as having no prerequisites.
	#[error("malformed prerequisites for `{course}`: {reason}")]
	MalformedPrerequisite { course: String, reason: String },
	/// The item or file was left out.
	#[error("malformed requirement in `{origin}`: {reason}")]
	MalformedRequirement { origin: String, reason: String },
	#[error("`{0}` is not a course code")]
	InvalidCourseCode(String),
	#[error("prerequisite cycle between {0:?}")]
	PrerequisiteCycle(Vec<CourseCode>),
}
