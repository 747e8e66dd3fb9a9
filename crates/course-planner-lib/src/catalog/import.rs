//! Functions and methods for reading catalog types from JSON
//!
//! These double as the validator for the catalog, anything outside the accepted shapes is reported instead of guessed at.

use serde_json::Value;

use super::*;
use crate::Error::Parse;

/// Pulls the message back out of a parse error so it can be stored in a warning.
fn reason(e: crate::Error) -> String {
	match e {
		Parse(r) => r,
		e => e.to_string(),
	}
}

fn course_from_json(v: &Value) -> crate::Result<CourseCode> {
	let s = v.as_str().ok_or_else(|| Parse(format!("course must be a string, found {}", v)))?;
	CourseCode::new(s)
}

/// Reads the `courses` array of a group, dropping repeats.
fn course_list_from_json(obj: &serde_json::Map<String, Value>) -> crate::Result<Vec<CourseCode>> {
	let arr = obj.get("courses")
		.ok_or_else(|| Parse("group has no courses field".to_string()))?
		.as_array().ok_or_else(|| Parse("courses must be an array".to_string()))?;
	if arr.is_empty() {
		return Err(Parse("group must contain at least one course".to_string()));
	}

	let mut codes = Vec::<CourseCode>::with_capacity(arr.len());
	for elem in arr {
		let code = course_from_json(elem)?;
		if !codes.contains(&code) { codes.push(code); }
	}
	Ok(codes)
}

fn group_type(obj: &serde_json::Map<String, Value>) -> crate::Result<&str> {
	obj.get("type")
		.ok_or_else(|| Parse("group has no type field".to_string()))?
		.as_str().ok_or_else(|| Parse("type must be a string".to_string()))
}

impl RequirementItem {
	/// Reads a single entry of a requirement list.
	///
	/// A list can only be flattened by the caller so an `all` group comes back as several `Single` items.
	pub fn from_json(v: &Value) -> crate::Result<Vec<Self>> {
		if v.is_string() {
			return Ok(vec![RequirementItem::Single(course_from_json(v)?)]);
		}

		let obj = v.as_object().ok_or_else(|| Parse("requirement must be a course or a group object".to_string()))?;
		match group_type(obj)? {
			"one" => {
				let mut codes = course_list_from_json(obj)?;
				if codes.len() == 1 {
					Ok(vec![RequirementItem::Single(codes.remove(0))])
				} else {
					Ok(vec![RequirementItem::ChooseOne(codes)])
				}
			},
			"at_least" => {
				let codes = course_list_from_json(obj)?;
				let count = obj.get("count")
					.ok_or_else(|| Parse("at_least group has no count".to_string()))?
					.as_u64().ok_or_else(|| Parse("count must be a positive integer".to_string()))? as usize;
				if count == 0 {
					Err(Parse("at_least count must be at least 1".to_string()))
				} else if count > codes.len() {
					Err(Parse(format!("at_least count {} exceeds the {} listed courses", count, codes.len())))
				} else {
					Ok(vec![RequirementItem::AtLeast { count, codes }])
				}
			},
			"all" => {
				Ok(course_list_from_json(obj)?.into_iter().map(RequirementItem::Single).collect())
			},
			other => Err(Parse(format!("unknown requirement type `{}`", other))),
		}
	}
}

/// Reads a list of requirements, leaving out and reporting any malformed entries.
fn requirement_list_from_json(v: Option<&Value>, origin: &str, warnings: &mut Vec<DataIntegrityWarning>) -> crate::Result<Vec<RequirementItem>> {
	let arr = match v {
		None | Some(Value::Null) => return Ok(Vec::new()),
		Some(v) => v.as_array().ok_or_else(|| Parse(format!("requirements in `{}` must be an array", origin)))?,
	};

	let mut items = Vec::<RequirementItem>::with_capacity(arr.len());
	for elem in arr {
		match RequirementItem::from_json(elem) {
			Ok(mut v) => items.append(&mut v),
			Err(e) => {
				let warning = DataIntegrityWarning::MalformedRequirement { origin: origin.to_string(), reason: reason(e) };
				log::warn!("{}", warning);
				warnings.push(warning);
			},
		}
	}
	Ok(items)
}

impl ProgramRequirements {
	/// # Parameters
	/// - `fallback_id` - Used when the JSON has no `major` field, usually the file name.
	pub fn from_json(fallback_id: &str, v: &Value, warnings: &mut Vec<DataIntegrityWarning>) -> crate::Result<Self> {
		let obj = v.as_object().ok_or_else(|| Parse("program JSON is not an object".to_string()))?;
		let id = obj.get("major").and_then(|m| m.as_str()).unwrap_or(fallback_id).trim().to_uppercase();
		let name = obj.get("name").and_then(|m| m.as_str()).map(|s| s.to_string()).unwrap_or_else(|| id.clone());

		Ok(Self {
			lower_division: requirement_list_from_json(obj.get("lower_division"), &id, warnings)?,
			upper_division: requirement_list_from_json(obj.get("upper_division"), &id, warnings)?,
			id,
			name,
		})
	}
}

impl CollegeRequirements {
	pub fn from_json(fallback_id: &str, v: &Value, warnings: &mut Vec<DataIntegrityWarning>) -> crate::Result<Self> {
		let obj = v.as_object().ok_or_else(|| Parse("college JSON is not an object".to_string()))?;
		let id = obj.get("college").and_then(|m| m.as_str()).unwrap_or(fallback_id).trim().to_string();

		Ok(Self {
			requirements: requirement_list_from_json(obj.get("requirements"), &id, warnings)?,
			id,
		})
	}
}

impl PrerequisiteClause {
	pub fn from_json(v: &Value) -> crate::Result<Self> {
		if v.is_string() {
			return Ok(PrerequisiteClause::Single(course_from_json(v)?));
		}

		let obj = v.as_object().ok_or_else(|| Parse("all group members must be courses or one groups".to_string()))?;
		match group_type(obj)? {
			"one" => Ok(PrerequisiteClause::OneOf(course_list_from_json(obj)?)),
			"all" => Err(Parse("all groups can't be nested inside all groups".to_string())),
			other => Err(Parse(format!("unknown prerequisite type `{}`", other))),
		}
	}
}

impl PrerequisiteSpec {
	pub fn from_json(v: &Value) -> crate::Result<Self> {
		match v {
			Value::Null => Ok(PrerequisiteSpec::None),
			Value::String(_) => Ok(PrerequisiteSpec::Single(course_from_json(v)?)),
			Value::Object(obj) => {
				match group_type(obj)? {
					"one" => Ok(PrerequisiteSpec::OneOf(course_list_from_json(obj)?)),
					"all" => {
						let arr = obj.get("courses")
							.ok_or_else(|| Parse("group has no courses field".to_string()))?
							.as_array().ok_or_else(|| Parse("courses must be an array".to_string()))?;
						if arr.is_empty() {
							return Err(Parse("group must contain at least one course".to_string()));
						}
						Ok(PrerequisiteSpec::AllOf(
							arr.iter().map(PrerequisiteClause::from_json).collect::<crate::Result<Vec<_>>>()?
						))
					},
					other => Err(Parse(format!("unknown prerequisite type `{}`", other))),
				}
			},
			_ => Err(Parse(format!("prerequisites must be null, a course or a group, found {}", v))),
		}
	}
}

/// Reads a `{ "code": ..., "prereqs": ... }` entry.
///
/// Only a missing or invalid `code` is an error, a malformed `prereqs` is reported and stored as [`PrerequisiteSpec::None`].
pub fn prerequisite_entry_from_json(v: &Value, warnings: &mut Vec<DataIntegrityWarning>) -> crate::Result<(CourseCode, PrerequisiteSpec)> {
	let obj = v.as_object().ok_or_else(|| Parse("prerequisite JSON is not an object".to_string()))?;
	let code = course_from_json(obj.get("code").ok_or_else(|| Parse("prerequisite JSON has no code field".to_string()))?)?;

	let spec = match PrerequisiteSpec::from_json(obj.get("prereqs").unwrap_or(&Value::Null)) {
		Ok(spec) => spec,
		Err(e) => {
			let warning = DataIntegrityWarning::MalformedPrerequisite { course: code.to_string(), reason: reason(e) };
			log::warn!("{}", warning);
			warnings.push(warning);
			PrerequisiteSpec::None
		},
	};

	Ok((code, spec))
}
