use std::sync::OnceLock;

use serde_json::Value;

use super::*;
use crate::Error::Parse;

/// Splits a day listing like `"TuTh"` into weekdays.
///
/// Days are looked for in the order M, Tu, W, Th, F and each match is removed before the next
/// is looked for, so the result is always in that order.
pub fn parse_days(s: &str) -> Vec<Weekday> {
	let mut rest = s.to_string();
	let mut days = Vec::new();
	for day in Weekday::ALL {
		if let Some(i) = rest.find(day.abbreviation()) {
			rest.replace_range(i..i + day.abbreviation().len(), "");
			days.push(day);
		}
	}
	days
}

fn twelve_hour_pattern() -> &'static regex::Regex {
	static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		regex::Regex::new(r"(?i)(\d{1,2}):(\d{2})([ap])").expect("time pattern is valid")
	})
}

fn to_24_hour(s: &str) -> Option<String> {
	let captures = twelve_hour_pattern().captures(s)?;
	let mut hour: u32 = captures[1].parse().ok()?;
	let minute: u32 = captures[2].parse().ok()?;
	let pm = captures[3].eq_ignore_ascii_case("p");
	if pm && hour != 12 { hour += 12; }
	if !pm && hour == 12 { hour = 0; }
	Some(format!("{:02}:{:02}", hour, minute))
}

/// Converts a listing like `"3:30p-4:50p"` to 24 hour times.
///
/// Anything that isn't two times separated by `-` gives no times at all.
pub fn parse_times(s: &str) -> MeetingTimes {
	let parts: Vec<&str> = s.split('-').collect();
	if parts.len() != 2 {
		return MeetingTimes::default();
	}
	MeetingTimes {
		start: to_24_hour(parts[0]),
		end: to_24_hour(parts[1]),
	}
}

fn days_from_json(v: &Value) -> Vec<Weekday> {
	match v {
		Value::String(s) => parse_days(s),
		Value::Array(arr) => arr.iter()
			.filter_map(|d| d.as_str())
			.filter_map(|d| {
				let day = Weekday::from_abbreviation(d.trim());
				if day.is_none() { log::warn!("unknown weekday `{}`", d); }
				day
			})
			.collect(),
		_ => Vec::new(),
	}
}

fn times_from_json(v: &Value) -> MeetingTimes {
	match v {
		Value::String(s) => parse_times(s),
		Value::Object(obj) => MeetingTimes {
			start: obj.get("start").and_then(|t| t.as_str()).map(|t| t.to_string()),
			end: obj.get("end").and_then(|t| t.as_str()).map(|t| t.to_string()),
		},
		_ => MeetingTimes::default(),
	}
}

/// Seat counts are numbers or numeric strings, blanks and words like `"FULL"` mean unknown.
fn count_from_json(v: Option<&Value>) -> Option<u32> {
	match v? {
		Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

fn text_from_json(v: Option<&Value>) -> Option<String> {
	v.and_then(|v| v.as_str())
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.map(|s| s.to_string())
}

fn section_from_json(course: CourseCode, v: &Value) -> crate::Result<Section> {
	let obj = v.as_object().ok_or_else(|| Parse(format!("section of `{}` must be an object", course)))?;

	let professor_rating = match obj.get("professor_rating") {
		None | Some(Value::Null) => None,
		Some(r) => Some(serde_json::from_value::<ProfessorRating>(r.clone())?),
	};

	Ok(Section {
		section_type: SectionType::from(text_from_json(obj.get("sectionType")).unwrap_or_default()),
		days: obj.get("days").map(days_from_json).unwrap_or_default(),
		times: obj.get("times").map(times_from_json).unwrap_or_default(),
		building_name: text_from_json(obj.get("buildingName")).unwrap_or_default(),
		room_number: text_from_json(obj.get("roomNumber")).unwrap_or_default(),
		professor: text_from_json(obj.get("professor")),
		seats_remaining: count_from_json(obj.get("seatsRemaining")),
		spaces: count_from_json(obj.get("spaces")),
		professor_rating,
		course,
	})
}

pub(super) fn sections_from_json(v: &Value) -> crate::Result<(Vec<Section>, Vec<DataIntegrityWarning>)> {
	let departments = v.as_object().ok_or_else(|| Parse("section data must be an object of departments".to_string()))?;

	let mut sections = Vec::new();
	let mut warnings = Vec::new();
	for (dept, courses) in departments {
		let Some(courses) = courses.as_object() else {
			log::warn!("department `{}` is not an object of courses, skipping", dept);
			continue;
		};
		for (number, listed) in courses {
			let raw = format!("{} {}", dept, number);
			let course = match CourseCode::new(&raw) {
				Ok(c) => c,
				Err(_) => {
					let warning = DataIntegrityWarning::InvalidCourseCode(raw);
					log::warn!("{}", warning);
					warnings.push(warning);
					continue;
				},
			};
			for section in listed.as_array().map(|a| a.as_slice()).unwrap_or_default() {
				match section_from_json(course.clone(), section) {
					Ok(s) => sections.push(s),
					Err(e) => log::warn!("skipping section: {}", e),
				}
			}
		}
	}
	Ok((sections, warnings))
}
