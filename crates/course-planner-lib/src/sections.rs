//! # Section catalog
//!
//! Offered sections for a term, read from the `{ dept: { number: [section] } }` files the class scraper writes.
//! Only used to show what is on offer for suggested courses, no scheduling is done here.

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::catalog::{CourseCode, DataIntegrityWarning};

mod parse;
pub use parse::parse_days;
pub use parse::parse_times;

mod matcher;
pub use matcher::SectionMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
	#[serde(rename = "M")]
	Monday,
	#[serde(rename = "Tu")]
	Tuesday,
	#[serde(rename = "W")]
	Wednesday,
	#[serde(rename = "Th")]
	Thursday,
	#[serde(rename = "F")]
	Friday,
}

impl Weekday {
	/// Weekdays in the order they are matched and listed.
	pub const ALL: [Weekday; 5] = [Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday, Weekday::Thursday, Weekday::Friday];

	pub fn abbreviation(&self) -> &'static str {
		match self {
			Weekday::Monday => "M",
			Weekday::Tuesday => "Tu",
			Weekday::Wednesday => "W",
			Weekday::Thursday => "Th",
			Weekday::Friday => "F",
		}
	}

	pub fn from_abbreviation(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|d| d.abbreviation() == s)
	}
}

impl std::fmt::Display for Weekday {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.abbreviation())
	}
}

/// Start and end in 24 hour `HH:MM`, `None` when the listing had no usable time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTimes {
	pub start: Option<String>,
	pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
	Lecture,
	Discussion,
	Lab,
	Seminar,
	Other(String),
}

impl SectionType {
	/// The two letter code used in the schedule of classes.
	pub fn code(&self) -> &str {
		match self {
			SectionType::Lecture => "LE",
			SectionType::Discussion => "DI",
			SectionType::Lab => "LA",
			SectionType::Seminar => "SE",
			SectionType::Other(s) => s,
		}
	}
}

impl From<String> for SectionType {
	fn from(value: String) -> Self {
		match value.trim() {
			"LE" => SectionType::Lecture,
			"DI" => SectionType::Discussion,
			"LA" => SectionType::Lab,
			"SE" => SectionType::Seminar,
			other => SectionType::Other(other.to_string()),
		}
	}
}

impl From<SectionType> for String {
	fn from(value: SectionType) -> Self {
		value.code().to_string()
	}
}

/// Rating data merged in from the professor rating scraper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessorRating {
	pub rating: Option<f64>,
	pub difficulty: Option<f64>,
	pub num_ratings: Option<u32>,
	/// Percentage.
	pub would_take_again: Option<f64>,
	pub department: Option<String>,
	pub num_professors: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
	pub course: CourseCode,
	pub section_type: SectionType,
	pub days: Vec<Weekday>,
	pub times: MeetingTimes,
	pub building_name: String,
	pub room_number: String,
	pub professor: Option<String>,
	/// `None` when the listing was blank or not a number, e.g. `"FULL"`.
	pub seats_remaining: Option<u32>,
	pub spaces: Option<u32>,
	pub professor_rating: Option<ProfessorRating>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionCatalog {
	sections: Vec<Section>,
	load_warnings: Vec<DataIntegrityWarning>,
}

impl SectionCatalog {
	/// Flattens the nested scraper output into a list of sections.
	///
	/// Sections are ordered by department then course number as they sort in the file's keys.
	/// Sections whose course can't be named are left out and reported in [`SectionCatalog::load_warnings()`].
	pub fn from_json(v: &serde_json::Value) -> crate::Result<Self> {
		let (sections, load_warnings) = parse::sections_from_json(v)?;
		log::info!("loaded {} sections, {} warnings", sections.len(), load_warnings.len());
		Ok(Self { sections, load_warnings })
	}

	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path.as_ref())?;
		let json: serde_json::Value = serde_json::from_reader(std::io::BufReader::new(file))?;
		Self::from_json(&json)
	}

	pub fn sections(&self) -> &[Section] {
		&self.sections
	}

	pub fn sections_for(&self, code: &CourseCode) -> Vec<&Section> {
		self.sections.iter().filter(|s| &s.course == code).collect()
	}

	pub fn len(&self) -> usize {
		self.sections.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}

	pub fn load_warnings(&self) -> &[DataIntegrityWarning] {
		&self.load_warnings
	}
}
