//! # Course catalog
//!
//! Read-only tables the resolver works from: program requirements, college general education requirements and course prerequisites.
//!
//! The catalog is built once, either from a directory of JSON files with [`Catalog::load_from_dir()`],
//! from a compiled snapshot with [`Catalog::load_from_disk()`] or in memory with [`CatalogBuilder`].
//! It is never modified afterwards so it can be shared freely between concurrent resolves.

use std::collections::HashMap;

use serde::{Serialize, Deserialize};

mod course_code;
pub use course_code::CourseCode;
pub use course_code::CompletionSet;

mod requirement;
pub use requirement::RequirementItem;
pub use requirement::ProgramRequirements;
pub use requirement::CollegeRequirements;

mod prerequisite;
pub use prerequisite::PrerequisiteSpec;
pub use prerequisite::PrerequisiteClause;

mod warning;
pub use warning::DataIntegrityWarning;

pub mod import;

mod prerequisite_graph;
pub use prerequisite_graph::PrerequisiteGraph;

mod generation;

static NO_PREREQUISITES: PrerequisiteSpec = PrerequisiteSpec::None;

/// Program and college ids are matched without regard to case or surrounding whitespace.
fn normalize_id(id: &str) -> String {
	id.trim().to_uppercase()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
	programs: HashMap<String, ProgramRequirements>,
	colleges: HashMap<String, CollegeRequirements>,
	prerequisites: HashMap<CourseCode, PrerequisiteSpec>,
	/// Problems found while building the catalog.
	load_warnings: Vec<DataIntegrityWarning>,
}

impl Catalog {
	pub fn builder() -> CatalogBuilder {
		CatalogBuilder::default()
	}

	/// The combined requirement list in priority order: the program's lower division, the college's requirements, then the program's upper division.
	///
	/// The order matters to the resolver, the first item to mention a course owns it.
	pub fn requirements_for(&self, program_id: &str, college_id: &str) -> crate::Result<Vec<RequirementItem>> {
		let program = self.program(program_id)?;
		let college = self.college(college_id)?;

		Ok(program.lower_division.iter()
			.chain(college.requirements.iter())
			.chain(program.upper_division.iter())
			.cloned()
			.collect())
	}

	pub fn program(&self, program_id: &str) -> crate::Result<&ProgramRequirements> {
		self.programs.get(&normalize_id(program_id))
			.ok_or_else(|| crate::ConfigurationError::UnknownProgram(program_id.to_string()).into())
	}

	pub fn college(&self, college_id: &str) -> crate::Result<&CollegeRequirements> {
		self.colleges.get(&normalize_id(college_id))
			.ok_or_else(|| crate::ConfigurationError::UnknownCollege(college_id.to_string()).into())
	}

	/// Prerequisites of `code`, courses without an entry are assumed to have none.
	pub fn prerequisites_for(&self, code: &CourseCode) -> &PrerequisiteSpec {
		self.lookup_prerequisites(code).unwrap_or(&NO_PREREQUISITES)
	}

	/// Like [`Catalog::prerequisites_for()`] but tells unknown courses apart.
	pub fn lookup_prerequisites(&self, code: &CourseCode) -> Option<&PrerequisiteSpec> {
		self.prerequisites.get(code)
	}

	/// Ids of every program, sorted.
	pub fn programs(&self) -> Vec<&str> {
		let mut v: Vec<&str> = self.programs.values().map(|p| p.id.as_str()).collect();
		v.sort_unstable();
		v
	}

	/// Ids of every college, sorted.
	pub fn colleges(&self) -> Vec<&str> {
		let mut v: Vec<&str> = self.colleges.values().map(|c| c.id.as_str()).collect();
		v.sort_unstable();
		v
	}

	pub fn course_count(&self) -> usize {
		self.prerequisites.len()
	}

	pub fn load_warnings(&self) -> &[DataIntegrityWarning] {
		&self.load_warnings
	}

	pub fn prerequisite_graph(&self) -> PrerequisiteGraph {
		PrerequisiteGraph::from_prerequisites(self.prerequisites.iter())
	}
}

/// Assembles a [`Catalog`], checking the prerequisites for cycles when finished.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
	catalog: Catalog,
}

impl CatalogBuilder {
	pub fn add_program(mut self, program: ProgramRequirements) -> Self {
		self.catalog.programs.insert(normalize_id(&program.id), program);
		self
	}

	pub fn add_college(mut self, college: CollegeRequirements) -> Self {
		self.catalog.colleges.insert(normalize_id(&college.id), college);
		self
	}

	/// A later entry for the same course replaces the earlier one.
	pub fn add_prerequisites(mut self, code: CourseCode, spec: PrerequisiteSpec) -> Self {
		if self.catalog.prerequisites.insert(code.clone(), spec).is_some() {
			log::debug!("prerequisites for `{}` replaced by a later entry", code);
		}
		self
	}

	pub fn add_warnings(mut self, warnings: impl IntoIterator<Item = DataIntegrityWarning>) -> Self {
		self.catalog.load_warnings.extend(warnings);
		self
	}

	pub fn build(mut self) -> Catalog {
		for cycle in self.catalog.prerequisite_graph().cycles() {
			let warning = DataIntegrityWarning::PrerequisiteCycle(cycle);
			log::warn!("{}", warning);
			self.catalog.load_warnings.push(warning);
		}

		log::info!(
			"catalog ready: {} programs, {} colleges, {} courses, {} warnings",
			self.catalog.programs.len(),
			self.catalog.colleges.len(),
			self.catalog.prerequisites.len(),
			self.catalog.load_warnings.len(),
		);
		self.catalog
	}
}
