//! Various helper functions for testing
//!
//! functions in this module should use results and not use any panics to avoid confusion in callers

use std::path::PathBuf;

use course_planner::catalog::*;
use course_planner::PlannerOptions;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("copy error: {0}")]
	Copy(#[from] fs_extra::error::Error),
	#[error("course planner error: {0}")]
	Planner(#[from] course_planner::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Program and college ids used by [`scenario_catalog`].
pub const SCENARIO_PROGRAM: &str = "TEST";
pub const SCENARIO_COLLEGE: &str = "NONE";

/// The catalog bundled with the library's tests.
pub fn test_data_dir() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR"))
		.join("..")
		.join("course-planner-lib")
		.join("test-data")
		.join("catalog")
}

/// Copies the bundled catalog into a fresh temporary directory so tests can write next to it.
///
/// The directory is removed when the returned handle is dropped.
pub fn copy_test_catalog() -> Result<tempfile::TempDir> {
	let dir = tempfile::tempdir()?;
	let mut options = fs_extra::dir::CopyOptions::new();
	options.content_only = true;
	fs_extra::dir::copy(test_data_dir(), dir.path(), &options)?;
	Ok(dir)
}

/// Options reading the catalog from `dir` with snapshots kept in `dir/cache`.
pub fn test_options(dir: &tempfile::TempDir) -> Result<PlannerOptions> {
	let cache = dir.path().join("cache");
	std::fs::create_dir_all(&cache)?;

	let mut options = PlannerOptions::default();
	if !options.set_data_dir(dir.path().to_path_buf()) || !options.set_cache_dir(cache) {
		return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "test directories missing").into());
	}
	Ok(options)
}

pub fn codes(raw: &[&str]) -> Result<Vec<CourseCode>> {
	Ok(raw.iter().map(|c| CourseCode::new(c)).collect::<course_planner::Result<_>>()?)
}

/// A catalog with a single program holding `items` and a college with no requirements.
pub fn scenario_catalog(items: Vec<RequirementItem>, prerequisites: impl IntoIterator<Item = (CourseCode, PrerequisiteSpec)>) -> Catalog {
	let mut builder = Catalog::builder()
		.add_program(ProgramRequirements {
			id: SCENARIO_PROGRAM.to_string(),
			name: "Scenario".to_string(),
			lower_division: items,
			upper_division: Vec::new(),
		})
		.add_college(CollegeRequirements {
			id: SCENARIO_COLLEGE.to_string(),
			requirements: Vec::new(),
		});
	for (code, spec) in prerequisites {
		builder = builder.add_prerequisites(code, spec);
	}
	builder.build()
}
