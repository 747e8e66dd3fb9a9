//! Working out which courses a student should take next.
//!
//! # Usage
//! 1. Create a [`SuggestionBuilder`] from a [`Catalog`].
//! 1. Give the builder a program, a college and the completed courses.
//! 1. [`SuggestionBuilder::build()`] to get a [`SuggestionResolver`], this is where unknown programs or colleges are rejected.
//! 1. [`SuggestionResolver::resolve()`] to get the [`Suggestions`].
//!
//! [`compute_suggestions()`] does all of the above in one call.
//!
//! # Process
//! The [`RequirementWalker`] visits the requirement items in order and uses the [`PrerequisiteResolver`]
//! to sort each into takable now (urgent) or blocked (future). The [`ResultReconciler`] then drops
//! duplicate entries and promotes blocking prerequisites that can already be taken.
//!
//! Nothing here is shared between resolves, any number can run at once against the same catalog.

use crate::catalog::*;

mod diagnostics;
pub use diagnostics::Diagnostics;
mod group_result;
pub use group_result::GroupResult;
mod prerequisite_check;
pub use prerequisite_check::PrerequisiteResolver;
pub use prerequisite_check::PrerequisiteStatus;
pub use prerequisite_check::PrerequisiteTree;
mod requirement_walker;
pub use requirement_walker::RequirementWalker;
pub use requirement_walker::Walk;
mod result_reconciler;
pub use result_reconciler::ResultReconciler;
mod resolver_builder;
pub use resolver_builder::SuggestionBuilder;
pub use resolver_builder::SuggestionResolver;

use serde::{Serialize, Deserialize};

/// Final result of a resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
	/// Takable now.
	pub urgent: Vec<GroupResult>,
	/// Blocked on prerequisites, each record lists what is missing.
	pub future: Vec<GroupResult>,
	pub diagnostics: Diagnostics,
}

impl Suggestions {
	/// Every course mentioned by an urgent or future record, group members included, in record order without repeats.
	pub fn course_codes(&self) -> Vec<&CourseCode> {
		let mut v: Vec<&CourseCode> = Vec::new();
		for code in self.urgent.iter().chain(self.future.iter()).flat_map(|r| r.as_vec()) {
			if !v.contains(&code) {
				v.push(code);
			}
		}
		v
	}

	pub fn is_empty(&self) -> bool {
		self.urgent.is_empty() && self.future.is_empty()
	}
}

/// Suggestions for a student in `program_id` at `college_id` who has finished `completed`.
///
/// # Errors
/// Only [`crate::ConfigurationError`], problems with the catalog data end up in [`Suggestions::diagnostics`].
pub fn compute_suggestions<S: AsRef<str>>(
	catalog: &Catalog,
	program_id: &str,
	college_id: &str,
	completed: impl IntoIterator<Item = S>,
) -> crate::Result<Suggestions> {
	Ok(SuggestionBuilder::new(catalog)
		.program(program_id)
		.college(college_id)
		.completed_courses(completed)
		.build()?
		.resolve())
}
