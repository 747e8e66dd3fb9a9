//! Deciding whether a single course can be taken given what has been completed.

use std::collections::HashSet;

use serde::{Serialize, Deserialize};

use crate::catalog::{Catalog, CompletionSet, CourseCode};

/// Outcome of checking one course's prerequisites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteStatus {
	pub satisfied: bool,
	/// Courses that would satisfy the unmet prerequisites, empty when `satisfied`.
	pub missing: Vec<CourseCode>,
	/// The course was already being resolved, `satisfied` is the assumed default rather than a real answer.
	pub cycle_guarded: bool,
	/// The course has no catalog entry and was assumed to have no prerequisites.
	pub unknown: bool,
}

impl PrerequisiteStatus {
	fn satisfied() -> Self {
		Self { satisfied: true, missing: Vec::new(), cycle_guarded: false, unknown: false }
	}
}

/// Checks a course's direct prerequisites against a [`CompletionSet`].
///
/// Holds nothing but the catalog, the caller owns the `visiting` set so separate resolves never share state.
#[derive(Debug, Clone, Copy)]
pub struct PrerequisiteResolver<'c> {
	catalog: &'c Catalog,
}

impl<'c> PrerequisiteResolver<'c> {
	pub fn new(catalog: &'c Catalog) -> Self {
		Self { catalog }
	}

	pub fn catalog(&self) -> &'c Catalog {
		self.catalog
	}

	/// Determines if the prerequisites of `code` are met.
	///
	/// Missing prerequisites are not expanded any further, that is left to the caller.
	/// `code` is added to `visiting` on entry, if it is already there the lookup stops
	/// straight away and reports the course as satisfied so cyclic data can't loop.
	pub fn resolve(&self, code: &CourseCode, completed: &CompletionSet, visiting: &mut HashSet<CourseCode>) -> PrerequisiteStatus {
		if completed.contains(code) {
			return PrerequisiteStatus::satisfied();
		}
		if !visiting.insert(code.clone()) {
			return PrerequisiteStatus { cycle_guarded: true, ..PrerequisiteStatus::satisfied() };
		}

		let (spec, unknown) = match self.catalog.lookup_prerequisites(code) {
			Some(spec) => (spec, false),
			None => (self.catalog.prerequisites_for(code), true),
		};

		let status = match spec.unmet(completed) {
			None => PrerequisiteStatus { unknown, ..PrerequisiteStatus::satisfied() },
			Some(missing) => PrerequisiteStatus { satisfied: false, missing, cycle_guarded: false, unknown },
		};
		log::trace!("`{}` satisfied: {}, missing: {:?}", code, status.satisfied, status.missing);
		status
	}

	/// Builds the full chain of what stands between the student and `code`.
	///
	/// Every missing prerequisite is expanded into its own missing prerequisites.
	/// `visiting` is shared across the whole expansion, a course seen a second time is
	/// reported satisfied by the cycle guard and not expanded again.
	pub fn explain(&self, code: &CourseCode, completed: &CompletionSet, visiting: &mut HashSet<CourseCode>) -> PrerequisiteTree {
		let status = self.resolve(code, completed, visiting);
		let missing = status.missing.iter()
			.map(|p| self.explain(p, completed, visiting))
			.collect();

		PrerequisiteTree {
			code: code.clone(),
			satisfied: status.satisfied,
			cycle_guarded: status.cycle_guarded,
			unknown: status.unknown,
			missing,
		}
	}
}

/// A course and, recursively, the prerequisites it is still missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteTree {
	pub code: CourseCode,
	pub satisfied: bool,
	pub cycle_guarded: bool,
	pub unknown: bool,
	pub missing: Vec<PrerequisiteTree>,
}

impl PrerequisiteTree {
	/// Every course in the tree where the cycle guard cut the expansion short.
	pub fn cycle_guarded_codes(&self) -> Vec<&CourseCode> {
		let mut v = Vec::new();
		if self.cycle_guarded { v.push(&self.code); }
		for m in &self.missing {
			v.extend(m.cycle_guarded_codes());
		}
		v
	}

	/// Number of courses in the tree including this one.
	pub fn len(&self) -> usize {
		1 + self.missing.iter().map(|m| m.len()).sum::<usize>()
	}

	fn fmt_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
		let note = if self.cycle_guarded {
			" (already listed)"
		} else if self.satisfied {
			" (takable now)"
		} else {
			""
		};
		writeln!(f, "{}{}{}", "  ".repeat(depth), self.code, note)?;
		for m in &self.missing {
			m.fmt_indented(f, depth + 1)?;
		}
		Ok(())
	}
}

impl std::fmt::Display for PrerequisiteTree {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.fmt_indented(f, 0)
	}
}
