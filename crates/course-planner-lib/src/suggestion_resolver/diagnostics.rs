use serde::{Serialize, Deserialize};

use crate::catalog::{CourseCode, DataIntegrityWarning};

/// Things noticed during a resolve that didn't stop it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
	warnings: Vec<DataIntegrityWarning>,
	/// Courses whose lookup was cut short because they were already being resolved.
	cycle_guards: Vec<CourseCode>,
}

impl Diagnostics {
	/// Records a warning once, repeats of the same warning are dropped.
	pub fn warn(&mut self, warning: DataIntegrityWarning) {
		if !self.warnings.contains(&warning) {
			log::warn!("{}", warning);
			self.warnings.push(warning);
		}
	}

	pub fn cycle_guard_triggered(&mut self, code: &CourseCode) {
		log::debug!("cycle guard stopped re-entrant lookup of `{}`", code);
		if !self.cycle_guards.contains(code) {
			self.cycle_guards.push(code.clone());
		}
	}

	pub fn warnings(&self) -> &[DataIntegrityWarning] {
		&self.warnings
	}

	pub fn cycle_guards(&self) -> &[CourseCode] {
		&self.cycle_guards
	}

	pub fn data_integrity_count(&self) -> usize {
		self.warnings.len()
	}

	pub fn cycle_guard_count(&self) -> usize {
		self.cycle_guards.len()
	}

	pub fn is_empty(&self) -> bool {
		self.warnings.is_empty() && self.cycle_guards.is_empty()
	}
}
