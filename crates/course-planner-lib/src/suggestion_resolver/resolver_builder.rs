use super::*;

pub struct SuggestionBuilder<'c> {
	catalog: &'c Catalog,
	program: Option<String>,
	college: Option<String>,
	completed: Vec<String>,
}

impl<'c> SuggestionBuilder<'c> {
	pub fn new(catalog: &'c Catalog) -> Self {
		Self {
			catalog,
			program: None,
			college: None,
			completed: Default::default(),
		}
	}

	pub fn program(mut self, program_id: impl Into<String>) -> Self {
		self.program = Some(program_id.into());
		self
	}

	pub fn college(mut self, college_id: impl Into<String>) -> Self {
		self.college = Some(college_id.into());
		self
	}

	/// Courses are given as the user typed them, ones that don't parse are reported in the diagnostics.
	pub fn completed_courses<S: AsRef<str>>(mut self, completed: impl IntoIterator<Item = S>) -> Self {
		self.completed.extend(completed.into_iter().map(|s| s.as_ref().to_string()));
		self
	}

	/// # Errors
	/// [`crate::ConfigurationError`] if the program or college is unknown or was never given.
	pub fn build(self) -> crate::Result<SuggestionResolver<'c>> {
		let program = self.program.unwrap_or_default();
		let college = self.college.unwrap_or_default();
		let items = self.catalog.requirements_for(&program, &college)?;

		let (completed, warnings) = CompletionSet::from_strings(&self.completed);
		let mut diagnostics = Diagnostics::default();
		for w in warnings {
			diagnostics.warn(w);
		}

		Ok(SuggestionResolver { catalog: self.catalog, items, completed, diagnostics })
	}
}

/// A single resolve of requirement items against completed courses.
#[derive(Debug)]
pub struct SuggestionResolver<'c> {
	catalog: &'c Catalog,
	items: Vec<RequirementItem>,
	completed: CompletionSet,
	diagnostics: Diagnostics,
}

impl<'c> SuggestionResolver<'c> {
	/// Resolve an arbitrary list of items, skipping the program and college lookup.
	pub fn new(catalog: &'c Catalog, items: Vec<RequirementItem>, completed: CompletionSet) -> Self {
		Self { catalog, items, completed, diagnostics: Default::default() }
	}

	pub fn items(&self) -> &[RequirementItem] {
		&self.items
	}

	pub fn completed(&self) -> &CompletionSet {
		&self.completed
	}

	pub fn resolve(self) -> Suggestions {
		let walk = RequirementWalker::new(self.catalog, &self.completed)
			.with_diagnostics(self.diagnostics)
			.walk(&self.items);

		let Walk { urgent, future, mut processed, mut diagnostics } = walk;
		let (urgent, future) = ResultReconciler::new(self.catalog, &self.completed)
			.reconcile(urgent, future, &mut processed, &mut diagnostics);

		log::info!(
			"{} urgent, {} future, {} data warnings, {} cycle guards",
			urgent.len(), future.len(), diagnostics.data_integrity_count(), diagnostics.cycle_guard_count(),
		);
		Suggestions { urgent, future, diagnostics }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn code(s: &str) -> CourseCode {
		CourseCode::new(s).unwrap()
	}

	fn catalog() -> Catalog {
		Catalog::builder()
			.add_program(ProgramRequirements {
				id: "CS26".to_string(),
				name: "Computer Science".to_string(),
				lower_division: vec![RequirementItem::Single(code("CSE 11"))],
				upper_division: vec![],
			})
			.add_college(CollegeRequirements { id: "Muir".to_string(), requirements: vec![] })
			.add_prerequisites(code("CSE 8A"), PrerequisiteSpec::None)
			.add_prerequisites(code("CSE 8B"), PrerequisiteSpec::None)
			.add_prerequisites(code("CSE 11"), PrerequisiteSpec::OneOf(vec![code("CSE 8A"), code("CSE 8B")]))
			.build()
	}

	#[test]
	fn missing_program_is_a_configuration_error() {
		let c = catalog();
		assert!(matches!(
			SuggestionBuilder::new(&c).college("Muir").build(),
			Err(crate::Error::Configuration(crate::ConfigurationError::UnknownProgram(_)))
		));
	}

	#[test]
	fn invalid_completed_courses_become_diagnostics() {
		let c = catalog();
		let suggestions = SuggestionBuilder::new(&c)
			.program("cs26")
			.college("muir")
			.completed_courses(["cse_8a", "not a course", ""])
			.build()
			.unwrap()
			.resolve();

		assert_eq!(suggestions.urgent, vec![GroupResult::single(code("CSE 11"))]);
		assert_eq!(suggestions.diagnostics.warnings(), &[DataIntegrityWarning::InvalidCourseCode("not a course".to_string())]);
	}

	#[test]
	fn resolves_scenario_with_promotion() {
		let c = catalog();
		let suggestions = SuggestionResolver::new(&c, vec![RequirementItem::Single(code("CSE 11"))], CompletionSet::default()).resolve();
		assert_eq!(suggestions.future, vec![GroupResult::Single { code: code("CSE 11"), missing_prereqs: vec![code("CSE 8A"), code("CSE 8B")] }]);
		assert_eq!(suggestions.urgent, vec![GroupResult::single(code("CSE 8A")), GroupResult::single(code("CSE 8B"))]);
		assert!(suggestions.diagnostics.is_empty());
	}
}
