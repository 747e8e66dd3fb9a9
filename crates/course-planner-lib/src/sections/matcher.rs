use std::collections::HashSet;

use super::*;
use crate::suggestion_resolver::Suggestions;

/// Picks out the sections offered for suggested courses.
#[derive(Debug, Clone, Copy)]
pub struct SectionMatcher<'s> {
	sections: &'s SectionCatalog,
}

impl<'s> SectionMatcher<'s> {
	pub fn new(sections: &'s SectionCatalog) -> Self {
		Self { sections }
	}

	/// Sections of every course in urgent or future records, group members included, in catalog order.
	pub fn matching(&self, suggestions: &Suggestions) -> Vec<&'s Section> {
		let wanted: HashSet<&CourseCode> = suggestions.course_codes().into_iter().collect();
		self.sections.sections().iter()
			.filter(|s| wanted.contains(&s.course))
			.collect()
	}
}
