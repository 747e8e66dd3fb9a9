use std::collections::HashSet;

use super::*;
use super::requirement_walker::record_status;

/// Cleans up the raw buckets of a [`Walk`].
///
/// 1. Urgent singles already offered by an urgent group are dropped.
/// 1. Missing prerequisites of future records that can be taken now are promoted to urgent singles.
///
/// Promotion only looks one level down and checks against the completed courses, never against
/// other promoted courses, so running it again on its own output changes nothing.
#[derive(Debug, Clone, Copy)]
pub struct ResultReconciler<'a> {
	resolver: PrerequisiteResolver<'a>,
	completed: &'a CompletionSet,
}

impl<'a> ResultReconciler<'a> {
	pub fn new(catalog: &'a Catalog, completed: &'a CompletionSet) -> Self {
		Self {
			resolver: PrerequisiteResolver::new(catalog),
			completed,
		}
	}

	/// # Parameters
	/// - `processed` - Courses already evaluated, promoted candidates are added so each is evaluated once.
	pub fn reconcile(&self,
		urgent: Vec<GroupResult>,
		future: Vec<GroupResult>,
		processed: &mut HashSet<CourseCode>,
		diagnostics: &mut Diagnostics,
	) -> (Vec<GroupResult>, Vec<GroupResult>) {
		let mut urgent = Self::drop_covered_singles(urgent);

		let mut claimed: HashSet<CourseCode> = urgent.iter()
			.flat_map(|r| r.as_vec())
			.cloned()
			.collect();

		for record in &future {
			for p in record.missing_prereqs() {
				if claimed.contains(p) || processed.contains(p) || self.completed.contains(p) {
					continue;
				}
				processed.insert(p.clone());

				let status = self.resolver.resolve(p, self.completed, &mut HashSet::new());
				record_status(diagnostics, p, &status);
				if status.satisfied {
					log::debug!("promoting `{}`, it can be taken now towards {}", p, record);
					claimed.insert(p.clone());
					urgent.push(GroupResult::single(p.clone()));
				}
			}
		}

		(urgent, future)
	}

	fn drop_covered_singles(urgent: Vec<GroupResult>) -> Vec<GroupResult> {
		let grouped: HashSet<CourseCode> = urgent.iter()
			.filter(|r| r.is_group())
			.flat_map(|r| r.as_vec())
			.cloned()
			.collect();

		urgent.into_iter()
			.filter(|r| match r {
				GroupResult::Single { code, .. } if grouped.contains(code) => {
					log::debug!("dropping `{}`, already offered by a group", code);
					false
				},
				_ => true,
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn code(s: &str) -> CourseCode {
		CourseCode::new(s).unwrap()
	}

	fn codes(v: &[&str]) -> Vec<CourseCode> {
		v.iter().map(|c| code(c)).collect()
	}

	fn catalog() -> Catalog {
		Catalog::builder()
			.add_prerequisites(code("CSE 8A"), PrerequisiteSpec::None)
			.add_prerequisites(code("CSE 8B"), PrerequisiteSpec::Single(code("CSE 8A")))
			.add_prerequisites(code("CSE 11"), PrerequisiteSpec::OneOf(codes(&["CSE 8A", "CSE 8B"])))
			.add_prerequisites(code("CSE 12"), PrerequisiteSpec::Single(code("CSE 11")))
			.add_prerequisites(code("MATH 18"), PrerequisiteSpec::None)
			.build()
	}

	#[test]
	fn singles_covered_by_groups_are_dropped() {
		let c = catalog();
		let done = CompletionSet::default();
		let urgent = vec![
			GroupResult::single(code("MATH 18")),
			GroupResult::ChooseOne { codes: codes(&["MATH 18", "MATH 20A"]), missing_prereqs: vec![] },
			GroupResult::single(code("CSE 8A")),
		];
		let (urgent, future) = ResultReconciler::new(&c, &done)
			.reconcile(urgent, vec![], &mut HashSet::new(), &mut Diagnostics::default());
		assert_eq!(urgent, vec![
			GroupResult::ChooseOne { codes: codes(&["MATH 18", "MATH 20A"]), missing_prereqs: vec![] },
			GroupResult::single(code("CSE 8A")),
		]);
		assert!(future.is_empty());
	}

	#[test]
	fn takable_prerequisites_are_promoted() {
		let c = catalog();
		let done = CompletionSet::default();
		let future = vec![GroupResult::Single { code: code("CSE 11"), missing_prereqs: codes(&["CSE 8A", "CSE 8B"]) }];
		let mut processed = HashSet::from([code("CSE 11")]);

		let (urgent, future) = ResultReconciler::new(&c, &done)
			.reconcile(vec![], future, &mut processed, &mut Diagnostics::default());

		/* CSE 8B needs CSE 8A, which is only promoted in this pass */
		assert_eq!(urgent, vec![GroupResult::single(code("CSE 8A"))]);
		assert_eq!(future.len(), 1);
		assert!(processed.contains(&code("CSE 8B")));
	}

	#[test]
	fn claimed_or_processed_prerequisites_are_not_promoted() {
		let c = catalog();
		let done = CompletionSet::default();
		let urgent = vec![GroupResult::single(code("CSE 8A"))];
		let future = vec![
			GroupResult::Single { code: code("CSE 11"), missing_prereqs: codes(&["CSE 8A", "CSE 8B"]) },
			GroupResult::Single { code: code("CSE 12"), missing_prereqs: codes(&["CSE 11"]) },
		];
		let mut processed = HashSet::from([code("CSE 11"), code("CSE 12"), code("CSE 8B")]);

		let (urgent, _) = ResultReconciler::new(&c, &done)
			.reconcile(urgent, future, &mut processed, &mut Diagnostics::default());
		assert_eq!(urgent, vec![GroupResult::single(code("CSE 8A"))]);
	}

	#[test]
	fn promotion_reaches_a_fixed_point() {
		let c = catalog();
		let done = CompletionSet::default();
		let reconciler = ResultReconciler::new(&c, &done);
		let mut processed = HashSet::from([code("CSE 11")]);
		let mut diagnostics = Diagnostics::default();

		let future = vec![GroupResult::Single { code: code("CSE 11"), missing_prereqs: codes(&["CSE 8A", "CSE 8B"]) }];
		let (urgent, future) = reconciler.reconcile(vec![], future, &mut processed, &mut diagnostics);
		let (again, future_again) = reconciler.reconcile(urgent.clone(), future.clone(), &mut processed, &mut diagnostics);
		assert_eq!(again, urgent);
		assert_eq!(future_again, future);
	}

	#[test]
	fn unknown_prerequisites_are_promoted_with_a_warning() {
		let c = catalog();
		let done = CompletionSet::default();
		let future = vec![GroupResult::Single { code: code("CSE 30"), missing_prereqs: codes(&["CSE 15L"]) }];
		let mut diagnostics = Diagnostics::default();

		let (urgent, _) = ResultReconciler::new(&c, &done)
			.reconcile(vec![], future, &mut HashSet::new(), &mut diagnostics);
		assert_eq!(urgent, vec![GroupResult::single(code("CSE 15L"))]);
		assert_eq!(diagnostics.warnings(), &[DataIntegrityWarning::UnknownCourse(code("CSE 15L"))]);
	}
}
