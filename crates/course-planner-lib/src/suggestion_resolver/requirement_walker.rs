use std::collections::HashSet;

use super::*;

/// Raw output of a [`RequirementWalker`], before reconciliation.
#[derive(Debug, Default)]
pub struct Walk {
	pub urgent: Vec<GroupResult>,
	pub future: Vec<GroupResult>,
	/// Every course the walk has classified, the reconciler uses it to avoid evaluating a course twice.
	pub processed: HashSet<CourseCode>,
	pub diagnostics: Diagnostics,
}

/// Sorts requirement items into urgent and future records.
///
/// Items are visited in the order given and the first record to list a course owns it,
/// later items skip courses that are already listed.
/// Blocked options suppressed from a `ChooseOne` are processed but not listed,
/// so a later item that needs them still reports them.
#[derive(Debug)]
pub struct RequirementWalker<'a> {
	resolver: PrerequisiteResolver<'a>,
	completed: &'a CompletionSet,
	listed: HashSet<CourseCode>,
	walk: Walk,
}

impl<'a> RequirementWalker<'a> {
	pub fn new(catalog: &'a Catalog, completed: &'a CompletionSet) -> Self {
		Self {
			resolver: PrerequisiteResolver::new(catalog),
			completed,
			listed: HashSet::new(),
			walk: Walk::default(),
		}
	}

	/// Start from a walk that already has diagnostics, such as warnings from parsing the completed courses.
	pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
		self.walk.diagnostics = diagnostics;
		self
	}

	pub fn walk(mut self, items: &[RequirementItem]) -> Walk {
		for item in items {
			match item {
				RequirementItem::Single(code) => self.walk_single(code),
				RequirementItem::ChooseOne(codes) => self.walk_choose_one(codes),
				RequirementItem::AtLeast { count, codes } => self.walk_at_least(*count, codes),
			}
		}
		log::debug!("walk finished: {} urgent, {} future, {} processed", self.walk.urgent.len(), self.walk.future.len(), self.walk.processed.len());
		self.walk
	}

	/// Direct prerequisite check of `code` with diagnostics recorded.
	fn check(&mut self, code: &CourseCode) -> PrerequisiteStatus {
		let status = self.resolver.resolve(code, self.completed, &mut HashSet::new());
		record_status(&mut self.walk.diagnostics, code, &status);
		status
	}

	fn is_settled(&self, code: &CourseCode) -> bool {
		self.completed.contains(code) || self.listed.contains(code)
	}

	fn emit_urgent(&mut self, record: GroupResult) {
		self.listed.extend(record.as_vec().into_iter().cloned());
		self.walk.urgent.push(record);
	}

	fn emit_future(&mut self, record: GroupResult) {
		self.listed.extend(record.as_vec().into_iter().cloned());
		self.walk.future.push(record);
	}

	fn walk_single(&mut self, code: &CourseCode) {
		if self.is_settled(code) {
			log::debug!("`{}` already completed or listed, skipping", code);
			return;
		}
		self.walk.processed.insert(code.clone());

		let status = self.check(code);
		if status.satisfied {
			self.emit_urgent(GroupResult::single(code.clone()));
		} else {
			self.emit_future(GroupResult::Single { code: code.clone(), missing_prereqs: status.missing });
		}
	}

	fn walk_choose_one(&mut self, codes: &[CourseCode]) {
		if codes.iter().any(|c| self.completed.contains(c)) {
			log::debug!("choice between {:?} already fulfilled", codes);
			return;
		}

		let mut candidates = Vec::with_capacity(codes.len());
		extend_unique(&mut candidates, codes.iter().filter(|c| !self.listed.contains(*c)).cloned());

		let mut eligible = Vec::new();
		let mut blocked = Vec::new();
		let mut missing = Vec::new();
		for code in &candidates {
			self.walk.processed.insert(code.clone());
			let status = self.check(code);
			if status.satisfied {
				eligible.push(code.clone());
			} else {
				blocked.push(code.clone());
				extend_unique(&mut missing, status.missing);
			}
		}

		if !eligible.is_empty() {
			if !blocked.is_empty() {
				log::debug!("suppressing blocked options {:?}, {:?} can be taken now", blocked, eligible);
			}
			self.emit_urgent(GroupResult::ChooseOne { codes: eligible, missing_prereqs: Vec::new() });
		} else if !blocked.is_empty() {
			self.emit_future(GroupResult::ChooseOne { codes: blocked, missing_prereqs: missing });
		} else {
			log::debug!("every option of {:?} is already listed", codes);
		}
	}

	fn walk_at_least(&mut self, count: usize, codes: &[CourseCode]) {
		let mut distinct = Vec::with_capacity(codes.len());
		extend_unique(&mut distinct, codes.iter().cloned());

		let taken = distinct.iter().filter(|c| self.completed.contains(c)).count();
		if taken >= count {
			log::debug!("{} of {:?} already completed", taken, codes);
			return;
		}
		let needed = count - taken;

		let candidates: Vec<CourseCode> = distinct.into_iter()
			.filter(|c| !self.is_settled(c))
			.collect();

		let mut eligible = Vec::new();
		let mut missing = Vec::new();
		for code in &candidates {
			let status = self.check(code);
			if status.satisfied {
				eligible.push(code.clone());
			} else {
				extend_unique(&mut missing, status.missing);
			}
		}
		self.walk.processed.extend(codes.iter().cloned());

		if candidates.is_empty() {
			log::debug!("every remaining option of {:?} is listed by an earlier requirement", codes);
		} else if !eligible.is_empty() {
			self.emit_urgent(GroupResult::AtLeast { needed, codes: candidates, eligible, missing_prereqs: Vec::new() });
		} else {
			self.emit_future(GroupResult::AtLeast { needed, codes: candidates, eligible, missing_prereqs: missing });
		}
	}
}

/// Turns the flags of a [`PrerequisiteStatus`] into diagnostics.
pub(super) fn record_status(diagnostics: &mut Diagnostics, code: &CourseCode, status: &PrerequisiteStatus) {
	if status.unknown {
		diagnostics.warn(DataIntegrityWarning::UnknownCourse(code.clone()));
	}
	if status.cycle_guarded {
		diagnostics.cycle_guard_triggered(code);
	}
}

/// Appends the items not already in `v`, keeping their order.
pub(super) fn extend_unique(v: &mut Vec<CourseCode>, items: impl IntoIterator<Item = CourseCode>) {
	for item in items {
		if !v.contains(&item) {
			v.push(item);
		}
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

	fn completed(v: &[&str]) -> CompletionSet {
		codes(v).into_iter().collect()
	}

	fn catalog() -> Catalog {
		Catalog::builder()
			.add_prerequisites(code("CSE 8A"), PrerequisiteSpec::None)
			.add_prerequisites(code("CSE 8B"), PrerequisiteSpec::None)
			.add_prerequisites(code("CSE 11"), PrerequisiteSpec::OneOf(codes(&["CSE 8A", "CSE 8B"])))
			.add_prerequisites(code("MATH 10A"), PrerequisiteSpec::None)
			.add_prerequisites(code("MATH 18"), PrerequisiteSpec::None)
			.add_prerequisites(code("MATH 20A"), PrerequisiteSpec::Single(code("MATH 10A")))
			.add_prerequisites(code("CSE 120"), PrerequisiteSpec::None)
			.add_prerequisites(code("CSE 121"), PrerequisiteSpec::None)
			.add_prerequisites(code("CSE 123"), PrerequisiteSpec::None)
			.add_prerequisites(code("CSE 124"), PrerequisiteSpec::Single(code("CSE 110")))
			.build()
	}

	fn walk(items: &[RequirementItem], done: &[&str]) -> Walk {
		let c = catalog();
		let done = completed(done);
		RequirementWalker::new(&c, &done).walk(items)
	}

	#[test]
	fn single_with_unmet_prerequisite_is_future() {
		let w = walk(&[RequirementItem::Single(code("CSE 11"))], &[]);
		assert!(w.urgent.is_empty());
		assert_eq!(w.future, vec![GroupResult::Single { code: code("CSE 11"), missing_prereqs: codes(&["CSE 8A", "CSE 8B"]) }]);
	}

	#[test]
	fn single_with_met_prerequisite_is_urgent() {
		let w = walk(&[RequirementItem::Single(code("CSE 11"))], &["CSE 8A"]);
		assert_eq!(w.urgent, vec![GroupResult::single(code("CSE 11"))]);
		assert!(w.future.is_empty());
	}

	#[test]
	fn completed_single_is_skipped() {
		let w = walk(&[RequirementItem::Single(code("CSE 11"))], &["CSE 11"]);
		assert!(w.urgent.is_empty() && w.future.is_empty());
		assert!(w.processed.is_empty());
	}

	#[test]
	fn choose_one_suppresses_blocked_options() {
		let w = walk(&[RequirementItem::ChooseOne(codes(&["MATH 18", "MATH 20A"]))], &[]);
		assert_eq!(w.urgent, vec![GroupResult::ChooseOne { codes: codes(&["MATH 18"]), missing_prereqs: vec![] }]);
		assert!(w.future.is_empty());
		assert!(w.processed.contains(&code("MATH 20A")));
	}

	#[test]
	fn choose_one_all_blocked_is_future() {
		let w = walk(&[RequirementItem::ChooseOne(codes(&["MATH 20A", "CSE 11"]))], &[]);
		assert_eq!(w.future, vec![GroupResult::ChooseOne {
			codes: codes(&["MATH 20A", "CSE 11"]),
			missing_prereqs: codes(&["MATH 10A", "CSE 8A", "CSE 8B"]),
		}]);
	}

	#[test]
	fn choose_one_with_completed_member_is_skipped() {
		let w = walk(&[RequirementItem::ChooseOne(codes(&["MATH 18", "MATH 20A"]))], &["MATH 20A"]);
		assert!(w.urgent.is_empty() && w.future.is_empty());
	}

	#[test]
	fn at_least_lists_eligible_members() {
		let w = walk(&[RequirementItem::AtLeast { count: 2, codes: codes(&["CSE 120", "CSE 121", "CSE 123"]) }], &[]);
		assert_eq!(w.urgent, vec![GroupResult::AtLeast {
			needed: 2,
			codes: codes(&["CSE 120", "CSE 121", "CSE 123"]),
			eligible: codes(&["CSE 120", "CSE 121", "CSE 123"]),
			missing_prereqs: vec![],
		}]);
	}

	#[test]
	fn at_least_counts_completed_members() {
		let items = [RequirementItem::AtLeast { count: 2, codes: codes(&["CSE 120", "CSE 121", "CSE 124"]) }];

		let w = walk(&items, &["CSE 120"]);
		assert_eq!(w.urgent, vec![GroupResult::AtLeast {
			needed: 1,
			codes: codes(&["CSE 121", "CSE 124"]),
			eligible: codes(&["CSE 121"]),
			missing_prereqs: vec![],
		}]);

		let w = walk(&items, &["CSE 120", "CSE 124"]);
		assert!(w.urgent.is_empty() && w.future.is_empty());
	}

	#[test]
	fn at_least_without_eligible_members_is_future() {
		let w = walk(&[RequirementItem::AtLeast { count: 1, codes: codes(&["CSE 124"]) }], &[]);
		assert_eq!(w.future, vec![GroupResult::AtLeast {
			needed: 1,
			codes: codes(&["CSE 124"]),
			eligible: vec![],
			missing_prereqs: codes(&["CSE 110"]),
		}]);
	}

	#[test]
	fn first_occurrence_owns_a_course() {
		let items = [
			RequirementItem::ChooseOne(codes(&["MATH 18", "MATH 20A"])),
			RequirementItem::Single(code("MATH 18")),
			RequirementItem::Single(code("MATH 20A")),
			RequirementItem::AtLeast { count: 1, codes: codes(&["CSE 120", "CSE 121"]) },
			RequirementItem::Single(code("CSE 121")),
			RequirementItem::AtLeast { count: 1, codes: codes(&["CSE 121", "CSE 123"]) },
		];
		let w = walk(&items, &[]);
		assert_eq!(w.urgent, vec![
			GroupResult::ChooseOne { codes: codes(&["MATH 18"]), missing_prereqs: vec![] },
			GroupResult::AtLeast { needed: 1, codes: codes(&["CSE 120", "CSE 121"]), eligible: codes(&["CSE 120", "CSE 121"]), missing_prereqs: vec![] },
			GroupResult::AtLeast { needed: 1, codes: codes(&["CSE 123"]), eligible: codes(&["CSE 123"]), missing_prereqs: vec![] },
		]);
		/* Suppressed from the choice, but still owed as a single requirement */
		assert_eq!(w.future, vec![GroupResult::Single { code: code("MATH 20A"), missing_prereqs: codes(&["MATH 10A"]) }]);
	}

	#[test]
	fn suppressed_options_stay_available_to_later_items() {
		let items = [
			RequirementItem::ChooseOne(codes(&["CSE 124", "CSE 120"])),
			RequirementItem::AtLeast { count: 1, codes: codes(&["CSE 124"]) },
			RequirementItem::ChooseOne(codes(&["CSE 124"])),
		];
		let w = walk(&items, &[]);
		assert_eq!(w.urgent, vec![GroupResult::ChooseOne { codes: codes(&["CSE 120"]), missing_prereqs: vec![] }]);
		assert_eq!(w.future, vec![GroupResult::AtLeast {
			needed: 1,
			codes: codes(&["CSE 124"]),
			eligible: vec![],
			missing_prereqs: codes(&["CSE 110"]),
		}]);
		assert!(w.processed.contains(&code("CSE 124")));
	}

	#[test]
	fn listed_courses_are_not_classified_again() {
		let items = [
			RequirementItem::ChooseOne(codes(&["MATH 20A", "CSE 124"])),
			RequirementItem::ChooseOne(codes(&["CSE 124", "MATH 20A"])),
			RequirementItem::AtLeast { count: 2, codes: codes(&["CSE 124", "MATH 20A"]) },
		];
		let w = walk(&items, &[]);
		assert!(w.urgent.is_empty());
		assert_eq!(w.future, vec![GroupResult::ChooseOne {
			codes: codes(&["MATH 20A", "CSE 124"]),
			missing_prereqs: codes(&["MATH 10A", "CSE 110"]),
		}]);
	}

	#[test]
	fn unknown_courses_are_takable_and_reported() {
		let w = walk(&[RequirementItem::Single(code("CSE 999"))], &[]);
		assert_eq!(w.urgent, vec![GroupResult::single(code("CSE 999"))]);
		assert_eq!(w.diagnostics.warnings(), &[DataIntegrityWarning::UnknownCourse(code("CSE 999"))]);
	}
}
