use course_planner::catalog::*;
use course_planner::Catalog;

fn init() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn code(s: &str) -> CourseCode {
	CourseCode::new(s).unwrap()
}

#[test]
fn load_reports_data_problems() {
	init();
	let catalog = Catalog::load_from_dir(course_planner_test_utils::test_data_dir(), false).expect("failed to load catalog");

	assert_eq!(catalog.course_count(), 33);
	assert_eq!(catalog.load_warnings().len(), 2);
	assert!(catalog.load_warnings().contains(&DataIntegrityWarning::PrerequisiteCycle(vec![code("CSE 196"), code("CSE 197")])));
	assert!(catalog.load_warnings().iter().any(|w| matches!(w,
		DataIntegrityWarning::MalformedPrerequisite { course, .. } if course == "CSE 199"
	)));
	/* The malformed entry is kept as having no prerequisites */
	assert_eq!(catalog.lookup_prerequisites(&code("CSE 199")), Some(&PrerequisiteSpec::None));
}

#[test]
fn validated_load_skips_files_outside_the_schema() {
	init();
	let catalog = Catalog::load_from_dir(course_planner_test_utils::test_data_dir(), true).expect("failed to load catalog");

	assert_eq!(catalog.course_count(), 32);
	assert!(catalog.lookup_prerequisites(&code("CSE 199")).is_none());
	assert_eq!(catalog.load_warnings().len(), 2);
}

#[test]
fn snapshot_round_trip() {
	init();
	let dir = course_planner_test_utils::copy_test_catalog().expect("failed to copy catalog");
	let options = course_planner_test_utils::test_options(&dir).expect("failed to create options");

	assert!(matches!(
		Catalog::load_from_disk(&options),
		Err(course_planner::Error::IO(e)) if e.kind() == std::io::ErrorKind::NotFound
	));

	let catalog = Catalog::load_from_dir(options.data_dir(), options.validate_catalog()).expect("failed to load catalog");
	catalog.save_to_disk(&options).expect("failed to save snapshot");
	let loaded = Catalog::load_from_disk(&options).expect("failed to load snapshot");

	assert_eq!(loaded.programs(), catalog.programs());
	assert_eq!(loaded.colleges(), catalog.colleges());
	assert_eq!(loaded.course_count(), catalog.course_count());
	assert_eq!(loaded.load_warnings(), catalog.load_warnings());
	assert_eq!(
		loaded.requirements_for("CS26", "Warren").unwrap(),
		catalog.requirements_for("CS26", "Warren").unwrap(),
	);
}

#[test]
fn corrupt_snapshot_is_a_parse_error() {
	init();
	let dir = course_planner_test_utils::copy_test_catalog().expect("failed to copy catalog");
	let options = course_planner_test_utils::test_options(&dir).expect("failed to create options");

	std::fs::write(options.cache_dir().join("catalog.bin"), b"\xff\xff\xff\xff\xff\xff\xff\xff not a catalog").unwrap();
	assert!(matches!(Catalog::load_from_disk(&options), Err(course_planner::Error::Parse(_))));
}

#[test]
fn unreadable_files_become_warnings() {
	init();
	let dir = course_planner_test_utils::copy_test_catalog().expect("failed to copy catalog");
	std::fs::write(dir.path().join("prereqdata").join("BROKEN.json"), "{ not json").unwrap();
	std::fs::write(dir.path().join("gereq").join("sixth.json"), r#"{ "requirements": [ "CAT 1", { "type": "some", "courses": [] } ] }"#).unwrap();

	let catalog = Catalog::load_from_dir(dir.path(), false).expect("failed to load catalog");

	assert!(catalog.load_warnings().iter().any(|w| matches!(w,
		DataIntegrityWarning::MalformedPrerequisite { course, .. } if course == "BROKEN"
	)));
	/* The bad item is dropped, the rest of the college survives under its file name */
	assert_eq!(catalog.college("SIXTH").unwrap().requirements, vec![RequirementItem::Single(code("CAT 1"))]);
	assert!(catalog.load_warnings().iter().any(|w| matches!(w, DataIntegrityWarning::MalformedRequirement { .. })));
}

#[test]
fn graph_covers_referenced_courses() {
	init();
	let catalog = Catalog::load_from_dir(course_planner_test_utils::test_data_dir(), false).expect("failed to load catalog");
	let graph = catalog.prerequisite_graph();

	/* MATH 109, MATH 31CH and DSC 10 only appear as prerequisites */
	assert_eq!(graph.node_count(), catalog.course_count() + 3);
}
