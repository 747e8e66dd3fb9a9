use std::collections::HashSet;
use std::path::PathBuf;

use course_planner::{Catalog, PlannerOptions, SectionCatalog};
use course_planner::catalog::{CompletionSet, CourseCode};
use course_planner::sections::SectionMatcher;
use course_planner::suggestion_resolver::*;

#[tokio::main]
async fn main() {
	env_logger::init();

	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",     "Show help");
		opts.optopt(  "d", "data-dir", "Catalog data directory", "DIR");
		opts.optopt(  "c", "config",   "Options file to use", "FILE");
		opts.optflag( "r", "rebuild",  "Rebuild the catalog instead of using the cached snapshot");
		opts.optflag( "",  "json",     "Print suggestions as JSON");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") || parsed_options.free.is_empty() {
			eprintln!("{}", opts.usage(USAGE));
			return;
		}

		parsed_options
	};

	let config_path = parsed_options.opt_str("c").map(PathBuf::from).unwrap_or_else(PlannerOptions::default_path);
	let mut options = PlannerOptions::load_from_disk(&config_path).unwrap_or_else(|e| {
		log::warn!("Failed to read options file: {}", e);
		log::warn!("Using default options.");
		PlannerOptions::default()
	});
	if let Some(dir) = parsed_options.opt_str("d") {
		if !options.set_data_dir(PathBuf::from(&dir)) {
			log::error!("Data directory `{}` does not exist.", dir);
			return;
		}
	}

	let (catalog, sections) = {
		let catalog_options = options.clone();
		let rebuild = parsed_options.opt_present("r");
		let sections_file = options.sections_file();

		let catalog = tokio::task::spawn_blocking(move || load_catalog(&catalog_options, rebuild));
		let sections = tokio::task::spawn_blocking(move || SectionCatalog::load_from_file(sections_file));
		let (catalog, sections) = tokio::join!(catalog, sections);

		let catalog = match catalog {
			Ok(Ok(c)) => c,
			Ok(Err(e)) => { log::error!("Failed to load catalog: {}", e); return },
			Err(e) => { log::error!("Catalog loading task failed: {}", e); return },
		};
		let sections = match sections {
			Ok(Ok(s)) => s,
			Ok(Err(e)) => {
				log::warn!("No section data for term {}: {}", options.term(), e);
				SectionCatalog::default()
			},
			Err(e) => { log::error!("Section loading task failed: {}", e); return },
		};
		(catalog, sections)
	};

	let command = parsed_options.free[0].as_str();
	let args = &parsed_options.free[1..];
	let result = match command {
		"suggest" => suggest(&catalog, &sections, args, parsed_options.opt_present("json")),
		"explain" => explain(&catalog, args),
		"programs" => { list_programs(&catalog); Ok(()) },
		other => Err(Error::UnknownCommand(other.to_string())),
	};

	if let Err(e) = result {
		log::error!("{}", e);
		eprintln!("{}", opts.usage(USAGE));
	}

	/* Remember the data directory given on the command line */
	if parsed_options.opt_present("d") {
		if let Err(e) = options.save_to_disk(&config_path) {
			log::warn!("Failed to save options: {}", e);
		}
	}
}

const USAGE: &str = "\
Usage: course-planner-terminal [options] COMMAND

Commands:
    suggest PROGRAM COLLEGE [COMPLETED...]
    explain COURSE [COMPLETED...]
    programs";

/// Uses the cached snapshot when possible, otherwise builds the catalog from the data directory and caches it.
fn load_catalog(options: &PlannerOptions, rebuild: bool) -> course_planner::Result<Catalog> {
	fn generate_and_save_new_catalog(options: &PlannerOptions) -> course_planner::Result<Catalog> {
		let catalog = Catalog::load_from_dir(options.data_dir(), options.validate_catalog())?;
		if let Err(e) = catalog.save_to_disk(options) {
			log::warn!("Failed to cache catalog: {}", e);
		}
		Ok(catalog)
	}

	if rebuild {
		return generate_and_save_new_catalog(options);
	}

	match Catalog::load_from_disk(options) {
		Ok(catalog) => Ok(catalog),
		Err(course_planner::Error::IO(e)) if e.kind() == std::io::ErrorKind::NotFound => {
			log::info!("No cached catalog, building from {}", options.data_dir().display());
			generate_and_save_new_catalog(options)
		},
		Err(course_planner::Error::Parse(_)) => {
			log::warn!("Failed to open cached catalog due to parsing error, format likely changed. regenerating...");
			generate_and_save_new_catalog(options)
		},
		Err(e) => Err(e),
	}
}

fn suggest(catalog: &Catalog, sections: &SectionCatalog, args: &[String], json: bool) -> Result<(), Error> {
	let (program, college) = match args {
		[program, college, ..] => (program, college),
		_ => return Err(Error::MissingArgument("PROGRAM and COLLEGE")),
	};

	let suggestions = SuggestionBuilder::new(catalog)
		.program(program.as_str())
		.college(college.as_str())
		.completed_courses(&args[2..])
		.build()?
		.resolve();

	if json {
		println!("{}", serde_json::to_string_pretty(&suggestions)?);
		return Ok(());
	}

	println!("Take now:");
	for record in &suggestions.urgent {
		println!("\t{}", record);
	}
	println!("Later:");
	for record in &suggestions.future {
		println!("\t{}", record);
	}

	let matched = SectionMatcher::new(sections).matching(&suggestions);
	let offered: HashSet<&CourseCode> = matched.iter().map(|s| &s.course).collect();
	println!("{} sections offered for {} of the suggested courses.", matched.len(), offered.len());

	if !suggestions.diagnostics.is_empty() {
		println!(
			"{} data warnings, {} cycle guards.",
			suggestions.diagnostics.data_integrity_count(),
			suggestions.diagnostics.cycle_guard_count(),
		);
		for warning in suggestions.diagnostics.warnings() {
			println!("\t{}", warning);
		}
	}
	Ok(())
}

fn explain(catalog: &Catalog, args: &[String]) -> Result<(), Error> {
	let course = args.first().ok_or(Error::MissingArgument("COURSE"))?;
	let course = CourseCode::new(course)?;

	let (completed, warnings) = CompletionSet::from_strings(&args[1..]);
	for w in warnings {
		log::warn!("{}", w);
	}

	let tree = PrerequisiteResolver::new(catalog).explain(&course, &completed, &mut HashSet::new());
	print!("{}", tree);
	Ok(())
}

fn list_programs(catalog: &Catalog) {
	println!("Programs:");
	for id in catalog.programs() {
		let name = catalog.program(id).map(|p| p.name.as_str()).unwrap_or_default();
		println!("\t{} {}", id, name);
	}
	println!("Colleges:");
	for id in catalog.colleges() {
		println!("\t{}", id);
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("course planner error: {0}")]
	CoursePlanner(#[from] course_planner::Error),
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
	#[error("missing argument {0}")]
	MissingArgument(&'static str),
	#[error("unknown command `{0}`")]
	UnknownCommand(String),
}
