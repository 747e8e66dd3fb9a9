use std::path::{Path, PathBuf};

use serde_json::Value;

use super::*;

/// Sub directories of the data directory, named after the scraper output they hold.
const PROGRAM_DIR: &str = "majorreq";
const COLLEGE_DIR: &str = "gereq";
const PREREQUISITE_DIR: &str = "prereqdata";

const SNAPSHOT_FILE: &str = "catalog.bin";

/// Every `.json` file below `dir` sorted by name so later duplicates win predictably.
fn json_files(dir: &Path) -> Vec<PathBuf> {
	if !dir.is_dir() {
		log::warn!("catalog directory `{}` is missing, skipping", dir.display());
		return Vec::new();
	}

	walkdir::WalkDir::new(dir)
		.sort_by(|a, b| a.file_name().cmp(b.file_name()))
		.into_iter()
		.filter_map(|e| match e {
			Ok(e) => Some(e),
			Err(e) => {
				log::warn!("unreadable entry in `{}`: {}", dir.display(), e);
				None
			},
		})
		.filter(|e| e.file_type().is_file() && e.path().extension().map_or(false, |x| x == "json"))
		.map(|e| e.into_path())
		.collect()
}

fn read_json(path: &Path) -> crate::Result<Value> {
	let file = std::fs::File::open(path)?;
	Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

fn file_stem(path: &Path) -> String {
	path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

fn prerequisite_schema() -> crate::Result<jsonschema::JSONSchema> {
	let schema: Value = serde_json::from_str(include_str!("prerequisite.schema.json"))?;
	jsonschema::JSONSchema::compile(&schema).map_err(|e| crate::Error::Validation(e.to_string()))
}

impl Catalog {
	/// Reads a catalog from a directory of JSON files.
	/// # Parameters
	/// - `dir` - Contains `majorreq`, `gereq` and `prereqdata` directories.
	/// - `do_validation` - Check every prerequisite file against the bundled schema first. Slower, meant for data that hasn't been checked before.
	///
	/// Individual bad files or entries are reported through [`Catalog::load_warnings()`], only a missing `dir` is an error.
	pub fn load_from_dir(dir: impl AsRef<Path>, do_validation: bool) -> crate::Result<Self> {
		let dir = dir.as_ref();
		if !dir.is_dir() {
			return Err(std::io::Error::new(std::io::ErrorKind::NotFound, format!("catalog directory `{}` not found", dir.display())).into());
		}

		let mut warnings = Vec::<DataIntegrityWarning>::new();
		let mut builder = Catalog::builder();

		for path in json_files(&dir.join(PROGRAM_DIR)) {
			let program = read_json(&path).and_then(|v| ProgramRequirements::from_json(&file_stem(&path), &v, &mut warnings));
			match program {
				Ok(p) => builder = builder.add_program(p),
				Err(e) => {
					let warning = DataIntegrityWarning::MalformedRequirement { origin: path.display().to_string(), reason: e.to_string() };
					log::warn!("{}", warning);
					warnings.push(warning);
				},
			}
		}

		for path in json_files(&dir.join(COLLEGE_DIR)) {
			let college = read_json(&path).and_then(|v| CollegeRequirements::from_json(&file_stem(&path), &v, &mut warnings));
			match college {
				Ok(c) => builder = builder.add_college(c),
				Err(e) => {
					let warning = DataIntegrityWarning::MalformedRequirement { origin: path.display().to_string(), reason: e.to_string() };
					log::warn!("{}", warning);
					warnings.push(warning);
				},
			}
		}

		let compiled_schema = if do_validation { Some(prerequisite_schema()?) } else { None };

		for path in json_files(&dir.join(PREREQUISITE_DIR)) {
			let json = match read_json(&path) {
				Ok(v) => v,
				Err(e) => {
					let warning = DataIntegrityWarning::MalformedPrerequisite { course: file_stem(&path), reason: e.to_string() };
					log::warn!("{}", warning);
					warnings.push(warning);
					continue;
				},
			};

			if let Some(schema) = &compiled_schema {
				if !schema.is_valid(&json) {
					let warning = DataIntegrityWarning::MalformedPrerequisite { course: file_stem(&path), reason: "does not match schema".to_string() };
					log::warn!("{}", warning);
					warnings.push(warning);
					continue;
				}
			}

			match import::prerequisite_entry_from_json(&json, &mut warnings) {
				Ok((code, spec)) => builder = builder.add_prerequisites(code, spec),
				Err(e) => {
					let warning = DataIntegrityWarning::MalformedPrerequisite { course: file_stem(&path), reason: e.to_string() };
					log::warn!("{}", warning);
					warnings.push(warning);
				},
			}
		}

		Ok(builder.add_warnings(warnings).build())
	}

	/// Writes a compiled snapshot to the options cache directory.
	pub fn save_to_disk(&self, options: &crate::PlannerOptions) -> crate::Result<()> {
		std::fs::create_dir_all(options.cache_dir())?;
		let data = bincode::serialize(self)?;
		std::fs::write(options.cache_dir().join(SNAPSHOT_FILE), data)?;
		Ok(())
	}

	/// Reads a snapshot written by [`Catalog::save_to_disk()`].
	///
	/// # Errors
	/// - [`crate::Error::IO`] when there is no snapshot.
	/// - [`crate::Error::Parse`] when the snapshot is from an incompatible version and should be regenerated.
	pub fn load_from_disk(options: &crate::PlannerOptions) -> crate::Result<Self> {
		let data = std::fs::read(options.cache_dir().join(SNAPSHOT_FILE))?;
		bincode::deserialize(&data).map_err(|e| crate::Error::Parse(format!("catalog snapshot unreadable: {}", e)))
	}
}
