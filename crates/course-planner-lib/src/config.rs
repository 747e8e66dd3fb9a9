use serde::{Serialize, Deserialize};

/// Where the planner finds its data and how strictly it reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerOptions {
	/// Root of the catalog source tree containing `majorreq`, `gereq` and `prereqdata`.
	data_dir: std::path::PathBuf,
	/// Compiled catalog snapshots are kept here.
	cache_dir: std::path::PathBuf,
	/// Name of the section data file in `<data_dir>/sections` without the extension.
	term: String,
	validate_catalog: bool,
}

/// Resolves an XDG style base directory.
///
/// Falls back to the working directory when nothing usable is set rather than failing,
/// the paths can always be overridden afterwards.
fn base_dir(xdg_var: &str, home_fallback: &str) -> std::path::PathBuf {
	#[cfg(target_os = "windows")]
	let path = std::env::var("APPDATA").map(std::path::PathBuf::from).ok();

	#[cfg(not(target_os = "windows"))]
	let path = if let Ok(e) = std::env::var(xdg_var) {
		Some(std::path::PathBuf::from(e))
	} else {
		std::env::var("HOME").map(|h| std::path::PathBuf::from(h).join(home_fallback)).ok()
	};

	#[cfg(target_os = "windows")]
	let _ = (xdg_var, home_fallback);

	path.unwrap_or_else(|| std::path::PathBuf::from(".")).join("course-planner")
}

impl Default for PlannerOptions {
	fn default() -> Self {
		Self {
			data_dir: base_dir("XDG_DATA_HOME", ".local/share").join("data"),
			cache_dir: base_dir("XDG_CACHE_HOME", ".cache"),
			term: "fa25".to_string(),
			validate_catalog: false,
		}
	}
}

impl PlannerOptions {
	/// Reads options previously written with [`PlannerOptions::save_to_disk`].
	pub fn load_from_disk(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path)?;
		Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
	}

	pub fn save_to_disk(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let file = std::fs::File::create(path)?;
		serde_json::to_writer_pretty(file, self)?;
		Ok(())
	}

	/// Default location of the options file.
	pub fn default_path() -> std::path::PathBuf {
		base_dir("XDG_CONFIG_HOME", ".config").join("options.json")
	}

	pub fn data_dir(&self) -> &std::path::PathBuf {
		&self.data_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_data_dir(&mut self, data_dir: std::path::PathBuf) -> bool {
		if data_dir.is_dir() {
			self.data_dir = data_dir;
			true
		} else {
			false
		}
	}

	pub fn cache_dir(&self) -> &std::path::PathBuf {
		&self.cache_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_cache_dir(&mut self, cache_dir: std::path::PathBuf) -> bool {
		if cache_dir.is_dir() {
			self.cache_dir = cache_dir;
			true
		} else {
			false
		}
	}

	pub fn term(&self) -> &str {
		&self.term
	}
	pub fn set_term(&mut self, term: impl Into<String>) {
		self.term = term.into();
	}

	/// Path of the section data for the configured term.
	pub fn sections_file(&self) -> std::path::PathBuf {
		self.data_dir.join("sections").join(format!("{}.json", self.term))
	}

	pub fn validate_catalog(&self) -> bool {
		self.validate_catalog
	}
	pub fn set_validate_catalog(&mut self, validate_catalog: bool) {
		self.validate_catalog = validate_catalog;
	}
}
