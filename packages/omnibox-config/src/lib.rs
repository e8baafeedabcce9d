mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Frecency, Omnibox, Service, Sources};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	for (label, value) in [
		("omnibox.default_limit", cfg.omnibox.default_limit),
		("omnibox.tab_group_limit", cfg.omnibox.tab_group_limit),
		("omnibox.search_engine_slots", cfg.omnibox.search_engine_slots),
		("omnibox.history_cap", cfg.omnibox.history_cap),
		("omnibox.url_cap", cfg.omnibox.url_cap),
		("omnibox.notes_cap", cfg.omnibox.notes_cap),
		("omnibox.recent_notes_limit", cfg.omnibox.recent_notes_limit),
		("sources.note_contents_limit", cfg.sources.note_contents_limit),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	if cfg.omnibox.search_engine_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "omnibox.search_engine_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.omnibox.search_engine_slots > cfg.omnibox.default_limit {
		return Err(Error::Validation {
			message: "omnibox.search_engine_slots must not exceed omnibox.default_limit."
				.to_string(),
		});
	}
	if !cfg.omnibox.note_reserve_ratio.is_finite() {
		return Err(Error::Validation {
			message: "omnibox.note_reserve_ratio must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.omnibox.note_reserve_ratio) {
		return Err(Error::Validation {
			message: "omnibox.note_reserve_ratio must be in the range 0.0-1.0.".to_string(),
		});
	}

	for (label, key) in [
		("frecency.note_param_key", &cfg.frecency.note_param_key),
		("frecency.url_param_key", &cfg.frecency.url_param_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let log_level = cfg.service.log_level.trim();

	if log_level.len() != cfg.service.log_level.len() {
		cfg.service.log_level = log_level.to_string();
	}

	cfg.frecency.note_param_key = cfg.frecency.note_param_key.trim().to_string();
	cfg.frecency.url_param_key = cfg.frecency.url_param_key.trim().to_string();
}
