use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	#[serde(default)]
	pub omnibox: Omnibox,
	#[serde(default)]
	pub sources: Sources,
	#[serde(default)]
	pub frecency: Frecency,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Slot budgets and deadlines used by the aggregator and the merge engine.
#[derive(Debug, Clone, Deserialize)]
pub struct Omnibox {
	#[serde(default = "default_limit")]
	pub default_limit: usize,
	#[serde(default = "default_tab_group_limit")]
	pub tab_group_limit: usize,
	#[serde(default = "default_search_engine_timeout_ms")]
	pub search_engine_timeout_ms: u64,
	#[serde(default = "default_search_engine_slots")]
	pub search_engine_slots: usize,
	#[serde(default = "default_bucket_cap")]
	pub history_cap: usize,
	#[serde(default = "default_bucket_cap")]
	pub url_cap: usize,
	#[serde(default = "default_bucket_cap")]
	pub notes_cap: usize,
	/// Share of the truncated list that may be handed back to matching notes.
	#[serde(default = "default_note_reserve_ratio")]
	pub note_reserve_ratio: f64,
	#[serde(default = "default_recent_notes_limit")]
	pub recent_notes_limit: usize,
	#[serde(default = "default_late_insert_min_capacity")]
	pub late_insert_min_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sources {
	#[serde(default = "default_true")]
	pub search_engine_enabled: bool,
	#[serde(default)]
	pub mnemonics_enabled: bool,
	#[serde(default = "default_note_contents_limit")]
	pub note_contents_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Frecency {
	#[serde(default = "default_frecency_key")]
	pub note_param_key: String,
	#[serde(default = "default_frecency_key")]
	pub url_param_key: String,
}

impl Default for Service {
	fn default() -> Self {
		Self { log_level: default_log_level() }
	}
}

impl Default for Omnibox {
	fn default() -> Self {
		Self {
			default_limit: default_limit(),
			tab_group_limit: default_tab_group_limit(),
			search_engine_timeout_ms: default_search_engine_timeout_ms(),
			search_engine_slots: default_search_engine_slots(),
			history_cap: default_bucket_cap(),
			url_cap: default_bucket_cap(),
			notes_cap: default_bucket_cap(),
			note_reserve_ratio: default_note_reserve_ratio(),
			recent_notes_limit: default_recent_notes_limit(),
			late_insert_min_capacity: default_late_insert_min_capacity(),
		}
	}
}

impl Default for Sources {
	fn default() -> Self {
		Self {
			search_engine_enabled: true,
			mnemonics_enabled: false,
			note_contents_limit: default_note_contents_limit(),
		}
	}
}

impl Default for Frecency {
	fn default() -> Self {
		Self { note_param_key: default_frecency_key(), url_param_key: default_frecency_key() }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_limit() -> usize {
	8
}

fn default_tab_group_limit() -> usize {
	40
}

fn default_search_engine_timeout_ms() -> u64 {
	300
}

fn default_search_engine_slots() -> usize {
	2
}

fn default_bucket_cap() -> usize {
	6
}

fn default_note_reserve_ratio() -> f64 {
	0.4
}

fn default_recent_notes_limit() -> usize {
	3
}

fn default_late_insert_min_capacity() -> usize {
	2
}

fn default_note_contents_limit() -> usize {
	10
}

fn default_frecency_key() -> String {
	"visit_frecency".to_string()
}

fn default_true() -> bool {
	true
}
