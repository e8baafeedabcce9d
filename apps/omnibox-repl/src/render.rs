use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use omnibox_domain::Candidate;
use omnibox_service::{Applied, QueryController, TextFieldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
	Text,
	Json,
}

/// Visible omnibox state after one step.
#[derive(Debug, Serialize)]
pub struct Snapshot {
	pub event: &'static str,
	pub query: String,
	pub mode: &'static str,
	pub generation: u64,
	pub text_field: String,
	/// Inline completion as a char range of `text_field`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub completion: Option<[usize; 2]>,
	pub selected: Option<usize>,
	pub loading: bool,
	pub can_create_note: bool,
	pub rows: Vec<Row>,
}
impl Snapshot {
	pub fn capture(controller: &QueryController, event: &'static str) -> Self {
		let field = controller.text_field();

		Self {
			event,
			query: controller.query().to_string(),
			mode: controller.mode().label(),
			generation: controller.generation(),
			text_field: field.text.clone(),
			completion: field.selected_range.as_ref().map(|range| [range.start, range.end]),
			selected: controller.selected_index(),
			loading: controller.loading_candidate().is_some(),
			can_create_note: controller.can_create_note(),
			rows: controller.results().iter().map(Row::from).collect(),
		}
	}
}

#[derive(Debug, Serialize)]
pub struct Row {
	pub kind: &'static str,
	pub text: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub information: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	pub score: f64,
}

impl From<&Candidate> for Row {
	fn from(candidate: &Candidate) -> Self {
		Self {
			kind: candidate.kind().as_str(),
			text: candidate.display_text().to_string(),
			information: candidate.display_information().map(str::to_string),
			url: candidate.url().map(str::to_string),
			score: candidate.weighted_score(),
		}
	}
}

pub fn event_label(applied: Applied) -> &'static str {
	match applied {
		Applied::Merged { .. } => "merged",
		Applied::LateInserted { .. } => "late_inserted",
		Applied::Stale => "stale",
	}
}

/// The field with its inline completion in brackets, e.g. `abc[site.com]`.
pub fn render_field(field: &TextFieldState) -> String {
	let Some(range) = field.selected_range.as_ref().filter(|range| !range.is_empty()) else {
		return field.text.clone();
	};
	let head: String = field.text.chars().take(range.start).collect();
	let completion: String = field.text.chars().skip(range.start).take(range.len()).collect();
	let tail: String = field.text.chars().skip(range.end).collect();

	format!("{head}[{completion}]{tail}")
}

pub fn render_text(snapshot: &Snapshot) -> String {
	let field = TextFieldState {
		text: snapshot.text_field.clone(),
		selected_range: snapshot.completion.map(|[start, end]| start..end),
	};
	let mut out = format!(
		"{} [{}, generation {}, {}]\n  field: {}\n",
		snapshot.query,
		snapshot.mode,
		snapshot.generation,
		snapshot.event,
		render_field(&field),
	);

	for (index, row) in snapshot.rows.iter().enumerate() {
		let marker = if snapshot.selected == Some(index) { '*' } else { ' ' };
		let _ = write!(out, "{marker} {index:>2} {:<13} {}", row.kind, row.text);

		if let Some(information) = &row.information {
			let _ = write!(out, "  ({information})");
		}

		out.push('\n');
	}

	if snapshot.loading {
		out.push_str("    ... waiting for search suggestions\n");
	}

	out
}

pub fn emit(snapshots: &[Snapshot], format: Format) -> color_eyre::Result<()> {
	for snapshot in snapshots {
		match format {
			Format::Text => print!("{}", render_text(snapshot)),
			Format::Json => println!("{}", serde_json::to_string(snapshot)?),
		}
	}

	Ok(())
}
