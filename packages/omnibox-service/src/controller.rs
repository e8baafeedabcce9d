//! Owns query text, mode, result list, and selection. All mutation happens through `&mut self`
//! on the caller's task; adapters only report back through aggregator events.

use std::time::Duration;

use tokio::sync::mpsc;

use omnibox_config::Config;
use omnibox_domain::{Candidate, Mode, Source, SourceKind, autoselect::starts_with_ignore_case};

use crate::{
	Collaborators, Error, QueryContext, Result,
	adapters,
	aggregator::{Aggregator, AggregatorEvent},
	merge::{self, MergeInput},
	selection::{self, Reconcile, Selection, TextFieldState},
};

/// What an aggregator event did to the visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
	Merged { results: usize },
	LateInserted { index: usize, inserted: usize },
	/// The event belonged to a superseded generation, or nothing was waiting for it.
	Stale,
}

pub struct QueryController {
	cfg: Config,
	aggregator: Aggregator,
	events: mpsc::UnboundedReceiver<AggregatorEvent>,
	mode: Mode,
	is_private: bool,
	query: String,
	text_field: TextFieldState,
	results: Vec<Candidate>,
	can_create_note: bool,
	selection: Selection,
	loading: Option<Candidate>,
	search_engine_pending: bool,
	pending_echo: Option<String>,
	proposed_query: Option<String>,
	sticky_search_text: Option<String>,
	allow_auto_select: bool,
}
impl QueryController {
	pub fn new(cfg: Config, collaborators: Collaborators) -> Result<Self> {
		omnibox_config::validate(&cfg)
			.map_err(|err| Error::InvalidRequest { message: err.to_string() })?;

		let (aggregator, events) =
			Aggregator::new(collaborators, cfg.omnibox.clone(), cfg.sources.clone());

		Ok(Self {
			cfg,
			aggregator,
			events,
			mode: Mode::General,
			is_private: false,
			query: String::new(),
			text_field: TextFieldState::default(),
			results: Vec::new(),
			can_create_note: false,
			selection: Selection::default(),
			loading: None,
			search_engine_pending: false,
			pending_echo: None,
			proposed_query: None,
			sticky_search_text: None,
			allow_auto_select: true,
		})
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn mode(&self) -> &Mode {
		&self.mode
	}

	pub fn text_field(&self) -> &TextFieldState {
		&self.text_field
	}

	pub fn results(&self) -> &[Candidate] {
		&self.results
	}

	pub fn selected_index(&self) -> Option<usize> {
		self.selection.selected()
	}

	pub fn selected_candidate(&self) -> Option<&Candidate> {
		self.selection.selected_in(&self.results)
	}

	/// Placeholder row shown while a late search-engine answer is still expected.
	pub fn loading_candidate(&self) -> Option<&Candidate> {
		self.loading.as_ref()
	}

	pub fn can_create_note(&self) -> bool {
		self.can_create_note
	}

	pub fn generation(&self) -> u64 {
		self.aggregator.generation()
	}

	pub fn limit(&self) -> usize {
		self.mode.limit(&self.cfg.omnibox)
	}

	pub fn set_private(&mut self, is_private: bool) {
		self.is_private = is_private;
	}

	/// Switches mode, dropping the current list and re-issuing the query for the new source set.
	pub fn set_mode(&mut self, mode: Mode) {
		if mode == self.mode {
			return;
		}

		self.mode = mode;

		self.clear_results();
		self.dispatch();
	}

	/// Handles a change of the text field.
	pub fn set_query(&mut self, text: &str) {
		if self.pending_echo.take().as_deref() == Some(text) {
			return;
		}

		let previous_typed = self.text_field.unselected_prefix().to_lowercase();
		let is_removing = text.chars().count() < previous_typed.chars().count()
			|| text.to_lowercase() == previous_typed;

		self.sticky_search_text = None;

		match self.proposed_query.take() {
			Some(typed) => {
				self.query = typed;
			},
			None => {
				let keep_search_row = self.selected_candidate().is_some_and(|candidate| {
					candidate.kind() == SourceKind::SearchEngine
						&& !text.is_empty()
						&& starts_with_ignore_case(candidate.text(), text)
				});

				if keep_search_row {
					self.sticky_search_text = self.selected_candidate().map(|c| c.text().to_string());
				} else {
					self.selection.reset(&self.mode, 0);
				}

				self.query = text.to_string();
				self.text_field = TextFieldState::plain(text);
			},
		}

		self.allow_auto_select = !is_removing;

		self.dispatch();
	}

	/// Type-through: when `proposed` follows the inline completion, keeps it selected and
	/// returns the text-field state to show. The next [`Self::set_query`] then queries with
	/// the typed prefix only.
	pub fn propose_text(&mut self, proposed: &str) -> Option<TextFieldState> {
		let (typed, field) = selection::propose_text(&self.text_field, proposed)?;

		self.pending_echo = None;
		self.proposed_query = Some(typed);
		self.text_field = field.clone();

		Some(field)
	}

	pub fn select_next(&mut self) {
		self.selection.select_next(self.results.len());
		self.sync_text_field_with_selection();
	}

	pub fn select_previous(&mut self) {
		self.selection.select_previous(self.results.len());
		self.sync_text_field_with_selection();
	}

	pub fn reset_selection(&mut self) {
		self.selection.reset(&self.mode, self.results.len());
		self.update_text_field(TextFieldState::plain(self.query.clone()));
	}

	/// Right arrow: the selected row's text becomes the query.
	pub fn accept_completion(&mut self) -> bool {
		let Some(candidate) = self.selected_candidate() else { return false };
		let text = selection::committed_text(candidate);

		self.query = text.clone();

		self.selection.reset(&self.mode, self.results.len());
		self.update_text_field(TextFieldState::plain(text));

		true
	}

	/// Left arrow: drop the inline completion and keep what was typed.
	pub fn truncate_to_typed(&mut self) {
		let typed = self.text_field.unselected_prefix();

		self.query = typed.clone();

		self.selection.reset(&self.mode, self.results.len());
		self.update_text_field(TextFieldState::plain(typed));
	}

	/// Empties the list and cancels in-flight work. The query is kept.
	pub fn clear_results(&mut self) {
		self.aggregator.cancel();

		self.results.clear();
		self.can_create_note = false;
		self.loading = None;
		self.search_engine_pending = false;
		self.sticky_search_text = None;

		self.selection.reset(&self.mode, 0);
	}

	pub async fn next_event(&mut self) -> Option<AggregatorEvent> {
		self.events.recv().await
	}

	/// Waits for the next event of the current generation and applies it.
	pub async fn settle(&mut self) -> Result<Applied> {
		loop {
			let event = self.events.recv().await.ok_or(Error::ChannelClosed)?;

			match self.apply(event) {
				Applied::Stale => continue,
				applied => return Ok(applied),
			}
		}
	}

	/// Like [`Self::settle`], giving up after `wait`.
	pub async fn settle_within(&mut self, wait: Duration) -> Result<Option<Applied>> {
		match tokio::time::timeout(wait, self.settle()).await {
			Ok(applied) => applied.map(Some),
			Err(_) => Ok(None),
		}
	}

	pub fn apply(&mut self, event: AggregatorEvent) -> Applied {
		if !self.aggregator.is_current(event.generation()) {
			tracing::debug!(
				generation = event.generation(),
				current = self.aggregator.generation(),
				"Dropped a stale aggregator event."
			);

			return Applied::Stale;
		}

		match event {
			AggregatorEvent::Completed { batches, search_engine_pending, .. } =>
				self.apply_completed(&batches, search_engine_pending),
			AggregatorEvent::LateSearchEngine { batch, .. } => self.apply_late(batch.candidates),
		}
	}

	fn apply_completed(
		&mut self,
		batches: &[adapters::Batch],
		search_engine_pending: bool,
	) -> Applied {
		let limit = self.limit();
		let output = merge::merge(
			&MergeInput {
				batches,
				query: &self.query,
				mode: &self.mode,
				limit,
				search_engine_expected: search_engine_pending,
			},
			&self.cfg.omnibox,
		);

		self.results = output.results;
		self.can_create_note = output.can_create_note;
		self.search_engine_pending = search_engine_pending;
		self.loading = search_engine_pending.then(|| {
			Candidate::builder(self.query.as_str(), Source::SearchEngine)
				.completing_text(self.query.as_str())
				.build()
		});

		let sticky = self.sticky_search_text.take();
		let field = self.selection.reconcile(Reconcile {
			results: &self.results,
			query: &self.query,
			mode: &self.mode,
			allow_auto_select: self.allow_auto_select,
			sticky_search_text: sticky.as_deref(),
		});

		if let Some(field) = field {
			self.update_text_field(field);
		}

		Applied::Merged { results: self.results.len() }
	}

	fn apply_late(&mut self, late: Vec<Candidate>) -> Applied {
		if !self.search_engine_pending {
			tracing::debug!("Dropped a search-engine answer nothing was waiting for.");

			return Applied::Stale;
		}

		let insertion = merge::insert_search_engine_results(
			&self.results,
			late,
			self.selection.selected(),
			self.limit(),
			self.cfg.omnibox.late_insert_min_capacity,
		);

		tracing::info!(
			generation = self.aggregator.generation(),
			index = insertion.index,
			inserted = insertion.inserted,
			"Late search-engine results applied."
		);

		self.selection.shift_after_insert(insertion.index, insertion.inserted);

		self.results = insertion.results;
		self.search_engine_pending = false;
		self.loading = None;

		Applied::LateInserted { index: insertion.index, inserted: insertion.inserted }
	}

	fn dispatch(&mut self) {
		self.loading = None;
		self.search_engine_pending = false;

		let ctx = QueryContext {
			mode: self.mode.clone(),
			is_private: self.is_private,
			frecency: self.cfg.frecency.clone(),
		};
		let kinds = adapters::plan(&self.mode, &self.query, self.is_private, &self.cfg.sources);

		self.aggregator.issue(self.query.clone(), ctx, kinds);
	}

	fn sync_text_field_with_selection(&mut self) {
		self.sticky_search_text = None;

		let Some(index) = self.selection.selected() else { return };

		if let Some(field) = selection::text_field_for(&self.results, index, &self.query, &self.mode)
		{
			self.update_text_field(field);
		}
	}

	/// Selection-driven text changes come back through [`Self::set_query`]; remember them so
	/// they are not treated as typing.
	fn update_text_field(&mut self, field: TextFieldState) {
		if field.text != self.text_field.text {
			self.pending_echo = Some(field.text.clone());
		}

		self.text_field = field;
	}
}
