//! Concurrent fan-out of one query to every active adapter, with at most one generation in
//! flight.
//!
//! Results are delivered as [`AggregatorEvent`]s tagged with their generation. The
//! search-engine adapter has a soft deadline: when it misses it, the generation completes
//! without it and a later answer arrives as [`AggregatorEvent::LateSearchEngine`].

use std::{sync::Arc, time::Duration};

use tokio::{
	sync::mpsc,
	task::{AbortHandle, JoinHandle, JoinSet},
	time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use omnibox_config::{Omnibox, Sources};

use crate::{
	Collaborators, QueryContext,
	adapters::{self, AdapterKind, AdapterRequest, Batch},
};

#[derive(Debug)]
pub enum AggregatorEvent {
	/// Every adapter answered, except possibly the search engine when it missed its deadline.
	Completed { generation: u64, batches: Vec<Batch>, search_engine_pending: bool },
	LateSearchEngine { generation: u64, batch: Batch },
}
impl AggregatorEvent {
	pub fn generation(&self) -> u64 {
		match self {
			Self::Completed { generation, .. } | Self::LateSearchEngine { generation, .. } =>
				*generation,
		}
	}
}

struct InFlight {
	generation: u64,
	token: CancellationToken,
	handles: Vec<AbortHandle>,
}

struct Collect {
	generation: u64,
	request: Arc<AdapterRequest>,
	kinds: Vec<AdapterKind>,
	search_engine: Option<JoinHandle<Batch>>,
	deadline: Duration,
	token: CancellationToken,
	events: mpsc::UnboundedSender<AggregatorEvent>,
}

pub struct Aggregator {
	collaborators: Collaborators,
	omnibox: Omnibox,
	sources: Sources,
	generation: u64,
	in_flight: Option<InFlight>,
	events: mpsc::UnboundedSender<AggregatorEvent>,
}
impl Aggregator {
	pub fn new(
		collaborators: Collaborators,
		omnibox: Omnibox,
		sources: Sources,
	) -> (Self, mpsc::UnboundedReceiver<AggregatorEvent>) {
		let (events, rx) = mpsc::unbounded_channel();

		(Self { collaborators, omnibox, sources, generation: 0, in_flight: None, events }, rx)
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_current(&self, generation: u64) -> bool {
		generation == self.generation
	}

	/// Cancels every task still tracked for the current generation.
	pub fn cancel(&mut self) {
		let Some(in_flight) = self.in_flight.take() else { return };

		in_flight.token.cancel();

		for handle in &in_flight.handles {
			handle.abort();
		}

		tracing::debug!(generation = in_flight.generation, "Query generation cancelled.");
	}

	/// Starts a new generation for `query`, superseding the previous one. Must be called from
	/// within a Tokio runtime.
	pub fn issue(&mut self, query: String, ctx: QueryContext, kinds: Vec<AdapterKind>) -> u64 {
		self.cancel();

		self.generation += 1;

		let generation = self.generation;
		let token = CancellationToken::new();
		let request = Arc::new(AdapterRequest {
			query,
			ctx,
			collaborators: self.collaborators.clone(),
			omnibox: self.omnibox.clone(),
			sources: self.sources.clone(),
		});

		tracing::info!(
			generation,
			query_len = request.query.chars().count(),
			adapters = kinds.len(),
			mode = request.ctx.mode.label(),
			"Query generation started."
		);

		let mut handles = Vec::with_capacity(2);
		let search_engine = kinds.contains(&AdapterKind::SearchEngine).then(|| {
			let request = Arc::clone(&request);
			let handle = tokio::spawn(async move {
				adapters::run(AdapterKind::SearchEngine, &request).await
			});

			handles.push(handle.abort_handle());

			handle
		});
		let kinds = kinds.into_iter().filter(|kind| *kind != AdapterKind::SearchEngine).collect();
		let collector = tokio::spawn(collect(Collect {
			generation,
			request,
			kinds,
			search_engine,
			deadline: Duration::from_millis(self.omnibox.search_engine_timeout_ms),
			token: token.clone(),
			events: self.events.clone(),
		}));

		handles.push(collector.abort_handle());

		self.in_flight = Some(InFlight { generation, token, handles });

		generation
	}
}

impl Drop for Aggregator {
	fn drop(&mut self) {
		self.cancel();
	}
}

async fn collect(job: Collect) {
	let Collect { generation, request, kinds, search_engine, deadline, token, events } = job;
	let started = Instant::now();
	let work = async {
		let mut set = JoinSet::new();

		for kind in kinds {
			let request = Arc::clone(&request);

			set.spawn(async move { adapters::run(kind, &request).await });
		}

		let mut batches = Vec::new();

		while let Some(joined) = set.join_next().await {
			match joined {
				Ok(batch) => batches.push(batch),
				Err(err) => {
					tracing::error!(error = %err, generation, "Adapter task failed.");
				},
			}
		}

		let mut late = None;

		if let Some(mut handle) = search_engine {
			match time::timeout_at(started + deadline, &mut handle).await {
				Ok(Ok(batch)) => batches.push(batch),
				Ok(Err(err)) => {
					tracing::error!(
						error = %err,
						generation,
						adapter = AdapterKind::SearchEngine.as_str(),
						"Adapter task failed."
					);
				},
				Err(_) => {
					tracing::info!(
						generation,
						timeout_ms = deadline.as_millis() as u64,
						"Search engine missed its deadline."
					);

					late = Some(handle);
				},
			}
		}

		batches.sort_by_key(|batch| batch.adapter);

		let completed = AggregatorEvent::Completed {
			generation,
			batches,
			search_engine_pending: late.is_some(),
		};

		if events.send(completed).is_err() {
			return;
		}

		let Some(handle) = late else { return };

		match handle.await {
			Ok(batch) => {
				let _ = events.send(AggregatorEvent::LateSearchEngine { generation, batch });
			},
			Err(err) if err.is_cancelled() => {},
			Err(err) => {
				tracing::error!(
					error = %err,
					generation,
					adapter = AdapterKind::SearchEngine.as_str(),
					"Adapter task failed."
				);
			},
		}
	};

	tokio::select! {
		biased;

		_ = token.cancelled() => {},
		_ = work => {},
	}
}
