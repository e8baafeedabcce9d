pub mod command;
pub mod render;

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use omnibox_config::Config;
use omnibox_domain::{Mode, TabGroupRef};
use omnibox_providers::Fixture;
use omnibox_service::QueryController;

use crate::{
	command::{Command, ModeArg},
	render::{Format, Snapshot},
};

/// How long to keep waiting for suggestions that missed the merge deadline.
const LATE_WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Parser)]
#[command(
	version = omnibox_cli::VERSION,
	rename_all = "kebab",
	styles = omnibox_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Browsing profile to complete against.
	#[arg(long, short = 'f', value_name = "FILE")]
	pub fixture: PathBuf,
	#[arg(long, value_enum, default_value_t = Format::Text)]
	pub format: Format,
	#[arg(long, value_enum, default_value_t = ModeArg::General)]
	pub mode: ModeArg,
	/// Start scoped to the tab group with this title.
	#[arg(long, value_name = "TITLE", conflicts_with = "mode")]
	pub tab_group: Option<String>,
	#[arg(long)]
	pub private: bool,
	/// Lines to replay. Reads stdin line by line when absent.
	#[arg(value_name = "LINE")]
	pub lines: Vec<String>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let cfg = omnibox_config::load(&args.config)?;

	init_tracing(&cfg)?;

	let fixture = omnibox_providers::fixture::load(&args.fixture)?;
	let mut session = Session::new(cfg, fixture)?;
	let start = match &args.tab_group {
		Some(title) => Command::TabGroup(title.clone()),
		None => Command::Mode(args.mode),
	};

	session.execute(Command::Private(args.private)).await?;
	session.execute(start).await?;

	if !args.lines.is_empty() {
		for line in &args.lines {
			let command = line.parse()?;

			render::emit(&session.execute(command).await?, args.format)?;
		}

		return Ok(());
	}

	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	while let Some(line) = lines.next_line().await? {
		let command = match line.parse::<Command>() {
			Ok(Command::Quit) => break,
			Ok(command) => command,
			Err(err) => {
				eprintln!("{err}");

				continue;
			},
		};

		match session.execute(command).await {
			Ok(snapshots) => render::emit(&snapshots, args.format)?,
			Err(err) => eprintln!("{err}"),
		}
	}

	Ok(())
}

/// A controller over one fixture, driven by [`Command`]s.
pub struct Session {
	controller: QueryController,
	tab_groups: Vec<TabGroupRef>,
}
impl Session {
	pub fn new(cfg: Config, fixture: Fixture) -> color_eyre::Result<Self> {
		let tab_groups = fixture.tab_groups.iter().map(|entry| entry.group.clone()).collect();
		let controller = QueryController::new(cfg, omnibox_providers::collaborators(fixture))?;

		Ok(Self { controller, tab_groups })
	}

	pub fn controller(&self) -> &QueryController {
		&self.controller
	}

	/// Applies one command and returns the states it produced, settling any query it issued.
	pub async fn execute(&mut self, command: Command) -> color_eyre::Result<Vec<Snapshot>> {
		let before = self.controller.generation();
		let label = command.label();

		match command {
			Command::Query(text) => {
				// A host writes the proposed state back and reports the whole field.
				let text = self.controller.propose_text(&text).map(|field| field.text).unwrap_or(text);

				self.controller.set_query(&text);
			},
			Command::Next => self.controller.select_next(),
			Command::Previous => self.controller.select_previous(),
			Command::Accept =>
				if !self.controller.accept_completion() {
					tracing::debug!("Nothing selected to accept.");
				},
			Command::Truncate => self.controller.truncate_to_typed(),
			Command::Reset => self.controller.reset_selection(),
			Command::Clear => self.controller.clear_results(),
			Command::Mode(arg) => self.controller.set_mode(arg.mode()),
			Command::TabGroup(title) => {
				let group = self
					.tab_groups
					.iter()
					.find(|group| group.title.eq_ignore_ascii_case(&title))
					.cloned()
					.ok_or_else(|| eyre::eyre!("Unknown tab group {title:?}."))?;

				self.controller.set_mode(Mode::TabGroup(group));
			},
			Command::Private(is_private) => self.controller.set_private(is_private),
			Command::Quit => return Ok(Vec::new()),
		}

		if self.controller.generation() == before {
			return Ok(vec![Snapshot::capture(&self.controller, label)]);
		}

		let applied = self.controller.settle().await?;
		let mut snapshots = vec![Snapshot::capture(&self.controller, render::event_label(applied))];

		if self.controller.loading_candidate().is_some()
			&& let Some(applied) = self.controller.settle_within(LATE_WAIT).await?
		{
			snapshots.push(Snapshot::capture(&self.controller, render::event_label(applied)));
		}

		Ok(snapshots)
	}
}

fn init_tracing(cfg: &Config) -> color_eyre::Result<()> {
	let filter = EnvFilter::try_new(&cfg.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}
