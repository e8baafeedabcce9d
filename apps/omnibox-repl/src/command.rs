//! One line of REPL input.
//!
//! Plain lines are typed into the field. Lines starting with `:` drive the list the way the
//! arrow keys and mode switches of a browser would.

use std::str::FromStr;

use clap::ValueEnum;
use color_eyre::eyre;

use omnibox_domain::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
	General,
	NoteCreation,
	CustomView,
}
impl ModeArg {
	pub fn mode(self) -> Mode {
		match self {
			Self::General => Mode::General,
			Self::NoteCreation => Mode::NoteCreation,
			Self::CustomView => Mode::CustomView,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// New field contents.
	Query(String),
	Next,
	Previous,
	/// Right arrow.
	Accept,
	/// Left arrow.
	Truncate,
	Reset,
	Clear,
	Mode(ModeArg),
	/// Scope the list to the tab group with this title.
	TabGroup(String),
	Private(bool),
	Quit,
}

impl Command {
	pub fn label(&self) -> &'static str {
		match self {
			Self::Query(_) => "query",
			Self::Next => "next",
			Self::Previous => "previous",
			Self::Accept => "accept",
			Self::Truncate => "truncate",
			Self::Reset => "reset",
			Self::Clear => "clear",
			Self::Mode(_) => "mode",
			Self::TabGroup(_) => "tab_group",
			Self::Private(_) => "private",
			Self::Quit => "quit",
		}
	}
}

impl FromStr for Command {
	type Err = color_eyre::Report;

	fn from_str(line: &str) -> Result<Self, Self::Err> {
		let Some(rest) = line.strip_prefix(':') else { return Ok(Self::Query(line.to_string())) };
		let (name, arg) = match rest.split_once(' ') {
			Some((name, arg)) => (name, arg.trim()),
			None => (rest, ""),
		};

		match name {
			"next" | "down" => Ok(Self::Next),
			"prev" | "up" => Ok(Self::Previous),
			"accept" | "right" => Ok(Self::Accept),
			"left" => Ok(Self::Truncate),
			"reset" => Ok(Self::Reset),
			"clear" => Ok(Self::Clear),
			"quit" | "q" => Ok(Self::Quit),
			"mode" => ModeArg::from_str(arg, true)
				.map(Self::Mode)
				.map_err(|_| eyre::eyre!("Usage: :mode general|note-creation|custom-view.")),
			"group" if !arg.is_empty() => Ok(Self::TabGroup(arg.to_string())),
			"group" => Err(eyre::eyre!("Usage: :group TITLE.")),
			"private" => match arg {
				"on" => Ok(Self::Private(true)),
				"off" => Ok(Self::Private(false)),
				_ => Err(eyre::eyre!("Usage: :private on|off.")),
			},
			_ => Err(eyre::eyre!("Unknown command :{name}.")),
		}
	}
}
