use clap::Parser;

use omnibox_repl::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	omnibox_repl::run(args).await
}
