use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod context;
mod domains;
mod ui;
mod util;

use crate::{
	context::{Context, OutputFormat},
	domains::{export::ExportArgs, query::QueryArgs, watch::WatchArgs},
};

#[derive(Parser, Debug)]
#[command(
	name = "fstimeline",
	version,
	about = "A file system timeline monitor",
	long_about = "Monitor file system changes over time and query historical events."
)]
struct Cli {
	/// Database path [default: fstimeline.db]
	#[arg(long, short = 'd', global = true)]
	db: Option<PathBuf>,

	/// Settings file (TOML); command line flags take precedence
	#[arg(long, global = true, env = "FSTIMELINE_CONFIG")]
	config: Option<PathBuf>,

	/// Output format
	#[arg(long, value_enum, default_value = "human", global = true)]
	format: OutputFormat,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Watch directories and record file system changes
	Watch(WatchArgs),
	/// Query recorded events
	Query(QueryArgs),
	/// Export recorded events to an HTML timeline
	Export(ExportArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	// Logs go to stderr so query and export output stays clean
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	let ctx = Context::new(cli.db, cli.config, cli.format)?;

	match cli.command {
		Commands::Watch(args) => domains::watch::run(&ctx, args).await,
		Commands::Query(args) => domains::query::run(&ctx, args).await,
		Commands::Export(args) => domains::export::run(&ctx, args).await,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn test_cli_definition() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_parses_query_flags() {
		let cli = Cli::try_parse_from([
			"fstimeline", "query", "-s", "-24h", "-t", "rs", "-D", "/src", "-l", "5", "-n", "-d",
			"events.db",
		])
		.unwrap();

		assert_eq!(cli.db, Some(PathBuf::from("events.db")));
		let Commands::Query(args) = cli.command else {
			panic!("expected query");
		};
		assert_eq!(args.filter.start.as_deref(), Some("-24h"));
		assert_eq!(args.filter.file_type.as_deref(), Some("rs"));
		assert_eq!(args.filter.dir.as_deref(), Some("/src"));
		assert_eq!(args.filter.limit, Some(5));
		assert!(args.no_color);
	}

	#[test]
	fn test_parses_repeated_watch_paths() {
		let cli = Cli::try_parse_from([
			"fstimeline", "watch", "-p", "/a", "--path", "/b", "-f", "10", "--non-recursive",
		])
		.unwrap();

		let Commands::Watch(args) = cli.command else {
			panic!("expected watch");
		};
		assert_eq!(args.paths, [PathBuf::from("/a"), PathBuf::from("/b")]);
		assert_eq!(args.flush, Some(10));
		assert!(args.non_recursive);
	}
}
