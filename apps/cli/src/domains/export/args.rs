use std::path::PathBuf;

use clap::Args;

use crate::domains::query::FilterArgs;

#[derive(Args, Debug)]
pub struct ExportArgs {
	/// Output HTML file [default: timeline.html]
	#[arg(long, short = 'o')]
	pub output: Option<PathBuf>,

	#[command(flatten)]
	pub filter: FilterArgs,
}
