use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod icon_gen;
mod manifest;

#[derive(Debug, Parser)]
#[clap(
    name = "tab-icons",
    about = "Draw the tab-motif toolbar icons for the browser extension"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Icon sizes to draw. Defaults to 16,48,128.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES")]
    sizes: Option<Vec<u32>>,

    /// Canvas background color (CSS color format)
    #[clap(long, default_value = icon_gen::DEFAULT_BACKGROUND)]
    background: String,

    /// Fill color of the upper tab (CSS color format)
    #[clap(long, default_value = icon_gen::DEFAULT_TOP_TAB)]
    top_color: String,

    /// Fill color of the lower tab (CSS color format)
    #[clap(long, default_value = icon_gen::DEFAULT_BOTTOM_TAB)]
    bottom_color: String,

    /// Also write manifest-icons.json mapping each size to its file
    #[clap(long)]
    manifest: bool,

    /// Print a line for every file written
    #[clap(short, long)]
    verbose: bool,
}

impl From<Args> for icon_gen::Options {
    fn from(args: Args) -> Self {
        icon_gen::Options {
            output: args.output,
            sizes: args
                .sizes
                .unwrap_or_else(|| icon_gen::DEFAULT_SIZES.to_vec()),
            background: args.background,
            top_color: args.top_color,
            bottom_color: args.bottom_color,
            manifest: args.manifest,
            verbose: args.verbose,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(args.into())
}
