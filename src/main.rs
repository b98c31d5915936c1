use bookstand::output::ConsoleLogger;
use bookstand::site;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookstand")]
#[command(about = "Static site generator for XBEL bookmark collections")]
#[command(long_about = "\
Static site generator for XBEL bookmark collections

Each input file's top-level folder becomes a tile on the index page;
nested folders become their own pages, cross-linked by parent/child
navigation. The generated site is plain HTML plus stylesheets — drop it
on any file server.

Output structure:

  dist/
  ├── index.html                 # Root page (all input files as tiles)
  ├── dev-links.html             # One page per folder, named by title
  ├── tools.html
  ├── work.html
  ├── work-2.html                # Duplicate titles get counter suffixes
  ├── base.css                   # Structural stylesheet
  └── default.css                # Theme (or copies of --themes entries)

Theme stylesheets: point --themes at a directory of .css files; each one
becomes an entry in the per-page theme switcher (midnight-blue.css shows
as \"Midnight Blue\"). The file name base.css is reserved. The chosen
theme and any drag-and-drop tile reordering persist in the browser's
local storage.

A full rebuild runs on every invocation; all output files are rewritten.")]
#[command(version)]
struct Cli {
    /// XBEL files to include in the collection
    #[arg(required = true, value_name = "XBEL_FILE")]
    inputs: Vec<PathBuf>,

    /// Directory where index.html and subpages are written
    #[arg(short, long, default_value = "dist")]
    output: PathBuf,

    /// Overall site title
    #[arg(short, long, default_value = "My Bookmarks")]
    title: String,

    /// Directory of theme stylesheets
    #[arg(long, value_name = "DIR")]
    themes: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let missing: Vec<String> = cli
        .inputs
        .iter()
        .filter(|path| !path.exists())
        .map(|path| path.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing input files: {}", missing.join(", ")).into());
    }

    let index = site::build_site(
        &cli.inputs,
        &cli.output,
        &cli.title,
        cli.themes.as_deref(),
        &ConsoleLogger,
    )?;
    println!("Wrote {} and subpages", index.display());
    Ok(())
}
