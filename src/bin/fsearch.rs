use clap::Parser;
use fsearch::{display_path, Searcher, DEFAULT_WORKERS};
use std::path::PathBuf;
use std::process::exit;
use tracing::{warn, Level};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(help = "Root directory to search under")]
    root: PathBuf,

    #[clap(help = "Exact file name to look for")]
    name: String,

    #[clap(long)]
    #[clap(default_value_t = DEFAULT_WORKERS)]
    #[clap(help = "Number of worker threads")]
    workers: usize,
}

fn main() {
    // set log collector
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::WARN)
        .init();

    let args = Args::parse();

    let searcher = match Searcher::with_workers(args.workers) {
        Ok(searcher) => searcher,
        Err(error) => {
            eprintln!("{}", error);
            exit(1);
        }
    };

    // a failed search degrades to the not-found outcome on purpose,
    // the process reports success either way
    match searcher.find(&args.root, &args.name) {
        Ok(Some(path)) => println!("{}", display_path(&path)),
        Ok(None) => println!("File not found!"),
        Err(error) => {
            warn!("search aborted: {}", error);
            println!("File not found!");
        }
    }
}
