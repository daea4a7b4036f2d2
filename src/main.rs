use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use dictd_lookup::{server, DictOptions, Dictionary};
use log::error;

/// Look up a word in a DICT-format dictionary, or serve lookups over HTTP.
#[derive(Parser, Debug)]
#[command(name = "dictd-lookup")]
#[command(about = "Look up headwords in a DICT (.idx + .dict[.dz]) dictionary", long_about = None)]
struct Cli {
    /// Word to look up
    #[arg(required_unless_present = "serve")]
    word: Option<String>,

    /// Serve lookups over HTTP instead of printing one result
    #[arg(long)]
    serve: bool,

    /// HTTP port for --serve
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Binary index file
    #[arg(long, default_value = "dictd_www.dict.org_web1913.idx")]
    index: PathBuf,

    /// Data file, plain or gzip/dictzip compressed (.gz, .dz)
    #[arg(long, default_value = "dictd_www.dict.org_web1913.dict.dz")]
    data: PathBuf,

    /// Text encoding of the definitions (any WHATWG label, default utf-8)
    #[arg(long)]
    encoding: Option<String>,

    /// Log progress at info level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut options = DictOptions::new(&cli.index, &cli.data);
    if let Some(label) = &cli.encoding {
        options = options.with_encoding(label);
    }

    let dict = match Dictionary::from_options(&options) {
        Ok(dict) => dict,
        Err(e) => {
            error!("Failed to open dictionary: {}", e);
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    if cli.serve {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                eprintln!("ERROR: failed to start runtime: {}", e);
                process::exit(1);
            }
        };
        if let Err(e) = runtime.block_on(server::serve(Arc::new(dict), cli.port)) {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
        return;
    }

    let word = cli.word.unwrap_or_default();
    // A miss falls through to suggestions; an error from either step is fatal.
    match server::resolve_page(&dict, &word) {
        Ok(page) => {
            println!("{}", page.result);
            if !page.suggestions.is_empty() {
                println!("Try: {}", page.suggestions.join(", "));
            }
        }
        Err(e) => {
            error!("Lookup failed: {}", e);
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    }
}
