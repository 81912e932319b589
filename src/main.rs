//! `codeviz` - turn a source file into a PNG of colored token blocks.

use clap::Parser;
use log::error;

use codeviz::{logging, Cli, StyleRegistry, SyntectTokenizer};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug_log.as_deref());

    if cli.list_styles {
        for name in StyleRegistry::new().names() {
            println!("{}", name);
        }
        return;
    }

    if cli.list_languages {
        println!("{:<32} | {}", "Language", "Extensions");
        println!("{:-<32}-+-{:-<30}", "", "");
        for (name, extensions) in SyntectTokenizer::new().languages() {
            println!("{:<32} | {}", name, extensions.join(", "));
        }
        return;
    }

    let Some(config) = cli.into_config() else {
        println!("No input file provided ¯\\_(ツ)_/¯");
        return;
    };

    let tokenizer = SyntectTokenizer::new();
    let styles = StyleRegistry::new();
    if let Err(err) = codeviz::render_file(&config, &tokenizer, &styles) {
        error!("{}", err);
    }
}
