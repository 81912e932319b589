use std::path::PathBuf;

use clap::Parser;

use crate::canvas::SizeCaps;
use crate::layout::{CellMetrics, DEFAULT_CHAR_SIZE};
use crate::style::DEFAULT_STYLE;
use crate::tokenizer::LanguageHint;

pub const DEFAULT_OUT_FILE: &str = "./codeviz_gen.png";

/// Command-line arguments for `codeviz`.
///
/// `-h` sets the char height, so help is only available as `--help`.
#[derive(Parser, Debug)]
#[command(
    name = "codeviz",
    version,
    about = "Render a source file as a fingerprint of colored token blocks",
    disable_help_flag = true
)]
pub struct Cli {
    /// Source file to render
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Path of the output file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUT_FILE)]
    pub out: PathBuf,

    /// Language to parse, determined automatically if not provided
    #[arg(short, long, value_name = "NAME")]
    pub lang: Option<String>,

    /// Color scheme to use
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_STYLE)]
    pub style: String,

    /// Width of a char in pixels
    #[arg(
        short = 'w',
        long,
        value_name = "PX",
        default_value_t = DEFAULT_CHAR_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub char_width: u32,

    /// Height of a char in pixels
    #[arg(
        short = 'h',
        long,
        value_name = "PX",
        default_value_t = DEFAULT_CHAR_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub char_height: u32,

    /// Maximum width of the output image in pixels
    #[arg(long, visible_alias = "maxW", value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: Option<u32>,

    /// Maximum height of the output image in pixels
    #[arg(long, visible_alias = "maxH", value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_height: Option<u32>,

    /// List available color schemes
    #[arg(long, action)]
    pub list_styles: bool,

    /// List known languages and their file extensions
    #[arg(long, action)]
    pub list_languages: bool,

    /// Write log records to file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    /// The render settings, or `None` when no input file was given.
    pub fn into_config(self) -> Option<RenderConfig> {
        let input = self.input?;

        Some(RenderConfig {
            input,
            output: self.out,
            language: self.lang.filter(|lang| !lang.is_empty()),
            style: self.style,
            metrics: CellMetrics {
                char_width: self.char_width,
                char_height: self.char_height,
            },
            caps: SizeCaps {
                max_width: self.max_width,
                max_height: self.max_height,
            },
        })
    }
}

/// Everything one render needs, fixed before the pipeline starts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub language: Option<String>,
    pub style: String,
    pub metrics: CellMetrics,
    pub caps: SizeCaps,
}

impl RenderConfig {
    /// Default settings for rendering `input`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUT_FILE),
            language: None,
            style: DEFAULT_STYLE.to_string(),
            metrics: CellMetrics::default(),
            caps: SizeCaps::default(),
        }
    }

    pub fn language_hint(&self) -> LanguageHint<'_> {
        LanguageHint {
            language: self.language.as_deref(),
            file_name: self.input.to_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("codeviz").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_cli_defaults() {
        let config = parse(&["main.rs"]).into_config().unwrap();
        assert_eq!(config, RenderConfig::new("main.rs"));
        assert_eq!(config.output, PathBuf::from("./codeviz_gen.png"));
        assert_eq!(config.style, "monokai");
        assert_eq!(config.metrics, CellMetrics { char_width: 4, char_height: 4 });
        assert_eq!(config.caps, SizeCaps::default());
    }

    #[test]
    fn short_flags() {
        let config = parse(&["-o", "x.png", "-l", "go", "-s", "dark", "-w", "2", "-h", "6", "a.txt"])
            .into_config()
            .unwrap();

        assert_eq!(config.output, PathBuf::from("x.png"));
        assert_eq!(config.language.as_deref(), Some("go"));
        assert_eq!(config.style, "dark");
        assert_eq!(config.metrics, CellMetrics { char_width: 2, char_height: 6 });
    }

    #[test]
    fn size_caps_accept_legacy_names() {
        let config = parse(&["--maxW", "100", "--max-height", "50", "a.txt"])
            .into_config()
            .unwrap();
        assert_eq!(
            config.caps,
            SizeCaps {
                max_width: Some(100),
                max_height: Some(50),
            }
        );
    }

    #[test]
    fn missing_input_gives_no_config() {
        assert!(parse(&[]).into_config().is_none());
    }

    #[test]
    fn empty_language_means_auto_detect() {
        let config = parse(&["-l", "", "a.rs"]).into_config().unwrap();
        assert_eq!(config.language, None);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(Cli::try_parse_from(["codeviz", "-w", "0", "a.rs"]).is_err());
        assert!(Cli::try_parse_from(["codeviz", "--max-width", "0", "a.rs"]).is_err());
    }

    #[test]
    fn help_is_long_only() {
        let err = Cli::try_parse_from(["codeviz", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
