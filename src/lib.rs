//! `codeviz` - renders a source file as a fingerprint image.
//!
//! Every token becomes a solid block sized by its character span and colored by
//! a syntax-highlighting scheme, so the image shows the shape and coloring of the
//! code rather than its glyphs.
//!
//! The pipeline runs strictly forward: measure the text, tokenize it, lay the
//! tokens out as rectangles, composite them onto a canvas, then write a PNG.
//! Lexing and color lookup sit behind [`Tokenize`] and [`ResolveStyle`].

pub mod canvas;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod layout;
pub mod logging;
pub mod output;
pub mod style;
pub mod token;
pub mod tokenizer;

use std::fs;
use std::path::PathBuf;

use image::RgbaImage;
use log::{error, info};

pub use crate::canvas::{Canvas, CanvasSize, SizeCaps};
pub use crate::config::{Cli, RenderConfig};
pub use crate::error::{Error, Result};
pub use crate::layout::{CellMetrics, Layout, Rect};
pub use crate::style::{ResolveStyle, Style, StyleRegistry};
pub use crate::token::{Token, TokenKind};
pub use crate::tokenizer::{LanguageHint, SyntectTokenizer, Tokenize, Tokens};

/// An image together with the lexer and style that produced it.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbaImage,
    pub lexer: String,
    pub style: String,
}

/// What [`render_file`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub lexer: String,
    pub style: String,
}

/// Renders `text` in memory.
///
/// Unknown languages and styles fall back, and a tokenisation error is logged
/// while whatever tokens were produced are still drawn. The only failure is a
/// canvas too large to allocate.
pub fn render_text(
    text: &str,
    config: &RenderConfig,
    tokenizer: &impl Tokenize,
    styles: &impl ResolveStyle,
) -> Result<Rendered> {
    info!("Computing image boundaries...");
    let size = CanvasSize::compute(dimensions::measure(text), config.metrics, config.caps);
    info!(
        "Generated image dimensions will be {} x {}.",
        size.width, size.height
    );

    info!("Retrieving appropriate style...");
    let style = styles.resolve_style(&config.style);

    info!("Tokenising file content...");
    let tokens = tokenizer.tokenize(text, config.language_hint());
    if let Some(err) = &tokens.error {
        error!("{}", err);
    }

    info!("Generating output image...");
    let mut canvas = Canvas::new(size)?;
    let mut layout = Layout::new(config.metrics, &style);
    for token in &tokens.tokens {
        if let Some(rect) = layout.place(token) {
            canvas.paint(&rect);
        }
    }

    Ok(Rendered {
        image: canvas.finish(style.background()),
        lexer: tokens.lexer,
        style: style.name().to_string(),
    })
}

/// Reads `config.input`, renders it and writes the PNG to `config.output`.
pub fn render_file(
    config: &RenderConfig,
    tokenizer: &impl Tokenize,
    styles: &impl ResolveStyle,
) -> Result<RenderSummary> {
    info!("Reading input file {}...", config.input.display());
    let bytes = fs::read(&config.input).map_err(|source| Error::ReadInput {
        path: config.input.clone(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let rendered = render_text(&text, config, tokenizer, styles)?;

    info!("Saving image to {}...", config.output.display());
    output::write_png(&rendered.image, &config.output)?;
    info!("Done !!!");

    Ok(RenderSummary {
        output: config.output.clone(),
        width: rendered.image.width(),
        height: rendered.image.height(),
        lexer: rendered.lexer,
        style: rendered.style,
    })
}
