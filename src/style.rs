//! Color schemes: background plus one color per [`TokenKind`].

use std::collections::HashMap;

use image::Rgba;
use log::warn;
use once_cell::sync::Lazy;
use syntect::highlighting::{Color, Highlighter, Theme, ThemeSet};
use syntect::parsing::Scope;

use crate::token::TokenKind;

pub const DEFAULT_STYLE: &str = "monokai";

static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const fn opaque(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// A resolved color scheme.
///
/// Every color is fully opaque, so painted pixels are never mistaken for
/// untouched ones by the background fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    name: String,
    background: Rgba<u8>,
    foreground: Rgba<u8>,
    colors: HashMap<TokenKind, Rgba<u8>>,
}

impl Style {
    pub fn new(name: impl Into<String>, background: Rgba<u8>, foreground: Rgba<u8>) -> Self {
        Self {
            name: name.into(),
            background: force_opaque(background),
            foreground: force_opaque(foreground),
            colors: HashMap::new(),
        }
    }

    pub fn with_color(mut self, kind: TokenKind, color: Rgba<u8>) -> Self {
        self.colors.insert(kind, force_opaque(color));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    /// Color for `kind`, or the default foreground when the scheme has no entry.
    pub fn color(&self, kind: TokenKind) -> Rgba<u8> {
        self.colors.get(&kind).copied().unwrap_or(self.foreground)
    }
}

fn force_opaque(Rgba([r, g, b, _]): Rgba<u8>) -> Rgba<u8> {
    opaque(r, g, b)
}

pub trait ResolveStyle {
    /// Never fails: unknown names resolve to a fallback scheme.
    fn resolve_style(&self, name: &str) -> Style;
}

/// Palettes compiled into the binary.
#[derive(Clone, Copy, PartialEq, Debug)]
enum Palette {
    Monokai,
    Light,
    Dark,
}

impl Palette {
    const ALL: [Palette; 3] = [Palette::Monokai, Palette::Light, Palette::Dark];

    fn name(self) -> &'static str {
        match self {
            Palette::Monokai => "monokai",
            Palette::Light => "light",
            Palette::Dark => "dark",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|palette| palette.name().eq_ignore_ascii_case(name))
    }

    fn bg_color(self) -> Rgba<u8> {
        match self {
            Palette::Monokai => opaque(0x27, 0x28, 0x22),
            Palette::Light => opaque(255, 255, 255),
            Palette::Dark => opaque(20, 20, 20),
        }
    }

    fn default_fg(self) -> Rgba<u8> {
        match self {
            Palette::Monokai => opaque(0xf8, 0xf8, 0xf2),
            Palette::Light => opaque(0, 0, 0),
            Palette::Dark => opaque(255, 255, 255),
        }
    }

    fn kind_color(self, kind: TokenKind) -> Option<Rgba<u8>> {
        use TokenKind::*;

        let color = match self {
            Palette::Monokai => match kind {
                Keyword | KeywordType | Constant => opaque(0x66, 0xd9, 0xef),
                Function | Type | Attribute => opaque(0xa6, 0xe2, 0x2e),
                Tag | Operator => opaque(0xf9, 0x26, 0x72),
                String => opaque(0xe6, 0xdb, 0x74),
                Escape | Number => opaque(0xae, 0x81, 0xff),
                Comment | Preprocessor => opaque(0x75, 0x71, 0x5e),
                Invalid => opaque(0x96, 0x00, 0x50),
                Text | Builtin | Variable | Punctuation => return None,
            },
            Palette::Light => match kind {
                Keyword | KeywordType => opaque(36, 114, 200),   // Blue
                Function | Builtin => opaque(188, 63, 188),      // Magenta
                Type | Tag | Attribute => opaque(17, 168, 205),  // Cyan
                String | Escape => opaque(13, 188, 121),         // Green
                Number | Constant => opaque(180, 180, 0),        // Yellow (darkened)
                Comment | Preprocessor => opaque(102, 102, 102), // Bright black
                Invalid => opaque(205, 49, 49),                  // Red
                Operator | Punctuation => opaque(100, 100, 100), // Gray
                Text | Variable => return None,
            },
            Palette::Dark => match kind {
                Keyword | KeywordType => opaque(59, 142, 234),
                Function | Builtin => opaque(214, 112, 214),
                Type | Tag | Attribute => opaque(41, 184, 219),
                String | Escape => opaque(35, 209, 139),
                Number | Constant => opaque(245, 245, 67),
                Comment | Preprocessor => opaque(102, 102, 102),
                Invalid => opaque(241, 76, 76),
                Operator | Punctuation => opaque(229, 229, 229),
                Text | Variable => return None,
            },
        };
        Some(color)
    }

    fn style(self) -> Style {
        TokenKind::ALL.into_iter().fold(
            Style::new(self.name(), self.bg_color(), self.default_fg()),
            |style, kind| match self.kind_color(kind) {
                Some(color) => style.with_color(kind, color),
                None => style,
            },
        )
    }
}

/// Scope a theme is queried with to find the color of each category.
fn representative_scope(kind: TokenKind) -> Option<&'static str> {
    let scope = match kind {
        TokenKind::Text => return None,
        TokenKind::Keyword => "keyword.control",
        TokenKind::KeywordType => "storage.type",
        TokenKind::Function => "entity.name.function",
        TokenKind::Type => "entity.name.type",
        TokenKind::Builtin => "support.function",
        TokenKind::Tag => "entity.name.tag",
        TokenKind::Attribute => "entity.other.attribute-name",
        TokenKind::Variable => "variable",
        TokenKind::Constant => "constant.language",
        TokenKind::String => "string.quoted",
        TokenKind::Escape => "constant.character.escape",
        TokenKind::Number => "constant.numeric",
        TokenKind::Operator => "keyword.operator",
        TokenKind::Punctuation => "punctuation",
        TokenKind::Comment => "comment",
        TokenKind::Preprocessor => "meta.preprocessor",
        TokenKind::Invalid => "invalid",
    };
    Some(scope)
}

fn from_syntect(Color { r, g, b, .. }: Color) -> Rgba<u8> {
    opaque(r, g, b)
}

fn style_from_theme(name: &str, theme: &Theme) -> Style {
    let background = theme
        .settings
        .background
        .map(from_syntect)
        .unwrap_or(opaque(0, 0, 0));
    let foreground = theme
        .settings
        .foreground
        .map(from_syntect)
        .unwrap_or(opaque(255, 255, 255));
    let highlighter = Highlighter::new(theme);

    TokenKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let scope = Scope::new(representative_scope(kind)?).ok()?;
            let color = highlighter.style_for_stack(&[scope]).foreground;
            Some((kind, from_syntect(color)))
        })
        .fold(Style::new(name, background, foreground), |style, (kind, color)| {
            style.with_color(kind, color)
        })
}

/// Looks styles up among the built-in palettes, then syntect's bundled themes.
pub struct StyleRegistry {
    themes: &'static ThemeSet,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self { themes: &THEMES }
    }
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every name [`StyleRegistry::lookup`] accepts.
    pub fn names(&self) -> Vec<&str> {
        Palette::ALL
            .into_iter()
            .map(Palette::name)
            .chain(self.themes.themes.keys().map(String::as_str))
            .collect()
    }

    /// Case-insensitive lookup without fallback.
    pub fn lookup(&self, name: &str) -> Option<Style> {
        if let Some(palette) = Palette::from_name(name) {
            return Some(palette.style());
        }

        self.themes
            .themes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, theme)| style_from_theme(key, theme))
    }

    pub fn fallback(&self) -> Style {
        Palette::Monokai.style()
    }
}

impl ResolveStyle for StyleRegistry {
    fn resolve_style(&self, name: &str) -> Style {
        self.lookup(name).unwrap_or_else(|| {
            let fallback = self.fallback();
            warn!(
                "No style found with name {}, we will use {}",
                name,
                fallback.name()
            );
            fallback
        })
    }
}
