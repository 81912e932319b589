//! Splitting source text into categorized tokens.
//!
//! The pipeline only needs [`Tokenize`]; [`SyntectTokenizer`] backs it with the
//! Sublime Text grammars bundled in `syntect`.

use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{Error, Result};
use crate::token::{Token, TokenKind};

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Scope prefixes and the category they map to, most specific first.
const SCOPE_KINDS: &[(&str, TokenKind)] = &[
    ("comment", TokenKind::Comment),
    ("punctuation.definition.comment", TokenKind::Comment),
    ("constant.character.escape", TokenKind::Escape),
    ("string", TokenKind::String),
    ("punctuation.definition.string", TokenKind::String),
    ("constant.numeric", TokenKind::Number),
    ("constant", TokenKind::Constant),
    ("keyword.operator", TokenKind::Operator),
    ("keyword", TokenKind::Keyword),
    ("storage.type", TokenKind::KeywordType),
    ("storage", TokenKind::Keyword),
    ("meta.preprocessor", TokenKind::Preprocessor),
    ("entity.name.function", TokenKind::Function),
    ("variable.function", TokenKind::Function),
    ("support.function", TokenKind::Builtin),
    ("entity.name.tag", TokenKind::Tag),
    ("entity.other.attribute-name", TokenKind::Attribute),
    ("entity.name", TokenKind::Type),
    ("entity.other.inherited-class", TokenKind::Type),
    ("support.type", TokenKind::Type),
    ("support.class", TokenKind::Type),
    ("support", TokenKind::Builtin),
    ("variable", TokenKind::Variable),
    ("punctuation", TokenKind::Punctuation),
    ("invalid", TokenKind::Invalid),
];

/// How the caller would like the lexer to be chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageHint<'a> {
    /// Explicit language name; when set, the file name is ignored.
    pub language: Option<&'a str>,
    pub file_name: Option<&'a str>,
}

/// Output of a tokenisation pass.
///
/// `error` is set when the lexer failed part way; `tokens` then holds what was
/// produced before the failure.
#[derive(Debug)]
pub struct Tokens {
    pub lexer: String,
    pub tokens: Vec<Token>,
    pub error: Option<Error>,
}

pub trait Tokenize {
    fn tokenize(&self, text: &str, hint: LanguageHint<'_>) -> Tokens;
}

/// Tokenizer over syntect's default syntax set.
pub struct SyntectTokenizer {
    syntaxes: &'static SyntaxSet,
}

impl Default for SyntectTokenizer {
    fn default() -> Self {
        Self {
            syntaxes: &SYNTAXES,
        }
    }
}

impl SyntectTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language names and the file extensions each one claims.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.syntaxes
            .syntaxes()
            .iter()
            .map(|syntax| (syntax.name.as_str(), syntax.file_extensions.as_slice()))
    }

    /// Picks the grammar for `text`, falling back to plain text.
    pub fn select(&self, text: &str, hint: LanguageHint<'_>) -> &SyntaxReference {
        if let Some(syntax) = self.lookup(text, hint) {
            return syntax;
        }

        let fallback = self.syntaxes.find_syntax_plain_text();
        let requested = hint.language.or(hint.file_name).unwrap_or("<unknown>");
        warn!(
            "No lexer found for the language {}, we will use {}.",
            requested, fallback.name
        );
        fallback
    }

    fn lookup(&self, text: &str, hint: LanguageHint<'_>) -> Option<&SyntaxReference> {
        if let Some(language) = hint.language.filter(|l| !l.is_empty()) {
            return self.syntaxes.find_syntax_by_token(language);
        }

        hint.file_name
            .map(Path::new)
            .and_then(|path| {
                let by_extension = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(|ext| self.syntaxes.find_syntax_by_extension(ext));
                // Grammars such as Makefile register whole file names as extensions
                by_extension.or_else(|| {
                    path.file_name()
                        .and_then(|name| name.to_str())
                        .and_then(|name| self.syntaxes.find_syntax_by_extension(name))
                })
            })
            .or_else(|| self.syntaxes.find_syntax_by_first_line(text))
    }

    fn scan(&self, syntax: &SyntaxReference, text: &str, tokens: &mut Vec<Token>) -> Result<()> {
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();

        for line in LinesWithEndings::from(text) {
            let ops = state
                .parse_line(line, self.syntaxes)
                .map_err(|e| Error::Tokenize(e.to_string()))?;

            for (range, op) in ScopeRangeIterator::new(&ops, line) {
                stack
                    .apply(op)
                    .map_err(|e| Error::Tokenize(e.to_string()))?;
                if range.is_empty() {
                    continue;
                }
                push_fragment(tokens, &line[range], classify(&stack));
            }
        }

        Ok(())
    }
}

impl Tokenize for SyntectTokenizer {
    fn tokenize(&self, text: &str, hint: LanguageHint<'_>) -> Tokens {
        let syntax = self.select(text, hint);
        debug!("Tokenising with the {} grammar", syntax.name);

        let mut tokens = Vec::new();
        let error = self.scan(syntax, text, &mut tokens).err();

        Tokens {
            lexer: syntax.name.clone(),
            tokens,
            error,
        }
    }
}

/// Pushes a fragment, splitting a trailing line break into its own token.
fn push_fragment(tokens: &mut Vec<Token>, fragment: &str, kind: TokenKind) {
    match fragment.strip_suffix('\n') {
        Some("") => tokens.push(Token::newline()),
        Some(body) => {
            tokens.push(Token::new(body, kind));
            tokens.push(Token::newline());
        }
        None => tokens.push(Token::new(fragment, kind)),
    }
}

/// Category of the innermost scope that maps to one.
fn classify(stack: &ScopeStack) -> TokenKind {
    stack
        .as_slice()
        .iter()
        .rev()
        .find_map(|scope| kind_for_scope(&scope.build_string()))
        .unwrap_or(TokenKind::Text)
}

fn kind_for_scope(name: &str) -> Option<TokenKind> {
    SCOPE_KINDS
        .iter()
        .find(|(prefix, _)| scope_has_prefix(name, prefix))
        .map(|&(_, kind)| kind)
}

/// Prefix match on whole scope atoms, so `string` matches `string.quoted` but not `stringy`.
fn scope_has_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}
