/// Lexical categories a style can assign colors to.
///
/// The set is closed: lexers map whatever they know onto these, and anything
/// they cannot place becomes [`TokenKind::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    Keyword,
    KeywordType,
    Function,
    Type,
    Builtin,
    Tag,
    Attribute,
    Variable,
    Constant,
    String,
    Escape,
    Number,
    Operator,
    Punctuation,
    Comment,
    Preprocessor,
    Invalid,
}

impl TokenKind {
    pub const ALL: [TokenKind; 18] = [
        TokenKind::Text,
        TokenKind::Keyword,
        TokenKind::KeywordType,
        TokenKind::Function,
        TokenKind::Type,
        TokenKind::Builtin,
        TokenKind::Tag,
        TokenKind::Attribute,
        TokenKind::Variable,
        TokenKind::Constant,
        TokenKind::String,
        TokenKind::Escape,
        TokenKind::Number,
        TokenKind::Operator,
        TokenKind::Punctuation,
        TokenKind::Comment,
        TokenKind::Preprocessor,
        TokenKind::Invalid,
    ];
}

/// A fragment of the input text together with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// A token holding a single line break.
    pub fn newline() -> Self {
        Self::new("\n", TokenKind::Text)
    }

    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }
}
