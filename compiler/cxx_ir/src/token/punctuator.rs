//! C++ punctuators and operators.
//!
//! `>` is always its own token: `>>`, `>=` and `>>=` are spelled as
//! adjacent tokens and reassembled by the grammar, so that the closing
//! brackets of nested template argument lists (`A<B<int>>`) each get a
//! token of their own.

macro_rules! punctuators {
    ($($variant:ident => $text:literal,)*) => {
        /// A C++ punctuator.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum Punctuator {
            $($variant,)*
        }

        impl Punctuator {
            /// Every punctuator, in declaration order.
            pub const ALL: &'static [Punctuator] = &[$(Punctuator::$variant,)*];

            /// Source spelling of the punctuator.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Punctuator::$variant => $text,)*
                }
            }

            /// Look up a punctuator by its exact spelling.
            pub fn from_text(text: &str) -> Option<Punctuator> {
                match text {
                    $($text => Some(Punctuator::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

punctuators! {
    // Four characters
    DigraphHashHash => "%:%:",
    // Three characters
    Spaceship => "<=>",
    Ellipsis => "...",
    ShlAssign => "<<=",
    ArrowStar => "->*",
    // Two characters
    ColonColon => "::",
    Arrow => "->",
    PlusPlus => "++",
    MinusMinus => "--",
    Shl => "<<",
    LessEq => "<=",
    EqEq => "==",
    NotEq => "!=",
    AndAnd => "&&",
    OrOr => "||",
    PlusAssign => "+=",
    MinusAssign => "-=",
    StarAssign => "*=",
    SlashAssign => "/=",
    PercentAssign => "%=",
    AndAssign => "&=",
    OrAssign => "|=",
    XorAssign => "^=",
    DotStar => ".*",
    HashHash => "##",
    DigraphLBracket => "<:",
    DigraphRBracket => ":>",
    DigraphLBrace => "<%",
    DigraphRBrace => "%>",
    DigraphHash => "%:",
    // One character
    LBrace => "{",
    RBrace => "}",
    LBracket => "[",
    RBracket => "]",
    LParen => "(",
    RParen => ")",
    Semicolon => ";",
    Colon => ":",
    Question => "?",
    Dot => ".",
    Plus => "+",
    Minus => "-",
    Star => "*",
    Slash => "/",
    Percent => "%",
    Caret => "^",
    Amp => "&",
    Pipe => "|",
    Tilde => "~",
    Bang => "!",
    Assign => "=",
    Less => "<",
    Greater => ">",
    Comma => ",",
    Hash => "#",
}

impl Punctuator {
    /// Longest spelling of any punctuator, in bytes.
    pub const MAX_LEN: usize = 4;

    /// Longest punctuator that `text` starts with (maximal munch).
    pub fn longest_prefix(text: &str) -> Option<Punctuator> {
        let bytes = text.as_bytes();
        (1..=Self::MAX_LEN.min(bytes.len()))
            .rev()
            .filter(|&len| text.is_char_boundary(len))
            .find_map(|len| Self::from_text(&text[..len]))
    }

    /// Canonical form of a digraph (`<%` is `{`); other punctuators map to themselves.
    pub const fn canonical(self) -> Punctuator {
        match self {
            Punctuator::DigraphLBracket => Punctuator::LBracket,
            Punctuator::DigraphRBracket => Punctuator::RBracket,
            Punctuator::DigraphLBrace => Punctuator::LBrace,
            Punctuator::DigraphRBrace => Punctuator::RBrace,
            Punctuator::DigraphHash => Punctuator::Hash,
            Punctuator::DigraphHashHash => Punctuator::HashHash,
            other => other,
        }
    }
}
