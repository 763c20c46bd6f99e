//! Token list produced by the lexer for one file.

use super::Token;

/// Typed index into a [`TokenList`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct TokenIdx(u32);

impl TokenIdx {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TokenIdx(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// Compile-time assertion: TokenIdx is exactly 4 bytes.
const _: () = assert!(std::mem::size_of::<TokenIdx>() == 4);

/// Tokens of one file, plus the trivia (comments, directives) between them.
///
/// The parser only ever sees `tokens`; `trivia` is kept in source order for
/// consumers that care about comments.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
    trivia: Vec<Token>,
}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        TokenList::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
            trivia: Vec::new(),
        }
    }

    /// Append a token; trivia kinds go to the trivia list.
    pub fn push(&mut self, token: Token) {
        if token.kind.is_trivia() {
            self.trivia.push(token);
        } else {
            self.tokens.push(token);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: TokenIdx) -> Option<&Token> {
        self.tokens.get(idx.index())
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Comments and preprocessor directives, in source order.
    #[inline]
    pub fn trivia(&self) -> &[Token] {
        &self.trivia
    }

    #[inline]
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }
}

impl std::ops::Index<TokenIdx> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, idx: TokenIdx) -> &Token {
        &self.tokens[idx.index()]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut list = TokenList::new();
        for token in iter {
            list.push(token);
        }
        list
    }
}
