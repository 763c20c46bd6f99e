//! The channel loop.

use std::fmt;

use cxx_ir::{SourceUri, TokenKind, TokenList};
use cxx_lexer_core::Cursor;

use crate::{channels, Channel, LexError, TokenSink};

/// What to do when no channel consumes a character.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LexMode {
    /// Fail the file with a [`LexError`].
    Strict,
    /// Emit an error token for the character, record the error, continue.
    #[default]
    Recovery,
}

/// Lexer options.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LexerConfig {
    pub mode: LexMode,
    /// Keep comments as trivia. Dropped comments still mark the next
    /// token with `TRIVIA_BEFORE`.
    pub keep_comments: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            mode: LexMode::Recovery,
            keep_comments: true,
        }
    }
}

/// Tokens of one file plus the errors recovered while lexing it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

/// An ordered channel pipeline.
pub struct Lexer {
    channels: Vec<Box<dyn Channel>>,
    config: LexerConfig,
}

impl Lexer {
    pub fn builder() -> LexerBuilder {
        LexerBuilder::default()
    }

    /// The C++ lexer.
    pub fn cxx(config: LexerConfig) -> Self {
        Lexer::builder()
            .config(config)
            .channels(channels::cxx())
            .build()
    }

    pub fn config(&self) -> LexerConfig {
        self.config
    }

    /// Lex `source` into tokens ending with an EOF token.
    ///
    /// # Errors
    ///
    /// In [`LexMode::Strict`], the first character no channel consumes.
    pub fn lex(&self, source: &str, uri: &SourceUri) -> Result<LexOutput, LexError> {
        let mut cursor = Cursor::new(source);
        let mut sink = TokenSink::new(uri.clone(), self.config.keep_comments);
        let mut errors = Vec::new();

        'scan: while !cursor.is_eof() {
            let before = cursor.pos();
            for channel in &self.channels {
                if channel.consume(&mut cursor, &mut sink) {
                    debug_assert!(
                        cursor.pos() > before,
                        "channel `{}` consumed nothing",
                        channel.name()
                    );
                    continue 'scan;
                }
            }

            let error = LexError::at(&cursor);
            if self.config.mode == LexMode::Strict {
                return Err(error);
            }
            tracing::warn!(%uri, line = error.line, column = error.column, "{}", error.kind);
            let lexeme = cursor.advance_char();
            sink.push(TokenKind::Error, &lexeme);
            errors.push(error);
        }

        let tokens = sink.finish(&cursor);
        tracing::debug!(
            %uri,
            tokens = tokens.len(),
            trivia = tokens.trivia().len(),
            errors = errors.len(),
            "lexed"
        );
        Ok(LexOutput { tokens, errors })
    }
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field(
                "channels",
                &self.channels.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for a [`Lexer`] over any channel list.
#[derive(Default)]
pub struct LexerBuilder {
    channels: Vec<Box<dyn Channel>>,
    config: LexerConfig,
}

impl LexerBuilder {
    /// Append a channel; channels are tried in the order they were added.
    #[must_use]
    pub fn channel(mut self, channel: impl Channel + 'static) -> Self {
        self.channels.push(Box::new(channel));
        self
    }

    #[must_use]
    pub fn channels(mut self, channels: impl IntoIterator<Item = Box<dyn Channel>>) -> Self {
        self.channels.extend(channels);
        self
    }

    #[must_use]
    pub fn config(mut self, config: LexerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: LexMode) -> Self {
        self.config.mode = mode;
        self
    }

    #[must_use]
    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.config.keep_comments = keep;
        self
    }

    pub fn build(self) -> Lexer {
        Lexer {
            channels: self.channels,
            config: self.config,
        }
    }
}
