//! Per-token layout flags.

use bitflags::bitflags;

bitflags! {
    /// Layout context of a token, packed into a single byte.
    ///
    /// Captures what preceded the token so consumers can reason about
    /// layout without keeping whitespace tokens around.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// Whitespace preceded this token.
        const SPACE_BEFORE = 1 << 0;
        /// A line break preceded this token.
        const NEWLINE_BEFORE = 1 << 1;
        /// A comment or directive preceded this token.
        const TRIVIA_BEFORE = 1 << 2;
        /// First token on its line.
        const LINE_START = 1 << 3;
        /// The token's source text contains at least one line splice.
        const SPLICED = 1 << 4;
    }
}

impl TokenFlags {
    /// True when nothing separated this token from the previous one.
    #[inline]
    pub fn is_adjacent(self) -> bool {
        !self.intersects(Self::SPACE_BEFORE | Self::NEWLINE_BEFORE | Self::TRIVIA_BEFORE)
    }
}
