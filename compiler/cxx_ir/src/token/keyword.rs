//! C++ keywords, including the alternative operator spellings.

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// A reserved C++ keyword.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            /// Source spelling of the keyword.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }

            /// Look up a keyword by its spelling.
            ///
            /// Returns `None` for ordinary identifiers.
            pub fn from_ident(text: &str) -> Option<Keyword> {
                match text {
                    $($text => Some(Keyword::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    Alignas => "alignas",
    Alignof => "alignof",
    Asm => "asm",
    Auto => "auto",
    Bool => "bool",
    Break => "break",
    Case => "case",
    Catch => "catch",
    Char => "char",
    Char8T => "char8_t",
    Char16T => "char16_t",
    Char32T => "char32_t",
    Class => "class",
    Const => "const",
    Concept => "concept",
    Consteval => "consteval",
    Constexpr => "constexpr",
    Constinit => "constinit",
    ConstCast => "const_cast",
    Continue => "continue",
    CoAwait => "co_await",
    CoReturn => "co_return",
    CoYield => "co_yield",
    Decltype => "decltype",
    Default => "default",
    Delete => "delete",
    Do => "do",
    Double => "double",
    DynamicCast => "dynamic_cast",
    Else => "else",
    Enum => "enum",
    Explicit => "explicit",
    Extern => "extern",
    False => "false",
    Float => "float",
    For => "for",
    Friend => "friend",
    Goto => "goto",
    If => "if",
    Inline => "inline",
    Int => "int",
    Long => "long",
    Mutable => "mutable",
    Namespace => "namespace",
    New => "new",
    Noexcept => "noexcept",
    Nullptr => "nullptr",
    Operator => "operator",
    Private => "private",
    Protected => "protected",
    Public => "public",
    Register => "register",
    ReinterpretCast => "reinterpret_cast",
    Return => "return",
    Requires => "requires",
    Short => "short",
    Signed => "signed",
    Sizeof => "sizeof",
    Static => "static",
    StaticAssert => "static_assert",
    StaticCast => "static_cast",
    Struct => "struct",
    Switch => "switch",
    Template => "template",
    This => "this",
    ThreadLocal => "thread_local",
    Throw => "throw",
    True => "true",
    Try => "try",
    Typedef => "typedef",
    Typeid => "typeid",
    Typename => "typename",
    Union => "union",
    Unsigned => "unsigned",
    Using => "using",
    Virtual => "virtual",
    Void => "void",
    Volatile => "volatile",
    WcharT => "wchar_t",
    While => "while",
    And => "and",
    AndEq => "and_eq",
    Bitand => "bitand",
    Bitor => "bitor",
    Compl => "compl",
    Not => "not",
    NotEq => "not_eq",
    Or => "or",
    OrEq => "or_eq",
    Xor => "xor",
    XorEq => "xor_eq",
}
