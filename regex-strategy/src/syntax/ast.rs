use std::collections::BTreeMap;

use bitflags::bitflags;

bitflags! {
    /// Regex flags, either passed in with a [`Pattern`](crate::Pattern) or set inline with `(?aimsux)`.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// `i`: letters match both upper and lower case.
        const CASE_INSENSITIVE = 1 << 0;
        /// `m`: `^` and `$` match at line boundaries.
        const MULTILINE = 1 << 1;
        /// `s`: `.` also matches `\n`.
        const DOT_ALL = 1 << 2;
        /// `x`: whitespace and `#` comments outside of sets are ignored.
        const VERBOSE = 1 << 3;
        /// `a`: `\d`, `\s`, `\w` and case-insensitivity are restricted to ASCII.
        const ASCII_ONLY = 1 << 4;
        /// `u`: Unicode matching. This is the default, the flag only exists to be explicit.
        const UNICODE_MODE = 1 << 5;
    }
}

impl Flags {
    /// Parse a single inline flag letter.
    pub fn from_letter(c: char) -> Option<Self> {
        Some(match c {
            'i' => Flags::CASE_INSENSITIVE,
            'm' => Flags::MULTILINE,
            's' => Flags::DOT_ALL,
            'x' => Flags::VERBOSE,
            'a' => Flags::ASCII_ONLY,
            'u' => Flags::UNICODE_MODE,
            _ => return None,
        })
    }

    pub fn is_unicode(self) -> bool {
        !self.contains(Flags::ASCII_ONLY)
    }

    /// Flags in effect inside `(?add-del:...)`.
    ///
    /// `a` and `u` replace each other instead of being combined.
    pub fn scoped(self, add: Flags, del: Flags) -> Flags {
        let mut flags = self;
        if add.intersects(Flags::ASCII_ONLY | Flags::UNICODE_MODE) {
            flags.remove(Flags::ASCII_ONLY | Flags::UNICODE_MODE);
        }
        (flags | add) & !del
    }
}

/// A sequence of sibling nodes, i.e. a concatenation.
pub type Seq = Vec<Node>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `a`
    Literal(char),
    /// `[^a]`
    NotLiteral(char),
    /// `[abc0-9\d]`, `[^...]`, and also the bare Perl classes like `\d`.
    CharSet(Vec<SetItem>),
    /// `.`
    Any,
    /// `^`, `$`, `\A`, `\Z`, `\b`, `\B`
    Anchor(AnchorKind),
    /// `(...)`, `(?:...)`, `(?P<name>...)` and `(?flags-flags:...)`.
    Subpattern {
        /// 1-based index of a capturing group.
        group: Option<usize>,
        add_flags: Flags,
        del_flags: Flags,
        body: Seq,
    },
    /// `\1`, `(?P=name)`
    GroupRef(usize),
    /// `(?=...)`, `(?<=...)`
    Assert { direction: LookDirection, body: Seq },
    /// `(?!...)`, `(?<!...)`
    AssertNot { direction: LookDirection, body: Seq },
    /// `a|b|c`
    Branch(Vec<Seq>),
    /// `x*`, `x+`, `x?`, `x{n,m}` and their lazy variants.
    Repeat {
        min: u32,
        /// `None` if unbounded.
        max: Option<u32>,
        greedy: bool,
        body: Seq,
    },
    /// `(?(1)yes|no)`, `(?(name)yes|no)`
    ConditionalGroup {
        group: usize,
        yes: Seq,
        no: Option<Seq>,
    },
}

impl Node {
    /// Node kind name, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Literal(_) => "literal",
            Node::NotLiteral(_) => "not literal",
            Node::CharSet(_) => "character set",
            Node::Any => "any",
            Node::Anchor(_) => "anchor",
            Node::Subpattern { .. } => "subpattern",
            Node::GroupRef(_) => "group reference",
            Node::Assert { .. } => "assert",
            Node::AssertNot { .. } => "assert not",
            Node::Branch(_) => "branch",
            Node::Repeat { .. } => "repeat",
            Node::ConditionalGroup { .. } => "conditional group",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetItem {
    /// `^` right after `[`. Only valid as the first item.
    Negate,
    Literal(char),
    /// Inclusive.
    Range(char, char),
    Category(Category),
}

/// Perl character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `\d`
    Digit,
    /// `\D`
    NotDigit,
    /// `\s`
    Space,
    /// `\S`
    NotSpace,
    /// `\w`
    Word,
    /// `\W`
    NotWord,
}

impl Category {
    pub fn from_escape(c: char) -> Option<Self> {
        Some(match c {
            'd' => Category::Digit,
            'D' => Category::NotDigit,
            's' => Category::Space,
            'S' => Category::NotSpace,
            'w' => Category::Word,
            'W' => Category::NotWord,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// `^`
    Beginning,
    /// `\A`
    BeginningString,
    /// `$`
    End,
    /// `\Z`
    EndString,
    /// `\b`
    Boundary,
    /// `\B`
    NonBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookDirection {
    Ahead,
    Behind,
}

/// A parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    pub nodes: Seq,
    /// Global flags: the ones passed in to the parser plus the inline `(?flags)` found in the pattern.
    pub flags: Flags,
    /// Number of capturing groups.
    pub group_count: usize,
    pub group_names: BTreeMap<String, usize>,
}
