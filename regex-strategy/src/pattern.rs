use std::{fmt, str::FromStr, sync::Arc};

use crate::{
    compile::{Compiler, Context},
    error::Error,
    strategy::Strategy,
    syntax::{self, print::to_matcher_pattern, Ast, Flags},
    Sealed,
};

/// A parsed pattern with its flags, and a matcher with the same semantics as Python's `re.match()`.
///
/// ## Example
/// ```
/// use regex_strategy::{Flags, Pattern};
///
/// let pattern = Pattern::with_flags(r"ab\d+", Flags::CASE_INSENSITIVE).unwrap();
/// assert!(pattern.is_match("AB12"));
/// // Anchored at the start only
/// assert!(pattern.is_match("ab1 and more"));
/// assert!(pattern.is_match("xab1") == false);
/// ```
#[derive(Clone, Debug)]
pub struct Pattern {
    pattern: String,
    flags: Flags,
    ast: Ast,
    matcher: Arc<fancy_regex::Regex>,
}

impl Pattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self, Error> {
        Self::with_flags(pattern, Flags::empty())
    }

    pub fn with_flags(pattern: impl Into<String>, flags: Flags) -> Result<Self, Error> {
        let pattern = pattern.into();
        let ast = syntax::parse(&pattern, flags)?;
        let matcher = fancy_regex::Regex::new(&format!(r"\A(?:{})", to_matcher_pattern(&ast)))?;
        Ok(Self {
            pattern,
            flags,
            ast,
            matcher: Arc::new(matcher),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The flags passed in, without the inline ones. See [`Ast::flags`] for all the global flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Whether the pattern matches at the start of `s`.
    ///
    /// Hitting the backtrack limit of the matcher counts as no match.
    pub fn is_match(&self, s: &str) -> bool {
        self.matcher.is_match(s).unwrap_or(false)
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Pattern text or an already parsed [`Pattern`].
pub trait IntoPattern: Sealed {
    fn into_pattern(self) -> Result<Pattern, Error>;
}

impl Sealed for &str {}
impl IntoPattern for &str {
    fn into_pattern(self) -> Result<Pattern, Error> {
        Pattern::new(self)
    }
}

impl Sealed for String {}
impl IntoPattern for String {
    fn into_pattern(self) -> Result<Pattern, Error> {
        Pattern::new(self)
    }
}

impl Sealed for Pattern {}
impl IntoPattern for Pattern {
    fn into_pattern(self) -> Result<Pattern, Error> {
        Ok(self)
    }
}

impl Sealed for &Pattern {}
impl IntoPattern for &Pattern {
    fn into_pattern(self) -> Result<Pattern, Error> {
        Ok(self.clone())
    }
}

/// A strategy for strings that [match](Pattern::is_match) `pattern`.
///
/// Pattern text is compiled without flags. Use [`Pattern::with_flags()`] to pass flags in.
///
/// The compiled strategy is filtered by the pattern's matcher, so strings produced by approximations (lookarounds, conditionals) that do not actually match are rejected.
///
/// ## Example
/// ```
/// use regex_strategy::{from_regex, strategy::Drawer};
///
/// let strategy = from_regex(r"(?i)[a-z]+@example\.com").unwrap();
/// let mut drawer = Drawer::seeded(7);
/// let email = drawer.find(&strategy, |_| true).unwrap();
/// assert!(email.to_lowercase().contains("@example.com"));
/// ```
pub fn from_regex(pattern: impl IntoPattern) -> Result<Strategy, Error> {
    let pattern = pattern.into_pattern()?;
    let ctx = Context::new(pattern.flags() | pattern.ast().flags);
    let strategy = Compiler::new().compile(&pattern.ast().nodes, ctx)?;
    let matcher = pattern.matcher;
    Ok(strategy.filter(move |s| matcher.is_match(s).unwrap_or(false)))
}
