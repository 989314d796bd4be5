/*!
Generate random strings matching a regular expression, for property-based testing and fuzzing.

A pattern is parsed, then compiled into a composable [`Strategy`], which a [`Drawer`](strategy::Drawer) draws examples from.

## Features
- Python `re` syntax and semantics, including:
  - Unicode general categories for `\d`, `\s` and `\w`, or ASCII ones with the `a` flag.
  - [Unicode case insensitivity](regex_strategy_unicode::case) with the `i` flag.
  - Inline flags, both global (`(?i)`) and scoped (`(?i:...)`, `(?-i:...)`).
  - Named groups and back references, with the same text repeated in every example.
  - Lookarounds and conditionals `(?(1)yes|no)`, approximated and then filtered.
- Every example is checked by a real matcher ([`fancy_regex`]), so what you get always matches the pattern.
- Reproducible examples with [seeded drawers](strategy::Drawer::seeded).
- [Syntax tree](syntax::ast) and [strategies](strategy) are plain values you can inspect or compose further.
*/
//! ## Usage
//! ```
//! use regex_strategy::{from_regex, strategy::Drawer};
//!
//! let strategy = from_regex(r#"([\'"])[a-z]+\1"#).unwrap();
//! let mut drawer = Drawer::seeded(0);
//! for s in drawer.samples(&strategy).take(10) {
//!     let s = s.unwrap();
//!     assert_eq!(s.chars().next(), s.chars().last());
//! }
//! ```
/*!
With flags:
```
use regex_strategy::{from_regex, strategy::Drawer, Flags, Pattern};

let pattern = Pattern::with_flags(r"[a-z]{3}\d", Flags::CASE_INSENSITIVE | Flags::ASCII_ONLY).unwrap();
let strategy = from_regex(&pattern).unwrap();
let s = Drawer::seeded(1).find(&strategy, |s| s.starts_with(char::is_uppercase)).unwrap();
assert!(pattern.is_match(&s));
```
*/
//! ## Crate features
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(feature = "doc", doc = document_features::document_features!())]

pub mod compile;
mod error;
pub mod pattern;
pub mod strategy;
pub mod syntax;

pub use error::Error;
pub use pattern::{from_regex, IntoPattern, Pattern};
pub use strategy::Strategy;
pub use syntax::Flags;

mod private {
    pub trait Sealed {}
}
use private::Sealed;
