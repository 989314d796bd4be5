//! Unicode utils.
/*!
## Features
- [General categories](category) as a closed enum, plus the category sets used by the Perl classes `\d`, `\s` and `\w`
- Single-char [case mapping](case) (mono lowercase and mono uppercase)

## Crate features
*/
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(feature = "doc", doc = document_features::document_features!())]
pub mod case;
pub mod category;

pub use category::GeneralCategory;

mod private {
    pub trait Sealed {}
}
use private::Sealed;

impl Sealed for char {}
