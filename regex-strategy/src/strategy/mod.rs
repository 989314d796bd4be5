/*!
Composable random string strategies, and a [`Drawer`] to draw examples from them.

A [`Strategy`] is a plain value describing how to generate a string. It does not generate anything by itself; drawing is done by a [`Drawer`]:
```
use regex_strategy::strategy::{Drawer, Strategy};

let strategy = Strategy::concat([
    Strategy::just("id-"),
    Strategy::repeat(Strategy::sampled_from(["0", "1"]), 1, Some(4)),
]);
let mut drawer = Drawer::seeded(0);
let s = drawer.draw(&strategy).unwrap();
assert!(s.starts_with("id-"));
assert!((4..=7).contains(&s.len()));
```

Values produced under the same [`shared()`](Strategy::shared) key are the same within one draw, which is what back references are compiled to.
*/
use std::{collections::BTreeSet, fmt, sync::Arc};

use bon::bon;
use regex_strategy_unicode::GeneralCategory;

mod chars;
mod draw;

pub use chars::{category_class, Characters};
pub use draw::{DrawConfig, DrawError, Drawer, MAX_AVERAGE_SIZE};

#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Always `.0`.
    Just(String),
    /// One of the values. Nothing if empty.
    SampledFrom(Vec<String>),
    /// One char of the set.
    Characters(Characters),
    /// A value of one of the strategies.
    OneOf(Vec<Strategy>),
    /// One value of each strategy, joined in order.
    Concat(Vec<Strategy>),
    /// Between `min` and `max` values of `element`, joined.
    Repeat {
        element: Box<Strategy>,
        min: u32,
        max: Option<u32>,
    },
    /// The first value drawn under `key` in a draw, replayed for every later use of the key.
    Shared { key: String, base: Box<Strategy> },
    /// A value of `base` satisfying `predicate`.
    Filter {
        base: Box<Strategy>,
        predicate: Predicate,
    },
}

#[bon]
impl Strategy {
    pub fn just(value: impl Into<String>) -> Self {
        Strategy::Just(value.into())
    }

    pub fn sampled_from<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Strategy::SampledFrom(values.into_iter().map(Into::into).collect())
    }

    /// A single char.
    ///
    /// ## Example
    /// ```
    /// use regex_strategy::strategy::{Drawer, Strategy};
    ///
    /// let strategy = Strategy::characters()
    ///     .blacklist_characters(['\n'].into())
    ///     .max_codepoint(127)
    ///     .call();
    /// let mut drawer = Drawer::seeded(1);
    /// for s in drawer.samples(&strategy).take(100) {
    ///     let s = s.unwrap();
    ///     assert!(s.is_ascii() && s != "\n");
    /// }
    /// ```
    #[builder]
    pub fn characters(
        /// Categories to draw from. All categories if not set.
        whitelist_categories: Option<BTreeSet<GeneralCategory>>,
        #[builder(default)] blacklist_categories: BTreeSet<GeneralCategory>,
        #[builder(default)] blacklist_characters: BTreeSet<char>,
        #[builder(default = char::MAX as u32)] max_codepoint: u32,
    ) -> Self {
        Strategy::Characters(Characters::from_categories(
            whitelist_categories.as_ref(),
            &blacklist_categories,
            &blacklist_characters,
            max_codepoint,
        ))
    }

    /// Strategies that cannot produce anything are dropped. A single strategy is returned as is.
    pub fn one_of(strategies: impl IntoIterator<Item = Strategy>) -> Self {
        let mut strategies: Vec<_> = strategies
            .into_iter()
            .filter(|strategy| !strategy.is_empty())
            .collect();
        if strategies.len() == 1 {
            strategies.swap_remove(0)
        } else {
            Strategy::OneOf(strategies)
        }
    }

    pub fn concat(strategies: impl IntoIterator<Item = Strategy>) -> Self {
        let mut strategies: Vec<_> = strategies.into_iter().collect();
        match strategies.len() {
            0 => Strategy::just(""),
            1 => strategies.swap_remove(0),
            _ => Strategy::Concat(strategies),
        }
    }

    /// `max` of `None` for unbounded.
    pub fn repeat(element: Strategy, min: u32, max: Option<u32>) -> Self {
        Strategy::Repeat {
            element: Box::new(element),
            min,
            max,
        }
    }

    pub fn shared(self, key: impl Into<String>) -> Self {
        Strategy::Shared {
            key: key.into(),
            base: Box::new(self),
        }
    }

    pub fn filter(self, predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Strategy::Filter {
            base: Box::new(self),
            predicate: Predicate::new(predicate),
        }
    }

    /// Whether this strategy can never produce a value.
    pub fn is_empty(&self) -> bool {
        match self {
            Strategy::Just(_) => false,
            Strategy::SampledFrom(values) => values.is_empty(),
            Strategy::Characters(chars) => chars.is_empty(),
            Strategy::OneOf(strategies) => strategies.iter().all(Strategy::is_empty),
            Strategy::Concat(strategies) => strategies.iter().any(Strategy::is_empty),
            Strategy::Repeat { element, min, .. } => *min > 0 && element.is_empty(),
            Strategy::Shared { base, .. } | Strategy::Filter { base, .. } => base.is_empty(),
        }
    }
}

/// A string predicate of [`Strategy::Filter`].
///
/// Two predicates are equal only if they are clones of the same one.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl Predicate {
    pub fn new(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn test(&self, s: &str) -> bool {
        (self.0)(s)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
