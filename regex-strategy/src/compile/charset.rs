use std::collections::BTreeSet;

use regex_strategy_unicode::{
    case::CharCaseExt,
    category::{self, all_except},
    GeneralCategory,
};

use crate::{
    strategy::Strategy,
    syntax::{ast::Category, Flags},
};

/// Accumulates the content of a character set, e.g. `[^a-z\d_]`, and builds a strategy for exactly that set.
#[derive(Debug, Clone)]
pub struct CharactersBuilder {
    categories: BTreeSet<GeneralCategory>,
    whitelist: BTreeSet<char>,
    blacklist: BTreeSet<char>,
    negate: bool,
    case_insensitive: bool,
    unicode: bool,
}

impl CharactersBuilder {
    pub fn new(negate: bool, flags: Flags) -> Self {
        Self {
            categories: BTreeSet::new(),
            whitelist: BTreeSet::new(),
            blacklist: BTreeSet::new(),
            negate,
            case_insensitive: flags.contains(Flags::CASE_INSENSITIVE),
            unicode: flags.is_unicode(),
        }
    }

    /// With case-insensitivity, both the lowercase and the uppercase of `c` are added instead.
    pub fn add_char(&mut self, c: char) {
        if self.case_insensitive {
            let (lower, upper) = c.to_mono_case_pair();
            self.whitelist.insert(lower);
            self.whitelist.insert(upper);
        } else {
            self.whitelist.insert(c);
        }
    }

    /// Every char becomes its own entry, and then its own value of the final [`Strategy::SampledFrom`]. A range as wide as `[\x00-\U0010FFFF]` costs about a million strings.
    pub fn add_chars(&mut self, chars: impl IntoIterator<Item = char>) {
        for c in chars {
            self.add_char(c);
        }
    }

    pub fn add_category(&mut self, category: Category) {
        match category {
            Category::Digit => self.categories.extend(category::DIGIT),
            Category::NotDigit => self.categories.extend(all_except(category::DIGIT)),
            Category::Space => {
                self.categories.extend(category::SPACE);
                self.whitelist.extend(space_chars(self.unicode));
            }
            Category::NotSpace => {
                self.categories.extend(all_except(category::SPACE));
                self.blacklist.extend(space_chars(self.unicode));
            }
            Category::Word => {
                self.categories.extend(category::WORD);
                self.whitelist.insert('_');
            }
            Category::NotWord => {
                self.categories.extend(all_except(category::WORD));
                self.blacklist.insert('_');
            }
        }
    }

    pub fn into_strategy(self) -> Strategy {
        let max_codepoint = if self.unicode { char::MAX as u32 } else { 127 };
        let sampled =
            |chars: BTreeSet<char>| Strategy::sampled_from(chars.into_iter().map(String::from));

        let mut strategies = Vec::new();
        if self.negate {
            if !self.categories.is_empty() || !self.whitelist.is_empty() {
                let mut blacklist_categories = self.categories;
                blacklist_categories.extend([GeneralCategory::Control, GeneralCategory::Surrogate]);
                strategies.push(
                    Strategy::characters()
                        .blacklist_categories(blacklist_categories)
                        .blacklist_characters(self.whitelist.clone())
                        .max_codepoint(max_codepoint)
                        .call(),
                );
            }
            if !self.blacklist.is_empty() {
                strategies.push(sampled(&self.blacklist - &self.whitelist));
            }
        } else {
            if !self.categories.is_empty() || !self.blacklist.is_empty() {
                strategies.push(
                    Strategy::characters()
                        .whitelist_categories(self.categories)
                        .blacklist_characters(self.blacklist.clone())
                        .max_codepoint(max_codepoint)
                        .call(),
                );
            }
            if !self.whitelist.is_empty() {
                strategies.push(sampled(&self.whitelist - &self.blacklist));
            }
        }

        if strategies.is_empty() {
            Strategy::just("")
        } else {
            Strategy::one_of(strategies)
        }
    }
}

/// Chars `\s` matches besides the space categories.
fn space_chars(unicode: bool) -> impl Iterator<Item = char> {
    let extra = if unicode {
        category::UNICODE_SPACE_CHARS
    } else {
        ""
    };
    category::SPACE_CHARS.chars().chain(extra.chars())
}
