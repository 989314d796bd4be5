use std::{collections::BTreeSet, sync::OnceLock};

use regex_strategy_unicode::GeneralCategory;
use regex_syntax::hir::{Class, ClassUnicode, ClassUnicodeRange, HirKind};

const SURROGATES: u32 = 0xE000 - 0xD800;

/// A set of characters to draw one from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Characters {
    class: ClassUnicode,
}

impl Characters {
    pub fn new(class: ClassUnicode) -> Self {
        Self { class }
    }

    /// All the characters in `whitelist_categories` (`None` for all categories), minus the ones in `blacklist_categories` or `blacklist_characters`, up to `max_codepoint`.
    ///
    /// Surrogates are never included.
    pub fn from_categories(
        whitelist_categories: Option<&BTreeSet<GeneralCategory>>,
        blacklist_categories: &BTreeSet<GeneralCategory>,
        blacklist_characters: &BTreeSet<char>,
        max_codepoint: u32,
    ) -> Self {
        let mut class = ClassUnicode::empty();
        match whitelist_categories {
            Some(categories) => {
                for &category in categories {
                    class.union(category_class(category));
                }
            }
            None => {
                for category in GeneralCategory::VARIANTS {
                    class.union(category_class(category));
                }
            }
        }
        for &category in blacklist_categories {
            class.difference(category_class(category));
        }
        class.difference(&ClassUnicode::new(
            blacklist_characters
                .iter()
                .map(|&c| ClassUnicodeRange::new(c, c)),
        ));
        class.intersect(&ClassUnicode::new([ClassUnicodeRange::new(
            '\0',
            max_char(max_codepoint),
        )]));
        Self { class }
    }

    pub fn is_empty(&self) -> bool {
        self.class.ranges().is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.class
            .ranges()
            .binary_search_by(|range| {
                if range.end() < c {
                    std::cmp::Ordering::Less
                } else if range.start() > c {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Number of characters.
    pub fn len(&self) -> u32 {
        self.class.ranges().iter().map(range_len).sum()
    }

    /// Number of characters not greater than `limit`.
    pub fn len_up_to(&self, limit: char) -> u32 {
        self.class
            .ranges()
            .iter()
            .take_while(|range| range.start() <= limit)
            .map(|range| range_len(&ClassUnicodeRange::new(range.start(), range.end().min(limit))))
            .sum()
    }

    /// The `n`-th character in code point order.
    pub fn nth(&self, mut n: u32) -> Option<char> {
        for range in self.class.ranges() {
            let len = range_len(range);
            if n < len {
                let start = range.start() as u32;
                let mut c = start + n;
                if start < 0xD800 && c >= 0xD800 {
                    c += SURROGATES;
                }
                return char::from_u32(c);
            }
            n -= len;
        }
        None
    }
}

/// A range can span the surrogates, which are not chars.
fn range_len(range: &ClassUnicodeRange) -> u32 {
    let (start, end) = (range.start() as u32, range.end() as u32);
    let len = end - start + 1;
    if start < 0xD800 && end > 0xDFFF {
        len - SURROGATES
    } else {
        len
    }
}

fn max_char(max_codepoint: u32) -> char {
    match max_codepoint {
        0xD800..=0xDFFF => '\u{D7FF}',
        c => char::from_u32(c).unwrap_or(char::MAX),
    }
}

/// Code points of a general category, resolved once from `regex-syntax`'s Unicode tables.
///
/// Without the `unicode` feature all categories are empty.
pub fn category_class(category: GeneralCategory) -> &'static ClassUnicode {
    static CLASSES: OnceLock<Vec<ClassUnicode>> = OnceLock::new();
    let classes = CLASSES.get_or_init(|| {
        GeneralCategory::VARIANTS
            .into_iter()
            .map(resolve_category)
            .collect()
    });
    &classes[category as usize]
}

fn resolve_category(category: GeneralCategory) -> ClassUnicode {
    if category == GeneralCategory::Surrogate {
        return ClassUnicode::empty();
    }
    let hir = regex_syntax::ParserBuilder::new()
        .build()
        .parse(&format!(r"\p{{{}}}", category.abbr()));
    match hir.map(|hir| hir.into_kind()) {
        Ok(HirKind::Class(Class::Unicode(class))) => class,
        // Zl and Zp have only one char each
        Ok(HirKind::Literal(literal)) => std::str::from_utf8(&literal.0)
            .ok()
            .and_then(|s| s.chars().next())
            .map(|c| ClassUnicode::new([ClassUnicodeRange::new(c, c)]))
            .unwrap_or_else(ClassUnicode::empty),
        _ => ClassUnicode::empty(),
    }
}
