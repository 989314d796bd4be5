/*!
## Mono case mapping
The "mono" case mappings in this module refer to the single-char lowercase and uppercase mappings of a Unicode character, i.e. what a case-insensitive character set can actually hold.

- [`to_mono_lowercase()`](CharCaseExt::to_mono_lowercase): the same as [`char::to_lowercase()`], except that the only multi-char mapping `İ` -> `i\u{307}` is cut to its first char `i`. This equals Unicode's simple lowercase mapping.
- [`to_mono_uppercase()`](CharCaseExt::to_mono_uppercase): the same as [`char::to_uppercase()`] if the result is a single char, otherwise the char itself. For example, `ß` stays `ß` instead of becoming `SS`.

Compared to the simple uppercase mapping in [UnicodeData.txt](https://www.unicode.org/Public/16.0.0/ucd/UnicodeData.txt), the only difference is the Greek letters with iota subscript (e.g. `ᾳ`), whose simple uppercase is a titlecase letter (`ᾼ`) but are kept unchanged here.
*/
use crate::Sealed;

pub trait CharCaseExt: Sealed {
    /// See [mono case mapping](super::case) for details.
    fn to_mono_lowercase(self) -> char;

    /// See [mono case mapping](super::case) for details.
    fn to_mono_uppercase(self) -> char;

    /// `(lowercase, uppercase)`. Both are the char itself if it is uncased.
    fn to_mono_case_pair(self) -> (char, char);
}

impl CharCaseExt for char {
    #[inline]
    fn to_mono_lowercase(self) -> char {
        if self.is_ascii() {
            return self.to_ascii_lowercase();
        }
        // `to_lowercase()` always yields at least one char
        self.to_lowercase().next().unwrap_or(self)
    }

    #[inline]
    fn to_mono_uppercase(self) -> char {
        if self.is_ascii() {
            return self.to_ascii_uppercase();
        }
        let mut upper = self.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(c), None) => c,
            _ => self,
        }
    }

    fn to_mono_case_pair(self) -> (char, char) {
        (self.to_mono_lowercase(), self.to_mono_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!('A'.to_mono_lowercase(), 'a');
        assert_eq!('a'.to_mono_uppercase(), 'A');
        assert_eq!('!'.to_mono_case_pair(), ('!', '!'));
        assert_eq!('7'.to_mono_case_pair(), ('7', '7'));
    }

    #[test]
    fn unicode() {
        assert_eq!('Σ'.to_mono_lowercase(), 'σ');
        assert_eq!('σ'.to_mono_uppercase(), 'Σ');
        assert_eq!('ς'.to_mono_uppercase(), 'Σ');
        assert_eq!('う'.to_mono_case_pair(), ('う', 'う'));
    }

    #[test]
    fn multi_char_mappings() {
        assert_eq!("İ".to_lowercase(), "i\u{307}");
        assert_eq!('İ'.to_mono_lowercase(), 'i');

        assert_eq!("ß".to_uppercase(), "SS");
        assert_eq!('ß'.to_mono_uppercase(), 'ß');
        assert_eq!('ﬀ'.to_mono_case_pair(), ('ﬀ', 'ﬀ'));
    }
}
