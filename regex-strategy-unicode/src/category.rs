/*!
Unicode [general categories](https://www.unicode.org/reports/tr44/#General_Category_Values).

[`GeneralCategory`] only names a category. Resolving a category to the code points it contains is left to the consumer (e.g. via `regex-syntax`'s Unicode tables), so this crate stays table-free.

The sets below are the building blocks of the Perl classes:

| Class | Categories | Extra chars |
|-------|------------|-------------|
| `\d`  | [`DIGIT`] | |
| `\s`  | [`SPACE`] | [`SPACE_CHARS`] (+ [`UNICODE_SPACE_CHARS`] in Unicode mode) |
| `\w`  | [`WORD`]  | `_` |

The negated classes use [`ALL`] minus the set, with the extra chars excluded instead.
*/
use std::fmt;

/// A Unicode general category, plus the `LC` (cased letter) alias.
///
/// Ordered by abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeneralCategory {
    /// `Cc`
    Control,
    /// `Cf`
    Format,
    /// `Cn`
    Unassigned,
    /// `Co`
    PrivateUse,
    /// `Cs`
    Surrogate,
    /// `LC`, i.e. `Ll | Lt | Lu`
    CasedLetter,
    /// `Ll`
    LowercaseLetter,
    /// `Lm`
    ModifierLetter,
    /// `Lo`
    OtherLetter,
    /// `Lt`
    TitlecaseLetter,
    /// `Lu`
    UppercaseLetter,
    /// `Mc`
    SpacingMark,
    /// `Me`
    EnclosingMark,
    /// `Mn`
    NonspacingMark,
    /// `Nd`
    DecimalNumber,
    /// `Nl`
    LetterNumber,
    /// `No`
    OtherNumber,
    /// `Pc`
    ConnectorPunctuation,
    /// `Pd`
    DashPunctuation,
    /// `Pe`
    ClosePunctuation,
    /// `Pf`
    FinalPunctuation,
    /// `Pi`
    InitialPunctuation,
    /// `Po`
    OtherPunctuation,
    /// `Ps`
    OpenPunctuation,
    /// `Sc`
    CurrencySymbol,
    /// `Sk`
    ModifierSymbol,
    /// `Sm`
    MathSymbol,
    /// `So`
    OtherSymbol,
    /// `Zl`
    LineSeparator,
    /// `Zp`
    ParagraphSeparator,
    /// `Zs`
    SpaceSeparator,
}

use GeneralCategory::*;

impl GeneralCategory {
    pub const VARIANTS: [GeneralCategory; 31] = [
        Control,
        Format,
        Unassigned,
        PrivateUse,
        Surrogate,
        CasedLetter,
        LowercaseLetter,
        ModifierLetter,
        OtherLetter,
        TitlecaseLetter,
        UppercaseLetter,
        SpacingMark,
        EnclosingMark,
        NonspacingMark,
        DecimalNumber,
        LetterNumber,
        OtherNumber,
        ConnectorPunctuation,
        DashPunctuation,
        ClosePunctuation,
        FinalPunctuation,
        InitialPunctuation,
        OtherPunctuation,
        OpenPunctuation,
        CurrencySymbol,
        ModifierSymbol,
        MathSymbol,
        OtherSymbol,
        LineSeparator,
        ParagraphSeparator,
        SpaceSeparator,
    ];

    /// The two-letter abbreviation, e.g. `Nd`.
    pub const fn abbr(self) -> &'static str {
        match self {
            Control => "Cc",
            Format => "Cf",
            Unassigned => "Cn",
            PrivateUse => "Co",
            Surrogate => "Cs",
            CasedLetter => "LC",
            LowercaseLetter => "Ll",
            ModifierLetter => "Lm",
            OtherLetter => "Lo",
            TitlecaseLetter => "Lt",
            UppercaseLetter => "Lu",
            SpacingMark => "Mc",
            EnclosingMark => "Me",
            NonspacingMark => "Mn",
            DecimalNumber => "Nd",
            LetterNumber => "Nl",
            OtherNumber => "No",
            ConnectorPunctuation => "Pc",
            DashPunctuation => "Pd",
            ClosePunctuation => "Pe",
            FinalPunctuation => "Pf",
            InitialPunctuation => "Pi",
            OtherPunctuation => "Po",
            OpenPunctuation => "Ps",
            CurrencySymbol => "Sc",
            ModifierSymbol => "Sk",
            MathSymbol => "Sm",
            OtherSymbol => "So",
            LineSeparator => "Zl",
            ParagraphSeparator => "Zp",
            SpaceSeparator => "Zs",
        }
    }
}

impl fmt::Display for GeneralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

/// Every category a character class may draw from. `Cc` and `Cs` are left out.
pub const ALL: &[GeneralCategory] = &[
    Format,
    Unassigned,
    PrivateUse,
    CasedLetter,
    LowercaseLetter,
    ModifierLetter,
    OtherLetter,
    TitlecaseLetter,
    UppercaseLetter,
    SpacingMark,
    EnclosingMark,
    NonspacingMark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    ConnectorPunctuation,
    DashPunctuation,
    ClosePunctuation,
    FinalPunctuation,
    InitialPunctuation,
    OtherPunctuation,
    OpenPunctuation,
    CurrencySymbol,
    ModifierSymbol,
    MathSymbol,
    OtherSymbol,
    LineSeparator,
    ParagraphSeparator,
    SpaceSeparator,
];

pub const DIGIT: &[GeneralCategory] = &[DecimalNumber];

pub const SPACE: &[GeneralCategory] = &[SpaceSeparator, LineSeparator, ParagraphSeparator];

pub const WORD: &[GeneralCategory] = &[
    CasedLetter,
    LowercaseLetter,
    ModifierLetter,
    OtherLetter,
    TitlecaseLetter,
    UppercaseLetter,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
];

/// ASCII whitespace.
pub const SPACE_CHARS: &str = " \t\n\r\x0c\x0b";

/// Control-range whitespace that only counts in Unicode mode, on top of [`SPACE_CHARS`].
pub const UNICODE_SPACE_CHARS: &str = "\x1c\x1d\x1e\x1f\u{85}";

/// Categories in [`ALL`] but not in `except`.
pub fn all_except(except: &[GeneralCategory]) -> impl Iterator<Item = GeneralCategory> + '_ {
    ALL.iter().copied().filter(move |c| !except.contains(c))
}
