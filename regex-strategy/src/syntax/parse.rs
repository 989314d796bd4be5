use std::collections::BTreeMap;

use itertools::Itertools;
use thiserror::Error;

use super::ast::{AnchorKind, Ast, Category, Flags, LookDirection, Node, Seq, SetItem};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Char index into the pattern.
    pub position: usize,
}

impl ParseError {
    fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unterminated character set")]
    UnterminatedSet,
    #[error("missing ), unterminated subpattern")]
    MissingParenthesis,
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    #[error("missing ), unterminated comment")]
    UnterminatedComment,
    #[error("unexpected end of pattern")]
    UnexpectedEnd,
    #[error("nothing to repeat")]
    NothingToRepeat,
    #[error("multiple repeat")]
    MultipleRepeat,
    #[error("the repetition number is too large")]
    RepeatTooLarge,
    #[error("min repeat greater than max repeat")]
    MinRepeatGreaterThanMax,
    #[error("bad escape {0}")]
    BadEscape(String),
    #[error("bad character range {0}")]
    BadCharacterRange(String),
    #[error("unknown extension {0}")]
    UnknownExtension(String),
    #[error("missing group name")]
    MissingGroupName,
    #[error("missing {0}, unterminated name")]
    UnterminatedName(char),
    #[error("bad character in group name {0:?}")]
    BadGroupName(String),
    #[error("redefinition of group name {0:?}")]
    RedefinedGroupName(String),
    #[error("unknown group name {0:?}")]
    UnknownGroupName(String),
    #[error("invalid group reference {0}")]
    InvalidGroupReference(usize),
    #[error("cannot refer to an open group")]
    OpenGroupReference,
    #[error("conditional backref with more than two branches")]
    TooManyBranches,
    #[error("unknown flag {0:?}")]
    UnknownFlag(char),
    #[error("missing -, : or )")]
    MissingFlagTerminator,
    #[error("flags 'a' and 'u' are incompatible")]
    IncompatibleFlags,
    #[error("cannot turn off flag {0:?}")]
    CannotTurnOffFlag(char),
    #[error("flag turned on and off")]
    FlagTurnedOnAndOff,
    #[error("global flags not at the start of the expression")]
    GlobalFlagsNotAtStart,
}

use ParseErrorKind::*;

const TYPE_FLAGS: Flags = Flags::ASCII_ONLY.union(Flags::UNICODE_MODE);

/// Parse a pattern.
///
/// `flags` are the flags the pattern is compiled with. Inline global flags like `(?i)` are added to them in [`Ast::flags`].
pub fn parse(pattern: &str, flags: Flags) -> Result<Ast, ParseError> {
    let mut parser = Parser::new(pattern, flags);
    let nodes = parser.parse_alternation(None)?;
    if parser.peek().is_some() {
        return Err(ParseError::new(UnbalancedParenthesis, parser.pos));
    }
    if let Some(&(group, position)) = parser
        .conditional_refs
        .iter()
        .find(|(group, _)| *group > parser.group_count)
    {
        return Err(ParseError::new(InvalidGroupReference(group), position));
    }
    if parser.flags.contains(TYPE_FLAGS) {
        return Err(ParseError::new(IncompatibleFlags, 0));
    }
    Ok(Ast {
        nodes,
        flags: parser.flags,
        group_count: parser.group_count,
        group_names: parser.group_names,
    })
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    /// Global flags.
    flags: Flags,
    group_count: usize,
    group_names: BTreeMap<String, usize>,
    open_groups: Vec<usize>,
    /// Groups referenced by conditionals, which may be defined later.
    conditional_refs: Vec<(usize, usize)>,
}

impl Parser {
    fn new(pattern: &str, flags: Flags) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
            flags,
            group_count: 0,
            group_names: BTreeMap::new(),
            open_groups: Vec::new(),
            conditional_refs: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn text(&self, start: usize) -> String {
        self.chars[start..self.pos.min(self.chars.len())]
            .iter()
            .collect()
    }

    /// `None` at the top level, where verbosity follows the global flags.
    fn is_verbose(&self, verbose: Option<bool>) -> bool {
        verbose.unwrap_or(self.flags.contains(Flags::VERBOSE))
    }

    fn parse_alternation(&mut self, verbose: Option<bool>) -> Result<Seq, ParseError> {
        let mut branches = vec![self.parse_concat(verbose, verbose.is_none())?];
        while self.eat('|') {
            branches.push(self.parse_concat(verbose, false)?);
        }
        Ok(if branches.len() == 1 {
            branches.swap_remove(0)
        } else {
            vec![Node::Branch(branches)]
        })
    }

    /// `first`: whether this is the first branch of the top level, where global flags are allowed.
    fn parse_concat(&mut self, verbose: Option<bool>, first: bool) -> Result<Seq, ParseError> {
        let mut seq = Seq::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let start = self.pos;
            self.pos += 1;

            if self.is_verbose(verbose) {
                if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c') {
                    continue;
                }
                if c == '#' {
                    while !matches!(self.bump(), Some('\n') | None) {}
                    continue;
                }
            }

            match c {
                '*' => self.repeat(&mut seq, start, 0, None)?,
                '+' => self.repeat(&mut seq, start, 1, None)?,
                '?' => self.repeat(&mut seq, start, 0, Some(1))?,
                '{' => match self.parse_counted()? {
                    Some((min, max)) => self.repeat(&mut seq, start, min, max)?,
                    None => seq.push(Node::Literal('{')),
                },
                '[' => seq.push(self.parse_set(start)?),
                '.' => seq.push(Node::Any),
                '^' => seq.push(Node::Anchor(AnchorKind::Beginning)),
                '$' => seq.push(Node::Anchor(AnchorKind::End)),
                '(' => {
                    let at_start = first && seq.is_empty();
                    if let Some(node) = self.parse_group(start, verbose, at_start)? {
                        seq.push(node);
                    }
                }
                '\\' => seq.push(self.parse_escape(start)?),
                c => seq.push(Node::Literal(c)),
            }
        }
        Ok(seq)
    }

    fn repeat(
        &mut self,
        seq: &mut Seq,
        start: usize,
        min: u32,
        max: Option<u32>,
    ) -> Result<(), ParseError> {
        let item = match seq.pop() {
            None | Some(Node::Anchor(_)) => {
                return Err(ParseError::new(NothingToRepeat, start))
            }
            Some(Node::Repeat { .. }) => return Err(ParseError::new(MultipleRepeat, start)),
            Some(item) => item,
        };
        let greedy = !self.eat('?');
        let body = match item {
            Node::Subpattern {
                group: None,
                add_flags,
                del_flags,
                body,
            } if add_flags.is_empty() && del_flags.is_empty() => body,
            item => vec![item],
        };
        seq.push(Node::Repeat {
            min,
            max,
            greedy,
            body,
        });
        Ok(())
    }

    /// `{m}`, `{m,}`, `{,n}`, `{m,n}`, after the `{`.
    ///
    /// Returns `None` and rewinds if this is not a quantifier, in which case the `{` is a literal.
    fn parse_counted(&mut self) -> Result<Option<(u32, Option<u32>)>, ParseError> {
        let here = self.pos;
        if self.peek() == Some('}') {
            return Ok(None);
        }
        let lo = self.take_digits();
        let hi = if self.eat(',') {
            self.take_digits()
        } else {
            lo.clone()
        };
        if !self.eat('}') {
            self.pos = here;
            return Ok(None);
        }

        let number = |s: &str| {
            s.parse::<u32>()
                .map_err(|_| ParseError::new(RepeatTooLarge, here))
        };
        let min = if lo.is_empty() { 0 } else { number(&lo)? };
        let max = if hi.is_empty() {
            None
        } else {
            Some(number(&hi)?)
        };
        if max.is_some_and(|max| max < min) {
            return Err(ParseError::new(MinRepeatGreaterThanMax, here));
        }
        Ok(Some((min, max)))
    }

    fn take_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            digits.push(c);
            self.pos += 1;
        }
        digits
    }

    /// After the `\`.
    fn parse_escape(&mut self, start: usize) -> Result<Node, ParseError> {
        let Some(c) = self.bump() else {
            return Err(ParseError::new(BadEscape("(end of pattern)".into()), start));
        };
        if let Some(category) = Category::from_escape(c) {
            return Ok(Node::CharSet(vec![SetItem::Category(category)]));
        }
        Ok(match c {
            'A' => Node::Anchor(AnchorKind::BeginningString),
            'Z' => Node::Anchor(AnchorKind::EndString),
            'b' => Node::Anchor(AnchorKind::Boundary),
            'B' => Node::Anchor(AnchorKind::NonBoundary),
            '1'..='9' => self.parse_backref(c, start)?,
            c => Node::Literal(self.parse_char_escape(c, start)?),
        })
    }

    /// `\1` to `\99`, or a three-digit octal escape like `\141`.
    fn parse_backref(&mut self, first: char, start: usize) -> Result<Node, ParseError> {
        let is_octal = |c: char| c.is_digit(8);
        let mut group = first.to_digit(10).unwrap_or_default() as usize;
        if let Some(second) = self.peek().filter(char::is_ascii_digit) {
            self.pos += 1;
            if is_octal(first) && is_octal(second) && self.peek().is_some_and(is_octal) {
                self.pos += 1;
                return self.octal(start).map(Node::Literal);
            }
            group = group * 10 + second.to_digit(10).unwrap_or_default() as usize;
        }
        if group > self.group_count {
            return Err(ParseError::new(InvalidGroupReference(group), start));
        }
        if self.open_groups.contains(&group) {
            return Err(ParseError::new(OpenGroupReference, start));
        }
        Ok(Node::GroupRef(group))
    }

    /// Escapes that stand for a single char, both inside and outside of sets.
    fn parse_char_escape(&mut self, c: char, start: usize) -> Result<char, ParseError> {
        Ok(match c {
            'a' => '\x07',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            'x' => self.parse_hex(2, start)?,
            'u' => self.parse_hex(4, start)?,
            'U' => self.parse_hex(8, start)?,
            '0' => {
                self.take_octal_digits(2);
                self.octal(start)?
            }
            c if c.is_ascii_alphanumeric() => {
                return Err(ParseError::new(BadEscape(format!("\\{c}")), start))
            }
            c => c,
        })
    }

    fn take_octal_digits(&mut self, max: usize) {
        for _ in 0..max {
            if !self.peek().is_some_and(|c| c.is_digit(8)) {
                break;
            }
            self.pos += 1;
        }
    }

    /// The octal digits are `start + 1..self.pos`.
    fn octal(&self, start: usize) -> Result<char, ParseError> {
        let digits = self.text(start + 1);
        u32::from_str_radix(&digits, 8)
            .ok()
            .filter(|&c| c <= 0o377)
            .and_then(char::from_u32)
            .ok_or_else(|| ParseError::new(BadEscape(format!("\\{digits}")), start))
    }

    fn parse_hex(&mut self, len: usize, start: usize) -> Result<char, ParseError> {
        for _ in 0..len {
            if !self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.pos = (self.pos + 1).min(self.chars.len());
                return Err(ParseError::new(BadEscape(self.text(start)), start));
            }
            self.pos += 1;
        }
        let text = self.text(start);
        u32::from_str_radix(&text[2..], 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| ParseError::new(BadEscape(text), start))
    }

    /// After the `[`.
    fn parse_set(&mut self, start: usize) -> Result<Node, ParseError> {
        let negate = self.eat('^');
        let first = self.pos;
        let mut items = Vec::new();
        loop {
            let item_start = self.pos;
            let c = self
                .bump()
                .ok_or_else(|| ParseError::new(UnterminatedSet, start))?;
            if c == ']' && item_start != first {
                break;
            }
            let lo = self.parse_set_atom(c, item_start)?;
            if !self.eat('-') {
                items.push(lo);
                continue;
            }

            let hi_start = self.pos;
            let c = self
                .bump()
                .ok_or_else(|| ParseError::new(UnterminatedSet, start))?;
            if c == ']' {
                items.push(lo);
                items.push(SetItem::Literal('-'));
                break;
            }
            match (lo, self.parse_set_atom(c, hi_start)?) {
                (SetItem::Literal(lo), SetItem::Literal(hi)) if lo <= hi => {
                    items.push(SetItem::Range(lo, hi))
                }
                _ => {
                    return Err(ParseError::new(
                        BadCharacterRange(self.text(item_start)),
                        item_start,
                    ))
                }
            }
        }

        let mut items: Vec<SetItem> = items.into_iter().unique().collect();
        Ok(match (negate, items.as_slice()) {
            (false, &[SetItem::Literal(c)]) => Node::Literal(c),
            (true, &[SetItem::Literal(c)]) => Node::NotLiteral(c),
            _ => {
                if negate {
                    items.insert(0, SetItem::Negate);
                }
                Node::CharSet(items)
            }
        })
    }

    fn parse_set_atom(&mut self, c: char, start: usize) -> Result<SetItem, ParseError> {
        if c != '\\' {
            return Ok(SetItem::Literal(c));
        }
        let Some(c) = self.bump() else {
            return Err(ParseError::new(UnterminatedSet, start));
        };
        if let Some(category) = Category::from_escape(c) {
            return Ok(SetItem::Category(category));
        }
        Ok(SetItem::Literal(match c {
            'b' => '\x08',
            '1'..='7' => {
                self.take_octal_digits(2);
                self.octal(start)?
            }
            c => self.parse_char_escape(c, start)?,
        }))
    }

    /// After the `(`. Returns `None` for comments and global flags.
    fn parse_group(
        &mut self,
        start: usize,
        verbose: Option<bool>,
        at_start: bool,
    ) -> Result<Option<Node>, ParseError> {
        let mut capturing = true;
        let mut name = None;
        let (mut add_flags, mut del_flags) = (Flags::empty(), Flags::empty());

        if self.eat('?') {
            let c = self
                .bump()
                .ok_or_else(|| ParseError::new(UnexpectedEnd, self.pos))?;
            match c {
                'P' => {
                    if self.eat('<') {
                        name = Some(self.parse_group_name('>')?);
                    } else if self.eat('=') {
                        let name = self.parse_group_name(')')?;
                        return self.named_group_ref(&name, start).map(Some);
                    } else {
                        let c = self.bump().map(String::from).unwrap_or_default();
                        return Err(ParseError::new(UnknownExtension(format!("?P{c}")), start));
                    }
                }
                ':' => capturing = false,
                '#' => loop {
                    match self.bump() {
                        Some(')') => return Ok(None),
                        Some(_) => {}
                        None => return Err(ParseError::new(UnterminatedComment, start)),
                    }
                },
                '=' => return self.parse_lookaround(start, verbose, LookDirection::Ahead, true).map(Some),
                '!' => return self.parse_lookaround(start, verbose, LookDirection::Ahead, false).map(Some),
                '<' => {
                    if self.eat('=') {
                        return self
                            .parse_lookaround(start, verbose, LookDirection::Behind, true)
                            .map(Some);
                    }
                    if self.eat('!') {
                        return self
                            .parse_lookaround(start, verbose, LookDirection::Behind, false)
                            .map(Some);
                    }
                    name = Some(self.parse_group_name('>')?);
                }
                '(' => return self.parse_conditional(start, verbose).map(Some),
                '-' | 'a' | 'i' | 'L' | 'm' | 's' | 't' | 'u' | 'x' => {
                    match self.parse_flags(c)? {
                        None if at_start => return Ok(None),
                        None => return Err(ParseError::new(GlobalFlagsNotAtStart, start)),
                        Some((add, del)) => {
                            capturing = false;
                            add_flags = add;
                            del_flags = del;
                        }
                    }
                }
                c => return Err(ParseError::new(UnknownExtension(format!("?{c}")), start)),
            }
        }

        let group = if capturing {
            Some(self.open_group(name, start)?)
        } else {
            None
        };
        let verbose = (self.is_verbose(verbose) || add_flags.contains(Flags::VERBOSE))
            && !del_flags.contains(Flags::VERBOSE);
        let body = self.parse_alternation(Some(verbose))?;
        self.expect_close(start)?;
        if let Some(group) = group {
            self.open_groups.retain(|&g| g != group);
        }
        Ok(Some(Node::Subpattern {
            group,
            add_flags,
            del_flags,
            body,
        }))
    }

    fn expect_close(&mut self, start: usize) -> Result<(), ParseError> {
        if self.eat(')') {
            Ok(())
        } else {
            Err(ParseError::new(MissingParenthesis, start))
        }
    }

    fn open_group(&mut self, name: Option<String>, start: usize) -> Result<usize, ParseError> {
        let group = self.group_count + 1;
        if let Some(name) = name {
            if self.group_names.contains_key(&name) {
                return Err(ParseError::new(RedefinedGroupName(name), start));
            }
            self.group_names.insert(name, group);
        }
        self.group_count = group;
        self.open_groups.push(group);
        Ok(group)
    }

    fn named_group_ref(&self, name: &str, start: usize) -> Result<Node, ParseError> {
        let group = *self
            .group_names
            .get(name)
            .ok_or_else(|| ParseError::new(UnknownGroupName(name.to_owned()), start))?;
        if self.open_groups.contains(&group) {
            return Err(ParseError::new(OpenGroupReference, start));
        }
        Ok(Node::GroupRef(group))
    }

    fn parse_name(&mut self, terminator: char) -> Result<String, ParseError> {
        let start = self.pos;
        let mut name = String::new();
        loop {
            match self.bump() {
                Some(c) if c == terminator => break,
                Some(c) => name.push(c),
                None => return Err(ParseError::new(UnterminatedName(terminator), start)),
            }
        }
        if name.is_empty() {
            return Err(ParseError::new(MissingGroupName, start));
        }
        Ok(name)
    }

    fn parse_group_name(&mut self, terminator: char) -> Result<String, ParseError> {
        let start = self.pos;
        let name = self.parse_name(terminator)?;
        if !is_identifier(&name) {
            return Err(ParseError::new(BadGroupName(name), start));
        }
        Ok(name)
    }

    fn parse_lookaround(
        &mut self,
        start: usize,
        verbose: Option<bool>,
        direction: LookDirection,
        positive: bool,
    ) -> Result<Node, ParseError> {
        let body = self.parse_alternation(Some(self.is_verbose(verbose)))?;
        self.expect_close(start)?;
        Ok(if positive {
            Node::Assert { direction, body }
        } else {
            Node::AssertNot { direction, body }
        })
    }

    /// After the `(?(`.
    fn parse_conditional(
        &mut self,
        start: usize,
        verbose: Option<bool>,
    ) -> Result<Node, ParseError> {
        let name_start = self.pos;
        let name = self.parse_name(')')?;
        let group = if is_identifier(&name) {
            *self
                .group_names
                .get(&name)
                .ok_or_else(|| ParseError::new(UnknownGroupName(name.clone()), name_start))?
        } else {
            match name.parse::<usize>() {
                Ok(0) => return Err(ParseError::new(InvalidGroupReference(0), name_start)),
                Ok(group) => {
                    self.conditional_refs.push((group, name_start));
                    group
                }
                Err(_) => return Err(ParseError::new(BadGroupName(name), name_start)),
            }
        };

        let verbose = Some(self.is_verbose(verbose));
        let yes = self.parse_concat(verbose, false)?;
        let no = if self.eat('|') {
            let no = self.parse_concat(verbose, false)?;
            if self.peek() == Some('|') {
                return Err(ParseError::new(TooManyBranches, self.pos));
            }
            Some(no)
        } else {
            None
        };
        self.expect_close(start)?;
        Ok(Node::ConditionalGroup { group, yes, no })
    }

    /// `aimsux-imsx:` or `aimsux)`, starting from the first flag char `c`.
    ///
    /// Returns `None` for global flags, which are added to [`Parser::flags`].
    fn parse_flags(&mut self, mut c: char) -> Result<Option<(Flags, Flags)>, ParseError> {
        let mut add = Flags::empty();
        let mut del = Flags::empty();
        if c != '-' {
            loop {
                add |= self.flag(c)?;
                if add.contains(TYPE_FLAGS) {
                    return Err(ParseError::new(IncompatibleFlags, self.pos - 1));
                }
                c = self
                    .bump()
                    .ok_or_else(|| ParseError::new(MissingFlagTerminator, self.pos))?;
                if matches!(c, ')' | '-' | ':') {
                    break;
                }
            }
        }

        if c == ')' {
            self.flags |= add;
            return Ok(None);
        }
        if c == '-' {
            loop {
                c = self
                    .bump()
                    .ok_or_else(|| ParseError::new(MissingFlagTerminator, self.pos))?;
                let flag = self.flag(c)?;
                if flag.intersects(TYPE_FLAGS) {
                    return Err(ParseError::new(CannotTurnOffFlag(c), self.pos - 1));
                }
                del |= flag;
                if self.eat(':') {
                    break;
                }
            }
        }
        if add.intersects(del) {
            return Err(ParseError::new(FlagTurnedOnAndOff, self.pos - 1));
        }
        Ok(Some((add, del)))
    }

    fn flag(&self, c: char) -> Result<Flags, ParseError> {
        Flags::from_letter(c).ok_or_else(|| ParseError::new(UnknownFlag(c), self.pos - 1))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use Node::*;

    fn p(pattern: &str) -> Seq {
        parse(pattern, Flags::empty()).unwrap().nodes
    }

    fn err(pattern: &str) -> ParseErrorKind {
        parse(pattern, Flags::empty()).unwrap_err().kind
    }

    fn lits(s: &str) -> Seq {
        s.chars().map(Literal).collect()
    }

    #[test]
    fn literal() {
        assert_eq!(p("abc"), lits("abc"));
        assert_eq!(p(r"\n\t\x41é\U0001F600"), lits("\n\tAé😀"));
        assert_eq!(p(r"\0\07\141"), lits("\0\x07a"));
        assert_eq!(p(r"\.\*\\"), lits(".*\\"));
        assert_eq!(p("a{"), lits("a{"));
        assert_eq!(p("a{}"), lits("a{}"));
        assert_eq!(p("a{x}"), lits("a{x}"));
        assert_eq!(p("é"), lits("é"));
        assert_eq!(p(""), vec![]);
    }

    #[test]
    fn escape() {
        assert_eq!(p(r"\d"), vec![CharSet(vec![SetItem::Category(Category::Digit)])]);
        assert_eq!(
            p(r"\A\Z\b\B"),
            vec![
                Anchor(AnchorKind::BeginningString),
                Anchor(AnchorKind::EndString),
                Anchor(AnchorKind::Boundary),
                Anchor(AnchorKind::NonBoundary),
            ]
        );
        assert_eq!(err(r"\q"), BadEscape(r"\q".into()));
        assert_eq!(err(r"\x4"), BadEscape(r"\x4".into()));
        assert_eq!(err(r"\U00110000"), BadEscape(r"\U00110000".into()));
        assert_eq!(err("a\\"), BadEscape("(end of pattern)".into()));
        assert_eq!(err(r"\1"), InvalidGroupReference(1));
    }

    #[test]
    fn set() {
        assert_eq!(p("[a]"), vec![Literal('a')]);
        assert_eq!(p("[^a]"), vec![NotLiteral('a')]);
        assert_eq!(p("[aa]"), vec![Literal('a')]);
        assert_eq!(
            p(r"[^a-z0-9_]"),
            vec![CharSet(vec![
                SetItem::Negate,
                SetItem::Range('a', 'z'),
                SetItem::Range('0', '9'),
                SetItem::Literal('_'),
            ])]
        );
        assert_eq!(
            p(r"[\w.-]"),
            vec![CharSet(vec![
                SetItem::Category(Category::Word),
                SetItem::Literal('.'),
                SetItem::Literal('-'),
            ])]
        );
        assert_eq!(p("[]]"), vec![Literal(']')]);
        assert_eq!(p("[^]]"), vec![NotLiteral(']')]);
        assert_eq!(
            p(r"[\b\n\1]"),
            vec![CharSet(vec![
                SetItem::Literal('\x08'),
                SetItem::Literal('\n'),
                SetItem::Literal('\x01'),
            ])]
        );
        assert_eq!(err("[a"), UnterminatedSet);
        assert_eq!(err("[]"), UnterminatedSet);
        assert_eq!(err("[z-a]"), BadCharacterRange("z-a".into()));
        assert_eq!(err(r"[\d-z]"), BadCharacterRange(r"\d-z".into()));
        assert_eq!(err(r"[\A]"), BadEscape(r"\A".into()));
    }

    #[test]
    fn repeat() {
        let repeat = |min, max, greedy, body| Repeat {
            min,
            max,
            greedy,
            body,
        };
        assert_eq!(p("a*"), vec![repeat(0, None, true, lits("a"))]);
        assert_eq!(p("a+?"), vec![repeat(1, None, false, lits("a"))]);
        assert_eq!(p("a??"), vec![repeat(0, Some(1), false, lits("a"))]);
        assert_eq!(p("a{3}"), vec![repeat(3, Some(3), true, lits("a"))]);
        assert_eq!(p("a{2,}"), vec![repeat(2, None, true, lits("a"))]);
        assert_eq!(p("a{,2}"), vec![repeat(0, Some(2), true, lits("a"))]);
        assert_eq!(p("a{,}"), vec![repeat(0, None, true, lits("a"))]);
        assert_eq!(p("(?:ab){1,2}"), vec![repeat(1, Some(2), true, lits("ab"))]);
        assert_eq!(err("*"), NothingToRepeat);
        assert_eq!(err("^*"), NothingToRepeat);
        assert_eq!(err("a|*"), NothingToRepeat);
        assert_eq!(err("a**"), MultipleRepeat);
        assert_eq!(err("a*+"), MultipleRepeat);
        assert_eq!(err("a{3,2}"), MinRepeatGreaterThanMax);
        assert_eq!(err("a{99999999999}"), RepeatTooLarge);
    }

    #[test]
    fn group() {
        let ast = parse(r"(a)(?P<x>b)(?<y>c)(?:d)\1(?P=x)", Flags::empty()).unwrap();
        assert_eq!(ast.group_count, 3);
        assert_eq!(ast.group_names.get("x"), Some(&2));
        assert_eq!(ast.group_names.get("y"), Some(&3));
        dbg!(&ast.nodes);
        assert_eq!(ast.nodes.len(), 6);
        assert_eq!(ast.nodes[4], GroupRef(1));
        assert_eq!(ast.nodes[5], GroupRef(2));
        assert_eq!(
            ast.nodes[3],
            Subpattern {
                group: None,
                add_flags: Flags::empty(),
                del_flags: Flags::empty(),
                body: lits("d"),
            }
        );

        assert_eq!(err("(a"), MissingParenthesis);
        assert_eq!(err("a)"), UnbalancedParenthesis);
        assert_eq!(err(r"(a\1)"), OpenGroupReference);
        assert_eq!(err("(?P<x>a(?P=x))"), OpenGroupReference);
        assert_eq!(err("(?P=x)"), UnknownGroupName("x".into()));
        assert_eq!(err("(?P<1>a)"), BadGroupName("1".into()));
        assert_eq!(err("(?P<>a)"), MissingGroupName);
        assert_eq!(err("(?P<x>a)(?P<x>b)"), RedefinedGroupName("x".into()));
        assert_eq!(err("(?Px)"), UnknownExtension("?Px".into()));
        assert_eq!(err("(?@)"), UnknownExtension("?@".into()));
        assert_eq!(err("(?#comment"), UnterminatedComment);
        assert_eq!(p("a(?#comment)b"), lits("ab"));
    }

    #[test]
    fn lookaround() {
        assert_eq!(
            p("(?=a)(?!b)(?<=c)(?<!d)"),
            vec![
                Assert {
                    direction: LookDirection::Ahead,
                    body: lits("a")
                },
                AssertNot {
                    direction: LookDirection::Ahead,
                    body: lits("b")
                },
                Assert {
                    direction: LookDirection::Behind,
                    body: lits("c")
                },
                AssertNot {
                    direction: LookDirection::Behind,
                    body: lits("d")
                },
            ]
        );
    }

    #[test]
    fn branch() {
        assert_eq!(p("ab|cd|"), vec![Branch(vec![lits("ab"), lits("cd"), vec![]])]);
    }

    #[test]
    fn conditional() {
        let ast = parse("^(<)?a(?(1)>)$", Flags::empty()).unwrap();
        assert_eq!(
            ast.nodes[3],
            ConditionalGroup {
                group: 1,
                yes: lits(">"),
                no: None,
            }
        );
        assert_eq!(
            p("(?P<q>')?(?(q)a|b)")[1],
            ConditionalGroup {
                group: 1,
                yes: lits("a"),
                no: Some(lits("b")),
            }
        );
        assert_eq!(err("(a)(?(1)a|b|c)"), TooManyBranches);
        assert_eq!(err("(?(2)a)(b)"), InvalidGroupReference(2));
        assert_eq!(err("(?(0)a)"), InvalidGroupReference(0));
        assert_eq!(err("(?(x)a)"), UnknownGroupName("x".into()));
        assert_eq!(err("(?(1x)a)"), BadGroupName("1x".into()));
    }

    #[test]
    fn flags() {
        let ast = parse("(?i)a", Flags::empty()).unwrap();
        assert_eq!(ast.flags, Flags::CASE_INSENSITIVE);
        assert_eq!(ast.nodes, lits("a"));

        let ast = parse("(?#c)(?s)(?m)a", Flags::ASCII_ONLY).unwrap();
        assert_eq!(
            ast.flags,
            Flags::DOT_ALL | Flags::MULTILINE | Flags::ASCII_ONLY
        );

        assert_eq!(
            p("(?i)a(?-i:b)")[1],
            Subpattern {
                group: None,
                add_flags: Flags::empty(),
                del_flags: Flags::CASE_INSENSITIVE,
                body: lits("b"),
            }
        );
        assert_eq!(
            p("(?a-i:b)")[0],
            Subpattern {
                group: None,
                add_flags: Flags::ASCII_ONLY,
                del_flags: Flags::CASE_INSENSITIVE,
                body: lits("b"),
            }
        );

        assert_eq!(err("a(?i)"), GlobalFlagsNotAtStart);
        assert_eq!(err("(?au)"), IncompatibleFlags);
        assert_eq!(err("(?L)"), UnknownFlag('L'));
        assert_eq!(err("(?i-i:a)"), FlagTurnedOnAndOff);
        assert_eq!(err("(?-a:a)"), CannotTurnOffFlag('a'));
        assert_eq!(err("(?-:a)"), UnknownFlag(':'));
        assert_eq!(err("(?i"), MissingFlagTerminator);
        assert_eq!(
            parse("(?u)a", Flags::ASCII_ONLY).unwrap_err().kind,
            IncompatibleFlags
        );
    }

    #[test]
    fn verbose() {
        assert_eq!(p("(?x) a b # comment\n c"), lits("abc"));
        assert_eq!(p(r"(?x)a\ b[ ]"), lits("a b "));
        assert_eq!(
            parse("a b", Flags::VERBOSE).unwrap().nodes,
            lits("ab")
        );
        assert_eq!(p("(?x:a b) c"), {
            let mut seq = vec![Subpattern {
                group: None,
                add_flags: Flags::VERBOSE,
                del_flags: Flags::empty(),
                body: lits("ab"),
            }];
            seq.extend(lits(" c"));
            seq
        });
        assert_eq!(
            parse("(?-x:a b)", Flags::VERBOSE).unwrap().nodes[0],
            Subpattern {
                group: None,
                add_flags: Flags::empty(),
                del_flags: Flags::VERBOSE,
                body: lits("a b"),
            }
        );
        // whitespace between an item and its quantifier
        assert_eq!(
            p("(?x)a *"),
            vec![Repeat {
                min: 0,
                max: None,
                greedy: true,
                body: lits("a"),
            }]
        );
    }

    #[test]
    fn error_position() {
        let e = parse("ab(c", Flags::empty()).unwrap_err();
        assert_eq!(e.position, 2);
        assert_eq!(e.to_string(), "missing ), unterminated subpattern at position 2");
    }
}
