/*!
Print an [`Ast`] as a [`fancy_regex`] pattern with the same matching semantics.

The printed pattern is what [`Pattern::is_match()`](crate::Pattern::is_match) runs. The differences between the two dialects are resolved while printing:
- `\d`, `\s`, `\w` and their negations are spelled out, as Unicode general categories or ASCII ranges depending on the `a` flag in effect.
- `$` without `m` is `(?=\n?\z)`, `\Z` is `\z`, and `^` without `m` is `\A`.
- `s` and `m` are applied while printing. Only `i` is left for the matcher.
- Back references are wrapped as `(?:\1)` so they cannot run into a following digit.

One difference is left in place: `i` uses the matcher's simple case folding, which does not pair every char with its [mono case](regex_strategy_unicode::case) counterparts. E.g. `(?i)İ` does not match `i`. Such strings can still be generated, and are rejected by the final filter.

The result is not meant to be read by humans.
*/
use super::ast::{AnchorKind, Ast, Category, Flags, LookDirection, Node, SetItem};

/// Print `ast` as a pattern for [`fancy_regex::Regex`].
pub fn to_matcher_pattern(ast: &Ast) -> String {
    let mut out = String::new();
    if ast.flags.contains(Flags::CASE_INSENSITIVE) {
        out.push_str("(?i)");
    }
    print_seq(&ast.nodes, ast.flags, &mut out);
    out
}

fn print_seq(nodes: &[Node], flags: Flags, out: &mut String) {
    for node in nodes {
        print_node(node, flags, out);
    }
}

fn print_node(node: &Node, flags: Flags, out: &mut String) {
    match node {
        Node::Literal(c) => push_literal(*c, out),
        Node::NotLiteral(c) => {
            out.push_str("[^");
            push_literal(*c, out);
            out.push(']');
        }
        Node::CharSet(items) => print_set(items, flags, out),
        Node::Any if flags.contains(Flags::DOT_ALL) => out.push_str("(?s:.)"),
        Node::Any => out.push('.'),
        Node::Anchor(kind) => out.push_str(match kind {
            AnchorKind::Beginning if flags.contains(Flags::MULTILINE) => "(?m:^)",
            AnchorKind::Beginning | AnchorKind::BeginningString => r"\A",
            AnchorKind::End if flags.contains(Flags::MULTILINE) => "(?m:$)",
            AnchorKind::End => r"(?=\n?\z)",
            AnchorKind::EndString => r"\z",
            AnchorKind::Boundary => r"\b",
            AnchorKind::NonBoundary => r"\B",
        }),
        Node::Subpattern {
            group,
            add_flags,
            del_flags,
            body,
        } => {
            let inner = flags.scoped(*add_flags, *del_flags);
            match group {
                Some(_) => out.push('('),
                None => {
                    out.push_str("(?");
                    if add_flags.contains(Flags::CASE_INSENSITIVE) {
                        out.push('i');
                    }
                    if del_flags.contains(Flags::CASE_INSENSITIVE) {
                        out.push_str("-i");
                    }
                    out.push(':');
                }
            }
            print_seq(body, inner, out);
            out.push(')');
        }
        Node::GroupRef(group) => {
            out.push_str(&format!(r"(?:\{group})"));
        }
        Node::Assert { direction, body } | Node::AssertNot { direction, body } => {
            let positive = matches!(node, Node::Assert { .. });
            out.push_str(match (direction, positive) {
                (LookDirection::Ahead, true) => "(?=",
                (LookDirection::Ahead, false) => "(?!",
                (LookDirection::Behind, true) => "(?<=",
                (LookDirection::Behind, false) => "(?<!",
            });
            print_seq(body, flags, out);
            out.push(')');
        }
        Node::Branch(branches) => {
            out.push_str("(?:");
            for (i, branch) in branches.iter().enumerate() {
                if i != 0 {
                    out.push('|');
                }
                print_seq(branch, flags, out);
            }
            out.push(')');
        }
        Node::Repeat {
            min,
            max,
            greedy,
            body,
        } => {
            out.push_str("(?:");
            print_seq(body, flags, out);
            out.push(')');
            match max {
                Some(max) if max == min => out.push_str(&format!("{{{min}}}")),
                Some(max) => out.push_str(&format!("{{{min},{max}}}")),
                None => out.push_str(&format!("{{{min},}}")),
            }
            if !greedy {
                out.push('?');
            }
        }
        Node::ConditionalGroup { group, yes, no } => {
            out.push_str(&format!("(?({group})(?:"));
            print_seq(yes, flags, out);
            out.push(')');
            if let Some(no) = no {
                out.push_str("|(?:");
                print_seq(no, flags, out);
                out.push(')');
            }
            out.push(')');
        }
    }
}

fn print_set(items: &[SetItem], flags: Flags, out: &mut String) {
    out.push('[');
    for item in items {
        match *item {
            SetItem::Negate => out.push('^'),
            SetItem::Literal(c) => push_literal(c, out),
            SetItem::Range(lo, hi) => {
                push_literal(lo, out);
                out.push('-');
                push_literal(hi, out);
            }
            SetItem::Category(category) => out.push_str(category_class(category, flags)),
        }
    }
    out.push(']');
}

/// A bracketed class, which can be nested in another class.
fn category_class(category: Category, flags: Flags) -> &'static str {
    if flags.is_unicode() {
        match category {
            Category::Digit => r"[\p{Nd}]",
            Category::NotDigit => r"[^\p{Nd}]",
            Category::Space => r"[\p{Zs}\p{Zl}\p{Zp} \t\n\r\x0C\x0B\x1C-\x1F\x{85}]",
            Category::NotSpace => r"[^\p{Zs}\p{Zl}\p{Zp} \t\n\r\x0C\x0B\x1C-\x1F\x{85}]",
            Category::Word => r"[\p{L}\p{N}_]",
            Category::NotWord => r"[^\p{L}\p{N}_]",
        }
    } else {
        match category {
            Category::Digit => "[0-9]",
            Category::NotDigit => "[^0-9]",
            Category::Space => r"[ \t\n\r\x0C\x0B]",
            Category::NotSpace => r"[^ \t\n\r\x0C\x0B]",
            Category::Word => "[0-9A-Z_a-z]",
            Category::NotWord => "[^0-9A-Z_a-z]",
        }
    }
}

fn push_literal(c: char, out: &mut String) {
    if regex_syntax::is_meta_character(c) {
        out.push('\\');
        out.push(c);
    } else if c.is_control() || (c.is_whitespace() && c != ' ') {
        out.push_str(&format!(r"\x{{{:X}}}", c as u32));
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn print(pattern: &str) -> String {
        let ast = parse(pattern, Flags::empty()).unwrap();
        let printed = to_matcher_pattern(&ast);
        println!("{pattern} => {printed}");
        fancy_regex::Regex::new(&printed).unwrap();
        printed
    }

    #[test]
    fn literal() {
        assert_eq!(print("abc"), "abc");
        assert_eq!(print(r"a\.b\*"), r"a\.b\*");
        assert_eq!(print(r"\n\t "), r"\x{A}\x{9} ");
        assert_eq!(print("[^a]"), "[^a]");
    }

    #[test]
    fn anchor() {
        assert_eq!(print("^a$"), r"\Aa(?=\n?\z)");
        assert_eq!(print(r"(?m)^a$"), "(?m:^)a(?m:$)");
        assert_eq!(print(r"\Aa\Z"), r"\Aa\z");
    }

    #[test]
    fn category() {
        assert_eq!(print(r"\d"), r"[[\p{Nd}]]");
        assert_eq!(print(r"(?a)\d"), "[[0-9]]");
        assert_eq!(print(r"[^\W]"), r"[^[^\p{L}\p{N}_]]");
        print(r"[\s\S]");
        print(r"(?a)[a-z\s\w]");
    }

    #[test]
    fn group() {
        assert_eq!(print(r"(a)\1"), r"(a)(?:\1)");
        assert_eq!(print(r"(a)\1 0"), r"(a)(?:\1) 0");
        assert_eq!(print(r"(?i)a(?-i:b)"), "(?i)a(?-i:b)");
        assert_eq!(print(r"(?s:.)."), "(?:(?s:.)).");
        assert_eq!(print(r"ab|cd"), "(?:ab|cd)");
        assert_eq!(print(r"a*?b{2}c{1,}"), "(?:a){0,}?(?:b){2}(?:c){1,}");
        assert_eq!(print(r"(?=a)(?<!b)"), "(?=a)(?<!b)");
        assert_eq!(print(r"(<)?a(?(1)>|!)"), "(?:(<)){0,1}a(?(1)(?:>)|(?:!))");
        print(r"^(<)?a(?(1)>)$");
    }

    #[test]
    fn matches() {
        let re = |pattern: &str| {
            fancy_regex::Regex::new(&format!(
                r"\A(?:{})",
                to_matcher_pattern(&parse(pattern, Flags::empty()).unwrap())
            ))
            .unwrap()
        };
        let is_match = |pattern: &str, s: &str| re(pattern).is_match(s).unwrap();

        assert!(is_match("abc$", "abc"));
        assert!(is_match("abc$", "abc\n"));
        assert!(!is_match("abc$", "abc\n\n"));
        assert!(is_match(r"\w", "é"));
        assert!(is_match(r"\w", "_"));
        assert!(!is_match(r"(?a)\w", "é"));
        assert!(is_match(r"\s", "\u{85}"));
        assert!(is_match(r"\d", "٣"));
        assert!(!is_match(r"(?a)\d", "٣"));
        assert!(!is_match(".", "\n"));
        assert!(is_match("(?s).", "\n"));
        assert!(is_match(r#"([\'"])[a-z]+\1"#, "'ab'"));
        assert!(!is_match(r#"([\'"])[a-z]+\1"#, "'ab\""));
        assert!(is_match("^(<)?a(?(1)>)$", "<a>"));
        assert!(is_match("^(<)?a(?(1)>)$", "a"));
        assert!(!is_match("^(<)?a(?(1)>)$", "<a"));
        assert!(!is_match("a^b", "ab"));
    }
}
