/*!
Compile a parsed pattern into a [`Strategy`].

Node | Strategy
--- | ---
`abc` | `just("abc")`, or `sampled_from(["a", "A"])` per char if case-insensitive
`[^a]` | `characters()` without `a`
`[...]` | see [`CharactersBuilder`]
`.` | `characters()`, without `\n` unless `s` is set
`$` | `one_of([just(""), just("\n")])`
`^`, `\A`, `\Z`, `\b`, `\B` | `just("")`
`(...)` | the body, [`shared()`](Strategy::shared) under the group index
`\1` | the [`shared()`](Strategy::shared) strategy of group 1
`(?=...)`, `(?<=...)` | the body
`(?!...)`, `(?<!...)` | `just("")`
`a\|b` | `one_of()`
`x{m,n}` | `repeat(x, m, n)`, greedy or not
`(?(1)yes\|no)` | `one_of([yes, no])`

Lookarounds and conditionals are approximated. The strategy can produce strings the pattern does not match, and [`from_regex()`](crate::from_regex) filters those out.
*/
use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use regex_strategy_unicode::case::CharCaseExt;

use crate::{
    error::Error,
    strategy::Strategy,
    syntax::{
        ast::{AnchorKind, Node, SetItem},
        Flags,
    },
};

mod charset;

pub use charset::CharactersBuilder;

/// Flags in effect at a point of the pattern.
///
/// Passed by value, so leaving a `(?flags:...)` scope restores the outer flags on every path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Context {
    flags: Flags,
}

impl Context {
    pub fn new(flags: Flags) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn with_local_flags(self, add: Flags, del: Flags) -> Self {
        Self {
            flags: self.flags.scoped(add, del),
        }
    }

    pub fn case_insensitive(&self) -> bool {
        self.flags.contains(Flags::CASE_INSENSITIVE)
    }

    pub fn unicode(&self) -> bool {
        self.flags.is_unicode()
    }
}

/// Strategies of the capturing groups compiled so far.
#[derive(Debug, Clone, Default)]
pub struct Groups {
    strategies: BTreeMap<usize, Strategy>,
}

impl Groups {
    /// The first registration of a group wins.
    pub fn register(&mut self, group: usize, strategy: Strategy) {
        self.strategies.entry(group).or_insert(strategy);
    }

    pub fn lookup(&self, group: usize) -> Result<&Strategy, Error> {
        self.strategies
            .get(&group)
            .ok_or(Error::UnknownGroupReference(group))
    }
}

#[derive(Debug, Default)]
pub struct Compiler {
    groups: Groups,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a sequence of nodes into the concatenation of their strategies.
    pub fn compile(&mut self, nodes: &[Node], ctx: Context) -> Result<Strategy, Error> {
        let fuse = !ctx.case_insensitive();
        let mut strategies = Vec::new();
        for (is_literal, group) in &nodes
            .iter()
            .chunk_by(|node| fuse && matches!(node, Node::Literal(_)))
        {
            if is_literal {
                let s: String = group
                    .map(|node| match node {
                        Node::Literal(c) => *c,
                        _ => unreachable!(),
                    })
                    .collect();
                strategies.push(Strategy::just(s));
            } else {
                for node in group {
                    strategies.push(self.compile_node(node, ctx)?);
                }
            }
        }
        Ok(Strategy::concat(strategies))
    }

    fn compile_node(&mut self, node: &Node, ctx: Context) -> Result<Strategy, Error> {
        Ok(match node {
            Node::Literal(c) => {
                if ctx.case_insensitive() {
                    let (lower, upper) = c.to_mono_case_pair();
                    Strategy::sampled_from([lower, upper].into_iter().unique().map(String::from))
                } else {
                    Strategy::just(*c)
                }
            }
            Node::NotLiteral(c) => {
                let blacklist: BTreeSet<char> = if ctx.case_insensitive() {
                    let (lower, upper) = c.to_mono_case_pair();
                    [lower, upper].into()
                } else {
                    [*c].into()
                };
                Strategy::characters()
                    .blacklist_characters(blacklist)
                    .call()
            }
            Node::CharSet(items) => self.compile_set(node, items, ctx)?,
            Node::Any => {
                if ctx.flags().contains(Flags::DOT_ALL) {
                    Strategy::characters().call()
                } else {
                    Strategy::characters()
                        .blacklist_characters(['\n'].into())
                        .call()
                }
            }
            Node::Anchor(AnchorKind::End) => {
                Strategy::one_of([Strategy::just(""), Strategy::just("\n")])
            }
            Node::Anchor(
                AnchorKind::Beginning
                | AnchorKind::BeginningString
                | AnchorKind::EndString
                | AnchorKind::Boundary
                | AnchorKind::NonBoundary,
            ) => Strategy::just(""),
            Node::Subpattern {
                group,
                add_flags,
                del_flags,
                body,
            } => {
                let strategy = self.compile(body, ctx.with_local_flags(*add_flags, *del_flags))?;
                match group {
                    Some(group) => {
                        self.groups.register(*group, strategy.clone());
                        strategy.shared(group.to_string())
                    }
                    None => strategy,
                }
            }
            Node::GroupRef(group) => self
                .groups
                .lookup(*group)?
                .clone()
                .shared(group.to_string()),
            Node::Assert { body, .. } => self.compile(body, ctx)?,
            Node::AssertNot { .. } => Strategy::just(""),
            Node::Branch(branches) => Strategy::one_of(
                branches
                    .iter()
                    .map(|branch| self.compile(branch, ctx))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Node::Repeat { min, max, body, .. } => {
                Strategy::repeat(self.compile(body, ctx)?, *min, *max)
            }
            Node::ConditionalGroup { yes, no, .. } => {
                let yes = self.compile(yes, ctx)?;
                let no = match no {
                    Some(no) => self.compile(no, ctx)?,
                    None => Strategy::just(""),
                };
                Strategy::one_of([yes, no])
            }
        })
    }

    fn compile_set(&self, node: &Node, items: &[SetItem], ctx: Context) -> Result<Strategy, Error> {
        let (negate, items) = match items {
            [SetItem::Negate, rest @ ..] => (true, rest),
            _ => (false, items),
        };
        let mut builder = CharactersBuilder::new(negate, ctx.flags());
        for item in items {
            match *item {
                SetItem::Negate => {
                    return Err(Error::unrecognized(node, "negation not at the start of the set"))
                }
                SetItem::Literal(c) => builder.add_char(c),
                SetItem::Range(lo, hi) if lo > hi => {
                    return Err(Error::unrecognized(
                        node,
                        format!("bad character range {lo}-{hi}"),
                    ))
                }
                SetItem::Range(lo, hi) => builder.add_chars(lo..=hi),
                SetItem::Category(category) => builder.add_category(category),
            }
        }
        Ok(builder.into_strategy())
    }
}
