/*!
Pattern syntax: a [parser](parse()) into an [`Ast`] and a [printer](print::to_matcher_pattern) into a [`fancy_regex`] pattern.

The supported syntax is Python `re` flavoured, documented below.

### Matching one character

<pre class="rust">
.             any character except new line (includes new line with s flag)
[abc]         a set of characters
[^abc]        any character not in the set
[a-z]         a range of characters, can be mixed with the above
\d            digit (\p{Nd}, or [0-9] with a flag)
\D            not digit
\s            whitespace (\p{Zs}, \p{Zl}, \p{Zp} and " \t\n\r\f\v\x1c\x1d\x1e\x1f\x85", or " \t\n\r\f\v" with a flag)
\S            not whitespace
\w            word character (letters, numbers and _, or [0-9A-Za-z_] with a flag)
\W            not word character
</pre>

`]` right after `[` or `[^` is a literal, and so is `-` before the closing `]`.

### Escapes

<pre class="rust">
\a \f \n \r \t \v   control characters
\\ \. \* ...        escaped punctuation
\x7F                hex (exactly 2 digits)
\u007F              hex (exactly 4 digits)
\U0001F600          hex (exactly 8 digits)
\0 \07 \141         octal
</pre>

Unknown escapes of ASCII letters and digits are errors.

### Composites, repetitions and empty matches

<pre class="rust">
xy        concatenation
x|y       alternation
x*        zero or more of x (greedy)
x+        one or more of x (greedy)
x?        zero or one of x (greedy)
x{n}      exactly n x
x{n,}     at least n x
x{,m}     at most m x
x{n,m}    at least n x and at most m x
x*?       lazy, and so on for the others
^         beginning of text (or line with m flag)
$         end of text, or before a new line at the end of text (or end of line with m flag)
\A        beginning of text
\Z        end of text
\b        word boundary
\B        not a word boundary
</pre>

A `{` that does not start a valid repetition is a literal.

### Groups

<pre class="rust">
(exp)             numbered capture group
(?P&lt;name&gt;exp)     named (also numbered) capture group
(?&lt;name&gt;exp)      same as above
(?:exp)           non-capturing group
\1 .. \99         back reference to a numbered group
(?P=name)         back reference to a named group
(?=exp)           look-ahead
(?!exp)           negative look-ahead
(?&lt;=exp)          look-behind
(?&lt;!exp)          negative look-behind
(?(1)yes|no)      yes if group 1 matched, otherwise no (which can be omitted)
(?(name)yes|no)   same, for a named group
(?#comment)       comment
</pre>

### Flags

<pre class="rust">
(?aimsux)              set global flags, only allowed at the start of the pattern
(?aimsux-imsx:exp)     set or clear flags for exp

a     ASCII-only \d, \s, \w
i     case-insensitive: letters match both upper and lower case
m     multi-line mode: ^ and $ match begin/end of line
s     allow . to match \n
u     Unicode (the default, cannot be combined with a)
x     verbose mode: ignore whitespace and allow # comments outside of sets
</pre>
*/
pub mod ast;
mod parse;
pub mod print;

pub use ast::{Ast, Flags};
pub use parse::{parse, ParseError, ParseErrorKind};
