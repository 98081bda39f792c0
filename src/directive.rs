//! The directive table of the format language.
//!
//! # Directive syntax
//!
//! | Directive      | Matches                                          | Value        |
//! |----------------|--------------------------------------------------|--------------|
//! | `%c`           | One character                                    | char         |
//! | `%Nc`          | Exactly N characters                             | string       |
//! | `%d`, `%Nd`    | Signed decimal integer (N digits)                | int          |
//! | `%u`           | Unsigned decimal integer                         | int          |
//! | `%f %e %g %E`  | Float with optional exponent                     | float        |
//! | `%s`           | Run of non-whitespace                            | string       |
//! | `%x`, `%X`     | Hex integer, optional `0x` prefix                | int          |
//! | `%o`           | Octal integer, optional `0o` prefix              | int          |
//! | `%b`           | Binary integer, optional `0b` prefix             | int          |
//! | `%i`           | Integer whose prefix selects the base            | int          |
//! | `%[K]`         | Whitespace-separated list of kind K              | list         |
//! | `%[K,]`        | List of kind K separated by `,` (any delimiter)  | list         |
//! | `%r`           | Rest of the line                                 | string       |
//! | `%%`           | A literal `%`                                    | —            |
//!
//! Every directive but `%%` also exists suppressed, spelled `%*...`: it
//! matches the same text and produces nothing.

use std::sync::LazyLock;

use crate::conversion::{Conversion, ListItem, Radix};

const DECIMAL: &str = r"[+-]?[0-9]+";
const UNSIGNED: &str = r"[0-9]+";
const HEX: &str = r"(?:0[xX])?[0-9A-Fa-f]+";
const OCTAL: &str = r"(?:0[oO])?[0-7]+";
const BINARY: &str = r"(?:0[bB])?[01]+";
const INTEGER: &str = r"[+-]?(?:0[xXoObB])?[0-9A-Fa-f]+";
const FLOAT: &str = r"[-+]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?";
const WORD: &str = r"\w+";

/// Keeps an unsigned field that starts the pattern from matching the digits
/// of a signed number (`%u` must not find `50` inside `-50`).
const UNSIGNED_GUARD: &str = r"(?:^|[^+\-0-9])";

/// Inline parameter carried by a directive token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    None,
    Width(usize),
    Delimiter(char),
}

/// Structural shape of a directive token, without the leading `%` or `%*`.
#[derive(Debug, Clone, Copy)]
pub enum Token {
    /// One of the given conversion letters.
    Letter(&'static str),
    /// Decimal width digits followed by the letter.
    Width(char),
    /// `[` one of the letters `]`.
    List(&'static str),
    /// `[` one of the letters, a delimiter character, `]`.
    DelimitedList(&'static str),
    /// A second `%`.
    Percent,
}

/// What a directive matches and how its text is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Char,
    Chars,
    FixedDecimal,
    Decimal,
    Unsigned,
    Float,
    Str,
    Hex,
    Octal,
    Binary,
    Integer,
    List(ListItem),
    DelimitedList(ListItem),
    Rest,
    Percent,
}

impl Field {
    /// Regex text for this field, before it is wrapped in a group.
    ///
    /// `None` if a width or delimiter field is missing its parameter.
    pub fn fragment(self, param: Param) -> Option<String> {
        let fragment = match (self, param) {
            (Field::Char, _) => ".".to_string(),
            (Field::Chars, Param::Width(n)) => format!(".{{{n}}}"),
            (Field::FixedDecimal, Param::Width(n)) => format!("[+-]?[0-9]{{{n}}}"),
            (Field::Decimal, _) => DECIMAL.to_string(),
            (Field::Unsigned, _) => UNSIGNED.to_string(),
            (Field::Float, _) => FLOAT.to_string(),
            (Field::Str, _) => r"\S+".to_string(),
            (Field::Hex, _) => HEX.to_string(),
            (Field::Octal, _) => OCTAL.to_string(),
            (Field::Binary, _) => BINARY.to_string(),
            (Field::Integer, _) => INTEGER.to_string(),
            (Field::List(item), _) => {
                let item = item_fragment(item);
                format!(r"{item}(?:\s+{item})*")
            }
            (Field::DelimitedList(item), Param::Delimiter(d)) => {
                let item = item_fragment(item);
                let delimiter = regex::escape(d.encode_utf8(&mut [0; 4]));
                format!(r"{item}(?:{delimiter}\s*{item})*")
            }
            (Field::Rest, _) => ".*$".to_string(),
            (Field::Percent, _) => "%".to_string(),
            (Field::Chars | Field::FixedDecimal | Field::DelimitedList(_), _) => return None,
        };
        Some(fragment)
    }

    /// The conversion applied to this field's capture, if it produces a value.
    pub fn conversion(self, param: Param) -> Option<Conversion> {
        let conversion = match self {
            Field::Char => Conversion::Char,
            Field::Chars | Field::Str | Field::Rest => Conversion::Text,
            Field::FixedDecimal | Field::Decimal | Field::Unsigned => {
                Conversion::Int(Radix::Decimal)
            }
            Field::Float => Conversion::Float,
            Field::Hex => Conversion::Int(Radix::Hex),
            Field::Octal => Conversion::Int(Radix::Octal),
            Field::Binary => Conversion::Int(Radix::Binary),
            Field::Integer => Conversion::Int(Radix::Auto),
            Field::List(item) => Conversion::List {
                item,
                delimiter: None,
            },
            Field::DelimitedList(item) => Conversion::List {
                item,
                delimiter: match param {
                    Param::Delimiter(d) => Some(d),
                    _ => None,
                },
            },
            Field::Percent => return None,
        };
        Some(conversion)
    }

    /// Prefix required when this field is the first thing in the pattern.
    pub fn leading_guard(self) -> Option<&'static str> {
        match self {
            Field::Unsigned => Some(UNSIGNED_GUARD),
            _ => None,
        }
    }
}

fn item_fragment(item: ListItem) -> &'static str {
    match item {
        ListItem::Word => WORD,
        ListItem::Int(Radix::Decimal) => DECIMAL,
        ListItem::Int(Radix::Hex) => HEX,
        ListItem::Int(Radix::Octal) => OCTAL,
        ListItem::Int(Radix::Binary) => BINARY,
        ListItem::Int(Radix::Auto) => INTEGER,
        ListItem::Float => FLOAT,
    }
}

/// Delimiters of `%[K,]` lists: anything but word characters and whitespace.
fn is_delimiter(c: char) -> bool {
    !(c.is_alphanumeric() || c == '_' || c.is_whitespace())
}

/// One entry of the directive table.
#[derive(Debug, Clone, Copy)]
pub struct Directive {
    pub name: &'static str,
    pub token: Token,
    pub field: Field,
    /// Spelled `%*...`; matches without capturing.
    pub suppressed: bool,
}

impl Directive {
    /// True if this directive contributes a capture group and a conversion.
    pub fn captures(&self) -> bool {
        !self.suppressed && self.field.conversion(Param::None).is_some()
    }

    /// Try to recognize this directive at the start of `input`.
    ///
    /// Returns the number of bytes consumed and the inline parameter.
    pub fn recognize(&self, input: &str) -> Option<(usize, Param)> {
        let mut cursor = Cursor { input, pos: 0 };
        cursor.eat('%')?;
        if self.suppressed {
            cursor.eat('*')?;
        }
        let param = match self.token {
            Token::Letter(letters) => {
                cursor.eat_one_of(letters)?;
                Param::None
            }
            Token::Width(letter) => {
                let width = cursor.number()?;
                cursor.eat(letter)?;
                Param::Width(width)
            }
            Token::List(letters) => {
                cursor.eat('[')?;
                cursor.eat_one_of(letters)?;
                cursor.eat(']')?;
                Param::None
            }
            Token::DelimitedList(letters) => {
                cursor.eat('[')?;
                cursor.eat_one_of(letters)?;
                let delimiter = cursor.next_if(is_delimiter)?;
                cursor.eat(']')?;
                Param::Delimiter(delimiter)
            }
            Token::Percent => {
                cursor.eat('%')?;
                Param::None
            }
        };
        Some((cursor.pos, param))
    }

    /// The group this directive contributes to the pattern.
    pub fn render(&self, param: Param) -> Option<String> {
        let body = self.field.fragment(param)?;
        let group = if self.field == Field::Percent {
            body
        } else if self.captures() {
            format!("({body})")
        } else {
            format!("(?:{body})")
        };
        Some(group)
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn next_if(&mut self, pred: impl FnOnce(char) -> bool) -> Option<char> {
        let c = self.input[self.pos..].chars().next().filter(|&c| pred(c))?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> Option<char> {
        self.next_if(|c| c == expected)
    }

    fn eat_one_of(&mut self, letters: &str) -> Option<char> {
        self.next_if(|c| letters.contains(c))
    }

    /// A positive decimal width.
    fn number(&mut self) -> Option<usize> {
        let start = self.pos;
        while self.next_if(|c| c.is_ascii_digit()).is_some() {}
        self.input[start..self.pos].parse().ok().filter(|&n| n > 0)
    }
}

/// A capturing directive and its suppressed twin, built from one definition.
fn pair(name: &'static str, token: Token, field: Field) -> [Directive; 2] {
    [
        Directive {
            name,
            token,
            field,
            suppressed: false,
        },
        Directive {
            name,
            token,
            field,
            suppressed: true,
        },
    ]
}

/// All directives in priority order; the first one recognized wins.
pub static DIRECTIVES: LazyLock<Vec<Directive>> = LazyLock::new(|| {
    use ListItem::{Float, Int, Word};

    let groups = [
        pair("%c", Token::Letter("c"), Field::Char),
        pair("%Nc", Token::Width('c'), Field::Chars),
        pair("%Nd", Token::Width('d'), Field::FixedDecimal),
        pair("%d", Token::Letter("d"), Field::Decimal),
        pair("%u", Token::Letter("u"), Field::Unsigned),
        pair("%f", Token::Letter("fgeE"), Field::Float),
        pair("%s", Token::Letter("s"), Field::Str),
        pair("%x", Token::Letter("xX"), Field::Hex),
        pair("%o", Token::Letter("o"), Field::Octal),
        pair("%b", Token::Letter("b"), Field::Binary),
        pair("%i", Token::Letter("i"), Field::Integer),
        // Plain lists precede delimited ones: `%[d]]` is a whitespace list
        // followed by a literal `]`, not a list delimited by `]`.
        pair("%[s]", Token::List("s"), Field::List(Word)),
        pair("%[d]", Token::List("d"), Field::List(Int(Radix::Decimal))),
        pair("%[x]", Token::List("xX"), Field::List(Int(Radix::Hex))),
        pair("%[o]", Token::List("oO"), Field::List(Int(Radix::Octal))),
        pair("%[b]", Token::List("bB"), Field::List(Int(Radix::Binary))),
        pair("%[i]", Token::List("i"), Field::List(Int(Radix::Auto))),
        pair("%[f]", Token::List("fgeE"), Field::List(Float)),
        pair("%[s,]", Token::DelimitedList("s"), Field::DelimitedList(Word)),
        pair(
            "%[d,]",
            Token::DelimitedList("d"),
            Field::DelimitedList(Int(Radix::Decimal)),
        ),
        pair(
            "%[x,]",
            Token::DelimitedList("xX"),
            Field::DelimitedList(Int(Radix::Hex)),
        ),
        pair(
            "%[o,]",
            Token::DelimitedList("oO"),
            Field::DelimitedList(Int(Radix::Octal)),
        ),
        pair(
            "%[b,]",
            Token::DelimitedList("bB"),
            Field::DelimitedList(Int(Radix::Binary)),
        ),
        pair(
            "%[i,]",
            Token::DelimitedList("i"),
            Field::DelimitedList(Int(Radix::Auto)),
        ),
        pair("%[f,]", Token::DelimitedList("fgeE"), Field::DelimitedList(Float)),
        pair("%r", Token::Letter("r"), Field::Rest),
    ];

    let mut table: Vec<Directive> = groups.into_iter().flatten().collect();
    table.push(Directive {
        name: "%%",
        token: Token::Percent,
        field: Field::Percent,
        suppressed: false,
    });
    table
});

/// Find the first directive recognized at the start of `input`.
pub fn recognize(input: &str) -> Option<(&'static Directive, usize, Param)> {
    DIRECTIVES.iter().find_map(|directive| {
        directive
            .recognize(input)
            .map(|(len, param)| (directive, len, param))
    })
}
