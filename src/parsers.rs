use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_till},
    character::complete::{anychar, char, multispace1},
    combinator::{eof, map, not, opt, recognize, value},
    multi::{fold_many0, many0_count, many1_count},
    sequence::{delimited, preceded, terminated},
};

use crate::{
    error::{Result, SteamDmenuError},
    vdf::{VdfNode, VdfValue},
};

pub fn parse_till_end_of_line(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == '\n').parse(input)
}

/// Skips any whitespace and `//` comments
pub fn parse_ignored(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0_count(alt((
            multispace1,
            recognize(preceded(tag("//"), parse_till_end_of_line)),
        ))),
    )
    .parse(input)
}

/// A single backslash escape inside a quoted string. Unknown escapes are kept as they are, since
/// Windows paths in older files are not always escaped.
fn parse_escape(input: &str) -> IResult<&str, String> {
    map(preceded(char('\\'), anychar), |c| match c {
        'n' => "\n".to_string(),
        't' => "\t".to_string(),
        'r' => "\r".to_string(),
        '\\' => "\\".to_string(),
        '"' => "\"".to_string(),
        c => format!("\\{c}"),
    })
    .parse(input)
}

pub fn parse_between_double_quotes(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(
            alt((map(is_not("\"\\"), str::to_string), parse_escape)),
            String::new,
            |mut acc, part| {
                acc.push_str(&part);
                acc
            },
        ),
        char('"'),
    )
    .parse(input)
}

/// A bare token, which ends at whitespace, a quote, a brace or the start of a `//` comment
pub fn parse_unquoted(input: &str) -> IResult<&str, String> {
    map(
        recognize(many1_count(alt((
            is_not(" \t\r\n\"{}/"),
            terminated(tag("/"), not(char('/'))),
        )))),
        str::to_string,
    )
    .parse(input)
}

pub fn parse_token(input: &str) -> IResult<&str, String> {
    alt((parse_between_double_quotes, parse_unquoted)).parse(input)
}

/// Platform conditionals such as `[$WIN32]` or `[!$OSX]`, which are accepted and then ignored
fn parse_conditional(input: &str) -> IResult<&str, &str> {
    delimited(char('['), is_not("]\n"), char(']')).parse(input)
}

fn parse_block(input: &str) -> IResult<&str, VdfNode> {
    delimited(
        char('{'),
        parse_pairs,
        preceded(parse_ignored, char('}')),
    )
    .parse(input)
}

/// A key followed by either a value or a `{}` block
fn parse_pair(input: &str) -> IResult<&str, (String, VdfValue)> {
    let (input, key) = preceded(parse_ignored, parse_token).parse(input)?;
    let (input, _) = opt(preceded(parse_ignored, parse_conditional)).parse(input)?;

    let (input, value) = preceded(
        parse_ignored,
        alt((
            map(parse_block, VdfValue::Node),
            map(parse_token, VdfValue::Str),
        )),
    )
    .parse(input)?;

    let (input, _) = opt(preceded(parse_ignored, parse_conditional)).parse(input)?;

    Ok((input, (key, value)))
}

fn parse_pairs(input: &str) -> IResult<&str, VdfNode> {
    fold_many0(parse_pair, VdfNode::new, |mut node, (key, value)| {
        node.insert(key, value);
        node
    })
    .parse(input)
}

/// Parses a whole VDF document, e.g. the contents of `libraryfolders.vdf` or an
/// `appmanifest_<id>.acf` file
#[tracing::instrument(level = "trace", skip(input))]
pub fn parse_vdf(input: &str) -> Result<VdfNode> {
    let content = input.strip_prefix('\u{feff}').unwrap_or(input);

    terminated(parse_pairs, preceded(parse_ignored, eof))
        .parse(content)
        .map(|(_, node)| node)
        .map_err(|e| SteamDmenuError::from_nom(content, e))
}
