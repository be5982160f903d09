use crate::caption::Segment;
use crate::entities;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while1};
use nom::character::complete::{char, digit0, digit1, multispace0, multispace1};
use nom::combinator::{all_consuming, map, map_res, opt, peek, recognize, value};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, separated_pair, tuple};
use nom::IResult;
use tracing::debug;

const OPEN: &str = "<text";
const CLOSE: &str = "</text>";

/// A `<text ...>inner</text>` element as it appears in the payload.
struct TextElement<'a> {
    attributes: Vec<(&'a str, &'a str)>,
    inner: &'a str,
}

impl<'a> TextElement<'a> {
    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// Scans `input` for `<text start="S" dur="D">TEXT</text>` elements and turns
/// each one into a segment.
///
/// The scan never fails. Anything that doesn't look like a complete element
/// (missing closing tag, nested markup, unparsable timing) is stepped over and
/// scanning resumes right after the offending `<text`.
pub fn parse(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = input;

    while let Some(idx) = rest.find(OPEN) {
        rest = &rest[idx..];
        match text_element(rest) {
            Ok((remaining, element)) => {
                if let Some(segment) = to_segment(&element) {
                    segments.push(segment);
                }
                rest = remaining;
            }
            Err(_) => {
                rest = &rest[OPEN.len()..];
            }
        }
    }

    segments
}

fn to_segment(element: &TextElement) -> Option<Segment> {
    let start = element.attribute("start").and_then(seconds_value);
    let duration = element.attribute("dur").and_then(seconds_value);
    let (start, duration) = match (start, duration) {
        (Some(start), Some(duration)) => (start, duration),
        _ => {
            debug!(
                "Skipping <text> element without usable start/dur: {:?}",
                element.attributes
            );
            return None;
        }
    };

    let text = element.inner.trim();
    if text.is_empty() {
        return None;
    }
    let text = entities::decode(text);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(Segment::new(start, duration, text))
}

fn text_element(input: &str) -> IResult<&str, TextElement<'_>> {
    let (input, attributes) = opening_tag(input)?;
    let (input, inner) = take_till(|c: char| c == '<')(input)?;
    let (input, _) = tag(CLOSE)(input)?;
    Ok((input, TextElement { attributes, inner }))
}

/// `<text` followed by anything up to `>`. Well-formed `name=value` pairs are
/// kept, any other token in between is stepped over.
fn opening_tag(input: &str) -> IResult<&str, Vec<(&str, &str)>> {
    let (input, _) = tag(OPEN)(input)?;
    let (input, _) = peek(alt((multispace1, tag(">"))))(input)?;
    let (input, tokens) = many0(preceded(
        multispace0,
        alt((map(attribute, Some), value(None, stray_token))),
    ))(input)?;
    let (input, _) = pair(multispace0, char('>'))(input)?;
    Ok((input, tokens.into_iter().flatten().collect()))
}

fn attribute(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        attribute_name,
        tuple((multispace0, char('='), multispace0)),
        alt((quoted_value, unquoted_value)),
    )(input)
}

fn attribute_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')(input)
}

fn quoted_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
    ))(input)
}

fn unquoted_value(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, '>' | '"' | '\''))(input)
}

fn stray_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '>')(input)
}

/// A non-negative decimal number of seconds: `12`, `12.`, `12.5` or `.5`.
fn seconds(input: &str) -> IResult<&str, f64> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn seconds_value(value: &str) -> Option<f64> {
    all_consuming(seconds)(value.trim())
        .ok()
        .map(|(_, secs)| secs)
        .filter(|secs| secs.is_finite())
}
