/// Parser for hunspell-format .aff files
use anyhow::{anyhow, Error, Result};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{
    char, line_ending, not_line_ending, space0, space1, u32,
};
use nom::combinator::{cut, eof, map, opt, value};
use nom::error::{Error as NomError, ErrorKind, ParseError};
use nom::multi::many0;
use nom::sequence::{delimited, preceded, separated_pair, terminated, tuple};
use nom::{Compare, Err, Finish, IResult, InputLength, Parser};
use std::collections::HashMap;

use crate::affixdata::{AffixData, AffixEntry, AffixKind, CompoundPattern};
use crate::flags::{Flag, FlagMode, FlagSet, FlagVec};

type Input<'a> = &'a str;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

struct AffError {
    message: String,
}

impl AffError {
    fn new(message: &str) -> Self {
        AffError {
            message: message.to_string(),
        }
    }

    fn wrapped(message: &str) -> Err<Self> {
        Err::Error(Self::new(message))
    }

    fn from_nom(e: Err<NomError<Input>>) -> Err<Self> {
        Err::Error(Self::new(&e.to_string()))
    }
}

impl<'a> ParseError<Input<'a>> for AffError {
    fn from_error_kind(input: Input, kind: ErrorKind) -> Self {
        let message = format!("{:?}:\t{}\n", kind, input);
        AffError { message }
    }

    fn append(_input: Input, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl ToString for AffError {
    fn to_string(&self) -> String {
        self.message.to_string()
    }
}

fn from_anyhow(e: Error) -> Err<AffError> {
    AffError::wrapped(&e.to_string())
}

#[derive(Clone)]
enum AffixLine<'a> {
    Empty,
    SetEncoding(&'a str),
    SetFlagMode(FlagMode),
    SetFlag(&'a str, &'a str),
    SetToggle(&'a str),
    SetCompoundMin(u32),
    SetCompoundWordsMax(u32),
    AddRep(&'a str, &'a str),
    AddIconv(&'a str, &'a str),
    SetBreak(&'a str),
    AddCompoundRule(&'a str),
    AddCompoundPattern(&'a str, &'a str, Option<&'a str>),
    AffixHeader(AffixKind, &'a str, bool),
    AffixRule(AffixKind, &'a str, &'a str, &'a str, Option<&'a str>),
}

/// Parse a line starting with a keyword and then a value.
/// Takes the tag for the keyword, and a parser for the value.
/// Returns the result of the value parser.
fn keyword<'a, T, O, E: ParseError<Input<'a>>, F>(
    key: T,
    mut value: F,
) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, O, E>
where
    F: Parser<Input<'a>, O, E>,
    Input<'a>: Compare<T>,
    T: InputLength + Copy,
{
    move |s: Input<'a>| {
        let (s, _) = tag(key).parse(s)?;
        let (s, _) = space1.parse(s)?;
        // re-implement cut() because I don't know how to pass cut(value)
        // without errors about copying value.
        match value.parse(s) {
            Err(Err::Error(e)) => Err(Err::Failure(e)),
            rest => rest,
        }
    }
}

fn comment(s: &str) -> IResult<&str, ()> {
    value((), preceded(char('#'), not_line_ending))(s)
}

fn ending(s: &str) -> IResult<&str, (), AffError> {
    value((), delimited(space0, opt(comment), line_ending))(s).map_err(AffError::from_nom)
}

fn value_string(s: &str) -> IResult<&str, &str, AffError> {
    take_till1(|c: char| c.is_whitespace())(s)
}

const FLAG_NAMES: [&str; 12] = [
    "FORBIDDENWORD",
    "NOSUGGEST",
    "KEEPCASE",
    "NEEDAFFIX",
    "ONLYINCOMPOUND",
    "COMPOUNDFLAG",
    "COMPOUNDBEGIN",
    "COMPOUNDMIDDLE",
    "COMPOUNDLAST",
    "COMPOUNDEND",
    "COMPOUNDPERMITFLAG",
    "COMPOUNDFORBIDFLAG",
];

const TOGGLE_NAMES: [&str; 3] = [
    "CHECKCOMPOUNDCASE",
    "CHECKCOMPOUNDTRIPLE",
    "CHECKCOMPOUNDREP",
];

fn assign_flag(s: &str) -> IResult<&str, AffixLine, AffError> {
    let (s, key) = value_string(s)?;
    if !FLAG_NAMES.contains(&key) {
        return Err(AffError::wrapped("Keyword not a known flag"));
    }
    let (s, _) = space1(s)?;
    let (s, v) = cut(value_string)(s)?;
    Ok((s, AffixLine::SetFlag(key, v)))
}

fn assign_toggle(s: &str) -> IResult<&str, AffixLine, AffError> {
    let (s, key) = value_string(s)?;
    if !TOGGLE_NAMES.contains(&key) {
        return Err(AffError::wrapped("Keyword not a known toggle"));
    }
    Ok((s, AffixLine::SetToggle(key)))
}

fn set_encoding(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("SET", value_string), AffixLine::SetEncoding)(s)
}

fn flag_mode(s: &str) -> IResult<&str, FlagMode, AffError> {
    alt((
        value(FlagMode::DoubleCharFlags, tag("long")),
        value(FlagMode::NumericFlags, tag("num")),
        value(FlagMode::Utf8Flags, tag("UTF-8")),
    ))(s)
}

fn set_flag_mode(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("FLAG", flag_mode), AffixLine::SetFlagMode)(s)
}

fn set_compound_min(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("COMPOUNDMIN", u32), AffixLine::SetCompoundMin)(s)
}

fn set_compound_words_max(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(
        keyword("COMPOUNDWORDSMAX", u32),
        AffixLine::SetCompoundWordsMax,
    )(s)
}

fn string_pair(s: &str) -> IResult<&str, (&str, &str), AffError> {
    separated_pair(value_string, space1, value_string)(s)
}

fn add_rep(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        // the count header carries no information we need
        value(AffixLine::Empty, tuple((tag("REP"), space1, u32))),
        map(keyword("REP", string_pair), |(f, t)| AffixLine::AddRep(f, t)),
    ))(s)
}

fn add_iconv(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        value(AffixLine::Empty, tuple((tag("ICONV"), space1, u32))),
        map(keyword("ICONV", string_pair), |(f, t)| {
            AffixLine::AddIconv(f, t)
        }),
    ))(s)
}

fn set_break(s: &str) -> IResult<&str, AffixLine, AffError> {
    // count headers and patterns are told apart during assembly
    map(keyword("BREAK", value_string), AffixLine::SetBreak)(s)
}

fn add_compound_rule(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(
        keyword("COMPOUNDRULE", value_string),
        AffixLine::AddCompoundRule,
    )(s)
}

fn add_compound_pattern(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        value(
            AffixLine::Empty,
            tuple((tag("CHECKCOMPOUNDPATTERN"), space1, u32)),
        ),
        map(
            keyword(
                "CHECKCOMPOUNDPATTERN",
                tuple((
                    value_string,
                    preceded(space1, value_string),
                    opt(preceded(space1, value_string)),
                )),
            ),
            |(l, r, repl)| AffixLine::AddCompoundPattern(l, r, repl),
        ),
    ))(s)
}

fn affix_kind(s: &str) -> IResult<&str, AffixKind, AffError> {
    alt((
        value(AffixKind::Prefix, tag("PFX")),
        value(AffixKind::Suffix, tag("SFX")),
    ))(s)
}

fn affix_header(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(
        tuple((
            affix_kind,
            space1,
            value_string,
            space1,
            alt((value(true, char('Y')), value(false, char('N')))),
            space1,
            u32,
        )),
        |(kind, _, flag, _, cross, _, _)| AffixLine::AffixHeader(kind, flag, cross),
    )(s)
}

fn affix_rule(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(
        tuple((
            affix_kind,
            space1,
            value_string,
            space1,
            value_string,
            space1,
            value_string,
            opt(preceded(space1, value_string)),
            // morphological fields are ignored
            opt(preceded(space1, not_line_ending)),
        )),
        |(kind, _, flag, _, strip, _, add, cond, _)| {
            AffixLine::AffixRule(kind, flag, strip, add, cond)
        },
    )(s)
}

fn skip_line(s: &str) -> IResult<&str, AffixLine, AffError> {
    // unknown directives (TRY, WORDCHARS, MAP, ...) and comments
    value(AffixLine::Empty, not_line_ending)(s).map_err(AffError::from_nom)
}

fn line(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        set_encoding,
        set_flag_mode,
        assign_flag,
        assign_toggle,
        set_compound_min,
        set_compound_words_max,
        add_rep,
        add_iconv,
        set_break,
        add_compound_rule,
        add_compound_pattern,
        affix_header,
        affix_rule,
        skip_line,
    ))(s)
}

fn single_flag(d: &AffixData, v: &str) -> Result<Flag, Err<AffError>> {
    let flags = d.parse_flags(v).map_err(from_anyhow)?;
    if flags.len() != 1 {
        return Err(AffError::wrapped(&format!("Expected a single flag: {}", v)));
    }
    Ok(flags[0])
}

fn stem_and_flag<'a>(
    d: &AffixData,
    v: &'a str,
) -> Result<(&'a str, Option<Flag>), Err<AffError>> {
    match v.split_once('/') {
        Some((stem, flag)) => Ok((stem, Some(single_flag(d, flag)?))),
        None => Ok((v, None)),
    }
}

fn affix_file(s: &str) -> IResult<&str, AffixData, AffError> {
    let (s, _) = opt(char(BYTE_ORDER_MARK)).parse(s)?; // discard BOM

    let (s, lines) = many0(terminated(line, ending))(s)?;
    let (s, _) = eof(s)?;

    let mut d = AffixData::new();
    let mut breaks: Option<Vec<String>> = None;
    let mut cross: HashMap<(AffixKind, &str), bool> = HashMap::new();

    // Directives that don't involve flag parsing first; flag values depend
    // on the FLAG mode, and affix rule semantics depend on the special
    // flags, wherever those happen to appear in the file.
    for l in lines.iter() {
        match l {
            AffixLine::Empty => (),
            AffixLine::SetEncoding(enc) => {
                if *enc != "UTF-8" {
                    return Err(AffError::wrapped(&format!(
                        "Unsupported encoding {}",
                        enc
                    )));
                }
            }
            AffixLine::SetFlagMode(fm) => d.flag_mode = *fm,
            AffixLine::SetToggle(t) => match *t {
                "CHECKCOMPOUNDCASE" => d.check_compound_case = true,
                "CHECKCOMPOUNDTRIPLE" => d.check_compound_triple = true,
                "CHECKCOMPOUNDREP" => d.check_compound_rep = true,
                _ => panic!("Unhandled toggle"),
            },
            AffixLine::SetCompoundMin(v) => d.compound_min = *v,
            AffixLine::SetCompoundWordsMax(v) => d.compound_words_max = Some(*v),
            AffixLine::AddRep(f, t) => d.rep.push((f.to_string(), t.to_string())),
            AffixLine::AddIconv(f, t) => d.iconv.push((f.to_string(), t.to_string())),
            AffixLine::SetBreak(v) => {
                let table = breaks.get_or_insert_with(Vec::new);
                if !v.chars().all(|c| c.is_ascii_digit()) {
                    table.push(v.to_string());
                }
            }
            AffixLine::AddCompoundRule(r) => {
                if !r.chars().all(|c| c.is_ascii_digit()) {
                    d.compound_rules.push(r.to_string());
                }
            }
            AffixLine::AffixHeader(kind, flag, cp) => {
                cross.insert((*kind, *flag), *cp);
            }
            AffixLine::SetFlag(..)
            | AffixLine::AddCompoundPattern(..)
            | AffixLine::AffixRule(..) => (),
        };
    }
    if let Some(b) = breaks {
        d.break_table = b;
    }

    for l in lines.iter() {
        if let AffixLine::SetFlag(f, v) = l {
            let v = Some(single_flag(&d, v)?);
            match *f {
                "FORBIDDENWORD" => d.forbidden_word = v,
                "NOSUGGEST" => d.no_suggest = v,
                "KEEPCASE" => d.keep_case = v,
                "NEEDAFFIX" => d.need_affix = v,
                "ONLYINCOMPOUND" => d.only_in_compound = v,
                "COMPOUNDFLAG" => d.compound_flag = v,
                "COMPOUNDBEGIN" => d.compound_begin = v,
                "COMPOUNDMIDDLE" => d.compound_middle = v,
                "COMPOUNDLAST" | "COMPOUNDEND" => d.compound_last = v,
                "COMPOUNDPERMITFLAG" => d.compound_permit = v,
                "COMPOUNDFORBIDFLAG" => d.compound_forbid = v,
                _ => panic!("Unhandled flag"),
            }
        }
    }

    for l in lines.iter() {
        match l {
            AffixLine::AddCompoundPattern(left, right, repl) => {
                let (left_stem, left_flag) = stem_and_flag(&d, left)?;
                let (right_stem, right_flag) = stem_and_flag(&d, right)?;
                d.compound_patterns.push(CompoundPattern {
                    left_stem: left_stem.to_string(),
                    left_flag,
                    right_stem: right_stem.to_string(),
                    right_flag,
                    replacement: repl.as_ref().map(|r| r.to_string()),
                });
            }
            AffixLine::AffixRule(kind, flagstr, strip, add, cond) => {
                let flag = single_flag(&d, flagstr)?;
                let cross_product = match cross.get(&(*kind, *flagstr)) {
                    Some(cp) => *cp,
                    None => {
                        return Err(AffError::wrapped(&format!(
                            "Affix rule without header: {}",
                            flagstr
                        )))
                    }
                };
                let strip = if *strip == "0" { "" } else { *strip };
                let (add, contflags) = match add.split_once('/') {
                    Some((add, f)) => (add, Some(f)),
                    None => (*add, None),
                };
                let add = if add == "0" { "" } else { add };
                let flags = match contflags {
                    Some(f) => FlagSet::new(d.parse_flags(f).map_err(from_anyhow)?),
                    None => FlagSet::new(FlagVec::new()),
                };
                let bits = d.word_flags(&flags);
                let entry = AffixEntry::new(
                    *kind,
                    flag,
                    strip,
                    add,
                    (*cond).unwrap_or("."),
                    cross_product,
                    flags,
                    bits,
                );
                match kind {
                    AffixKind::Prefix => d.prefixes.push(entry),
                    AffixKind::Suffix => d.suffixes.push(entry),
                }
            }
            _ => (),
        }
    }

    Ok((s, d))
}

pub fn parse_affix_data(text: &str) -> Result<AffixData> {
    // the line parser wants every line terminated
    let mut text = text.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    match affix_file.parse(&text).finish() {
        Ok((_, d)) => Ok(d),
        Err(e) => Err(anyhow!(e.to_string())),
    }
}
