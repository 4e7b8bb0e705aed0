//! Rule-notation parser
//!
//! Accepts `Q(x, SUM(y * 2)) :- R(x, y), S(y, 'a'), x < 5`.

use std::fs;
use std::path::Path;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char as pchar, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, opt, recognize, value};
use nom::multi::{separated_list0, separated_list1};
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;

use super::ast::{Head, Query, SumAggregate};
use super::atom::{Atom, ComparisonAtom, ComparisonOp, RelationalAtom};
use super::errors::{ParseError, ParseResult};
use super::term::{Term, Variable};

/// Parses a single query from text
pub fn parse_query(input: &str) -> ParseResult<Query> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let (_, (head_name, items, body)) = all_consuming(ws(query))(input).map_err(|e| {
        let remainder = match e {
            nom::Err::Error(inner) | nom::Err::Failure(inner) => inner.input,
            nom::Err::Incomplete(_) => "",
        };
        ParseError::syntax(remainder)
    })?;

    let head = build_head(head_name, items)?;
    Ok(Query::new(head, body))
}

/// Reads and parses a query file
pub fn parse_query_file(path: &Path) -> ParseResult<Query> {
    let text = fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_query(&text)
}

#[derive(Debug, Clone)]
enum HeadItem {
    Var(Variable),
    Sum(Vec<Term>),
}

fn build_head(name: &str, items: Vec<HeadItem>) -> ParseResult<Head> {
    let mut variables = Vec::new();
    let mut sum: Option<SumAggregate> = None;

    for item in items {
        match item {
            HeadItem::Var(v) => variables.push(v),
            HeadItem::Sum(terms) => {
                if sum.is_some() {
                    return Err(ParseError::MultipleAggregates);
                }
                if let Some(bad) = terms
                    .iter()
                    .find(|t| matches!(t, Term::Constant(c) if c.as_integer().is_none()))
                {
                    return Err(ParseError::InvalidAggregateTerm(bad.to_string()));
                }
                sum = Some(SumAggregate::new(terms));
            }
        }
    }

    let head = Head::new(name, variables);
    Ok(match sum {
        Some(s) => head.with_sum(s),
        None => head,
    })
}

fn query(input: &str) -> IResult<&str, (&str, Vec<HeadItem>, Vec<Atom>)> {
    let (input, (name, items)) = head(input)?;
    let (input, _) = ws(tag(":-"))(input)?;
    let (input, body) = separated_list1(ws(pchar(',')), ws(body_atom))(input)?;
    Ok((input, (name, items, body)))
}

fn head(input: &str) -> IResult<&str, (&str, Vec<HeadItem>)> {
    map(
        tuple((
            ws(identifier),
            ws(pchar('(')),
            separated_list0(ws(pchar(',')), ws(head_item)),
            ws(pchar(')')),
        )),
        |(name, _, items, _)| (name, items),
    )(input)
}

fn head_item(input: &str) -> IResult<&str, HeadItem> {
    alt((
        map(sum_aggregate, HeadItem::Sum),
        map(identifier, |s| HeadItem::Var(Variable::new(s))),
    ))(input)
}

fn sum_aggregate(input: &str) -> IResult<&str, Vec<Term>> {
    preceded(
        tag("SUM"),
        delimited(
            ws(pchar('(')),
            separated_list1(ws(pchar('*')), ws(term)),
            ws(pchar(')')),
        ),
    )(input)
}

fn body_atom(input: &str) -> IResult<&str, Atom> {
    alt((
        map(relational_atom, Atom::Relational),
        map(comparison_atom, Atom::Comparison),
    ))(input)
}

fn relational_atom(input: &str) -> IResult<&str, RelationalAtom> {
    map(
        tuple((
            ws(identifier),
            ws(pchar('(')),
            separated_list0(ws(pchar(',')), ws(term)),
            ws(pchar(')')),
        )),
        |(name, _, terms, _)| RelationalAtom::new(name, terms),
    )(input)
}

fn comparison_atom(input: &str) -> IResult<&str, ComparisonAtom> {
    map(
        tuple((ws(term), ws(comparison_op), ws(term))),
        |(left, op, right)| ComparisonAtom::new(left, op, right),
    )(input)
}

fn comparison_op(input: &str) -> IResult<&str, ComparisonOp> {
    // two-character operators first so `<=` is not read as `<`
    alt((
        value(ComparisonOp::Neq, tag("!=")),
        value(ComparisonOp::Leq, tag("<=")),
        value(ComparisonOp::Geq, tag(">=")),
        value(ComparisonOp::Eq, tag("=")),
        value(ComparisonOp::Lt, tag("<")),
        value(ComparisonOp::Gt, tag(">")),
    ))(input)
}

fn term(input: &str) -> IResult<&str, Term> {
    alt((
        map(integer, Term::int),
        map(string_constant, Term::string),
        map(identifier, Term::var),
    ))(input)
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(pchar('-')), digit1)), |s: &str| {
        s.parse::<i64>()
    })(input)
}

fn string_constant(input: &str) -> IResult<&str, &str> {
    delimited(pchar('\''), take_while(|c| c != '\''), pchar('\''))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(take_while1(is_ident_start), take_while(is_ident_continue)))(input)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}
