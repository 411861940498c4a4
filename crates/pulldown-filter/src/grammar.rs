//! nom parser and evaluator for table filter queries.
//!
//! ```text
//! query    := clause (("&&" | "and") clause)*
//! clause   := "{" column "}" [operator] literal
//! operator := ">=" | "<=" | "!=" | ">" | "<" | "="
//!           | "eq" | "ne" | "lt" | "le" | "gt" | "ge" | "contains"
//! literal  := '"' .. '"' | "'" .. "'" | bare-token
//! ```
//!
//! A clause without an operator means `=`. Word operators must be followed
//! by whitespace, so `{Gene} nemo` is the literal `nemo`, not `ne mo`.

use std::cmp::Ordering;
use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, tag_no_case, take_until},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, opt, value},
    error::VerboseError,
    multi::separated_list1,
    sequence::{delimited, terminated, tuple},
    Finish, IResult,
};

use pulldown_common::{CellValue, Column, ColumnKind, Record};

use crate::error::{FilterError, Result};

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Contains,
}

impl Operator {
    /// Whether `cell <op> operand` holds, given `cell.cmp(operand)`.
    fn holds(self, ord: Ordering) -> bool {
        match self {
            Operator::Eq | Operator::Contains => ord == Ordering::Equal,
            Operator::Ne => ord != Ordering::Equal,
            Operator::Lt => ord == Ordering::Less,
            Operator::Le => ord != Ordering::Greater,
            Operator::Gt => ord == Ordering::Greater,
            Operator::Ge => ord != Ordering::Less,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Eq       => "=",
            Operator::Ne       => "ne",
            Operator::Lt       => "<",
            Operator::Le       => "<=",
            Operator::Gt       => ">",
            Operator::Ge       => ">=",
            Operator::Contains => "contains",
        })
    }
}

/// Right-hand side of a clause, typed by the column it applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub column: Column,
    pub op: Operator,
    pub operand: Operand,
}

impl Clause {
    pub fn matches(&self, record: &Record) -> bool {
        match (record.cell(self.column), &self.operand) {
            (CellValue::Text(cell), Operand::Text(lit)) => match self.op {
                Operator::Contains => cell.contains(lit.as_str()),
                op => op.holds(cell.cmp(lit.as_str())),
            },
            (CellValue::Number(cell), Operand::Number(lit)) => cell
                .partial_cmp(lit)
                .is_some_and(|ord| self.op.holds(ord)),
            _ => false,
        }
    }
}

/// A conjunction of clauses. The empty expression matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpr {
    pub clauses: Vec<Clause>,
}

impl FilterExpr {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.clauses.iter().all(|c| c.matches(record))
    }

    /// Keep the rows that match, preserving order.
    pub fn apply<'a>(&self, rows: impl IntoIterator<Item = &'a Record>) -> Vec<&'a Record> {
        rows.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Parse and type-check a filter query. Blank input is the empty filter.
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    if input.trim().is_empty() {
        return Ok(FilterExpr::default());
    }

    let (_, raw) = all_consuming(query)(input)
        .finish()
        .map_err(|e| syntax_error(input, e))?;

    let clauses = raw.into_iter().map(compile).collect::<Result<Vec<_>>>()?;
    Ok(FilterExpr { clauses })
}

// ── Parsers ────────────────────────────────────────────────────────────────

struct RawClause<'a> {
    column: &'a str,
    op: Operator,
    literal: &'a str,
}

fn query(input: &str) -> ParseResult<'_, Vec<RawClause<'_>>> {
    delimited(multispace0, separated_list1(conjunction, clause), multispace0)(input)
}

fn conjunction(input: &str) -> ParseResult<'_, ()> {
    value(
        (),
        tuple((multispace0, alt((tag("&&"), tag_no_case("and"))), multispace0)),
    )(input)
}

fn clause(input: &str) -> ParseResult<'_, RawClause<'_>> {
    let (input, column) = column_ref(input)?;
    let (input, _) = multispace0(input)?;
    let (input, op) = opt(terminated(operator, multispace0))(input)?;
    let (input, literal) = literal(input)?;
    Ok((
        input,
        RawClause {
            column,
            op: op.unwrap_or(Operator::Eq),
            literal,
        },
    ))
}

fn column_ref(input: &str) -> ParseResult<'_, &str> {
    delimited(char('{'), is_not("}"), char('}'))(input)
}

fn operator(input: &str) -> ParseResult<'_, Operator> {
    alt((
        value(Operator::Ge, tag(">=")),
        value(Operator::Le, tag("<=")),
        value(Operator::Ne, tag("!=")),
        value(Operator::Gt, tag(">")),
        value(Operator::Lt, tag("<")),
        value(Operator::Eq, tag("=")),
        terminated(word_operator, multispace1),
    ))(input)
}

fn word_operator(input: &str) -> ParseResult<'_, Operator> {
    alt((
        value(Operator::Contains, tag_no_case("contains")),
        value(Operator::Eq, tag_no_case("eq")),
        value(Operator::Ne, tag_no_case("ne")),
        value(Operator::Le, tag_no_case("le")),
        value(Operator::Lt, tag_no_case("lt")),
        value(Operator::Ge, tag_no_case("ge")),
        value(Operator::Gt, tag_no_case("gt")),
    ))(input)
}

fn literal(input: &str) -> ParseResult<'_, &str> {
    alt((quoted, is_not(" \t\r\n&")))(input)
}

fn quoted(input: &str) -> ParseResult<'_, &str> {
    alt((
        delimited(char('"'), take_until("\""), char('"')),
        delimited(char('\''), take_until("'"), char('\'')),
    ))(input)
}

// ── Type checking ──────────────────────────────────────────────────────────

fn compile(raw: RawClause<'_>) -> Result<Clause> {
    let column = Column::from_name(raw.column)
        .ok_or_else(|| FilterError::UnknownColumn(raw.column.trim().to_string()))?;

    let operand = match column.kind() {
        ColumnKind::Text => Operand::Text(raw.literal.to_string()),
        ColumnKind::Numeric => {
            if raw.op == Operator::Contains {
                return Err(FilterError::UnsupportedOperator {
                    op: raw.op.to_string(),
                    column: column.to_string(),
                });
            }
            let number = raw.literal.parse::<f64>().map_err(|_| FilterError::NotNumeric {
                column: column.to_string(),
                literal: raw.literal.to_string(),
            })?;
            Operand::Number(number)
        }
    };

    Ok(Clause { column, op: raw.op, operand })
}

fn syntax_error(input: &str, err: VerboseError<&str>) -> FilterError {
    let near = err
        .errors
        .first()
        .map(|(rest, _)| *rest)
        .unwrap_or(input);
    FilterError::Syntax {
        near: near.chars().take(24).collect(),
    }
}
