use eqn_ast::{Constant, Equation, Expr, RelOp, Statement};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit0, digit1, multispace0, one_of, satisfy},
    combinator::{map, not, opt, recognize},
    multi::{fold_many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::ParseError;

// Parser for numeric literals
// Supports: 123, 8.2, .5, 8., 2e-3, 1.5E+4
// A dot that starts an element-wise operator (2.*x, 2.^n) is left for the operator.
fn parse_number(input: &str) -> IResult<&str, Expr> {
    let decimal_point = terminated(char('.'), not(one_of("*/^'")));
    map(
        recognize(pair(
            alt((
                recognize(pair(digit1, opt(pair(decimal_point, digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        )),
        |text: &str| Expr::Number(text.to_string()),
    )(input)
}

// Identifiers start with a letter, then allow letters, digits, underscores
// Examples: x, x1, theta3, x_1
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

// Parser for variables; `pi` and `inf` are constants
fn parse_variable(input: &str) -> IResult<&str, Expr> {
    map(parse_identifier, |name: &str| match name {
        "pi" => Expr::Constant(Constant::Pi),
        "inf" | "Inf" => Expr::Constant(Constant::Infinity),
        _ => Expr::Variable(name.to_string()),
    })(input)
}

// Parser for parentheses
fn parse_parens(input: &str) -> IResult<&str, Expr> {
    delimited(char('('), parse_expr, preceded(multispace0, char(')')))(input)
}

// Parser for function calls: name(arg, arg, ...)
fn parse_function(input: &str) -> IResult<&str, Expr> {
    let (input, name) = parse_identifier(input)?;
    let (input, _) = preceded(multispace0, char('('))(input)?;
    let (input, args) = separated_list0(preceded(multispace0, char(',')), parse_expr)(input)?;
    let (input, _) = preceded(multispace0, char(')'))(input)?;
    Ok((input, Expr::Function(name.to_string(), args)))
}

// Atom
fn parse_atom(input: &str) -> IResult<&str, Expr> {
    preceded(
        multispace0,
        alt((parse_number, parse_function, parse_variable, parse_parens)),
    )(input)
}

// Transpose suffix binds tighter than power: A'^2 = (A')^2
// No whitespace is allowed before the quote.
fn parse_postfix(input: &str) -> IResult<&str, Expr> {
    let (input, atom) = parse_atom(input)?;
    fold_many0(
        alt((tag(".'"), tag("'"))),
        move || atom.clone(),
        |acc, _| Expr::Transpose(Box::new(acc)),
    )(input)
}

// Power - right associative: 2^3^4 = 2^(3^4), not (2^3)^4
// Also allows negative exponents: x^-2, x^-(a+b)
fn parse_power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = parse_postfix(input)?;

    let caret: IResult<&str, &str> = preceded(multispace0, alt((tag(".^"), tag("^"))))(input);
    match caret {
        Ok((input, _)) => {
            let (input, exp) = parse_power_exponent(input)?;
            Ok((input, Expr::pow(base, exp)))
        }
        Err(_) => Ok((input, base)),
    }
}

// Parser for exponents: allows sign prefix (-2, +3) then recurses for chained powers
fn parse_power_exponent(input: &str) -> IResult<&str, Expr> {
    preceded(
        multispace0,
        alt((
            map(preceded(char('-'), parse_power_exponent), Expr::neg),
            preceded(char('+'), parse_power_exponent),
            parse_power,
        )),
    )(input)
}

// Unary
fn parse_unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(
            preceded(preceded(multispace0, char('-')), parse_unary),
            Expr::neg,
        ),
        preceded(preceded(multispace0, char('+')), parse_unary),
        parse_power,
    ))(input)
}

// Term - explicit * and / (and their element-wise forms .* ./)
// Also handles implicit multiplication: 2x → 2*x, 3(x+y) → 3*(x+y)
fn parse_term(input: &str) -> IResult<&str, Expr> {
    let (input, init) = parse_unary(input)?;

    let (input, product) = fold_many0(
        pair(
            preceded(
                multispace0,
                alt((tag(".*"), tag("./"), tag("*"), tag("/"))),
            ),
            parse_unary,
        ),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            "*" | ".*" => Expr::mul(acc, rhs),
            _ => Expr::div(acc, rhs),
        },
    )(input)?;

    parse_implicit_mul_chain(input, product)
}

// Implicit multiplication only applies with no whitespace between the factors
fn parse_implicit_mul_chain(input: &str, acc: Expr) -> IResult<&str, Expr> {
    let starts_factor = matches!(input.chars().next(), Some(c) if c.is_ascii_alphabetic() || c == '(');
    if starts_factor && can_implicit_mul(&acc) {
        if let Ok((remaining, next_factor)) = parse_power(input) {
            return parse_implicit_mul_chain(remaining, Expr::mul(acc, next_factor));
        }
    }
    Ok((input, acc))
}

// Only numeric coefficients start an implicit product: 2x, 2^2x, 3*2x
fn can_implicit_mul(node: &Expr) -> bool {
    match node {
        Expr::Number(_) => true,
        Expr::Pow(_, exp) => can_implicit_mul(exp),
        Expr::Mul(_, right) | Expr::Div(_, right) => can_implicit_mul(right),
        _ => false,
    }
}

// Expr
fn parse_expr(input: &str) -> IResult<&str, Expr> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(preceded(multispace0, one_of("+-")), parse_term),
        move || init.clone(),
        |acc, (op, rhs)| {
            if op == '+' {
                Expr::add(acc, rhs)
            } else {
                Expr::sub(acc, rhs)
            }
        },
    )(input)
}

// Parser for relational operators (two-character forms first)
fn parse_relop(input: &str) -> IResult<&str, RelOp> {
    preceded(
        multispace0,
        alt((
            map(tag("=="), |_| RelOp::Eq),
            map(tag("~="), |_| RelOp::Neq),
            map(tag("!="), |_| RelOp::Neq),
            map(tag("<="), |_| RelOp::Leq),
            map(tag(">="), |_| RelOp::Geq),
            map(tag("="), |_| RelOp::Eq),
            map(tag("<"), |_| RelOp::Lt),
            map(tag(">"), |_| RelOp::Gt),
        )),
    )(input)
}

// Trailing `;` terminates a statement
fn parse_terminator(input: &str) -> IResult<&str, Option<char>> {
    opt(preceded(multispace0, char(';')))(input)
}

fn parse_statement_node(input: &str) -> IResult<&str, Statement> {
    let (input, lhs) = parse_expr(input)?;
    let (input, relation) = opt(pair(parse_relop, parse_expr))(input)?;
    let (input, _) = parse_terminator(input)?;

    let statement = match relation {
        Some((op, rhs)) => Statement::Equation(Equation { lhs, rhs, op }),
        None => Statement::Expression(lhs),
    };
    Ok((input, statement))
}

fn finish<T>(input: &str, result: IResult<&str, T>) -> Result<T, ParseError> {
    let (remaining, value) = result.map_err(|e| ParseError::NomError(format!("{}", e)))?;

    let rest = remaining.trim();
    if !rest.is_empty() {
        return Err(ParseError::UnconsumedInput {
            remaining: rest.to_string(),
            offset: input.len() - remaining.trim_start().len(),
        });
    }
    Ok(value)
}

/// Parse a bare expression (no relation), allowing a trailing `;`.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let result = parse_expr(input).and_then(|(rest, expr)| {
        let (rest, _) = parse_terminator(rest)?;
        Ok((rest, expr))
    });
    finish(input, result)
}

/// Parse a statement: an expression, or a relation between two expressions.
pub fn parse_statement(input: &str) -> Result<Statement, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    finish(input, parse_statement_node(input))
}
