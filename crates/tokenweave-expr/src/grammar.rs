//! Expression grammar.
//!
//! ```text
//! expr    = term (('+' | '-') term)*
//! term    = factor (('*' | '/') factor)*
//! factor  = '-' factor | '+' factor | atom
//! atom    = number | call | ident | '(' expr ')'
//! call    = ident '(' expr (',' expr)* ')'
//! ```

use nom::{
    branch::alt,
    character::complete::char,
    combinator::{all_consuming, map},
    error::{Error as NomError, ErrorKind},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
    IResult,
};

use crate::ast::{BinaryOp, Expr, Function};
use crate::lexer::{additive, identifier, multiplicative, number, ws};

/// Parse a complete expression. Identifiers must already be evaluator-safe.
pub fn parse(input: &str) -> Result<Expr, String> {
    if input.trim().is_empty() {
        return Err("empty expression".to_string());
    }
    let expr = match all_consuming(ws(expr))(input) {
        Ok((_, expr)) => expr,
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::Verify => {
            return Err(format!("unknown function at '{}'", e.input.trim()));
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(format!("unexpected input at '{}'", e.input.trim()));
        }
        Err(nom::Err::Incomplete(_)) => return Err("unexpected end of expression".to_string()),
    };
    check_arity(&expr)?;
    Ok(expr)
}

fn check_arity(expr: &Expr) -> Result<(), String> {
    match expr {
        Expr::Number(_) | Expr::Ident(_) => Ok(()),
        Expr::Neg(inner) => check_arity(inner),
        Expr::Binary { lhs, rhs, .. } => {
            check_arity(lhs)?;
            check_arity(rhs)
        }
        Expr::Call { function, args } => {
            if !function.accepts(args.len()) {
                return Err(format!(
                    "{}() does not take {} argument{}",
                    function,
                    args.len(),
                    if args.len() == 1 { "" } else { "s" }
                ));
            }
            args.iter().try_for_each(check_arity)
        }
    }
}

fn fold_binary(first: Expr, rest: Vec<(char, Expr)>) -> Expr {
    rest.into_iter().fold(first, |lhs, (op, rhs)| match BinaryOp::from_char(op) {
        Some(op) => Expr::binary(op, lhs, rhs),
        None => lhs,
    })
}

fn expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = term(input)?;
    let (input, rest) = many0(pair(ws(additive), term))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (input, first) = factor(input)?;
    let (input, rest) = many0(pair(ws(multiplicative), factor))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn factor(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(ws(char('-')), factor), |e| Expr::Neg(Box::new(e))),
        preceded(ws(char('+')), factor),
        ws(atom),
    ))(input)
}

fn atom(input: &str) -> IResult<&str, Expr> {
    alt((
        map(number, Expr::Number),
        call,
        map(identifier, |name| Expr::Ident(name.to_string())),
        delimited(ws(char('(')), expr, ws(char(')'))),
    ))(input)
}

fn call(input: &str) -> IResult<&str, Expr> {
    let (rest, name) = identifier(input)?;
    let (rest, args) = delimited(
        ws(char('(')),
        separated_list1(ws(char(',')), expr),
        ws(char(')')),
    )(rest)?;
    match Function::from_name(name) {
        Some(function) => Ok((rest, Expr::Call { function, args })),
        None => Err(nom::Err::Failure(NomError::new(input, ErrorKind::Verify))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Expr {
        Expr::Number(n)
    }

    #[test]
    fn test_precedence() {
        let parsed = parse("1 + 2 * 3").unwrap();
        assert_eq!(
            parsed,
            Expr::binary(BinaryOp::Add, num(1.0), Expr::binary(BinaryOp::Mul, num(2.0), num(3.0)))
        );
    }

    #[test]
    fn test_left_associative() {
        let parsed = parse("8 / 2 / 2").unwrap();
        assert_eq!(
            parsed,
            Expr::binary(BinaryOp::Div, Expr::binary(BinaryOp::Div, num(8.0), num(2.0)), num(2.0))
        );
    }

    #[test]
    fn test_unary_and_parens() {
        let parsed = parse("-(__ref0 + 1)").unwrap();
        assert_eq!(
            parsed,
            Expr::Neg(Box::new(Expr::binary(
                BinaryOp::Add,
                Expr::Ident("__ref0".to_string()),
                num(1.0)
            )))
        );
    }

    #[test]
    fn test_calls() {
        let parsed = parse("max(1, round(__ref0 / 3))").unwrap();
        assert!(matches!(parsed, Expr::Call { function: Function::Max, ref args } if args.len() == 2));
        assert_eq!(parsed.identifiers(), vec!["__ref0"]);
    }

    #[test]
    fn test_errors() {
        assert!(parse("").is_err());
        assert!(parse("1 +").unwrap_err().contains("unexpected input"));
        assert!(parse("(1 + 2").is_err());
        assert!(parse("sqrt(4)").unwrap_err().contains("unknown function"));
        assert!(parse("round(1, 2)").unwrap_err().contains("does not take 2 arguments"));
    }
}
