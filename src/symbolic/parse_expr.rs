//! Turns a string expression into a symbolic expression.
//!# Example
//! ```
//! use RustedRoots::symbolic::symbolic_engine::Expr;
//! let parsed_expression = Expr::parse_expression("x^3 - x - 2").unwrap();
//! let f = parsed_expression.lambdify1D().unwrap();
//! assert_eq!(f(2.0).unwrap(), 4.0);
//! ```
//!
//! Nesting of brackets, calls, signs and exponents is limited to [`MAX_NESTING`] levels and
//! the resulting tree to [`MAX_TREE_DEPTH`] levels, so hostile input fails with
//! [`ParseError::TooDeep`] instead of exhausting the stack in the parser or later in
//! differentiation and evaluation.
//!
//! Grammar (whitespace is ignored between tokens):
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('-' | '+') unary | power
//! power := atom (('^' | '**') unary)?        right associative
//! atom  := number | call | symbol | '(' expr ')'
//! ```
// Once an operator or an opening bracket has been consumed the parser commits (`cut`),
// so errors point at the offending token instead of the start of the input.
use crate::symbolic::symbolic_engine::Expr;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, cut, not, opt, recognize},
    error::{ErrorKind, ParseError as NomParseError},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
};
use std::f64::consts::{E, PI};
use thiserror::Error;

/// Deepest chain of nested brackets, function calls, unary signs and exponents
pub const MAX_NESTING: usize = 128;
/// Deepest expression tree a parse may produce
pub const MAX_TREE_DEPTH: usize = 256;

/// Errors produced while turning text into an [`Expr`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected input at position {position}: '{found}'")]
    UnexpectedInput { position: usize, found: String },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("unknown variable '{found}': expression must depend on '{expected}' only")]
    UnknownVariable { found: String, expected: String },

    #[error("invalid number literal '{literal}'")]
    InvalidNumber { literal: String },

    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// nom error carrying enough context to build a [`ParseError`].
#[derive(Debug, PartialEq)]
enum SyntaxError<'a> {
    Nom(&'a str, ErrorKind),
    UnknownFunction(&'a str),
    InvalidNumber(&'a str),
    TooDeep(usize),
}

impl<'a> NomParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        SyntaxError::Nom(input, kind)
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> SyntaxError<'a> {
    fn into_parse_error(self, original: &str) -> ParseError {
        match self {
            SyntaxError::UnknownFunction(name) => ParseError::UnknownFunction {
                name: name.to_string(),
            },
            SyntaxError::InvalidNumber(literal) => ParseError::InvalidNumber {
                literal: literal.to_string(),
            },
            SyntaxError::TooDeep(limit) => ParseError::TooDeep { limit },
            SyntaxError::Nom(rest, _) => {
                let found: String = rest.trim_start().chars().take(12).collect();
                ParseError::UnexpectedInput {
                    position: original.len() - rest.trim_start().len(),
                    found: if found.is_empty() {
                        "end of input".to_string()
                    } else {
                        found
                    },
                }
            }
        }
    }
}

type PResult<'a, T> = IResult<&'a str, T, SyntaxError<'a>>;

fn ws<'a, F>(inner: F) -> impl Parser<&'a str, Output = F::Output, Error = SyntaxError<'a>>
where
    F: Parser<&'a str, Error = SyntaxError<'a>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Identifier: letter or underscore followed by letters, digits or underscores
fn identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn number(input: &str) -> PResult<'_, Expr> {
    let mantissa = alt((
        recognize((digit1, opt((char('.'), digit0)))),
        recognize((char('.'), digit1)),
    ));
    let exponent = (one_of("eE"), opt(one_of("+-")), digit1);
    let (rest, literal) = recognize((mantissa, opt(exponent))).parse(input)?;
    match literal.parse::<f64>() {
        Ok(value) => Ok((rest, Expr::Const(value))),
        Err(_) => Err(nom::Err::Failure(SyntaxError::InvalidNumber(literal))),
    }
}

/// Maps a function name onto the constructor of the matching node.
fn function_by_name(name: &str) -> Option<fn(Expr) -> Expr> {
    let constructor: fn(Expr) -> Expr = match name {
        "exp" => |a| Expr::Exp(a.boxed()),
        "ln" | "log" => |a| Expr::Ln(a.boxed()),
        "log10" => Expr::log10,
        "sqrt" => |a| Expr::sqrt(a.boxed()),
        "cbrt" => |a| Expr::cbrt(a.boxed()),
        "abs" => |a| Expr::abs(a.boxed()),
        "sin" => |a| Expr::sin(a.boxed()),
        "cos" => |a| Expr::cos(a.boxed()),
        "tg" | "tan" => |a| Expr::tg(a.boxed()),
        "ctg" | "cot" => |a| Expr::ctg(a.boxed()),
        "arcsin" | "asin" => |a| Expr::arcsin(a.boxed()),
        "arccos" | "acos" => |a| Expr::arccos(a.boxed()),
        "arctg" | "atan" | "arctan" => |a| Expr::arctg(a.boxed()),
        "arcctg" | "acot" | "arccot" => |a| Expr::arcctg(a.boxed()),
        _ => return None,
    };
    Some(constructor)
}

fn too_deep<'a, T>(limit: usize) -> PResult<'a, T> {
    Err(nom::Err::Failure(SyntaxError::TooDeep(limit)))
}

fn call<'a>(input: &'a str, depth: usize) -> PResult<'a, Expr> {
    let (rest, name) = terminated(identifier, ws(char('('))).parse(input)?;
    let Some(constructor) = function_by_name(name) else {
        return Err(nom::Err::Failure(SyntaxError::UnknownFunction(name)));
    };
    let (rest, argument) =
        cut(terminated(|i: &'a str| expr(i, depth), ws(char(')')))).parse(rest)?;
    Ok((rest, constructor(argument)))
}

fn symbol(input: &str) -> PResult<'_, Expr> {
    let (rest, name) = identifier(input)?;
    let node = match name {
        "pi" => Expr::Const(PI),
        "e" => Expr::Const(E),
        _ => Expr::Var(name.to_string()),
    };
    Ok((rest, node))
}

fn parens<'a>(input: &'a str, depth: usize) -> PResult<'a, Expr> {
    preceded(
        char('('),
        cut(terminated(|i: &'a str| expr(i, depth), ws(char(')')))),
    )
    .parse(input)
}

fn atom<'a>(input: &'a str, depth: usize) -> PResult<'a, Expr> {
    ws(alt((
        number,
        |i: &'a str| call(i, depth),
        symbol,
        |i: &'a str| parens(i, depth),
    )))
    .parse(input)
}

fn power<'a>(input: &'a str, depth: usize) -> PResult<'a, Expr> {
    let (rest, base) = atom(input, depth)?;
    let (rest, exponent) = opt(preceded(
        ws(alt((tag("**"), tag("^")))),
        cut(|i: &'a str| unary(i, depth)),
    ))
    .parse(rest)?;
    let node = match exponent {
        Some(exponent) => base.pow(exponent),
        None => base,
    };
    Ok((rest, node))
}

/// Every recursive path of the grammar passes through here, so this is where depth is counted.
fn unary<'a>(input: &'a str, depth: usize) -> PResult<'a, Expr> {
    if depth >= MAX_NESTING {
        return too_deep(MAX_NESTING);
    }
    let depth = depth + 1;
    alt((
        |i: &'a str| -> PResult<'a, Expr> {
            let (rest, operand) =
                preceded(ws(char('-')), cut(|j: &'a str| unary(j, depth))).parse(i)?;
            let negated = match operand {
                Expr::Const(value) => Expr::Const(-value),
                other => -other,
            };
            Ok((rest, negated))
        },
        preceded(ws(char('+')), cut(|i: &'a str| unary(i, depth))),
        |i: &'a str| power(i, depth),
    ))
    .parse(input)
}

fn term<'a>(input: &'a str, depth: usize) -> PResult<'a, Expr> {
    let (rest, first) = unary(input, depth)?;
    let mul_op = terminated(one_of("*/"), not(char('*')));
    let (rest, tail) =
        many0(pair(ws(mul_op), cut(|i: &'a str| unary(i, depth)))).parse(rest)?;
    // a chain of n operands folds into a tree n levels deep
    if tail.len() >= MAX_TREE_DEPTH {
        return too_deep(MAX_TREE_DEPTH);
    }
    let node = tail.into_iter().fold(first, |acc, (op, rhs)| match op {
        '*' => acc * rhs,
        _ => acc / rhs,
    });
    Ok((rest, node))
}

fn expr<'a>(input: &'a str, depth: usize) -> PResult<'a, Expr> {
    let (rest, first) = term(input, depth)?;
    let (rest, tail) =
        many0(pair(ws(one_of("+-")), cut(|i: &'a str| term(i, depth)))).parse(rest)?;
    if tail.len() >= MAX_TREE_DEPTH {
        return too_deep(MAX_TREE_DEPTH);
    }
    let node = tail.into_iter().fold(first, |acc, (op, rhs)| match op {
        '+' => acc + rhs,
        _ => acc - rhs,
    });
    Ok((rest, node))
}

fn top_level(input: &str) -> PResult<'_, Expr> {
    expr(input, 0)
}

/// Parses a whole string into a symbolic expression; trailing input is an error.
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    match all_consuming(ws(top_level)).parse(input) {
        Ok((_, parsed)) if parsed.depth() > MAX_TREE_DEPTH => Err(ParseError::TooDeep {
            limit: MAX_TREE_DEPTH,
        }),
        Ok((_, parsed)) => Ok(parsed),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into_parse_error(input)),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::UnexpectedInput {
            position: input.len(),
            found: "end of input".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Box<Expr> {
        Box::new(Expr::Var(name.to_string()))
    }

    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_func("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(var("x")));
    }

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression_func("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
        assert_eq!(parse_expression_func("1.5e-3").unwrap(), Expr::Const(1.5e-3));
        assert_eq!(parse_expression_func(".25").unwrap(), Expr::Const(0.25));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression_func("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_addition_and_subtraction() {
        assert_eq!(
            parse_expression_func("x + 2").unwrap(),
            Expr::Add(var("x"), Box::new(Expr::Const(2.0)))
        );
        assert_eq!(
            parse_expression_func("x - 2").unwrap(),
            Expr::Sub(var("x"), Box::new(Expr::Const(2.0)))
        );
    }

    #[test]
    fn test_parse_power_both_spellings() {
        let expected = Expr::Pow(var("x"), Box::new(Expr::Const(2.0)));
        assert_eq!(parse_expression_func("x^2").unwrap(), expected);
        assert_eq!(parse_expression_func("x**2").unwrap(), expected);
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_expression_func("2^3^2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Const(2.0)),
                Box::new(Expr::Pow(
                    Box::new(Expr::Const(3.0)),
                    Box::new(Expr::Const(2.0))
                ))
            )
        );
    }

    #[test]
    fn test_division_is_left_associative() {
        let expr = parse_expression_func("x / 2 / 4").unwrap();
        assert_eq!(
            expr,
            Expr::Div(
                Box::new(Expr::Div(var("x"), Box::new(Expr::Const(2.0)))),
                Box::new(Expr::Const(4.0))
            )
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let expr = parse_expression_func("-x^2").unwrap();
        assert_eq!(expr, -Expr::Pow(var("x"), Box::new(Expr::Const(2.0))));
        assert_eq!(parse_expression_func("-3").unwrap(), Expr::Const(-3.0));
        let expr = parse_expression_func("2^-1").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(Box::new(Expr::Const(2.0)), Box::new(Expr::Const(-1.0)))
        );
    }

    #[test]
    fn test_parse_logarithm_aliases() {
        assert_eq!(parse_expression_func("log(x)").unwrap(), Expr::Ln(var("x")));
        assert_eq!(parse_expression_func("ln(x)").unwrap(), Expr::Ln(var("x")));
    }

    #[test]
    fn test_parse_cube_root() {
        let expr = parse_expression_func("cbrt(x+2)").unwrap();
        assert_eq!(
            expr,
            Expr::cbrt(Box::new(Expr::Add(var("x"), Box::new(Expr::Const(2.0)))))
        );
    }

    #[test]
    fn test_parse_expression_with_brackets() {
        let expr = parse_expression_func("(x + y) * z").unwrap();
        assert_eq!(expr, Expr::Mul(Box::new(Expr::Add(var("x"), var("y"))), var("z")));
    }

    #[test]
    fn test_parse_complex_expression() {
        let expr = parse_expression_func("(x + y) * (z - 2) / exp(w)").unwrap();
        let x_plus_y = Box::new(Expr::Add(var("x"), var("y")));
        let z_minus_c = Box::new(Expr::Sub(var("z"), Box::new(Expr::Const(2.0))));
        let e = Box::new(Expr::Exp(var("w")));
        assert_eq!(expr, Expr::Div(Box::new(Expr::Mul(x_plus_y, z_minus_c)), e));
    }

    #[test]
    fn test_multiple_addition() {
        let result = parse_expression_func("x^2 - x - 1").unwrap();
        let x = Expr::Var("x".to_string());
        let to_check = x.clone().pow(Expr::Const(2.0)) - x - Expr::Const(1.0);
        assert_eq!(result, to_check);
    }

    #[test]
    fn test_parse_nested_trig() {
        let expr = parse_expression_func("sin(cos(x))").unwrap();
        assert_eq!(expr, Expr::sin(Box::new(Expr::cos(var("x")))));
        let expr = parse_expression_func("tan(x) + arctan(x)").unwrap();
        assert_eq!(
            expr,
            Expr::Add(Box::new(Expr::tg(var("x"))), Box::new(Expr::arctg(var("x"))))
        );
    }

    #[test]
    fn test_named_constants() {
        assert_eq!(parse_expression_func("pi").unwrap(), Expr::Const(PI));
        assert_eq!(parse_expression_func("e").unwrap(), Expr::Const(E));
    }

    #[test]
    fn test_invalid_expression() {
        let result = parse_expression_func("(x +");
        assert!(matches!(result, Err(ParseError::UnexpectedInput { .. })));
    }

    #[test]
    fn test_unmatched_brackets() {
        let result = parse_expression_func("(x + y");
        assert_eq!(
            result,
            Err(ParseError::UnexpectedInput {
                position: 6,
                found: "end of input".to_string()
            })
        );
        assert!(parse_expression_func("x + y)").is_err());
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let result = parse_expression_func("x 2");
        assert_eq!(
            result,
            Err(ParseError::UnexpectedInput {
                position: 2,
                found: "2".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_function() {
        let result = parse_expression_func("foo(x) + 1");
        assert_eq!(
            result,
            Err(ParseError::UnknownFunction {
                name: "foo".to_string()
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_expression_func("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let input = "(".repeat(10_000) + "x";
        assert_eq!(
            parse_expression_func(&input),
            Err(ParseError::TooDeep { limit: MAX_NESTING })
        );
        let input = "-".repeat(10_000) + "x";
        assert_eq!(
            parse_expression_func(&input),
            Err(ParseError::TooDeep { limit: MAX_NESTING })
        );
        let input = "sin(".repeat(5_000) + "x";
        assert_eq!(
            parse_expression_func(&input),
            Err(ParseError::TooDeep { limit: MAX_NESTING })
        );
        let input = "2^".repeat(5_000) + "x";
        assert!(matches!(
            parse_expression_func(&input),
            Err(ParseError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_long_chains_are_bounded() {
        let input = "x".to_string() + &" + x".repeat(10_000);
        assert_eq!(
            parse_expression_func(&input),
            Err(ParseError::TooDeep {
                limit: MAX_TREE_DEPTH
            })
        );
        let input = "x".to_string() + &" * x".repeat(10_000);
        assert!(matches!(
            parse_expression_func(&input),
            Err(ParseError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let input = "(".repeat(60) + "x + 1" + &")".repeat(60);
        assert_eq!(
            parse_expression_func(&input),
            Ok(Expr::Add(var("x"), Box::new(Expr::Const(1.0))))
        );
        let input = "sin(".repeat(20) + "x" + &")".repeat(20);
        assert_eq!(parse_expression_func(&input).unwrap().depth(), 21);
    }

    #[test]
    fn test_dangling_operator() {
        assert!(parse_expression_func("x *").is_err());
        assert!(parse_expression_func("* x").is_err());
        assert!(parse_expression_func("x ^").is_err());
    }
}
