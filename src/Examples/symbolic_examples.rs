use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;

#[allow(dead_code)]
pub fn sym_examples(example: usize) {
    match example {
        0 => {
            // parse expression from string to symbolic expression
            let input = "x^3 - x - 2";
            let f = match Expr::parse_expression(input) {
                Ok(f) => f,
                Err(err) => {
                    println!("cannot parse {}: {}", input, err);
                    return;
                }
            };
            println!("parsed expression {}", f);
            // differentiate and simplify
            let df_dx = f.diff("x").simplify_();
            println!("df/dx = {}, as string: {}", df_dx, df_dx.sym_to_str("x"));
            // convert symbolic expression to a Rust function and evaluate it
            match f.lambdify1D() {
                Ok(f_num) => println!("f(2) = {:?}", f_num(2.0)),
                Err(err) => println!("cannot compile {}: {}", f, err),
            }
        }
        1 => {
            // evaluation errors are values, not NaN: ln(-1) is a domain error
            let f = match Expr::parse_expression("ln(x) + sqrt(x)") {
                Ok(f) => f,
                Err(err) => {
                    println!("{}", err);
                    return;
                }
            };
            let f_num = match f.lambdify1D() {
                Ok(f_num) => f_num,
                Err(err) => {
                    println!("{}", err);
                    return;
                }
            };
            for x in [-1.0, 0.0, 1.0, 4.0] {
                match f_num(x) {
                    Ok(value) => println!("f({}) = {}", x, value),
                    Err(err) => println!("f({}) failed: {}", x, err),
                }
            }
        }
        2 => {
            // compare analytical and numerical derivatives on a grid
            let input = "x + exp(x)";
            let f = match Expr::parse_expression(input) {
                Ok(f) => f,
                Err(err) => {
                    println!("{}", err);
                    return;
                }
            };
            match f.compare_num1D("x", 0.0, 10.0, 100, 1e-6) {
                Ok((norm, close)) => println!("norm = {}, derivatives agree: {}", norm, close),
                Err(err) => println!("comparison failed: {}", err),
            }
            match f.lambdify1D_from_linspace(0.0, 1.0, 5) {
                Ok(values) => println!("f on {:?} = {:?}", linspace(0.0, 1.0, 5), values),
                Err(err) => println!("{}", err),
            }
        }
        3 => {
            // parse errors carry position and reason
            for input in ["x^3 -", "sinh(x)", "2 * (x + 1", "x + y"] {
                match Expr::parse_in_variable(input, "x") {
                    Ok(expr) => println!("{} parsed as {}", input, expr),
                    Err(err) => println!("{:?}: {}", input, err),
                }
            }
        }
        _ => println!("no such example"),
    }
}
