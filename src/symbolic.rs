/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedCalculus::symbolic::symbolic_engine::Expr;
/// let input = "x^2.3 * log(x + y + y^2.6)";
/// let parsed_expression = Expr::parse(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let parsed_function = parsed_expression.lambdify(&["x", "y"]).unwrap();
/// println!("{}, Rust function: {}  \n", input, parsed_function(&[1.0, 2.0]));
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) turns a String expression into a symbolic expression
/// 2) turns a symbolic expression into a Rust function or into numeric samples
/// 3) turns a symbolic expression back into a string expression for printing and display
///# Example#
/// ```
/// use RustedCalculus::symbolic::symbolic_engine::Expr;
/// let input = "exp(x) + log(y)";
///   // here you've got symbolic expression
/// let parsed_expression = Expr::parse(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
///   // turn symbolic expression to a pretty human-readable string
/// let human_readable = parsed_expression.render();
/// println!("{}, rendered: {}  \n", input, human_readable);
///   // return vec of all free variables, alphabetical
/// let all = parsed_expression.free_variables();
/// println!("free variables {:?}", all);
///   // differentiate with respect to x and y
/// let df_dx = parsed_expression.diff("x");
/// let df_dy = parsed_expression.diff("y");
/// println!("df_dx = {}, df_dy = {}", df_dx, df_dy);
///   // evaluate at a point, strict errors on division by zero or domain violations
/// let bindings = std::collections::HashMap::from([("x".to_string(), 1.0), ("y".to_string(), 2.0)]);
/// let f_res = parsed_expression.eval_scalar(&bindings).unwrap();
/// println!("f_res = {}", f_res);
///   // or evaluate over vectorized grids, domain violations become NaN gaps
/// let grid = std::collections::HashMap::from([
///     ("x".to_string(), vec![0.0, 1.0]),
///     ("y".to_string(), vec![1.0, 2.0]),
/// ]);
/// let samples = parsed_expression.eval_grid(&grid).unwrap();
/// println!("samples = {:?}", samples);
/// ```
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
///______________________________________________________________________________________________________________________________________________
/// explicit error taxonomy returned by the fallible operations: lexing, parsing, evaluation
/// _____________________________________________________________________________________________________________________________________________
pub mod symbolic_errors;
pub mod symbolic_lambdify;
pub mod symbolic_renderer;
pub mod symbolic_simplify;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions: linspace, numerical derivatives, norms
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
