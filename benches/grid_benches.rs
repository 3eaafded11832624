use RustedCalculus::symbolic::symbolic_engine::Expr;
use RustedCalculus::symbolic::utils::linspace;
use criterion::{Criterion, criterion_group, criterion_main};
use simplelog::{Config, LevelFilter, SimpleLogger};
use std::collections::HashMap;
use std::hint::black_box;

fn bench_parse_and_gradient(c: &mut Criterion) {
    let _ = SimpleLogger::init(LevelFilter::Warn, Config::default());
    c.bench_function("parse and gradient", |b| {
        b.iter(|| {
            let expr =
                Expr::parse(black_box("exp(-x^2 - y^2) * sin(3*x) + y^2 / (1 + x^2)")).unwrap();
            expr.diff_multi()
        })
    });
}

fn bench_grid_eval(c: &mut Criterion) {
    let expr = Expr::parse("exp(-x^2 - y^2) * sin(3*x) + y^2 / (1 + x^2)")
        .unwrap()
        .diff("x")
        .simplify();
    let axis = linspace(-3.0, 3.0, 400);
    let mut xs = Vec::with_capacity(400 * 400);
    let mut ys = Vec::with_capacity(400 * 400);
    for y in &axis {
        for x in &axis {
            xs.push(*x);
            ys.push(*y);
        }
    }
    let bindings = HashMap::from([("x".to_string(), xs), ("y".to_string(), ys)]);
    c.bench_function("derivative over 400x400 grid", |b| {
        b.iter(|| expr.eval_grid(black_box(&bindings)).unwrap())
    });
}

criterion_group!(benches, bench_parse_and_gradient, bench_grid_eval);
criterion_main!(benches);
