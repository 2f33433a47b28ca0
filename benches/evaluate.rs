use criterion::{black_box, criterion_group, criterion_main, Criterion};
use signal_rules::{
    evaluate_condition, normalize_operators, substitute_variables, FieldValue, FieldValues,
    RuleEngine, RuleEngineBuilder, ValueKind, VariableValues,
};

/// Build an engine with `n` rules, each testing its own variable, and a form
/// snapshot in which every rule fires.
fn build_engine(n: usize) -> (RuleEngine, FieldValues) {
    let mut builder = RuleEngineBuilder::new();
    let mut values = FieldValues::new();

    for i in 0..n {
        let data_element = format!("de{i}");
        builder = builder
            .variable(&format!("Var {i}"), &data_element, ValueKind::Text)
            .rule(
                &format!("r{i}"),
                &format!("#{{Var {i}}} == 'High' || #{{Var {i}}} >= 18"),
                |r| r.assign(&format!("f{i}"), "Escalate").show(&format!("s{i}")),
            );
        values.insert(&data_element, FieldValue::from("High"));
    }

    (builder.build().unwrap(), values)
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_pass");

    for &n in &[5, 20, 50] {
        let (engine, values) = build_engine(n);
        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| engine.evaluate(black_box(&values)));
        });
    }

    group.finish();
}

fn bench_condition_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("condition");
    let condition = "(#{Risk level} == 'High' || #{Risk level} == 'Very High') && #{Age} >= 18 && !#{Confirmed}";
    let variables: VariableValues = [
        ("Risk level".to_owned(), FieldValue::from("Very High")),
        ("Age".to_owned(), FieldValue::from("34")),
        ("Confirmed".to_owned(), FieldValue::Bool(false)),
    ]
    .into_iter()
    .collect();
    let substituted = substitute_variables(condition, &variables);

    group.bench_function("substitute", |b| {
        b.iter(|| substitute_variables(black_box(condition), &variables));
    });
    group.bench_function("normalize", |b| {
        b.iter(|| normalize_operators(black_box(&substituted)));
    });
    group.bench_function("evaluate", |b| {
        b.iter(|| evaluate_condition(black_box(condition), &variables));
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &n in &[5, 20, 50] {
        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| black_box(build_engine(n)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_condition_stages, bench_build);
criterion_main!(benches);
