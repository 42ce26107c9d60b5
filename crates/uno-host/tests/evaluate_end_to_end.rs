use uno_core::{Function, Value};
use uno_host::{Evaluator, Invocation};

fn round() -> Value {
    Value::Function(Function::new("function round(x)", |_, args| {
        let x = args.first().and_then(Value::as_f64).unwrap_or(f64::NAN);
        Ok(Value::Number((x + 0.5).floor()))
    }))
}

fn math() -> Value {
    Value::object([("round", round()), ("PI", Value::from(std::f64::consts::PI))])
}

fn args(items: impl IntoIterator<Item = Value>) -> Value {
    Value::array(items)
}

#[test]
fn passing_call_renders_default_name() {
    let evaluator = Evaluator::default();
    let verdict = evaluator
        .evaluate(&Invocation::call(round(), args([Value::from(1.5)]), 2))
        .expect("valid call");
    assert!(verdict.pass);
    assert!(!verdict.threw);
    assert_eq!(verdict.name, "round(1.5) == 2");
    assert_eq!(verdict.message, "Uno test passed: round(1.5) == 2");
}

#[test]
fn failing_call_reports_input_returned_and_expected() {
    let evaluator = Evaluator::default();
    let verdict = evaluator
        .evaluate(&Invocation::call(round(), args([Value::from(1.4)]), 2))
        .expect("valid call");
    assert!(!verdict.pass);
    assert_eq!(
        verdict.message,
        "Test failed: round(1.4) == 2\n     input:\t1.4\n  returned:\t1\n  expected:\t2\n"
    );
}

#[test]
fn method_call_with_receiver_and_template() {
    let evaluator = Evaluator::default();
    let invocation = Invocation::call(round(), args([Value::from(2.1)]), 2)
        .named("Math.{method}({args}) == {expected}")
        .on(math());
    assert_eq!(invocation.argument_count(), 5);
    let verdict = evaluator.evaluate(&invocation).expect("valid call");
    assert!(verdict.pass);
    assert!(verdict.name.contains("Math.round"));
    assert_eq!(verdict.name, "Math.round(2.1) == 2");
}

#[test]
fn receiver_is_the_invocation_context() {
    let scale = Value::Function(Function::new("function scale(x)", |receiver, args| {
        let factor = receiver.get("factor").and_then(Value::as_f64).unwrap_or(1.0);
        let x = args.first().and_then(Value::as_f64).unwrap_or(0.0);
        Ok(Value::Number(factor * x))
    }));
    let owner = Value::object([("factor", Value::from(3))]);
    let evaluator = Evaluator::default();

    let with_owner = Invocation::call(scale.clone(), args([Value::from(2)]), 6).on(owner);
    assert!(evaluator.check(&with_owner).unwrap());

    // without a receiver the context is null and the default factor applies
    let without = Invocation::call(scale, args([Value::from(2)]), 2);
    assert!(evaluator.check(&without).unwrap());
}

#[test]
fn thrown_failures_are_compared_like_results() {
    let parse = Value::Function(Function::new("function parse(text)", |_, args| {
        match args.first().and_then(Value::as_str) {
            Some(text) if !text.is_empty() => Ok(Value::from(text.len())),
            _ => Err(Value::object([("error", Value::from("empty input"))])),
        }
    }));
    let evaluator = Evaluator::default();

    let expected_failure = Value::object([("error", Value::from("empty input"))]);
    let verdict = evaluator
        .evaluate(&Invocation::call(parse.clone(), args([Value::from("")]), expected_failure))
        .unwrap();
    assert!(verdict.pass);
    assert!(verdict.threw);

    let verdict = evaluator
        .evaluate(&Invocation::call(parse, args([Value::from("")]), 0))
        .unwrap();
    assert!(!verdict.pass);
    assert!(verdict.message.contains("  threw:\t{\"error\":\"empty input\"}\n"));
}

#[test]
fn panics_become_thrown_failures() {
    let explode = Value::Function(Function::new("function explode()", |_, _| {
        panic!("kaboom");
    }));
    let verdict = Evaluator::default()
        .evaluate(&Invocation::call(explode, args([]), "kaboom"))
        .unwrap();
    assert!(verdict.threw);
    assert!(verdict.pass);
    assert_eq!(verdict.name, "explode() == kaboom");
}

#[test]
fn anonymous_targets_display_as_function() {
    let double = Value::Function(Function::anonymous(|_, args| {
        Ok(Value::Number(args.first().and_then(Value::as_f64).unwrap_or(0.0) * 2.0))
    }));
    let verdict = Evaluator::default()
        .evaluate(&Invocation::call(double, args([Value::from(4)]), 8))
        .unwrap();
    assert_eq!(verdict.name, "function(4) == 8");
}

#[test]
fn aliases_all_resolve() {
    let sum = Value::Function(Function::new("function sum(a, b)", |_, args| {
        Ok(Value::Number(args.iter().filter_map(Value::as_f64).sum()))
    }));
    let invocation = Invocation::call(sum, args([Value::from(1), Value::from(2)]), 3).named(
        "{fn}|{f}|{function}|{method} {in}|{input}|{arguments}|{args} {out}|{output}|{result} {expected}",
    );
    let verdict = Evaluator::default().evaluate(&invocation).unwrap();
    assert_eq!(verdict.name, "sum|sum|sum|sum 1, 2|1, 2|1, 2|1, 2 3|3|3 3");
}

#[test]
fn nan_results_match_nan_expectations() {
    let verdict = Evaluator::default()
        .evaluate(&Invocation::call(round(), args([Value::from("x")]), f64::NAN))
        .unwrap();
    assert!(verdict.pass);
    assert_eq!(verdict.name, r#"round("x") == NaN"#);
}

#[test]
fn function_results_display_as_undefined() {
    let make = Value::Function(Function::new("function make()", |_, _| {
        Ok(Value::function("inner", |_, _| Ok(Value::Null)))
    }));
    let verdict = Evaluator::default()
        .evaluate(&Invocation::call(make, args([]), Value::Null).named("make() -> {result}"))
        .unwrap();
    assert!(!verdict.pass);
    assert_eq!(verdict.name, "make() -> undefined");
    assert!(verdict.message.contains("returned:\tundefined"));
}

#[test]
fn missing_expected_defaults_to_undefined() {
    let noop = Value::Function(Function::new("function noop()", |_, _| Ok(Value::Undefined)));
    let invocation = Invocation::new()
        .named("{method} returns nothing")
        .target(noop)
        .args(args([]));
    assert_eq!(invocation.argument_count(), 3);
    assert!(Evaluator::default().check(&invocation).unwrap());
}
