use uno_core::{Function, Value};
use uno_host::{Evaluator, Invocation};

fn identity() -> Value {
    Value::Function(Function::named("identity", |_, args| {
        Ok(args.first().cloned().unwrap_or_default())
    }))
}

fn code_of(invocation: &Invocation) -> String {
    let err = Evaluator::default()
        .evaluate(invocation)
        .expect_err("invalid call");
    assert!(err.is_argument(), "unexpected family: {err:?}");
    err.info().code.clone()
}

#[test]
fn two_arguments_are_rejected() {
    let invocation = Invocation::new().target(identity()).args(Value::array([]));
    assert_eq!(invocation.argument_count(), 2);
    assert_eq!(code_of(&invocation), "uno_host.argument_count");
}

#[test]
fn six_arguments_are_rejected() {
    let invocation = Invocation::call(identity(), Value::array([]), Value::Undefined)
        .named("{method}")
        .on(Value::Null)
        .repeat(10);
    assert_eq!(invocation.argument_count(), 6);
    assert_eq!(code_of(&invocation), "uno_host.argument_count");
}

#[test]
fn args_must_be_an_array() {
    let invocation = Invocation::call(identity(), Value::from(1), 1);
    assert_eq!(code_of(&invocation), "uno_host.argument_args");
    let missing = Invocation::new().target(identity()).expecting(1).named("x");
    assert_eq!(code_of(&missing), "uno_host.argument_args");
}

#[test]
fn target_must_be_a_function() {
    let invocation = Invocation::call(Value::from("identity"), Value::array([]), 1);
    let err = Evaluator::default().evaluate(&invocation).unwrap_err();
    assert_eq!(err.info().code, "uno_host.argument_target");
    assert_eq!(err.info().context.get("found").map(String::as_str), Some("string"));
}

#[test]
fn target_is_checked_before_args() {
    let invocation = Invocation::call(Value::Null, Value::Null, 1);
    assert_eq!(code_of(&invocation), "uno_host.argument_target");
}

#[test]
fn repeat_must_be_numeric() {
    let invocation = Invocation::call(identity(), Value::array([]), Value::Undefined).repeat("ten");
    assert_eq!(code_of(&invocation), "uno_host.argument_repeat");
    let nan = Invocation::call(identity(), Value::array([]), Value::Undefined).repeat(f64::NAN);
    assert_eq!(code_of(&nan), "uno_host.argument_repeat");
}

#[test]
fn numeric_repeat_is_accepted_and_inert() {
    let invocation = Invocation::call(identity(), Value::array([Value::from(7)]), 7).repeat(1000);
    let verdict = Evaluator::default().evaluate(&invocation).expect("valid call");
    assert!(verdict.pass);
    assert_eq!(verdict.name, "identity(7) == 7");
}

#[test]
fn empty_name_is_rejected() {
    let invocation = Invocation::call(identity(), Value::array([]), Value::Undefined).named("");
    assert_eq!(code_of(&invocation), "uno_host.argument_name");
}

#[test]
fn mismatches_are_not_errors() {
    let invocation = Invocation::call(identity(), Value::array([Value::from(1)]), 2);
    assert_eq!(Evaluator::default().check(&invocation), Ok(false));
}
