use uno_core::{format_template, render, SubstitutionMapping, Value, ValueFormatter};

fn mapping(entries: &[(&str, &str)]) -> SubstitutionMapping {
    entries.iter().map(|(k, v)| (*k, Value::from(*v))).collect()
}

#[test]
fn substitutes_every_occurrence() {
    let out = render("{a}-{b}-{a}", &mapping(&[("a", "x"), ("b", "y")]), &ValueFormatter::default());
    assert_eq!(out, "x-y-x");
}

#[test]
fn substitution_is_sequential_in_mapping_order() {
    let formatter = ValueFormatter::default();
    // `a` runs first and introduces `{b}`, which the later `b` pass expands
    assert_eq!(render("{a}", &mapping(&[("a", "{b}"), ("b", "z")]), &formatter), "z");
    // with `b` first the introduced text is left alone
    assert_eq!(render("{a}", &mapping(&[("b", "z"), ("a", "{b}")]), &formatter), "{b}");
}

#[test]
fn values_are_formatted_before_substitution() {
    let mut map = SubstitutionMapping::new();
    map.insert("n", 2.5);
    map.insert("list", Value::array([Value::from(1), Value::from(2)]));
    map.insert("f", Value::function("f", |_, _| Ok(Value::Null)));
    let out = render("{n} {list} {f}", &map, &ValueFormatter::default());
    assert_eq!(out, "2.5 [1,2] {f}");
}

#[test]
fn braced_keys_are_used_verbatim() {
    let out = render("<{x}>", &mapping(&[("{x}", "y")]), &ValueFormatter::default());
    assert_eq!(out, "<y>");
}

#[test]
fn generic_form_passes_through_non_strings() {
    let mapping = Value::object([("a", Value::from(1))]);
    let template = Value::from(42);
    assert_eq!(format_template(&template, &mapping).as_f64(), Some(42.0));

    let untouched = format_template(&Value::from("{a}"), &Value::from(3));
    assert_eq!(untouched.as_str(), Some("{a}"));
}

#[test]
fn generic_form_accepts_objects_and_arrays() {
    let by_name = format_template(
        &Value::from("{a}-{b}"),
        &Value::object([("a", Value::from("x")), ("b", Value::from("y"))]),
    );
    assert_eq!(by_name.as_str(), Some("x-y"));

    let by_index = format_template(
        &Value::from("{1}{0}"),
        &Value::array([Value::from("a"), Value::from("b")]),
    );
    assert_eq!(by_index.as_str(), Some("ba"));
}
