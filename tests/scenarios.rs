use signal_rules::{
    execute_program_rules, FieldValue, FieldValues, Rule, RuleAction, RuleEngineBuilder,
    RuleVariable, ValueKind,
};

fn rule(name: &str, condition: &str, actions: Vec<RuleAction>) -> Rule {
    Rule {
        name: name.to_owned(),
        condition: condition.to_owned(),
        actions,
        priority: None,
    }
}

fn text_variable(name: &str, data_element: &str) -> RuleVariable {
    RuleVariable::new(name, data_element, ValueKind::Text)
}

#[test]
fn assign_on_matching_risk() {
    let rules = vec![rule(
        "escalate",
        "#{Risk}=='High'",
        vec![RuleAction::Assign {
            field: "fieldA".into(),
            value: Some("Escalate".into()),
        }],
    )];
    let variables = vec![text_variable("Risk", "de1")];
    let values = FieldValues::new().set("de1", "High");

    let result = execute_program_rules(&rules, &variables, &values);

    assert_eq!(result.assignments().len(), 1);
    assert_eq!(result.assignment("fieldA"), Some(&FieldValue::from("Escalate")));
    assert!(result.hidden_fields().is_empty());
    assert!(result.messages().is_empty());
}

#[test]
fn text_age_against_numeric_threshold() {
    // de2 holds the text "15"; relational operators convert it, so the
    // adult rule stays quiet and the minor rule hides the field.
    let rules = vec![
        rule(
            "adult",
            "#{Age}>=18",
            vec![RuleAction::ShowField {
                field: "fieldB".into(),
            }],
        ),
        rule(
            "minor",
            "#{Age}<18",
            vec![RuleAction::HideField {
                field: "fieldB".into(),
            }],
        ),
    ];
    let variables = vec![text_variable("Age", "de2")];
    let values = FieldValues::new().set("de2", "15");

    let result = execute_program_rules(&rules, &variables, &values);

    assert!(result.shown_fields().is_empty());
    assert_eq!(result.hidden_fields().len(), 1);
    assert!(result.is_hidden("fieldB"));
    assert_eq!(result.assignments().len(), 1);
    assert_eq!(result.assignment("fieldB"), Some(&FieldValue::from("")));
}

#[test]
fn text_age_equality_does_not_convert() {
    let rules = vec![rule(
        "exactly_eighteen",
        "#{Age} == 18",
        vec![RuleAction::ShowField {
            field: "fieldB".into(),
        }],
    )];
    let variables = vec![text_variable("Age", "de2")];

    let result = execute_program_rules(&rules, &variables, &FieldValues::new().set("de2", "18"));
    assert!(result.is_empty());

    let result = execute_program_rules(&rules, &variables, &FieldValues::new().set("de2", 18_i64));
    assert!(result.shown_fields().contains("fieldB"));
}

#[test]
fn malformed_condition_applies_nothing() {
    let rules = vec![rule(
        "broken",
        "#{X} &&& true",
        vec![
            RuleAction::Assign {
                field: "fieldA".into(),
                value: Some("never".into()),
            },
            RuleAction::DisplayText {
                value: "never".into(),
            },
        ],
    )];
    let variables = vec![text_variable("X", "de1")];

    let result = execute_program_rules(&rules, &variables, &FieldValues::new().set("de1", "y"));

    assert!(result.is_empty());
}

#[test]
fn missing_field_resolves_to_empty_string() {
    let engine = RuleEngineBuilder::new()
        .variable("Onset date", "de9", ValueKind::Date)
        .rule("ask_for_onset", "#{Onset date} == ''", |r| {
            r.warning("Onset date is missing")
        })
        .build()
        .unwrap();

    let result = engine.evaluate(&FieldValues::new());
    assert_eq!(result.warnings(), &["Onset date is missing"]);

    let result = engine.evaluate(&FieldValues::new().set("de9", "2024-01-15"));
    assert!(result.warnings().is_empty());
}

#[test]
fn apostrophe_in_forwarded_value() {
    let engine = RuleEngineBuilder::new()
        .variable("originator", "de1", ValueKind::Text)
        .rule("known_reporter", "#{originator} == 'O\\'Brien'", |r| r.show("reporter"))
        .rule("literal", "#{originator} == 'literal'", |r| r.show("never"))
        .build()
        .unwrap();

    let result = engine.evaluate(&FieldValues::new().set("de1", "O'Brien"));

    assert!(result.shown_fields().contains("reporter"));
    assert!(!result.shown_fields().contains("never"));
}

#[test]
fn operator_text_in_forwarded_value() {
    let engine = RuleEngineBuilder::new()
        .variable("text", "de1", ValueKind::Text)
        .rule("exact", "#{text} == 'a==b'", |r| r.display_text("matched"))
        .build()
        .unwrap();

    let matched = engine.evaluate(&FieldValues::new().set("de1", "a==b"));
    assert_eq!(matched.messages(), &["matched"]);

    let unmatched = engine.evaluate(&FieldValues::new().set("de1", "a===b"));
    assert!(unmatched.messages().is_empty());
}

#[test]
fn injected_condition_text_is_inert() {
    let engine = RuleEngineBuilder::new()
        .variable("originator", "de1", ValueKind::Text)
        .rule("literal", "#{originator} == 'literal'", |r| r.show("f"))
        .build()
        .unwrap();

    for payload in [
        "' || true || '",
        "x\\' || \\'a\\'==\\'a",
        "literal' && 'a'=='a",
        "\\",
        "')) || ((true",
    ] {
        let result = engine.evaluate(&FieldValues::new().set("de1", payload));
        assert!(result.is_empty(), "payload {payload:?} changed the condition");
    }
}

#[test]
fn hide_always_blanks_earlier_assignment() {
    let engine = RuleEngineBuilder::new()
        .variable("Outcome", "de1", ValueKind::Text)
        .rule("fill", "#{Outcome} == 'Discard'", |r| r.assign("reason", "Duplicate"))
        .rule("hide", "#{Outcome} == 'Discard'", |r| r.hide("reason"))
        .build()
        .unwrap();

    let result = engine.evaluate(&FieldValues::new().set("de1", "Discard"));

    assert!(result.is_hidden("reason"));
    assert_eq!(result.assignment("reason"), Some(&FieldValue::from("")));
}

#[test]
fn repeated_evaluation_is_identical() {
    let engine = RuleEngineBuilder::new()
        .variable("Risk", "de1", ValueKind::Text)
        .variable("Cases", "de2", ValueKind::Number)
        .rule("a", "#{Risk} == 'High' || #{Cases} > 3", |r| {
            r.assign("x", "1").show("y").display_text("m").warning("w")
        })
        .rule("b", "#{Risk} != 'Low'", |r| r.hide("z").error("e"))
        .build()
        .unwrap();
    let values = FieldValues::new().set("de1", "High").set("de2", 5_i64);

    let first = engine.evaluate(&values);
    let second = engine.evaluate(&values);

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn form_cycle_feeds_assignments_back() {
    // Verification outcome drives the next-stage field, which in turn
    // drives a warning on the following pass.
    let engine = RuleEngineBuilder::new()
        .variable("Verification", "FidiishnZJZ", ValueKind::Text)
        .variable("Stage", "stage", ValueKind::Text)
        .rule("alert", "#{Verification} == 'Alert'", |r| r.assign("stage", "Risk assessment"))
        .rule("assess", "#{Stage} == 'Risk assessment'", |r| {
            r.warning("Complete the risk assessment")
        })
        .build()
        .unwrap();

    let mut values = FieldValues::new().set("FidiishnZJZ", "Alert");

    let first = engine.evaluate(&values);
    assert!(first.warnings().is_empty());
    values.apply(&first);

    let second = engine.evaluate(&values);
    assert_eq!(second.warnings(), &["Complete the risk assessment"]);
}

#[test]
fn rendered_fields_exclude_hidden_even_when_shown() {
    let engine = RuleEngineBuilder::new()
        .rule("show", "true", |r| r.show("b"))
        .rule("hide", "true", |r| r.hide("b"))
        .build()
        .unwrap();

    let result = engine.evaluate(&FieldValues::new());
    let section = ["a", "b", "c"];
    let rendered: Vec<&str> = result.visible(section.iter().copied()).collect();

    assert_eq!(rendered, vec!["a", "c"]);
}

#[test]
fn detailed_report_names_fired_and_failed_rules() {
    let engine = RuleEngineBuilder::new()
        .variable("Risk", "de1", ValueKind::Text)
        .rule("high", "#{Risk} == 'High'", |r| r.show("a"))
        .rule("low", "#{Risk} == 'Low'", |r| r.show("b"))
        .rule("broken", "#{Risk} ==", |r| r.show("c"))
        .build()
        .unwrap();
    let values = FieldValues::new().set("de1", "High");

    let report = engine.evaluate_detailed(&values);

    assert_eq!(report.fired(), &["high"]);
    assert_eq!(report.failed(), &["broken"]);
    assert_eq!(report.evaluation_order(), &["high", "low", "broken"]);
    assert_eq!(report.result(), &engine.evaluate(&values));
}
