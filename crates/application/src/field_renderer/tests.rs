use cadence_domain::{
    ConfigMap, FieldDefinition, FieldType, FileDescriptor, KeyValuePair, VisibilityOperator,
    VisibilityRule,
};
use proptest::prelude::*;
use serde_json::{Value, json};

use super::{CounterBand, FieldChange, FieldControl, RenderContext, apply_change, render_field};
use crate::config_validator::{ValidationOptions, validate_fields};

fn field(name: &str, field_type: FieldType) -> FieldDefinition {
    FieldDefinition::builder(name, name, field_type)
        .build()
        .unwrap_or_else(|_| unreachable!())
}

fn tag_field() -> FieldDefinition {
    FieldDefinition::builder("tags", "Tags", FieldType::Multiselect)
        .options([("lead", "Lead"), ("vip", "VIP"), ("cold", "Cold")])
        .build()
        .unwrap_or_else(|_| unreachable!())
}

fn render(field: &FieldDefinition, value: Option<&Value>) -> FieldControl {
    let form_values = ConfigMap::new();
    let tokens = vec!["{{contact.first_name}}".to_owned()];
    render_field(
        field,
        value,
        None,
        RenderContext {
            form_values: &form_values,
            tokens: &tokens,
        },
    )
    .map(|rendered| rendered.control)
    .unwrap_or_else(|| unreachable!())
}

#[test]
fn counter_band_thresholds() {
    assert_eq!(CounterBand::for_length(0, 150), CounterBand::Ok);
    assert_eq!(CounterBand::for_length(105, 150), CounterBand::Ok);
    assert_eq!(CounterBand::for_length(106, 150), CounterBand::Warn);
    assert_eq!(CounterBand::for_length(135, 150), CounterBand::Warn);
    assert_eq!(CounterBand::for_length(136, 150), CounterBand::Danger);
}

#[test]
fn textarea_with_limit_renders_counter() {
    let message = FieldDefinition::builder("message", "Message", FieldType::Textarea)
        .max_length(10)
        .build()
        .unwrap_or_else(|_| unreachable!());

    let control = render(&message, Some(&json!("abcdefghij")));
    let FieldControl::Textarea { counter, .. } = control else {
        unreachable!()
    };
    let counter = counter.unwrap_or_else(|| unreachable!());
    assert_eq!(counter.length, 10);
    assert_eq!(counter.band, CounterBand::Danger);

    let FieldControl::Textarea { counter, .. } = render(&field("notes", FieldType::Textarea), None)
    else {
        unreachable!()
    };
    assert!(counter.is_none());
}

#[test]
fn hidden_field_renders_nothing() {
    let payload = FieldDefinition::builder("payload", "Payload", FieldType::Textarea)
        .show_when(
            VisibilityRule::when("method", VisibilityOperator::NotEquals, json!("GET"))
                .unwrap_or_else(|_| unreachable!()),
        )
        .build()
        .unwrap_or_else(|_| unreachable!());
    let mut form_values = ConfigMap::new();
    form_values.insert("method".to_owned(), json!("GET"));
    let context = RenderContext {
        form_values: &form_values,
        tokens: &[],
    };

    assert!(render_field(&payload, None, None, context).is_none());

    form_values.insert("method".to_owned(), json!("POST"));
    let context = RenderContext {
        form_values: &form_values,
        tokens: &[],
    };
    assert!(render_field(&payload, None, None, context).is_some());
}

#[test]
fn missing_value_falls_back_to_default() {
    let priority = FieldDefinition::builder("priority", "Priority", FieldType::Dropdown)
        .options([("low", "Low"), ("normal", "Normal")])
        .default_value(json!("normal"))
        .build()
        .unwrap_or_else(|_| unreachable!());

    let FieldControl::Dropdown { options } = render(&priority, Some(&Value::Null)) else {
        unreachable!()
    };
    let selected: Vec<&str> = options
        .iter()
        .filter(|option| option.selected)
        .map(|option| option.value.as_str())
        .collect();
    assert_eq!(selected, vec!["normal"]);
}

#[test]
fn dropdown_leads_with_placeholder() {
    let method = FieldDefinition::builder("method", "Method", FieldType::Dropdown)
        .options([("GET", "GET"), ("POST", "POST")])
        .build()
        .unwrap_or_else(|_| unreachable!());

    let FieldControl::Dropdown { options } = render(&method, None) else {
        unreachable!()
    };
    assert_eq!(options.len(), 3);
    assert_eq!(options[0].value, "");
    assert!(options[0].selected);
}

#[test]
fn unchecked_checkbox_defaults_to_false() {
    assert_eq!(
        render(&field("retry", FieldType::Checkbox), None),
        FieldControl::Checkbox { checked: false }
    );
}

#[test]
fn multiselect_splits_chips_from_available() {
    let FieldControl::Multiselect { chips, available } =
        render(&tag_field(), Some(&json!(["vip"])))
    else {
        unreachable!()
    };

    assert_eq!(chips.len(), 1);
    assert_eq!(chips[0].label, "VIP");
    let available: Vec<&str> = available.iter().map(|option| option.value.as_str()).collect();
    assert_eq!(available, vec!["lead", "cold"]);
}

#[test]
fn token_field_lists_vocabulary() {
    let FieldControl::Token { options } = render(&field("assignTo", FieldType::Token), None) else {
        unreachable!()
    };

    assert_eq!(options.len(), 2);
    assert_eq!(options[1].value, "{{contact.first_name}}");
}

#[test]
fn keyvalue_always_renders_one_row() {
    let FieldControl::Keyvalue { rows } = render(&field("headers", FieldType::Keyvalue), None)
    else {
        unreachable!()
    };

    assert_eq!(rows.len(), 1);
    assert!(!rows[0].can_remove);
}

#[test]
fn blank_error_is_not_shown() {
    let form_values = ConfigMap::new();
    let context = RenderContext {
        form_values: &form_values,
        tokens: &[],
    };
    let subject = field("subject", FieldType::Text);

    let rendered = render_field(&subject, None, Some(""), context);
    assert_eq!(rendered.and_then(|rendered| rendered.error), None);

    let rendered = render_field(&subject, None, Some("subject is required"), context);
    assert_eq!(
        rendered.and_then(|rendered| rendered.error).as_deref(),
        Some("subject is required")
    );
}

#[test]
fn number_input_coerces_and_clears_to_null() {
    let timeout = field("timeout", FieldType::Number);

    let value = apply_change(
        &timeout,
        None,
        FieldChange::SetNumberInput {
            raw: "30".to_owned(),
        },
    );
    assert_eq!(value.ok(), Some(json!(30)));

    let value = apply_change(
        &timeout,
        Some(&json!(30)),
        FieldChange::SetNumberInput { raw: String::new() },
    );
    assert_eq!(value.ok(), Some(Value::Null));
}

#[test]
fn multiselect_add_and_remove_keep_set_semantics() {
    let tags = tag_field();

    let value = apply_change(
        &tags,
        Some(&json!(["lead"])),
        FieldChange::AddSelection {
            value: "lead".to_owned(),
        },
    );
    assert_eq!(value.ok(), Some(json!(["lead"])));

    let value = apply_change(
        &tags,
        Some(&json!(["lead", "vip"])),
        FieldChange::RemoveSelection {
            value: "lead".to_owned(),
        },
    );
    assert_eq!(value.ok(), Some(json!(["vip"])));

    let value = apply_change(
        &tags,
        None,
        FieldChange::AddSelection {
            value: "ghost".to_owned(),
        },
    );
    assert!(value.is_err());
}

#[test]
fn multiselect_select_twice_then_remove() {
    let letters = FieldDefinition::builder("letters", "Letters", FieldType::Multiselect)
        .options([("a", "A"), ("b", "B")])
        .build()
        .unwrap_or_else(|_| unreachable!());
    let add_b = || FieldChange::AddSelection {
        value: "b".to_owned(),
    };

    let value = apply_change(&letters, Some(&json!(["a"])), add_b())
        .unwrap_or_else(|_| unreachable!());
    let value = apply_change(&letters, Some(&value), add_b()).unwrap_or_else(|_| unreachable!());
    assert_eq!(value, json!(["a", "b"]));

    let value = apply_change(
        &letters,
        Some(&value),
        FieldChange::RemoveSelection {
            value: "a".to_owned(),
        },
    );
    assert_eq!(value.ok(), Some(json!(["b"])));
}

#[test]
fn empty_selection_leaves_multiselect_unchanged() {
    let tags = tag_field();

    let value = apply_change(
        &tags,
        Some(&json!(["lead"])),
        FieldChange::AddSelection {
            value: String::new(),
        },
    )
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(value, json!(["lead"]));

    let mut config = ConfigMap::new();
    config.insert("tags".to_owned(), value);
    let outcome = validate_fields(
        std::slice::from_ref(&tags),
        &config,
        ValidationOptions::default(),
    );
    assert!(outcome.is_valid, "{outcome:?}");
}

#[test]
fn keyvalue_never_drops_below_one_row() {
    let headers = field("headers", FieldType::Keyvalue);
    let single = KeyValuePair::list_to_value(&[KeyValuePair::new("X-Id", "1")]);

    let value = apply_change(&headers, Some(&single), FieldChange::RemovePair { index: 0 });
    assert_eq!(value.ok(), Some(single));

    let value = apply_change(&headers, None, FieldChange::AddPair);
    assert_eq!(
        value.ok(),
        Some(KeyValuePair::list_to_value(&[
            KeyValuePair::default(),
            KeyValuePair::default()
        ]))
    );
}

#[test]
fn keyvalue_edit_out_of_range_is_rejected() {
    let headers = field("headers", FieldType::Keyvalue);

    let value = apply_change(
        &headers,
        None,
        FieldChange::EditPairKey {
            index: 0,
            key: "X-Id".to_owned(),
        },
    );
    assert_eq!(
        value.ok(),
        Some(KeyValuePair::list_to_value(&[KeyValuePair::new("X-Id", "")]))
    );

    let value = apply_change(
        &headers,
        None,
        FieldChange::EditPairValue {
            index: 3,
            value: "1".to_owned(),
        },
    );
    assert!(value.is_err());
}

#[test]
fn files_append_and_remove() {
    let attachments = field("attachments", FieldType::File);
    let first = FileDescriptor::new("a.pdf", 10, "application/pdf");
    let second = FileDescriptor::new("b.png", 20, "image/png");

    let value = apply_change(
        &attachments,
        Some(&FileDescriptor::list_to_value(std::slice::from_ref(&first))),
        FieldChange::AppendFiles {
            files: vec![second.clone()],
        },
    )
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(
        value,
        FileDescriptor::list_to_value(&[first, second.clone()])
    );

    let value = apply_change(&attachments, Some(&value), FieldChange::RemoveFile { index: 0 });
    assert_eq!(value.ok(), Some(FileDescriptor::list_to_value(&[second])));
}

#[test]
fn mismatched_change_is_rejected() {
    let subject = field("subject", FieldType::Text);

    assert!(apply_change(&subject, None, FieldChange::SetChecked { checked: true }).is_err());
    assert!(apply_change(&subject, None, FieldChange::AddPair).is_err());
}

#[test]
fn clear_resets_to_empty_shape() {
    assert_eq!(
        apply_change(&field("retry", FieldType::Checkbox), None, FieldChange::Clear).ok(),
        Some(json!(false))
    );
    assert_eq!(
        apply_change(&tag_field(), Some(&json!(["vip"])), FieldChange::Clear).ok(),
        Some(json!([]))
    );
}

#[derive(Debug, Clone)]
enum PairOp {
    Add,
    Remove(usize),
}

fn pair_op() -> impl Strategy<Value = PairOp> {
    prop_oneof![Just(PairOp::Add), (0usize..6).prop_map(PairOp::Remove)]
}

proptest! {
    #[test]
    fn multiselect_never_holds_duplicates(
        ops in prop::collection::vec((any::<bool>(), prop::sample::select(vec!["lead", "vip", "cold"])), 0..24)
    ) {
        let tags = tag_field();
        let mut value = json!([]);

        for (add, option) in ops {
            let change = if add {
                FieldChange::AddSelection { value: option.to_owned() }
            } else {
                FieldChange::RemoveSelection { value: option.to_owned() }
            };
            value = apply_change(&tags, Some(&value), change).unwrap_or_else(|_| unreachable!());
        }

        let mut selected: Vec<&str> = value
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .collect();
        let count = selected.len();
        selected.sort_unstable();
        selected.dedup();
        prop_assert_eq!(selected.len(), count);
    }

    #[test]
    fn keyvalue_keeps_at_least_one_row(ops in prop::collection::vec(pair_op(), 0..24)) {
        let headers = field("headers", FieldType::Keyvalue);
        let mut value = None;

        for op in ops {
            let change = match op {
                PairOp::Add => FieldChange::AddPair,
                PairOp::Remove(index) => FieldChange::RemovePair { index },
            };
            value = Some(
                apply_change(&headers, value.as_ref(), change).unwrap_or_else(|_| unreachable!()),
            );
        }

        let rows = value
            .as_ref()
            .and_then(KeyValuePair::list_from_value)
            .map_or(1, |pairs| pairs.len());
        prop_assert!(rows >= 1);
    }
}
