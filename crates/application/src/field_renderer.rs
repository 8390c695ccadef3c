mod changes;

#[cfg(test)]
mod tests;

pub use changes::{FieldChange, apply_change};

use std::collections::BTreeMap;

use cadence_domain::{ConfigMap, FieldDefinition, FieldType, FileDescriptor, KeyValuePair};
use serde::Serialize;
use serde_json::Value;

const DEFAULT_SELECT_PLACEHOLDER: &str = "Select an option";

/// Inputs shared by every field rendered in one pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Aggregate config used to evaluate visibility rules.
    pub form_values: &'a ConfigMap,
    /// Vocabulary offered by token fields.
    pub tokens: &'a [String],
}

/// Headless description of one visible field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    /// Config key.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Whether the field is required.
    pub required: bool,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Help text.
    pub help_text: Option<String>,
    /// Control and its current state.
    pub control: FieldControl,
    /// Error text shown below the control.
    pub error: Option<String>,
}

/// One option as presented by a control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlOption {
    /// Stored value, empty for the placeholder entry.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether the option is currently selected.
    pub selected: bool,
}

/// Visual band of a textarea character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterBand {
    /// At most 70% of the limit.
    Ok,
    /// Above 70% and at most 90% of the limit.
    Warn,
    /// Above 90% of the limit.
    Danger,
}

impl CounterBand {
    /// Picks the band for `length` out of `max_length`.
    #[must_use]
    pub fn for_length(length: usize, max_length: usize) -> Self {
        // Integer form of length / max_length compared to 0.7 and 0.9.
        let scaled = length.saturating_mul(10);
        if scaled <= max_length.saturating_mul(7) {
            Self::Ok
        } else if scaled <= max_length.saturating_mul(9) {
            Self::Warn
        } else {
            Self::Danger
        }
    }
}

/// Live character counter rendered next to a bounded textarea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterCounter {
    /// Current length in characters.
    pub length: usize,
    /// Configured maximum.
    pub max_length: usize,
    /// Visual band.
    pub band: CounterBand,
}

/// Editable row of a key/value control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValueRow {
    /// Row key.
    pub key: String,
    /// Row value.
    pub value: String,
    /// Whether the row offers a remove action.
    pub can_remove: bool,
}

/// Control instantiated for a field, one variant per field type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldControl {
    /// Single-line input with an optional hard length limit.
    Text {
        /// Current text.
        value: String,
        /// Hard input limit.
        max_length: Option<usize>,
    },
    /// Multi-line input.
    Textarea {
        /// Current text.
        value: String,
        /// Counter shown when the field has a maximum length.
        counter: Option<CharacterCounter>,
    },
    /// Rich-text sub-editor; the markup is passed through untouched.
    Richtext {
        /// Serialized rich content.
        value: String,
    },
    /// Single select with a leading placeholder option.
    Dropdown {
        /// Options, placeholder first.
        options: Vec<ControlOption>,
    },
    /// Chips for selected values plus the remaining options.
    Multiselect {
        /// Selected values as removable chips.
        chips: Vec<ControlOption>,
        /// Options not selected yet.
        available: Vec<ControlOption>,
    },
    /// Boolean toggle.
    Checkbox {
        /// Current state.
        checked: bool,
    },
    /// Radio group.
    Radio {
        /// Options with the selected one flagged.
        options: Vec<ControlOption>,
    },
    /// Local date-time input.
    Datetime {
        /// ISO local date-time string.
        value: String,
    },
    /// Numeric input.
    Number {
        /// Number or `null`.
        value: Value,
    },
    /// File picker with the selected descriptors.
    File {
        /// Selected files.
        files: Vec<FileDescriptor>,
    },
    /// Single select over the token vocabulary.
    Token {
        /// Tokens with the selected one flagged, placeholder first.
        options: Vec<ControlOption>,
    },
    /// Key/value rows, never fewer than one.
    Keyvalue {
        /// Editable rows.
        rows: Vec<KeyValueRow>,
    },
}

/// Renders `field`, or `None` when its visibility rule is false.
///
/// `value` falls back to the field default. Empty `error` strings are not shown.
#[must_use]
pub fn render_field(
    field: &FieldDefinition,
    value: Option<&Value>,
    error: Option<&str>,
    context: RenderContext<'_>,
) -> Option<RenderedField> {
    if !field.is_visible(context.form_values) {
        return None;
    }

    let effective = value
        .filter(|value| !value.is_null())
        .or(field.default_value());

    Some(RenderedField {
        name: field.name().as_str().to_owned(),
        label: field.label().as_str().to_owned(),
        required: field.is_required(),
        placeholder: field.placeholder().map(str::to_owned),
        help_text: field.help_text().map(str::to_owned),
        control: build_control(field, effective, context.tokens),
        error: error
            .filter(|message| !message.trim().is_empty())
            .map(str::to_owned),
    })
}

/// Renders every visible field of `fields` in definition order.
///
/// Values and errors are looked up by field name in `context.form_values` and `errors`.
#[must_use]
pub fn render_form(
    fields: &[FieldDefinition],
    errors: &BTreeMap<String, String>,
    context: RenderContext<'_>,
) -> Vec<RenderedField> {
    fields
        .iter()
        .filter_map(|field| {
            let name = field.name().as_str();
            render_field(
                field,
                context.form_values.get(name),
                errors.get(name).map(String::as_str),
                context,
            )
        })
        .collect()
}

fn build_control(
    field: &FieldDefinition,
    value: Option<&Value>,
    tokens: &[String],
) -> FieldControl {
    let text = || {
        value
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };

    match field.field_type() {
        FieldType::Text => FieldControl::Text {
            value: text(),
            max_length: field.max_length(),
        },
        FieldType::Textarea => {
            let value = text();
            let counter = field.max_length().map(|max_length| {
                let length = value.chars().count();
                CharacterCounter {
                    length,
                    max_length,
                    band: CounterBand::for_length(length, max_length),
                }
            });
            FieldControl::Textarea { value, counter }
        }
        FieldType::Richtext => FieldControl::Richtext { value: text() },
        FieldType::Dropdown => {
            let selected = text();
            FieldControl::Dropdown {
                options: with_placeholder(field, selected.as_str(), field_options(field)),
            }
        }
        FieldType::Multiselect => {
            let selected = selected_values(value);
            let chips = selected
                .iter()
                .map(|selected| ControlOption {
                    value: selected.clone(),
                    label: option_label(field, selected),
                    selected: true,
                })
                .collect();
            let available = field
                .options()
                .iter()
                .filter(|option| !selected.iter().any(|value| value == option.value()))
                .map(|option| ControlOption {
                    value: option.value().to_owned(),
                    label: option.label().to_owned(),
                    selected: false,
                })
                .collect();
            FieldControl::Multiselect { chips, available }
        }
        FieldType::Checkbox => FieldControl::Checkbox {
            checked: value.and_then(Value::as_bool).unwrap_or(false),
        },
        FieldType::Radio => {
            let selected = text();
            FieldControl::Radio {
                options: field_options(field)
                    .map(|(option_value, label)| ControlOption {
                        selected: option_value == selected,
                        value: option_value,
                        label,
                    })
                    .collect(),
            }
        }
        FieldType::Datetime => FieldControl::Datetime { value: text() },
        FieldType::Number => FieldControl::Number {
            value: value
                .filter(|value| value.is_number())
                .cloned()
                .unwrap_or(Value::Null),
        },
        FieldType::File => FieldControl::File {
            files: value
                .and_then(FileDescriptor::list_from_value)
                .unwrap_or_default(),
        },
        FieldType::Token => {
            let selected = text();
            let tokens = tokens.iter().map(|token| (token.clone(), token.clone()));
            FieldControl::Token {
                options: with_placeholder(field, selected.as_str(), tokens),
            }
        }
        FieldType::Keyvalue => {
            let pairs = editable_pairs(value);
            let can_remove = pairs.len() > 1;
            FieldControl::Keyvalue {
                rows: pairs
                    .into_iter()
                    .map(|pair| KeyValueRow {
                        key: pair.key,
                        value: pair.value,
                        can_remove,
                    })
                    .collect(),
            }
        }
    }
}

fn field_options(field: &FieldDefinition) -> impl Iterator<Item = (String, String)> + '_ {
    field
        .options()
        .iter()
        .map(|option| (option.value().to_owned(), option.label().to_owned()))
}

fn with_placeholder(
    field: &FieldDefinition,
    selected: &str,
    options: impl Iterator<Item = (String, String)>,
) -> Vec<ControlOption> {
    let placeholder = ControlOption {
        value: String::new(),
        label: field
            .placeholder()
            .unwrap_or(DEFAULT_SELECT_PLACEHOLDER)
            .to_owned(),
        selected: selected.is_empty(),
    };

    std::iter::once(placeholder)
        .chain(options.map(|(value, label)| ControlOption {
            selected: !selected.is_empty() && value == selected,
            value,
            label,
        }))
        .collect()
}

fn option_label(field: &FieldDefinition, value: &str) -> String {
    field
        .options()
        .iter()
        .find(|option| option.value() == value)
        .map(|option| option.label().to_owned())
        .unwrap_or_else(|| value.to_owned())
}

pub(crate) fn selected_values(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn editable_pairs(value: Option<&Value>) -> Vec<KeyValuePair> {
    let mut pairs = value
        .and_then(KeyValuePair::list_from_value)
        .unwrap_or_default();
    if pairs.is_empty() {
        pairs.push(KeyValuePair::default());
    }

    pairs
}
