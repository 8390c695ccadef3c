use cadence_core::{AppError, AppResult};
use cadence_domain::{
    FieldDefinition, FieldType, FileDescriptor, KeyValuePair, OptionsSource, coerce_number_input,
};
use serde::Deserialize;
use serde_json::Value;

use super::{editable_pairs, selected_values};

/// One user interaction with a rendered control.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldChange {
    /// Replaces the text of a text-like field.
    SetText {
        /// New text.
        value: String,
    },
    /// Raw number input, coerced to a number or `null`.
    SetNumberInput {
        /// Raw input.
        raw: String,
    },
    /// Sets a checkbox.
    SetChecked {
        /// New state.
        checked: bool,
    },
    /// Selects one value in a dropdown, radio group or token field.
    Select {
        /// Selected value, empty to clear.
        value: String,
    },
    /// Adds a multiselect value.
    AddSelection {
        /// Value to add.
        value: String,
    },
    /// Removes a multiselect value.
    RemoveSelection {
        /// Value to remove.
        value: String,
    },
    /// Appends a blank key/value row.
    AddPair,
    /// Removes a key/value row.
    RemovePair {
        /// Row index.
        index: usize,
    },
    /// Edits the key of a key/value row.
    EditPairKey {
        /// Row index.
        index: usize,
        /// New key.
        key: String,
    },
    /// Edits the value of a key/value row.
    EditPairValue {
        /// Row index.
        index: usize,
        /// New value.
        value: String,
    },
    /// Appends picked files.
    AppendFiles {
        /// Picked file descriptors.
        files: Vec<FileDescriptor>,
    },
    /// Removes one selected file.
    RemoveFile {
        /// File index.
        index: usize,
    },
    /// Clears the field value.
    Clear,
}

impl FieldChange {
    fn kind(&self) -> &'static str {
        match self {
            Self::SetText { .. } => "set_text",
            Self::SetNumberInput { .. } => "set_number_input",
            Self::SetChecked { .. } => "set_checked",
            Self::Select { .. } => "select",
            Self::AddSelection { .. } => "add_selection",
            Self::RemoveSelection { .. } => "remove_selection",
            Self::AddPair => "add_pair",
            Self::RemovePair { .. } => "remove_pair",
            Self::EditPairKey { .. } => "edit_pair_key",
            Self::EditPairValue { .. } => "edit_pair_value",
            Self::AppendFiles { .. } => "append_files",
            Self::RemoveFile { .. } => "remove_file",
            Self::Clear => "clear",
        }
    }
}

/// Applies `change` to the current value of `field` and returns the whole new value.
///
/// The caller stores the result under the field name. Removals past the end
/// are ignored; edits past the end are rejected.
pub fn apply_change(
    field: &FieldDefinition,
    current: Option<&Value>,
    change: FieldChange,
) -> AppResult<Value> {
    let field_type = field.field_type();

    match (field_type, change) {
        (_, FieldChange::Clear) => Ok(cleared_value(field_type)),
        (
            FieldType::Text | FieldType::Textarea | FieldType::Richtext | FieldType::Datetime,
            FieldChange::SetText { value },
        ) => Ok(Value::String(value)),
        (FieldType::Number, FieldChange::SetNumberInput { raw }) => Ok(coerce_number_input(&raw)),
        (FieldType::Checkbox, FieldChange::SetChecked { checked }) => Ok(Value::Bool(checked)),
        (FieldType::Dropdown | FieldType::Radio, FieldChange::Select { value }) => {
            ensure_known_option(field, value.as_str())?;
            Ok(Value::String(value))
        }
        (FieldType::Token, FieldChange::Select { value }) => Ok(Value::String(value)),
        (FieldType::Multiselect, FieldChange::AddSelection { value }) => {
            let mut selected = selected_values(current);
            if value.is_empty() {
                return Ok(string_array(selected));
            }
            ensure_known_option(field, value.as_str())?;
            if !selected.contains(&value) {
                selected.push(value);
            }
            Ok(string_array(selected))
        }
        (FieldType::Multiselect, FieldChange::RemoveSelection { value }) => {
            let mut selected = selected_values(current);
            selected.retain(|item| item != &value);
            Ok(string_array(selected))
        }
        (FieldType::Keyvalue, FieldChange::AddPair) => {
            let mut pairs = editable_pairs(current);
            pairs.push(KeyValuePair::default());
            Ok(KeyValuePair::list_to_value(&pairs))
        }
        (FieldType::Keyvalue, FieldChange::RemovePair { index }) => {
            let mut pairs = editable_pairs(current);
            if pairs.len() > 1 && index < pairs.len() {
                pairs.remove(index);
            }
            Ok(KeyValuePair::list_to_value(&pairs))
        }
        (FieldType::Keyvalue, FieldChange::EditPairKey { index, key }) => {
            let mut pairs = editable_pairs(current);
            pair_at(field, &mut pairs, index)?.key = key;
            Ok(KeyValuePair::list_to_value(&pairs))
        }
        (FieldType::Keyvalue, FieldChange::EditPairValue { index, value }) => {
            let mut pairs = editable_pairs(current);
            pair_at(field, &mut pairs, index)?.value = value;
            Ok(KeyValuePair::list_to_value(&pairs))
        }
        (FieldType::File, FieldChange::AppendFiles { files }) => {
            let mut selected = current_files(current);
            selected.extend(files);
            Ok(FileDescriptor::list_to_value(&selected))
        }
        (FieldType::File, FieldChange::RemoveFile { index }) => {
            let mut selected = current_files(current);
            if index < selected.len() {
                selected.remove(index);
            }
            Ok(FileDescriptor::list_to_value(&selected))
        }
        (field_type, change) => Err(AppError::Validation(format!(
            "change '{}' does not apply to {} field '{}'",
            change.kind(),
            field_type.as_str(),
            field.name().as_str()
        ))),
    }
}

fn cleared_value(field_type: FieldType) -> Value {
    match field_type {
        FieldType::Checkbox => Value::Bool(false),
        FieldType::Multiselect | FieldType::File => Value::Array(Vec::new()),
        FieldType::Keyvalue => KeyValuePair::list_to_value(&[KeyValuePair::default()]),
        FieldType::Number => Value::Null,
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Richtext
        | FieldType::Dropdown
        | FieldType::Radio
        | FieldType::Datetime
        | FieldType::Token => Value::String(String::new()),
    }
}

fn ensure_known_option(field: &FieldDefinition, value: &str) -> AppResult<()> {
    let is_static = field.options_source() == &OptionsSource::Static;
    if value.is_empty() || !is_static || field.has_option(value) {
        return Ok(());
    }

    Err(AppError::Validation(format!(
        "'{value}' is not an option of field '{}'",
        field.name().as_str()
    )))
}

fn pair_at<'a>(
    field: &FieldDefinition,
    pairs: &'a mut [KeyValuePair],
    index: usize,
) -> AppResult<&'a mut KeyValuePair> {
    let row_count = pairs.len();
    pairs.get_mut(index).ok_or_else(|| {
        AppError::Validation(format!(
            "row {index} does not exist in field '{}' with {row_count} rows",
            field.name().as_str()
        ))
    })
}

fn current_files(current: Option<&Value>) -> Vec<FileDescriptor> {
    current
        .and_then(FileDescriptor::list_from_value)
        .unwrap_or_default()
}

fn string_array(values: Vec<String>) -> Value {
    Value::Array(values.into_iter().map(Value::String).collect())
}
