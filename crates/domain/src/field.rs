use std::str::FromStr;

use cadence_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ConfigMap, ValueRule, VisibilityRule};

/// Supported action field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line string.
    Text,
    /// Multi-line string with an optional character counter.
    Textarea,
    /// Serialized rich content.
    Richtext,
    /// One value from a fixed option list.
    Dropdown,
    /// Set of values from a fixed option list.
    Multiselect,
    /// Boolean toggle.
    Checkbox,
    /// Exactly one value from a fixed option list.
    Radio,
    /// ISO local date-time string.
    Datetime,
    /// Numeric value.
    Number,
    /// File descriptors, metadata only.
    File,
    /// One token from an externally supplied vocabulary.
    Token,
    /// Ordered key/value string pairs.
    Keyvalue,
}

impl FieldType {
    /// Every field type in declaration order.
    pub const ALL: [FieldType; 12] = [
        Self::Text,
        Self::Textarea,
        Self::Richtext,
        Self::Dropdown,
        Self::Multiselect,
        Self::Checkbox,
        Self::Radio,
        Self::Datetime,
        Self::Number,
        Self::File,
        Self::Token,
        Self::Keyvalue,
    ];

    /// Returns a stable storage value for the field type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Richtext => "richtext",
            Self::Dropdown => "dropdown",
            Self::Multiselect => "multiselect",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Datetime => "datetime",
            Self::Number => "number",
            Self::File => "file",
            Self::Token => "token",
            Self::Keyvalue => "keyvalue",
        }
    }

    /// Returns whether values are picked from an option list.
    #[must_use]
    pub fn uses_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Multiselect | Self::Radio)
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown field type '{value}'")))
    }
}

/// One selectable option of an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    value: String,
    label: String,
}

impl FieldOption {
    /// Creates an option from a stored value and its display label.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Returns the stored value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}

/// Where an enumerated field gets its options from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionsSource {
    /// Options are part of the definition.
    #[default]
    Static,
    /// Options are fetched by the host and composed in at render time.
    Injected {
        /// Name of the host-side option provider.
        source: String,
    },
}

/// Static metadata describing one configurable input of an action type.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDefinition {
    name: NonEmptyString,
    label: NonEmptyString,
    field_type: FieldType,
    required: bool,
    default_value: Option<Value>,
    options: Vec<FieldOption>,
    options_source: OptionsSource,
    max_length: Option<usize>,
    placeholder: Option<String>,
    help_text: Option<String>,
    validation: Option<ValueRule>,
    show_when: Option<VisibilityRule>,
}

impl FieldDefinition {
    /// Starts building a field definition.
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        label: impl Into<String>,
        field_type: FieldType,
    ) -> FieldDefinitionBuilder {
        FieldDefinitionBuilder {
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            default_value: None,
            options: Vec::new(),
            options_source: OptionsSource::Static,
            max_length: None,
            placeholder: None,
            help_text: None,
            validation: None,
            show_when: None,
        }
    }

    /// Returns a copy of this definition carrying `options`.
    ///
    /// The receiver is left untouched so shared registry entries stay immutable.
    #[must_use]
    pub fn with_options(&self, options: Vec<FieldOption>) -> Self {
        let mut field = self.clone();
        field.options = options;
        field
    }

    /// Returns the config key.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &NonEmptyString {
        &self.label
    }

    /// Returns the field type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns whether the field is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the default value.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Returns the option list.
    #[must_use]
    pub fn options(&self) -> &[FieldOption] {
        &self.options
    }

    /// Returns where options come from.
    #[must_use]
    pub fn options_source(&self) -> &OptionsSource {
        &self.options_source
    }

    /// Returns the maximum length.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Returns placeholder text.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns help text.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    /// Returns the custom value rule.
    #[must_use]
    pub fn validation(&self) -> Option<&ValueRule> {
        self.validation.as_ref()
    }

    /// Returns the visibility rule.
    #[must_use]
    pub fn show_when(&self) -> Option<&VisibilityRule> {
        self.show_when.as_ref()
    }

    /// Returns whether `value` is one of the configured option values.
    #[must_use]
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value() == value)
    }

    /// Returns whether the field is shown for the given form values.
    #[must_use]
    pub fn is_visible(&self, form_values: &ConfigMap) -> bool {
        self.show_when
            .as_ref()
            .is_none_or(|rule| rule.is_satisfied(form_values))
    }
}

/// Fluent builder for [`FieldDefinition`].
#[derive(Debug, Clone)]
pub struct FieldDefinitionBuilder {
    name: String,
    label: String,
    field_type: FieldType,
    required: bool,
    default_value: Option<Value>,
    options: Vec<FieldOption>,
    options_source: OptionsSource,
    max_length: Option<usize>,
    placeholder: Option<String>,
    help_text: Option<String>,
    validation: Option<ValueRule>,
    show_when: Option<VisibilityRule>,
}

impl FieldDefinitionBuilder {
    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the value used when the config holds none.
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Sets static options from `(value, label)` pairs.
    #[must_use]
    pub fn options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(value, label)| FieldOption::new(value, label))
            .collect();
        self.options_source = OptionsSource::Static;
        self
    }

    /// Declares that options are injected by the host from `source`.
    #[must_use]
    pub fn injected_options(mut self, source: impl Into<String>) -> Self {
        self.options.clear();
        self.options_source = OptionsSource::Injected {
            source: source.into(),
        };
        self
    }

    /// Sets the maximum length in characters, or items for list values.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets help text shown with the control.
    #[must_use]
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Attaches a custom value rule.
    #[must_use]
    pub fn validation(mut self, rule: ValueRule) -> Self {
        self.validation = Some(rule);
        self
    }

    /// Attaches a visibility rule.
    #[must_use]
    pub fn show_when(mut self, rule: VisibilityRule) -> Self {
        self.show_when = Some(rule);
        self
    }

    /// Builds the definition, rejecting empty names and labels.
    pub fn build(self) -> AppResult<FieldDefinition> {
        if self.max_length == Some(0) {
            return Err(AppError::Validation(format!(
                "field '{}' max_length must be greater than zero",
                self.name
            )));
        }

        Ok(FieldDefinition {
            name: NonEmptyString::new(self.name)?,
            label: NonEmptyString::new(self.label)?,
            field_type: self.field_type,
            required: self.required,
            default_value: self.default_value,
            options: self.options,
            options_source: self.options_source,
            max_length: self.max_length,
            placeholder: self.placeholder,
            help_text: self.help_text,
            validation: self.validation,
            show_when: self.show_when,
        })
    }
}
