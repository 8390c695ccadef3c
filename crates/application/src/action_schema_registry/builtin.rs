use cadence_core::AppResult;
use cadence_domain::{
    ActionTypeDefinition, FieldDefinition, FieldType, ValueRule, VisibilityOperator,
    VisibilityRule,
};
use serde_json::{Value, json};

/// Injected option source for the email template dropdown.
pub const EMAIL_TEMPLATE_SOURCE: &str = "email_templates";

const HTTP_METHODS: [(&str, &str); 5] = [
    ("GET", "GET"),
    ("POST", "POST"),
    ("PUT", "PUT"),
    ("PATCH", "PATCH"),
    ("DELETE", "DELETE"),
];

pub(super) fn action_types() -> AppResult<Vec<ActionTypeDefinition>> {
    Ok(vec![
        email()?,
        sms()?,
        webhook()?,
        task()?,
        tag()?,
        note()?,
        ActionTypeDefinition::new("Wait", Vec::new())?,
    ])
}

fn email() -> AppResult<ActionTypeDefinition> {
    ActionTypeDefinition::new(
        "Email",
        vec![
            FieldDefinition::builder("template", "Template", FieldType::Dropdown)
                .required()
                .injected_options(EMAIL_TEMPLATE_SOURCE)
                .placeholder("Select a template")
                .build()?,
            FieldDefinition::builder("subject", "Subject", FieldType::Text)
                .required()
                .max_length(200)
                .build()?,
            FieldDefinition::builder("previewText", "Preview Text", FieldType::Text)
                .max_length(150)
                .help_text("Shown next to the subject in most inboxes")
                .build()?,
            FieldDefinition::builder("fromName", "From Name", FieldType::Text)
                .max_length(100)
                .build()?,
            FieldDefinition::builder("replyTo", "Reply-To", FieldType::Text)
                .validation(ValueRule::email_address(
                    "Reply-To must be a valid email address",
                ))
                .build()?,
            FieldDefinition::builder("trackOpens", "Track Opens", FieldType::Checkbox)
                .default_value(Value::Bool(true))
                .build()?,
            FieldDefinition::builder("attachments", "Attachments", FieldType::File).build()?,
        ],
    )
}

fn sms() -> AppResult<ActionTypeDefinition> {
    ActionTypeDefinition::new(
        "SMS",
        vec![
            FieldDefinition::builder("message", "Message", FieldType::Textarea)
                .required()
                .max_length(150)
                .placeholder("Type your text message")
                .build()?,
            FieldDefinition::builder("mediaUrl", "Media URL", FieldType::Text)
                .validation(ValueRule::http_url(
                    "Media URL must start with http:// or https://",
                ))
                .build()?,
            FieldDefinition::builder("quietHours", "Respect Quiet Hours", FieldType::Checkbox)
                .default_value(Value::Bool(true))
                .build()?,
        ],
    )
}

fn webhook() -> AppResult<ActionTypeDefinition> {
    ActionTypeDefinition::new(
        "Webhook",
        vec![
            FieldDefinition::builder("url", "URL", FieldType::Text)
                .required()
                .placeholder("https://")
                .validation(ValueRule::http_url(
                    "URL must start with http:// or https://",
                ))
                .build()?,
            FieldDefinition::builder("method", "Method", FieldType::Dropdown)
                .required()
                .options(HTTP_METHODS)
                .build()?,
            FieldDefinition::builder("payloadStyle", "Payload Style", FieldType::Radio)
                .options([("json", "JSON"), ("form", "Form Encoded")])
                .default_value(json!("json"))
                .build()?,
            FieldDefinition::builder("headers", "Headers", FieldType::Keyvalue).build()?,
            FieldDefinition::builder("payload", "Payload", FieldType::Textarea)
                .max_length(5000)
                .show_when(VisibilityRule::when(
                    "method",
                    VisibilityOperator::NotEquals,
                    json!("GET"),
                )?)
                .build()?,
            FieldDefinition::builder("timeoutSeconds", "Timeout (seconds)", FieldType::Number)
                .validation(ValueRule::number_range(
                    Some(1.0),
                    Some(120.0),
                    "Timeout must be between 1 and 120 seconds",
                )?)
                .build()?,
            FieldDefinition::builder("retryOnFailure", "Retry On Failure", FieldType::Checkbox)
                .build()?,
        ],
    )
}

fn task() -> AppResult<ActionTypeDefinition> {
    ActionTypeDefinition::new(
        "Task",
        vec![
            FieldDefinition::builder("title", "Title", FieldType::Text)
                .required()
                .max_length(120)
                .build()?,
            FieldDefinition::builder("description", "Description", FieldType::Richtext).build()?,
            FieldDefinition::builder("assignTo", "Assign To", FieldType::Token)
                .placeholder("Select an assignee token")
                .build()?,
            FieldDefinition::builder("priority", "Priority", FieldType::Dropdown)
                .options([("low", "Low"), ("normal", "Normal"), ("high", "High")])
                .default_value(json!("normal"))
                .build()?,
            FieldDefinition::builder("dueInDays", "Due In (days)", FieldType::Number)
                .validation(ValueRule::number_range(
                    Some(0.0),
                    Some(365.0),
                    "Due In must be between 0 and 365 days",
                )?)
                .build()?,
            FieldDefinition::builder("reminder", "Send Reminder", FieldType::Checkbox).build()?,
            FieldDefinition::builder("reminderAt", "Reminder Time", FieldType::Datetime)
                .required()
                .show_when(VisibilityRule::when(
                    "reminder",
                    VisibilityOperator::IsTruthy,
                    Value::Null,
                )?)
                .build()?,
        ],
    )
}

fn tag() -> AppResult<ActionTypeDefinition> {
    ActionTypeDefinition::new(
        "Tag",
        vec![
            FieldDefinition::builder("tags", "Tags", FieldType::Multiselect)
                .required()
                .options([
                    ("lead", "Lead"),
                    ("customer", "Customer"),
                    ("vip", "VIP"),
                    ("nurture", "Nurture"),
                    ("cold", "Cold"),
                ])
                .build()?,
            FieldDefinition::builder("operation", "Operation", FieldType::Radio)
                .options([("add", "Add Tags"), ("remove", "Remove Tags")])
                .default_value(json!("add"))
                .build()?,
        ],
    )
}

fn note() -> AppResult<ActionTypeDefinition> {
    ActionTypeDefinition::new(
        "Note",
        vec![
            FieldDefinition::builder("body", "Note", FieldType::Richtext)
                .required()
                .max_length(2000)
                .build()?,
        ],
    )
}
