use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use cadence_core::{AppError, AppResult};
use cadence_domain::{ConfigMap, DeliveryTiming, DeliveryUnit, FieldOption, PlanAction};
use serde_json::{Value, json};

use crate::field_renderer::{FieldChange, FieldControl};
use crate::plan_action_ports::{PlanActionRepository, SavePlanActionInput, TokenVocabulary};
use crate::{ActionSchemaRegistry, EMAIL_TEMPLATE_SOURCE, ValidationOptions};

use super::{ActionSchemaService, InjectedOptions};

#[derive(Default)]
struct FakePlanActionRepository {
    actions: Mutex<Vec<PlanAction>>,
}

#[async_trait]
impl PlanActionRepository for FakePlanActionRepository {
    async fn append_action(&self, action: PlanAction) -> AppResult<PlanAction> {
        let mut actions = self.actions.lock().await;
        let position = actions
            .iter()
            .filter(|stored| stored.plan_id() == action.plan_id())
            .count();
        let action = action.with_position(u32::try_from(position).unwrap_or(u32::MAX));
        actions.push(action.clone());
        Ok(action)
    }

    async fn list_actions(&self, plan_id: &str) -> AppResult<Vec<PlanAction>> {
        Ok(self
            .actions
            .lock()
            .await
            .iter()
            .filter(|action| action.plan_id().as_str() == plan_id)
            .cloned()
            .collect())
    }
}

struct FakeTokenVocabulary;

impl TokenVocabulary for FakeTokenVocabulary {
    fn tokens(&self) -> Vec<String> {
        vec![
            "{{contact.first_name}}".to_owned(),
            "{{contact.owner}}".to_owned(),
        ]
    }
}

fn service() -> (ActionSchemaService, Arc<FakePlanActionRepository>) {
    let repository = Arc::new(FakePlanActionRepository::default());
    let registry = ActionSchemaRegistry::builtin().unwrap_or_else(|_| unreachable!());
    let service = ActionSchemaService::new(
        Arc::new(registry),
        Arc::new(FakeTokenVocabulary),
        repository.clone(),
    );

    (service, repository)
}

fn config(value: Value) -> ConfigMap {
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn template_options() -> InjectedOptions {
    BTreeMap::from([(
        EMAIL_TEMPLATE_SOURCE.to_owned(),
        vec![
            FieldOption::new("welcome", "Welcome"),
            FieldOption::new("follow_up", "Follow Up"),
        ],
    )])
}

#[test]
fn injected_options_do_not_touch_the_registry() {
    let (service, _) = service();

    let fields = service
        .fields_with_options("Email", &template_options())
        .unwrap_or_else(|_| unreachable!());
    let template = fields
        .iter()
        .find(|field| field.name().as_str() == "template")
        .unwrap_or_else(|| unreachable!());
    assert_eq!(template.options().len(), 2);

    let shared = service
        .registry()
        .action_type("Email")
        .and_then(|action_type| action_type.field("template"))
        .unwrap_or_else(|| unreachable!());
    assert!(shared.options().is_empty());
}

#[test]
fn unknown_action_type_is_not_found_for_rendering() {
    let (service, _) = service();

    let result = service.render_form(
        "Fax",
        &ConfigMap::new(),
        &BTreeMap::new(),
        &InjectedOptions::new(),
    );
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn render_form_hides_payload_for_get() {
    let (service, _) = service();

    let rendered = service
        .render_form(
            "Webhook",
            &config(json!({ "method": "GET" })),
            &BTreeMap::new(),
            &InjectedOptions::new(),
        )
        .unwrap_or_else(|_| unreachable!());

    assert!(rendered.iter().all(|field| field.name != "payload"));
    assert_eq!(rendered.len(), 6);
}

#[test]
fn token_fields_use_the_vocabulary() {
    let (service, _) = service();

    let rendered = service
        .render_form(
            "Task",
            &ConfigMap::new(),
            &BTreeMap::new(),
            &InjectedOptions::new(),
        )
        .unwrap_or_else(|_| unreachable!());
    let assign_to = rendered
        .iter()
        .find(|field| field.name == "assignTo")
        .unwrap_or_else(|| unreachable!());

    let FieldControl::Token { options } = &assign_to.control else {
        unreachable!()
    };
    assert_eq!(options.len(), 3);
}

#[test]
fn apply_change_rejects_unknown_field() {
    let (service, _) = service();

    let result = service.apply_change(
        "SMS",
        "subject",
        None,
        FieldChange::SetText {
            value: "Hi".to_owned(),
        },
    );
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn session_edits_clear_field_errors() {
    let (service, _) = service();
    let mut session = service
        .open_session("Webhook", ConfigMap::new(), &InjectedOptions::new())
        .unwrap_or_else(|_| unreachable!());

    let outcome = session.validate();
    assert!(session.errors().contains_key("url"));
    assert!(!outcome.is_valid);

    let applied = session.apply(
        "url",
        FieldChange::SetText {
            value: "https://hooks.example.com".to_owned(),
        },
    );
    assert!(applied.is_ok());
    assert!(!session.errors().contains_key("url"));
    assert!(session.errors().contains_key("method"));

    let rendered = session.render(&[]);
    let url = rendered
        .iter()
        .find(|field| field.name == "url")
        .unwrap_or_else(|| unreachable!());
    assert_eq!(url.error, None);
    let method = rendered
        .iter()
        .find(|field| field.name == "method")
        .unwrap_or_else(|| unreachable!());
    assert_eq!(method.error.as_deref(), Some("Method is required"));
}

#[test]
fn session_finish_returns_valid_config() {
    let (service, _) = service();
    let mut session = service
        .open_session("Email", ConfigMap::new(), &template_options())
        .unwrap_or_else(|_| unreachable!());

    let selected = session.apply(
        "template",
        FieldChange::Select {
            value: "welcome".to_owned(),
        },
    );
    assert!(selected.is_ok());
    assert!(matches!(
        session.clone().finish(),
        Err(AppError::Validation(message)) if message == "Subject is required"
    ));

    let typed = session.apply(
        "subject",
        FieldChange::SetText {
            value: "Welcome aboard".to_owned(),
        },
    );
    assert!(typed.is_ok());

    let config = session.finish().unwrap_or_else(|_| unreachable!());
    assert_eq!(config.get("template"), Some(&json!("welcome")));
    assert_eq!(config.get("subject"), Some(&json!("Welcome aboard")));
}

#[tokio::test]
async fn save_action_persists_valid_config_at_next_position() {
    let (service, repository) = service();

    let first = service
        .save_action(SavePlanActionInput::immediate(
            "plan-1",
            "Note",
            config(json!({ "body": "<p>Called</p>" })),
        ))
        .await
        .unwrap_or_else(|_| unreachable!());
    let second = service
        .save_action(SavePlanActionInput {
            plan_id: "plan-1".to_owned(),
            action_type: "Wait".to_owned(),
            config: ConfigMap::new(),
            delivery_type: "delay".to_owned(),
            delay_value: Some(2),
            delay_unit: Some("days".to_owned()),
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(first.position(), 0);
    assert_eq!(second.position(), 1);
    assert_eq!(
        second.delivery_timing(),
        DeliveryTiming::Delay {
            value: 2,
            unit: DeliveryUnit::Days
        }
    );
    assert_eq!(repository.actions.lock().await.len(), 2);
    assert_eq!(
        service
            .list_actions("plan-1")
            .await
            .map(|actions| actions.len())
            .ok(),
        Some(2)
    );
}

#[tokio::test]
async fn save_action_rejects_invalid_config() {
    let (service, repository) = service();

    let result = service
        .save_action(SavePlanActionInput::immediate(
            "plan-1",
            "Webhook",
            config(json!({ "url": "example.com", "method": "POST" })),
        ))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Validation(message)) if message == "URL must start with http:// or https://"
    ));
    assert!(repository.actions.lock().await.is_empty());
}

#[tokio::test]
async fn save_action_rejects_unknown_action_type() {
    let (service, _) = service();

    let result = service
        .save_action(SavePlanActionInput::immediate(
            "plan-1",
            "Fax",
            ConfigMap::new(),
        ))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn legacy_validation_blocks_hidden_required_field() {
    let (service, _) = service();
    let service = service.with_validation_options(ValidationOptions::legacy());

    let result = service
        .save_action(SavePlanActionInput::immediate(
            "plan-1",
            "Task",
            config(json!({ "title": "Call back" })),
        ))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Validation(message)) if message == "Reminder Time is required"
    ));
}
