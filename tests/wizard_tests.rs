//! Job posting wizard, end to end

use buildboard::config::WizardConfig;
use buildboard::core::entity::Entity;
use buildboard::core::error::BoardError;
use buildboard::core::events::{BoardEvent, EventBus};
use buildboard::core::service::DataService;
use buildboard::entities::Job;
use buildboard::storage::InMemoryDataService;
use buildboard::wizard::{JobDraft, JobPostWizard, WizardStep};

fn complete_draft() -> JobDraft {
    JobDraft {
        title: "Journeyman Electrician".to_string(),
        company: "Bright Line Electric".to_string(),
        location: "Austin, TX".to_string(),
        category: "Electrical".to_string(),
        job_type: "full-time".to_string(),
        description: "Commercial fit-outs, panel upgrades and service calls.".to_string(),
        salary_min: Some(58_000.0),
        salary_max: Some(74_000.0),
        skills: vec!["Wiring".to_string(), "Conduit".to_string()],
        remote: false,
        contact_email: "hiring@brightline.example".to_string(),
    }
}

fn field_names(err: BoardError) -> Vec<String> {
    match err {
        BoardError::Validation(v) => v.field_errors().into_iter().map(|e| e.field).collect(),
        other => panic!("expected a validation error, got {}", other),
    }
}

#[tokio::test]
async fn test_walk_through_and_publish() {
    let store = InMemoryDataService::<Job>::new();
    let mut wizard = JobPostWizard::new(WizardConfig::default());

    *wizard.draft_mut().unwrap() = complete_draft();
    assert_eq!(wizard.next().unwrap(), WizardStep::Details);
    assert_eq!(wizard.next().unwrap(), WizardStep::Review);

    let job = wizard.publish(&store).await.unwrap();
    assert_eq!(wizard.step(), WizardStep::Published);

    assert!(job.id().starts_with("job-"));
    assert_eq!(job.status(), "open");
    assert_eq!(job.title(), "Journeyman Electrician");
    assert_eq!(job.category, "electrical");
    assert_eq!(job.salary_max, Some(74_000.0));
    assert_eq!(job.contact_email.as_deref(), Some("hiring@brightline.example"));

    let stored = store.get(job.id()).await.unwrap().unwrap();
    assert_eq!(stored, job);
}

#[tokio::test]
async fn test_each_step_guards_its_own_fields() {
    let mut wizard = JobPostWizard::new(WizardConfig::default());
    {
        let draft = wizard.draft_mut().unwrap();
        draft.title = "Tile Setter".to_string();
        draft.company = "Mosaic Works".to_string();
        draft.location = "Tucson, AZ".to_string();
        draft.category = "masonry".to_string();
    }
    // details are still blank but basics only checks basics
    assert_eq!(wizard.next().unwrap(), WizardStep::Details);

    let err = wizard.next().unwrap_err();
    assert_eq!(field_names(err), vec!["job_type", "description", "skills"]);
    assert_eq!(wizard.step(), WizardStep::Details);
}

#[tokio::test]
async fn test_unknown_category_and_short_title() {
    let mut draft = complete_draft();
    draft.title = "Tile".to_string();
    draft.category = "painting".to_string();
    let mut wizard = JobPostWizard::with_draft(WizardConfig::default(), draft);

    let err = wizard.next().unwrap_err();
    assert_eq!(field_names(err), vec!["title", "category"]);
}

#[tokio::test]
async fn test_configured_categories_are_honoured() {
    let config = WizardConfig {
        categories: vec!["painting".to_string()],
        ..WizardConfig::default()
    };
    let mut draft = complete_draft();
    draft.category = "Painting".to_string();
    let mut wizard = JobPostWizard::with_draft(config, draft);

    assert!(wizard.next().is_ok());
}

#[tokio::test]
async fn test_publish_rechecks_earlier_steps() {
    let store = InMemoryDataService::<Job>::new();
    let mut wizard = JobPostWizard::with_draft(WizardConfig::default(), complete_draft());
    wizard.next().unwrap();
    wizard.next().unwrap();

    wizard.draft_mut().unwrap().company = "  ".to_string();
    wizard.draft_mut().unwrap().contact_email = "not-an-email".to_string();

    let err = wizard.publish(&store).await.unwrap_err();
    assert_eq!(field_names(err), vec!["company"]);
    assert_eq!(wizard.step(), WizardStep::Review);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_invalid_contact_email_blocks_publish() {
    let store = InMemoryDataService::<Job>::new();
    let mut draft = complete_draft();
    draft.contact_email = "hiring-at-brightline".to_string();
    let mut wizard = JobPostWizard::with_draft(WizardConfig::default(), draft);
    wizard.next().unwrap();
    wizard.next().unwrap();

    let err = wizard.publish(&store).await.unwrap_err();
    assert_eq!(field_names(err), vec!["contact_email"]);
}

#[tokio::test]
async fn test_publish_only_from_review() {
    let store = InMemoryDataService::<Job>::new();
    let mut wizard = JobPostWizard::with_draft(WizardConfig::default(), complete_draft());

    let err = wizard.publish(&store).await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_TRANSITION");
    assert_eq!(wizard.step(), WizardStep::Basics);
}

#[tokio::test]
async fn test_published_wizard_is_frozen() {
    let store = InMemoryDataService::<Job>::new();
    let mut wizard = JobPostWizard::with_draft(WizardConfig::default(), complete_draft());
    wizard.next().unwrap();
    wizard.next().unwrap();
    wizard.publish(&store).await.unwrap();

    assert!(wizard.draft_mut().is_err());
    assert!(wizard.back().is_err());
    assert!(wizard.next().is_err());
    assert!(wizard.publish(&store).await.is_err());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_publish_emits_created_event() {
    let bus = EventBus::new(8);
    let mut rx = bus.subscribe();
    let store = InMemoryDataService::<Job>::new().with_event_bus(bus);
    let mut wizard = JobPostWizard::with_draft(WizardConfig::default(), complete_draft());
    wizard.next().unwrap();
    wizard.next().unwrap();

    let job = wizard.publish(&store).await.unwrap();
    let envelope = rx.recv().await.unwrap();
    assert!(matches!(envelope.event, BoardEvent::Entity(_)));
    assert_eq!(envelope.event.action(), "created");
    assert_eq!(envelope.event.entity_id(), Some(job.id()));
}
