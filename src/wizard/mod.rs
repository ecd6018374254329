//! Job posting wizard
//!
//! A linear finite-state machine over a [`JobDraft`]:
//!
//! ```text
//! Basics ──next──▶ Details ──next──▶ Review ──publish──▶ Published
//!    ◀──back───       ◀──back───
//! ```
//!
//! Every forward transition is guarded by the validation rules of the step
//! being left. A failed guard leaves the wizard where it was.

use crate::config::WizardConfig;
use crate::core::error::{BoardError, BoardResult, FieldError, ValidationError};
use crate::core::field::FieldFormat;
use crate::core::service::DataService;
use crate::core::validation::{RuleSet, filters, validators};
use crate::entities::Job;
use crate::entities::job::JOB_TYPES;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Basics,
    Details,
    Review,
    Published,
}

impl WizardStep {
    /// Steps that hold editable draft data, in order
    pub const EDITABLE: [WizardStep; 3] = [WizardStep::Basics, WizardStep::Details, WizardStep::Review];

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Basics => Some(WizardStep::Details),
            WizardStep::Details => Some(WizardStep::Review),
            WizardStep::Review | WizardStep::Published => None,
        }
    }

    fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Details => Some(WizardStep::Basics),
            WizardStep::Review => Some(WizardStep::Details),
            WizardStep::Basics | WizardStep::Published => None,
        }
    }

    /// 1-based position, for "step 2 of 3" displays
    pub fn number(self) -> usize {
        match self {
            WizardStep::Basics => 1,
            WizardStep::Details => 2,
            WizardStep::Review | WizardStep::Published => 3,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Basics => "basics",
            WizardStep::Details => "details",
            WizardStep::Review => "review",
            WizardStep::Published => "published",
        };
        write!(f, "{}", name)
    }
}

/// The job being composed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub job_type: String,
    pub description: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub skills: Vec<String>,
    pub remote: bool,
    pub contact_email: String,
}

/// Guarded state machine for posting a job
#[derive(Clone)]
pub struct JobPostWizard {
    step: WizardStep,
    draft: JobDraft,
    config: WizardConfig,
}

impl JobPostWizard {
    pub fn new(config: WizardConfig) -> Self {
        Self {
            step: WizardStep::Basics,
            draft: JobDraft::default(),
            config,
        }
    }

    /// Resume from an existing draft, starting at the first step
    pub fn with_draft(config: WizardConfig, draft: JobDraft) -> Self {
        Self {
            step: WizardStep::Basics,
            draft,
            config,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }

    /// Edit the draft; not allowed once published
    pub fn draft_mut(&mut self) -> BoardResult<&mut JobDraft> {
        if self.step == WizardStep::Published {
            return Err(self.invalid("edit"));
        }
        Ok(&mut self.draft)
    }

    fn invalid(&self, action: &str) -> BoardError {
        ValidationError::InvalidTransition {
            from: self.step.to_string(),
            action: action.to_string(),
        }
        .into()
    }

    fn rules(&self, step: WizardStep) -> RuleSet {
        match step {
            WizardStep::Basics => RuleSet::new()
                .filter("title", filters::trim())
                .validate("title", validators::required())
                .validate("title", validators::string_length(5, 100))
                .filter("company", filters::trim())
                .validate("company", validators::required())
                .filter("location", filters::trim())
                .validate("location", validators::required())
                .filter("category", filters::trim())
                .filter("category", filters::lowercase())
                .validate("category", validators::required())
                .validate("category", validators::in_list(self.config.categories.clone())),
            WizardStep::Details => RuleSet::new()
                .filter("job_type", filters::trim())
                .filter("job_type", filters::lowercase())
                .validate("job_type", validators::required())
                .validate(
                    "job_type",
                    validators::in_list(JOB_TYPES.iter().map(|t| t.to_string()).collect()),
                )
                .filter("description", filters::trim())
                .validate("description", validators::required())
                .validate(
                    "description",
                    validators::string_length(
                        self.config.min_description_len,
                        self.config.max_description_len,
                    ),
                )
                .filter("salary_min", filters::round_decimals(2))
                .validate("salary_min", validators::positive())
                .filter("salary_max", filters::round_decimals(2))
                .validate("salary_max", validators::positive())
                .filter("skills", filters::compact_list())
                .validate("skills", validators::min_items(1)),
            WizardStep::Review => RuleSet::new()
                .filter("contact_email", filters::trim())
                .filter("contact_email", filters::lowercase())
                .validate("contact_email", validators::required())
                .validate("contact_email", validators::format(FieldFormat::Email)),
            WizardStep::Published => RuleSet::new(),
        }
    }

    /// Normalise and validate the draft for one step
    ///
    /// On success the normalised values are written back into the draft.
    pub fn validate_step(&mut self, step: WizardStep) -> BoardResult<()> {
        let payload = serde_json::to_value(&self.draft)?;
        let clean = self.rules(step).validate_and_filter(payload)?;

        if step == WizardStep::Details {
            if let (Some(min), Some(max)) = (self.draft.salary_min, self.draft.salary_max) {
                if min > max {
                    return Err(ValidationError::FieldErrors(vec![FieldError {
                        field: "salary_max".to_string(),
                        message: format!(
                            "'salary_max' must not be lower than 'salary_min' ({} < {})",
                            max, min
                        ),
                    }])
                    .into());
                }
            }
        }

        self.draft = serde_json::from_value(clean)?;
        Ok(())
    }

    /// Validate the current step and advance
    pub fn next(&mut self) -> BoardResult<WizardStep> {
        let Some(target) = self.step.next() else {
            return Err(self.invalid("advance"));
        };

        if let Err(err) = self.validate_step(self.step) {
            tracing::debug!(step = %self.step, error = %err, "wizard step rejected");
            return Err(err);
        }

        self.step = target;
        Ok(self.step)
    }

    /// Go back one step without validating
    pub fn back(&mut self) -> BoardResult<WizardStep> {
        let Some(target) = self.step.previous() else {
            return Err(self.invalid("go back"));
        };
        self.step = target;
        Ok(self.step)
    }

    /// Validate every step, build an open job and insert it into `service`
    pub async fn publish(&mut self, service: &dyn DataService<Job>) -> BoardResult<Job> {
        if self.step != WizardStep::Review {
            return Err(self.invalid("publish"));
        }
        for step in WizardStep::EDITABLE {
            self.validate_step(step)?;
        }

        let draft = &self.draft;
        let now = Utc::now();
        let mut job = Job::builder(format!("job-{}", uuid::Uuid::new_v4()), &draft.title)
            .status("open")
            .company(&draft.company)
            .location(&draft.location)
            .category(&draft.category)
            .job_type(&draft.job_type)
            .description(&draft.description)
            .skills(draft.skills.clone())
            .remote(draft.remote)
            .contact_email(&draft.contact_email)
            .posted_at(now)
            .build();
        // either bound may be left open
        job.salary_min = draft.salary_min;
        job.salary_max = draft.salary_max;

        let job = service.create(job).await?;
        self.step = WizardStep::Published;

        tracing::info!(job_id = %job.id, title = %job.name, "job published");
        Ok(job)
    }
}

impl Default for JobPostWizard {
    fn default() -> Self {
        Self::new(WizardConfig::default())
    }
}
