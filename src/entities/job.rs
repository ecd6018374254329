//! Job postings

use chrono::{DateTime, Utc};

/// Trade categories a job can be posted under
pub const JOB_CATEGORIES: &[&str] = &[
    "carpentry",
    "electrical",
    "plumbing",
    "hvac",
    "masonry",
    "roofing",
    "site-management",
    "civil-engineering",
    "heavy-equipment",
    "devops",
];

/// Employment types
pub const JOB_TYPES: &[&str] = &["full-time", "part-time", "contract", "temporary"];

/// Job status values
pub const JOB_STATUSES: &[&str] = &["open", "closed", "draft", "deleted"];

record_entity!(
    Job,
    "job",
    "jobs",
    search: ["name", "company", "location", "description", "skills"],
    {
        company: String,
        location: String,
        description: String,
        category: String,
        job_type: String,
        experience_level: String,
        salary_min: Option<f64>,
        salary_max: Option<f64>,
        skills: Vec<String>,
        remote: bool,
        featured: bool,
        urgent: bool,
        posted_at: DateTime<Utc>,
        applicants: u32,
        #[serde(default)]
        contact_email: Option<String>,
    }
);

impl Job {
    /// Start building a job; the title becomes the record name
    pub fn builder(id: impl Into<String>, title: impl Into<String>) -> JobBuilder {
        let mut job = Job::new(id, title, "open");
        job.job_type = "full-time".to_string();
        job.posted_at = job.created_at;
        JobBuilder { job }
    }

    pub fn title(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.status == "open" && self.deleted_at.is_none()
    }
}

/// Fluent construction of [`Job`] records
#[derive(Debug, Clone)]
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.job.status = status.into();
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.job.company = company.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.job.location = location.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.job.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.job.category = category.into();
        self
    }

    pub fn job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job.job_type = job_type.into();
        self
    }

    pub fn experience_level(mut self, level: impl Into<String>) -> Self {
        self.job.experience_level = level.into();
        self
    }

    pub fn salary(mut self, min: f64, max: f64) -> Self {
        self.job.salary_min = Some(min);
        self.job.salary_max = Some(max);
        self
    }

    pub fn skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn remote(mut self, remote: bool) -> Self {
        self.job.remote = remote;
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.job.featured = featured;
        self
    }

    pub fn urgent(mut self, urgent: bool) -> Self {
        self.job.urgent = urgent;
        self
    }

    pub fn posted_at(mut self, posted_at: DateTime<Utc>) -> Self {
        self.job.posted_at = posted_at;
        self.job.created_at = posted_at;
        self.job.updated_at = posted_at;
        self
    }

    pub fn applicants(mut self, applicants: u32) -> Self {
        self.job.applicants = applicants;
        self
    }

    pub fn contact_email(mut self, email: impl Into<String>) -> Self {
        self.job.contact_email = Some(email.into());
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}
