//! Shared test harness for Entity Store testing
//!
//! Provides `Crew`, a record kind declared with `record_entity!` whose fields
//! span every `FieldValue` variant, plus helpers for building jobs and crews.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_service_tests;

use buildboard::entities::Job;
use buildboard::record_entity;

record_entity!(
    Crew,
    "crew",
    "crews",
    search: ["name", "foreman", "trades"],
    {
        foreman: String,
        trades: Vec<String>,
        size: u32,
        rating: f64,
        insured: bool,
        #[serde(default)]
        notes: Option<String>,
    }
);

/// Build a crew with every field set
pub fn create_crew(id: &str, foreman: &str, size: u32, rating: f64, insured: bool) -> Crew {
    let mut crew = Crew::new(id, format!("{} crew", foreman), "active");
    crew.foreman = foreman.to_string();
    crew.trades = vec!["Framing".to_string()];
    crew.size = size;
    crew.rating = rating;
    crew.insured = insured;
    crew
}

/// `n` crews with ids `crew-0..crew-n`
pub fn sample_crews(n: usize) -> Vec<Crew> {
    (0..n)
        .map(|i| {
            create_crew(
                &format!("crew-{}", i),
                &format!("Foreman {}", i),
                (i as u32 % 4) + 2,
                3.0 + (i % 3) as f64 * 0.5,
                i % 2 == 0,
            )
        })
        .collect()
}

/// A job with the given status and skills
pub fn job(id: &str, status: &str, skills: &[&str]) -> Job {
    Job::builder(id, format!("Job {}", id))
        .status(status)
        .skills(skills.iter().copied())
        .build()
}

/// The two-job store used by the marketplace scenarios
pub fn scenario_jobs() -> Vec<Job> {
    vec![
        job("j1", "open", &["NixOS"]),
        job("j2", "closed", &["DevOps"]),
    ]
}

/// A mixed job board for property tests
pub fn job_board() -> Vec<Job> {
    let rows: [(&str, &str, &str, &str, f64, bool, &[&str]); 8] = [
        ("job-1", "Site Carpenter", "open", "carpentry", 52_000.0, false, &["Framing", "Blueprints"]),
        ("job-2", "Master Electrician", "open", "electrical", 78_000.0, true, &["Wiring", "Conduit"]),
        ("job-3", "Roofer", "closed", "roofing", 45_000.0, false, &["Shingles"]),
        ("job-4", "Platform Engineer", "open", "devops", 120_000.0, true, &["NixOS", "DevOps"]),
        ("job-5", "Finish Carpenter", "open", "carpentry", 52_000.0, false, &["Trim", "Framing"]),
        ("job-6", "Pipefitter", "draft", "plumbing", 61_000.0, false, &["Welding"]),
        ("job-7", "HVAC Technician", "open", "hvac", 58_000.0, true, &["Ductwork"]),
        ("job-8", "Site Manager", "closed", "site-management", 95_000.0, false, &["Scheduling"]),
    ];

    rows.iter()
        .map(|(id, title, status, category, salary, remote, skills)| {
            Job::builder(*id, *title)
                .status(*status)
                .category(*category)
                .company("Cedar & Stone Homes")
                .location("Denver, CO")
                .salary(*salary, *salary + 10_000.0)
                .remote(*remote)
                .skills(skills.iter().copied())
                .build()
        })
        .collect()
}
