//! Deterministic demo data
//!
//! Demo attributes (verified, featured, status, ratings) are drawn once here
//! from a seeded RNG. Queries never recompute them, so the same seed always
//! yields the same board.

use super::business::{BUSINESS_SIZES, Business};
use super::job::{JOB_CATEGORIES, JOB_TYPES, Job};
use super::professional::{EXPERIENCE_LEVELS, Professional};
use super::user::{USER_PLANS, USER_ROLES, User};
use crate::config::SeedConfig;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// 2026-01-05T00:00:00Z; seeded timestamps count back from here
const EPOCH_SECS: i64 = 1_767_571_200;

const COMPANIES: &[&str] = &[
    "Granite Ridge Builders",
    "Northline Electrical",
    "BlueSky Roofing Co",
    "Summit Civil Works",
    "Ironclad Steel Erectors",
    "Harbor Plumbing & Heating",
    "Keystone Site Services",
    "Cedar & Stone Homes",
];

const CITIES: &[&str] = &[
    "Denver, CO",
    "Austin, TX",
    "Portland, OR",
    "Columbus, OH",
    "Raleigh, NC",
    "Phoenix, AZ",
];

const JOB_TITLES: &[(&str, &str)] = &[
    ("Finish Carpenter", "carpentry"),
    ("Journeyman Electrician", "electrical"),
    ("Commercial Plumber", "plumbing"),
    ("HVAC Service Technician", "hvac"),
    ("Brick Mason", "masonry"),
    ("Roofing Crew Lead", "roofing"),
    ("Assistant Site Manager", "site-management"),
    ("Civil Project Engineer", "civil-engineering"),
    ("Excavator Operator", "heavy-equipment"),
    ("Infrastructure Engineer", "devops"),
];

const SKILLS: &[&str] = &[
    "Framing",
    "Blueprint Reading",
    "OSHA 30",
    "Wiring",
    "Pipefitting",
    "Welding",
    "AutoCAD",
    "Estimating",
    "Concrete",
    "Scheduling",
    "NixOS",
    "DevOps",
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Casey", "Riley", "Morgan", "Taylor", "Jamie", "Quinn", "Avery", "Rowan",
];

const LAST_NAMES: &[&str] = &[
    "Nguyen", "Garcia", "Okafor", "Schmidt", "Patel", "Kowalski", "Haddad", "Silva", "Brooks",
];

const INDUSTRIES: &[&str] = &[
    "residential",
    "commercial",
    "industrial",
    "infrastructure",
    "renovation",
    "energy",
];

/// The full demo board
#[derive(Debug, Clone)]
pub struct SeedData {
    pub jobs: Vec<Job>,
    pub users: Vec<User>,
    pub businesses: Vec<Business>,
    pub professionals: Vec<Professional>,
}

impl SeedData {
    /// Generate every collection from one seeded RNG
    pub fn generate(config: &SeedConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.rng_seed);
        let data = Self {
            jobs: (0..config.jobs).map(|i| seed_job(&mut rng, i)).collect(),
            users: (0..config.users).map(|i| seed_user(&mut rng, i)).collect(),
            businesses: (0..config.businesses)
                .map(|i| seed_business(&mut rng, i))
                .collect(),
            professionals: (0..config.professionals)
                .map(|i| seed_professional(&mut rng, i))
                .collect(),
        };

        tracing::info!(
            seed = config.rng_seed,
            jobs = data.jobs.len(),
            users = data.users.len(),
            businesses = data.businesses.len(),
            professionals = data.professionals.len(),
            "generated demo data"
        );
        data
    }
}

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(EPOCH_SECS, 0).unwrap_or_default()
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn pick_many(rng: &mut StdRng, items: &[&str], max: usize) -> Vec<String> {
    let count = rng.gen_range(1..=max.max(1));
    items
        .choose_multiple(rng, count)
        .map(|s| s.to_string())
        .collect()
}

fn person_name(rng: &mut StdRng) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

fn seed_job(rng: &mut StdRng, index: usize) -> Job {
    let (title, category) = JOB_TITLES
        .choose(rng)
        .copied()
        .unwrap_or(("General Laborer", JOB_CATEGORIES[0]));
    let company = pick(rng, COMPANIES);
    let location = pick(rng, CITIES);
    let salary_min = f64::from(rng.gen_range(35..=90u32) * 1000);
    let salary_max = salary_min + f64::from(rng.gen_range(5..=40u32) * 1000);
    let posted_at = base_time() - Duration::hours(rng.gen_range(1..=24 * 60));
    let status = if rng.gen_bool(0.8) { "open" } else { "closed" };

    Job::builder(format!("job-{:03}", index + 1), title)
        .status(status)
        .company(company)
        .location(location)
        .description(format!(
            "{} is hiring a {} for projects around {}.",
            company, title, location
        ))
        .category(category)
        .job_type(pick(rng, JOB_TYPES))
        .experience_level(pick(rng, EXPERIENCE_LEVELS))
        .salary(salary_min, salary_max)
        .skills(pick_many(rng, SKILLS, 3))
        .remote(category == "devops" && rng.gen_bool(0.5))
        .featured(rng.gen_bool(0.2))
        .urgent(rng.gen_bool(0.15))
        .posted_at(posted_at)
        .applicants(rng.gen_range(0..=60))
        .build()
}

fn seed_user(rng: &mut StdRng, index: usize) -> User {
    let name = person_name(rng);
    let email = format!(
        "{}.{}@example.com",
        name.to_lowercase().replace(' ', "."),
        index + 1
    );
    let mut user = User::with_contact(
        format!("user-{:03}", index + 1),
        name,
        email,
        pick(rng, USER_ROLES),
    );
    user.plan = pick(rng, USER_PLANS).to_string();
    user.verified = rng.gen_bool(0.6);
    user.status = if rng.gen_bool(0.9) { "active" } else { "suspended" }.to_string();
    user.total_spend = f64::from(rng.gen_range(0..=5000u32));
    user.created_at = base_time() - Duration::days(rng.gen_range(30..=720));
    user.updated_at = user.created_at;
    user.last_login = Some(base_time() - Duration::hours(rng.gen_range(1..=24 * 30)));
    user
}

fn seed_business(rng: &mut StdRng, index: usize) -> Business {
    let name = COMPANIES
        .get(index % COMPANIES.len())
        .copied()
        .unwrap_or_default();
    let mut business = Business::new(format!("biz-{:03}", index + 1), name, "active");
    business.location = pick(rng, CITIES).to_string();
    business.description = format!("{} serves clients across {}.", name, business.location);
    business.industries = pick_many(rng, INDUSTRIES, 2);
    business.size = pick(rng, BUSINESS_SIZES).to_string();
    business.verified = rng.gen_bool(0.7);
    business.featured = rng.gen_bool(0.25);
    business.rating = f64::from(rng.gen_range(30..=50u32)) / 10.0;
    business.open_positions = rng.gen_range(0..=12);
    business.created_at = base_time() - Duration::days(rng.gen_range(30..=1000));
    business.updated_at = business.created_at;
    business
}

fn seed_professional(rng: &mut StdRng, index: usize) -> Professional {
    let (title, _) = JOB_TITLES.choose(rng).copied().unwrap_or(("Laborer", ""));
    let mut pro = Professional::new(format!("pro-{:03}", index + 1), person_name(rng), "active");
    pro.trade = title.to_string();
    pro.location = pick(rng, CITIES).to_string();
    pro.skills = pick_many(rng, SKILLS, 4);
    pro.experience_level = pick(rng, EXPERIENCE_LEVELS).to_string();
    pro.years_experience = rng.gen_range(1..=30);
    pro.hourly_rate = f64::from(rng.gen_range(25..=120u32));
    pro.rating = f64::from(rng.gen_range(30..=50u32)) / 10.0;
    pro.verified = rng.gen_bool(0.6);
    pro.available = rng.gen_bool(0.7);
    pro.featured = rng.gen_bool(0.2);
    pro.bio = format!(
        "{} with {} years on the tools.",
        pro.trade, pro.years_experience
    );
    pro.created_at = base_time() - Duration::days(rng.gen_range(30..=900));
    pro.updated_at = pro.created_at;
    pro
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> SeedConfig {
        SeedConfig {
            rng_seed: seed,
            jobs: 25,
            users: 10,
            businesses: 8,
            professionals: 12,
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let a = SeedData::generate(&config(7));
        let b = SeedData::generate(&config(7));
        assert_eq!(a.jobs, b.jobs);
        assert_eq!(a.users, b.users);
        assert_eq!(a.businesses, b.businesses);
        assert_eq!(a.professionals, b.professionals);
    }

    #[test]
    fn test_counts_and_unique_ids() {
        let data = SeedData::generate(&config(1));
        assert_eq!(data.jobs.len(), 25);
        let mut ids: Vec<&str> = data.jobs.iter().map(|j| j.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_salary_ranges_are_ordered() {
        let data = SeedData::generate(&config(3));
        for job in &data.jobs {
            assert!(job.salary_min <= job.salary_max);
            assert!(!job.skills.is_empty());
        }
    }
}
