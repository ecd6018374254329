//! Tradespeople and engineers looking for work

/// Experience tiers used by the professional directory
pub const EXPERIENCE_LEVELS: &[&str] = &["apprentice", "journeyman", "master"];

record_entity!(
    Professional,
    "professional",
    "professionals",
    search: ["name", "trade", "location", "skills", "bio"],
    {
        trade: String,
        bio: String,
        skills: Vec<String>,
        location: String,
        experience_level: String,
        hourly_rate: f64,
        years_experience: u32,
        rating: f64,
        verified: bool,
        available: bool,
        featured: bool,
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Record;
    use crate::core::field::FieldValue;

    #[test]
    fn test_years_experience_is_numeric() {
        let mut pro = Professional::new("p1", "Sam Ortiz", "active");
        pro.years_experience = 12;
        assert_eq!(pro.field_value("years_experience"), Some(FieldValue::Integer(12)));
        assert_eq!(pro.field_value("years_experience").unwrap().as_f64(), Some(12.0));
    }
}
