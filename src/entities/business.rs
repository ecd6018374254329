//! Companies hiring on the board

/// Company size brackets
pub const BUSINESS_SIZES: &[&str] = &["1-10", "11-50", "51-200", "200+"];

record_entity!(
    Business,
    "business",
    "businesses",
    search: ["name", "location", "description", "industries"],
    {
        description: String,
        industries: Vec<String>,
        size: String,
        location: String,
        verified: bool,
        featured: bool,
        rating: f64,
        open_positions: u32,
        website: Option<String>,
    }
);

impl Business {
    pub fn has_industry(&self, industry: &str) -> bool {
        self.industries.iter().any(|i| i == industry)
    }
}
