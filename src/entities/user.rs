//! Platform accounts shown in the admin user list

use chrono::{DateTime, Utc};

/// Account roles
pub const USER_ROLES: &[&str] = &["professional", "business", "admin"];

/// Subscription plans
pub const USER_PLANS: &[&str] = &["free", "pro", "enterprise"];

record_entity!(
    User,
    "user",
    "users",
    search: ["name", "email"],
    {
        email: String,
        role: String,
        plan: String,
        verified: bool,
        last_login: Option<DateTime<Utc>>,
        total_spend: f64,
    }
);

impl User {
    pub fn with_contact(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        let mut user = User::new(id, name, "active");
        user.email = email.into();
        user.role = role.into();
        user.plan = "free".to_string();
        user
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Record;

    #[test]
    fn test_with_contact() {
        let user = User::with_contact("u1", "Dana Reyes", "dana@example.com", "admin");
        assert!(user.is_admin());
        assert_eq!(user.plan, "free");
        assert_eq!(User::searchable_fields(), &["name", "email"]);
    }
}
