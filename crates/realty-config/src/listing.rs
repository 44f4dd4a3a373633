use std::env;

#[derive(Clone, Debug)]
pub struct ListingConfig {
    /// Contact number handed out by the `get_number` endpoints.
    pub owner_contact_number: String,
}

impl ListingConfig {
    pub fn from_env() -> Self {
        Self {
            owner_contact_number: env::var("OWNER_CONTACT_NUMBER")
                .unwrap_or_else(|_| "7011769523".to_string()),
        }
    }
}
