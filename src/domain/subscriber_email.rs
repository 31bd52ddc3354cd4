use validator::validate_email;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    // The lowercase form is the stored value and the deduplication key,
    // so mixed-case resubmissions of the same address count as duplicates.
    pub fn parse(email: String) -> Result<SubscriberEmail, String> {
        let email = email.to_lowercase();
        let is_valid_email = validate_email(&email);

        if !is_valid_email {
            return Err(format!("{} email is not valid", email));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
