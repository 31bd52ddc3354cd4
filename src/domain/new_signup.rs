use actix_web::web;
use serde::Deserialize;

use crate::domain::subscriber_email::SubscriberEmail;

pub struct NewSignup {
    pub email: SubscriberEmail,
    pub source: String,
    pub referrer: String,
}

#[derive(Deserialize)]
pub struct SignupBody {
    pub email: Option<String>,
    pub source: Option<String>,
    pub referrer: Option<String>,
}

impl TryFrom<web::Json<SignupBody>> for NewSignup {
    type Error = String;

    fn try_from(body: web::Json<SignupBody>) -> Result<Self, Self::Error> {
        // Missing and malformed emails are reported the same way; the
        // caller only needs to know the address was not usable.
        let email = body
            .email
            .clone()
            .ok_or_else(|| "Valid email is required".to_string())?;
        let email =
            SubscriberEmail::parse(email).map_err(|_| "Valid email is required".to_string())?;
        let source = body
            .source
            .clone()
            .unwrap_or_else(|| String::from("landing-page"));
        let referrer = body.referrer.clone().unwrap_or_default();

        Ok(NewSignup {
            email,
            source,
            referrer,
        })
    }
}
