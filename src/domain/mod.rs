pub mod country;
pub mod new_signup;
pub mod signup_ledger;
pub mod stats;
pub mod status;
pub mod subscriber;
pub mod subscriber_email;
