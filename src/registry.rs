use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::domain::country::CountryResolver;
use crate::domain::new_signup::NewSignup;
use crate::domain::signup_ledger::DailySignupEntry;
use crate::domain::stats::AggregateStats;
use crate::domain::subscriber::SubscriberRecord;
use crate::store::{self, keys, KvStore, StoreError};

/// All registration writes flow through one task, so the
/// check-then-write sequence below is never interleaved and a burst of
/// concurrent signups for the same email produces exactly one record.
#[derive(Clone)]
pub struct RegistryHandle {
    commands: mpsc::Sender<RegisterCommand>,
}

#[derive(Debug)]
pub enum RegistrationOutcome {
    Registered {
        record: SubscriberRecord,
        subscriber_number: u64,
    },
    AlreadyRegistered,
}

#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("The registration service is not running")]
    ServiceStopped,
}

struct RegisterCommand {
    signup: NewSignup,
    ip: String,
    user_agent: String,
    respond_to: oneshot::Sender<Result<RegistrationOutcome, RegistryError>>,
}

impl RegistryHandle {
    pub async fn register(
        &self,
        signup: NewSignup,
        ip: String,
        user_agent: String,
    ) -> Result<RegistrationOutcome, RegistryError> {
        let (respond_to, response) = oneshot::channel();

        self.commands
            .send(RegisterCommand {
                signup,
                ip,
                user_agent,
                respond_to,
            })
            .await
            .map_err(|_| RegistryError::ServiceStopped)?;

        response.await.map_err(|_| RegistryError::ServiceStopped)?
    }
}

pub fn start_registry(
    store: Arc<dyn KvStore>,
    resolver: Arc<dyn CountryResolver>,
) -> RegistryHandle {
    let (commands, inbox) = mpsc::channel(64);

    tokio::spawn(run_registry(inbox, store, resolver));

    RegistryHandle { commands }
}

async fn run_registry(
    mut inbox: mpsc::Receiver<RegisterCommand>,
    store: Arc<dyn KvStore>,
    resolver: Arc<dyn CountryResolver>,
) {
    while let Some(command) = inbox.recv().await {
        let outcome = handle_register(
            store.as_ref(),
            resolver.as_ref(),
            command.signup,
            command.ip,
            command.user_agent,
        )
        .await;

        // The caller may have hung up while we were writing; the
        // registration itself still stands.
        let _ = command.respond_to.send(outcome);
    }
}

#[tracing::instrument(
    name = "Registering an early bird subscriber",
    skip(store, resolver, signup, ip, user_agent),
    fields(subscriber_email = %signup.email.as_ref())
)]
async fn handle_register(
    store: &dyn KvStore,
    resolver: &dyn CountryResolver,
    signup: NewSignup,
    ip: String,
    user_agent: String,
) -> Result<RegistrationOutcome, RegistryError> {
    let email_key = keys::user_by_email(signup.email.as_ref());

    let existing = store::get_json::<SubscriberRecord>(store, &email_key).await?;
    if existing.is_some() {
        return Ok(RegistrationOutcome::AlreadyRegistered);
    }

    let record = SubscriberRecord::create(&signup, ip, user_agent);

    store::set_json(store, &email_key, &record).await?;
    store::set_json(store, &keys::user_by_id(&record.id), &record).await?;

    let mut stats = store::get_json::<AggregateStats>(store, keys::STATS)
        .await?
        .unwrap_or_else(AggregateStats::seed);
    let country = resolver.resolve(&record.email);
    stats.record_signup(&country, record.registered_at);
    store::set_json(store, keys::STATS, &stats).await?;

    let day_key = keys::daily_signups(record.registered_at.date_naive());
    let mut ledger: Vec<DailySignupEntry> = store::get_json(store, &day_key)
        .await?
        .unwrap_or_default();
    ledger.push(DailySignupEntry {
        subscriber_id: record.id,
        email: record.email.clone(),
        timestamp: record.registered_at,
        source: record.source.clone(),
    });
    store::set_json(store, &day_key, &ledger).await?;

    tracing::info!(
        "New early bird subscriber: {} (ID: {})",
        record.email,
        record.id
    );

    Ok(RegistrationOutcome::Registered {
        subscriber_number: stats.total_subscribers,
        record,
    })
}
