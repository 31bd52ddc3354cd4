use actix_web::dev::Server;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::auth::{reject_invalid_api_keys, ApiKey};
use crate::config::{Settings, StoreBackend};
use crate::domain::country::TldCountryResolver;
use crate::registry::{start_registry, RegistryHandle};
use crate::routes::{
    handle_ecosystem_nodes, handle_get_stats, handle_register, handle_system_status,
    handle_tools_status, handle_workflow_progress, health_check,
};
use crate::store::{InMemoryStore, KvStore, RedisStore};

pub struct Application {
    pub port: u16,
    pub server: Server,
    store: Arc<dyn KvStore>,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let store: Arc<dyn KvStore> = match config.get_store_backend() {
            StoreBackend::Memory => Arc::new(InMemoryStore::new()),
            StoreBackend::Redis => Arc::new(RedisStore::new(&config.get_redis_address())?),
        };
        let registry = start_registry(store.clone(), Arc::new(TldCountryResolver));

        let listener =
            TcpListener::bind(config.get_address()).expect("Failed to bind the address.");
        let port = listener.local_addr().unwrap().port();
        let server = run(
            listener,
            store.clone(),
            registry,
            ApiKey(config.get_api_key()),
        )?;

        Ok(Self {
            port,
            server,
            store,
        })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    /// The store the running application reads and writes. Test harnesses
    /// use it to seed fixtures and inspect what the handlers persisted.
    pub fn get_store(&self) -> Arc<dyn KvStore> {
        self.store.clone()
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn KvStore>,
    registry: RegistryHandle,
    api_key: ApiKey,
) -> Result<Server, std::io::Error> {
    let store = web::Data::from(store);
    let registry = web::Data::new(registry);
    let api_key = web::Data::new(api_key);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            // Every data endpoint sits behind the API key check; only the
            // health check stays open for load balancer probes.
            .service(
                web::scope("")
                    .wrap(from_fn(reject_invalid_api_keys))
                    .route("/early-bird/register", web::post().to(handle_register))
                    .route("/early-bird/stats", web::get().to(handle_get_stats))
                    .route("/system/status", web::get().to(handle_system_status))
                    .route("/tools/status", web::get().to(handle_tools_status))
                    .route(
                        "/workflows/progress",
                        web::get().to(handle_workflow_progress),
                    )
                    .route("/ecosystem/nodes", web::get().to(handle_ecosystem_nodes)),
            )
            .app_data(store.clone())
            .app_data(registry.clone())
            .app_data(api_key.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
