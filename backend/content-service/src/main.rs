use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use social_content::db::SeedData;
use social_content::services::TrendSettings;
use social_content::{AppState, Config};
use std::io;
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Social Content Service
///
/// Serves hashtag trends, posts, stories and user profiles from in-memory
/// stores.
///
/// # Routes
///
/// - `/api/v1/trends` - Latest hashtag trend snapshot
/// - `/api/v1/posts/*` - Create, read, update, delete, like, search posts
/// - `/api/v1/stories/*` - Create, list, view, delete stories
/// - `/api/v1/users/*` - Profile lookups
/// - `/metrics` - Prometheus metrics
///
/// Runs on port 8081 by default (configurable via CONTENT_SERVICE_PORT).
#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting social-content-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let seed = match config.seed.path.as_deref() {
        Some(path) => match SeedData::load(path) {
            Ok(seed) => {
                tracing::info!(
                    users = seed.users.len(),
                    posts = seed.posts.len(),
                    stories = seed.stories.len(),
                    comments = seed.comments.len(),
                    "Loaded seed data from {}",
                    path
                );
                seed
            }
            Err(e) => {
                tracing::error!("Seed data loading failed: {:#}", e);
                eprintln!("ERROR: Failed to load seed data: {:#}", e);
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("No SEED_DATA_PATH configured; starting with empty stores");
            SeedData::default()
        }
    };

    let state = AppState::from_seed(
        seed,
        TrendSettings::from(&config.trends),
        config.trends.refresh_interval(),
    );

    let http_bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", http_bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    let app_state = state.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let app_state = app_state.clone();
        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(move |cfg| app_state.configure(cfg))
    })
    .bind(&http_bind_address)?
    .workers(4)
    .run();

    let server_handle = server.handle();

    let mut tasks: JoinSet<io::Result<()>> = JoinSet::new();

    // HTTP server task
    tasks.spawn(async move {
        tracing::info!("HTTP server is running");
        server.await
    });

    // Trend refresh background job
    let refresh_job = state.refresh_job();
    tasks.spawn(async move {
        refresh_job.run().await;
        Ok(())
    });

    let mut first_error: Option<io::Error> = None;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = tasks.join_next() => {
                match result {
                    Some(Ok(Ok(_))) => {
                        tracing::info!("Background task completed");
                    }
                    Some(Ok(Err(e))) => {
                        tracing::error!("Task returned error: {}", e);
                        first_error.get_or_insert(e);
                        server_handle.stop(true).await;
                        tasks.shutdown().await;
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::error!("Task join error: {}", e);
                        first_error.get_or_insert(io::Error::new(io::ErrorKind::Other, e.to_string()));
                        server_handle.stop(true).await;
                        tasks.shutdown().await;
                        break;
                    }
                    None => break,
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                server_handle.stop(true).await;
                tasks.shutdown().await;
                break;
            }
        }
    }

    tracing::info!("social-content-service shutting down");

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
