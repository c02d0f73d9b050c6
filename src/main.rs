use std::{process, sync::Arc};

use folio::{
    application::{catalog::Catalog, error::AppError, repos::ContentSource},
    config,
    infra::{
        content::{DirectoryContent, EmbeddedContent},
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let catalog = Arc::new(load_catalog(&settings)?);

    match cli_args.command {
        Some(config::Command::Check(_)) => {
            let counts = catalog.counts();
            println!(
                "content ok: {} projects, {} posts, {} tutorials",
                counts.projects, counts.posts, counts.tutorials
            );
            Ok(())
        }
        Some(config::Command::Serve(_)) | None => serve_http(&settings, catalog).await,
    }
}

fn load_catalog(settings: &config::Settings) -> Result<Catalog, AppError> {
    let source: Box<dyn ContentSource> = match settings.content.directory.as_ref() {
        Some(directory) => Box::new(DirectoryContent::new(directory.clone())),
        None => Box::new(EmbeddedContent),
    };

    let catalog = Catalog::load(source.as_ref())?;
    let counts = catalog.counts();
    info!(
        target = "folio::content",
        source = %source.describe(),
        projects = counts.projects,
        posts = counts.posts,
        tutorials = counts.tutorials,
        "content catalog loaded"
    );
    Ok(catalog)
}

async fn serve_http(settings: &config::Settings, catalog: Arc<Catalog>) -> Result<(), AppError> {
    let state = HttpState::new(catalog, settings.contact.submit_delay);
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        target = "folio::serve",
        addr = %settings.server.addr,
        "listening"
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => return join_result(result),
        () = shutdown_signal() => {}
    }

    info!(
        target = "folio::serve",
        timeout_secs = settings.server.graceful_shutdown.as_secs(),
        "shutdown requested, draining connections"
    );
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(settings.server.graceful_shutdown, &mut server).await {
        Ok(result) => join_result(result),
        Err(_) => {
            warn!(
                target = "folio::serve",
                "graceful shutdown timed out, aborting open connections"
            );
            server.abort();
            Ok(())
        }
    }
}

fn join_result(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(AppError::unexpected(format!("server error: {err}"))),
        Err(err) => Err(AppError::unexpected(format!("server task failed: {err}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
