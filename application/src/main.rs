use std::{io, process::ExitCode, sync::OnceLock};

use application::{screen, Args, Config, Context, Error};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

async fn start() -> Result<(), u8> {
    let Args { config, command } = Args::parse().map_err(|e| {
        // Help and version requests are reported as errors too.
        _ = e.print();
        u8::try_from(e.exit_code()).unwrap_or(2)
    })?;

    let config = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
        2
    })?;

    LOG_LEVEL
        .set(config.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let mut ctx = Context::new(&config).await.map_err(report)?;

    let res = screen::open(&mut ctx, command).await;
    for notification in ctx.take_notifications() {
        eprintln!("{notification}");
    }

    let out = res.map_err(report)?;
    println!("{out}");
    Ok(())
}

/// Reports the provided [`Error`], returning the exit code it maps to.
fn report(e: Error) -> u8 {
    log::error!("{e}");
    if e.code == "UNAUTHENTICATED" {
        log::info!("run `login` to sign in");
    }
    e.exit_code()
}
