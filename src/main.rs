// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava activity client CLI
//!
//! Signs in with Strava, lists the athlete's activities and records new
//! manual activities.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use strava_activity_client::{
    config::Config,
    flows::{AuthState, BootstrapState, CreateState, FormField, FormSwitch},
    render,
    routes::{Navigator, Route},
    services::{oauth::OpenUrl, LoopbackAuthorizer},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "strava-activity")]
#[command(about = "List and create Strava activities")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check for a stored session
    Status,
    /// Sign in with Strava in the browser
    Login,
    /// Forget the stored session
    Logout,
    /// List your activities
    Activities,
    /// Record a manual activity
    Create(CreateArgs),
    /// Resolve a deep link to a screen
    Link { url: String },
}

#[derive(clap::Args, Debug)]
struct CreateArgs {
    #[arg(long, default_value = "")]
    name: String,
    /// One of the Strava activity types, e.g. Run
    #[arg(long = "type", default_value = "")]
    activity_type: String,
    /// Local start time, e.g. 2024-05-01T08:00:00
    #[arg(long, default_value = "")]
    start_date: String,
    /// Hours
    #[arg(long, default_value = "")]
    elapsed_time: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Miles
    #[arg(long, default_value = "")]
    distance: String,
    #[arg(long)]
    trainer: bool,
    #[arg(long)]
    commute: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.json);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(session_path = %config.session_path.display(), "Configuration loaded");

    let state = AppState::new(config);
    match cli.command {
        Command::Status => status(&state).await,
        Command::Login => login(&state).await,
        Command::Logout => logout(&state).await,
        Command::Activities => activities(&state, &mut Navigator::starting_at(Route::Activities)).await,
        Command::Create(args) => create(&state, args).await,
        Command::Link { url } => link(&state, &url),
    }
    ExitCode::SUCCESS
}

async fn status(state: &AppState) {
    let mut nav = Navigator::starting_at(Route::Home);
    let mut bootstrap = state.bootstrap();
    let outcome = bootstrap.on_focus(&mut nav).await;
    println!("{}", render::home(outcome, &AuthState::Idle));
    if outcome == BootstrapState::ShowLogin {
        println!("Run `strava-activity login` to sign in.");
    }
}

async fn login(state: &AppState) {
    let open_url: OpenUrl = Arc::new(|url: &str| {
        println!("Open this URL in your browser to authorize:\n\n  {}\n", url);
    });
    let authorizer = Arc::new(LoopbackAuthorizer::new(
        state.config.clone(),
        state.strava.clone(),
        open_url,
    ));

    let mut nav = Navigator::starting_at(Route::Home);
    let mut auth = state.auth_flow(authorizer);
    auth.login(&mut nav).await;

    if nav.current() == Some(Route::Activities) {
        activities(state, &mut nav).await;
    } else {
        println!("Login was not completed.");
    }
}

async fn logout(state: &AppState) {
    let mut nav = Navigator::starting_at(Route::Activities);
    match state.activity_list().logout(&mut nav).await {
        Ok(()) => println!("Logged out."),
        Err(e) => eprintln!("Logout failed: {}", e),
    }
}

async fn activities(state: &AppState, nav: &mut Navigator) {
    let mut list = state.activity_list();
    let rendered = render::activity_list(list.mount(nav).await);

    if nav.current() == Some(Route::Home) {
        println!("Not signed in. Run `strava-activity login` first.");
        return;
    }
    println!("{}", rendered);
}

async fn create(state: &AppState, args: CreateArgs) {
    let mut nav = Navigator::starting_at(Route::Create);
    let mut flow = state.create_activity();
    if flow.mount(&mut nav).await == CreateState::Redirected {
        println!("Not signed in. Run `strava-activity login` first.");
        return;
    }

    let form = flow.form_mut();
    form.set_text(FormField::Name, args.name);
    form.set_text(FormField::Type, args.activity_type);
    form.set_text(FormField::StartDateLocal, args.start_date);
    form.set_text(FormField::ElapsedTime, args.elapsed_time);
    form.set_text(FormField::Description, args.description);
    form.set_text(FormField::Distance, args.distance);
    form.set_switch(FormSwitch::Trainer, args.trainer);
    form.set_switch(FormSwitch::Commute, args.commute);

    match flow.submit(&mut nav).await {
        Ok(notice) => {
            println!("{}", render::notice(&notice));
            activities(state, &mut nav).await;
        }
        Err(strava_activity_client::error::AppError::Validation(_)) => {
            eprintln!("{}", render::form_errors(flow.form()));
        }
        Err(e) => eprintln!("Failed to create activity: {}", e),
    }
}

fn link(state: &AppState, url: &str) {
    match state.linking().parse(url) {
        Some(link) => {
            println!("{}", link.route);
            if let Some(code) = link.params.code {
                println!("code={}", code);
            }
        }
        None => println!("No screen matches {}", url),
    }
}

/// Initialize logging: human-readable by default, JSON with `--json`.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("strava_activity_client=debug".parse().unwrap())
        .add_directive("info".parse().unwrap());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
