//! Command-line walkthrough of the freelance dashboard.
//!
//! Loads the seed data, prints the overview, clients and projects views,
//! then runs a few payment and status transitions and prints the updated
//! figures.

use anyhow::Context;
use freelance_core::environment::SystemClock;
use freelance_dashboard::format::{format_currency, format_date};
use freelance_dashboard::query::query_projects;
use freelance_dashboard::stats::{client_name, client_revenue, count_payment_status, projects_by_client_id};
use freelance_dashboard::{
    AppState, Config, Dashboard, DashboardEnvironment, DashboardStats, Money, PaymentStatus,
    ProjectFilter, ProjectStatus, seed,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    freelance_runtime::metrics::describe_store_metrics();

    let initial = match &config.seed_path {
        Some(path) => seed::load_seed(path).context("Failed to load seed data")?,
        None => {
            tracing::info!("No seed file configured, using built-in data");
            seed::mock_state()
        },
    };

    let env = DashboardEnvironment::new(Arc::new(SystemClock));
    let dashboard = Dashboard::with_config(initial, env, config.store_config());

    println!("=== Freelance Dashboard ===\n");
    print_overview(&dashboard.stats().await);

    let state = dashboard.snapshot().await;
    print_clients(&state);
    print_projects(&state, &ProjectFilter::new(), None);

    let Some(target) = state.projects.iter().find(|p| !p.is_paid()).cloned() else {
        println!("\nEvery project is already paid.");
        return Ok(());
    };

    println!("\n--- Recording payments for \"{}\" ---", target.title);
    match dashboard
        .record_payment_validated(target.id.clone(), target.budget)
        .await
    {
        Ok(payment) => println!(
            "Recorded {} on {}",
            format_currency(payment.amount),
            format_date(payment.date)
        ),
        Err(error) => println!("Rejected: {error}"),
    }

    // Second attempt is refused: a payment now exists
    if let Err(error) = dashboard
        .record_payment_validated(target.id.clone(), target.budget)
        .await
    {
        println!("Rejected: {error}");
    }

    if let Err(error) = dashboard
        .record_payment_validated(target.id.clone(), Money::from_dollars(-5))
        .await
    {
        println!("Rejected: {error}");
    }

    // The unchecked path accepts anything
    dashboard
        .force_mark_paid(target.id.clone(), Money::from_dollars(100))
        .await;
    println!("Forced an extra {} payment", format_currency(Money::from_dollars(100)));

    dashboard
        .update_project_status(target.id.clone(), ProjectStatus::Completed)
        .await;
    println!("Marked \"{}\" {}", target.title, ProjectStatus::Completed);

    println!();
    print_overview(&dashboard.stats().await);

    let state = dashboard.snapshot().await;
    print_clients(&state);
    print_projects(
        &state,
        &ProjectFilter::new().with_payment_status(PaymentStatus::Unpaid),
        None,
    );

    // The paid list narrowed down to the project just settled
    print_projects(
        &state,
        &ProjectFilter::new().with_payment_status(PaymentStatus::Paid),
        Some(&target.title),
    );

    Ok(())
}

fn print_overview(stats: &DashboardStats) {
    println!("Overview");
    println!("  Total projects: {}", stats.total_projects);
    println!("  Total revenue:  {}", format_currency(stats.total_revenue));
    println!("  Active clients: {}", stats.total_clients);
    println!(
        "  Paid:           {} ({}%)",
        stats.paid_projects,
        stats.paid_percentage()
    );
    println!(
        "  Unpaid:         {} ({}%)",
        stats.unpaid_projects,
        stats.unpaid_percentage()
    );
}

fn print_clients(state: &AppState) {
    println!("\nClients");
    for client in state.clients.iter() {
        let projects = projects_by_client_id(&state.projects, &client.id);
        let revenue = client_revenue(&client.id, &state.projects, &state.payments);
        println!(
            "  {} ({}) - {} projects, {} earned",
            client.name,
            client.country,
            projects.len(),
            format_currency(revenue)
        );
    }
}

fn print_projects(state: &AppState, filter: &ProjectFilter, search: Option<&str>) {
    let projects = query_projects(&state.projects, filter, search);
    let counts = count_payment_status(&state.projects);

    println!(
        "\nProjects ({} shown, {} paid, {} unpaid)",
        projects.len(),
        counts.paid,
        counts.unpaid
    );
    for project in projects {
        println!(
            "  [{}] {} for {} - {} ({})",
            project.payment_status,
            project.title,
            client_name(&state.clients, &project.client_id),
            format_currency(project.budget),
            project.status
        );
    }
}
