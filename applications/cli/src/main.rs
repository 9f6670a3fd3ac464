/// Admin Panel - manage the users of a REST backend from the terminal
use admin_core::{Registration, UserForm, UserId, ViewState};
use admin_panel::{
    cli::{Cli, Commands, UsersCommand},
    commands::{self, users::UserChanges},
    config::AdminConfig,
};
use clap::Parser;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "admin_panel=info,admin_client=info,admin_view=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match &cli.log_level {
        Some(level) => EnvFilter::new(format!(
            "admin_panel={level},admin_client={level},admin_view={level}"
        )),
        None => EnvFilter::new(DEFAULT_FILTER),
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AdminConfig::load(cli.config.as_deref())?;
    config.validate()?;
    tracing::debug!(backend = %config.backend.url, "Configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Users { command } => {
            let client = commands::connect(&config).await?;
            let users = client.users();

            match command {
                UsersCommand::List {
                    search,
                    sort,
                    order,
                    page,
                    page_size,
                    format,
                } => {
                    let state = ViewState::default()
                        .with_search(search)
                        .with_sort(sort.into(), order.into())
                        .with_page(page)
                        .with_page_size(commands::users::page_size(
                            page_size,
                            config.page_size()?,
                        )?);
                    commands::users::list(&users, state, format, &mut out).await?;
                }
                UsersCommand::Add { name, email, role } => {
                    commands::users::add(&users, UserForm::new(name, email, role), &mut out)
                        .await?;
                }
                UsersCommand::Edit {
                    id,
                    name,
                    email,
                    role,
                } => {
                    let changes = UserChanges { name, email, role };
                    commands::users::edit(&users, &UserId::new(id), changes, &mut out).await?;
                }
                UsersCommand::Delete { id } => {
                    commands::users::delete(&users, &UserId::new(id), &mut out).await?;
                }
            }
        }
        Commands::Metrics {
            watch,
            interval,
            format,
        } => {
            let client = commands::connect(&config).await?;

            if watch {
                let period = interval
                    .map(std::time::Duration::from_secs)
                    .unwrap_or_else(|| config.refresh_interval());
                let shutdown = async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                    }
                };
                commands::metrics::watch(&client, period, format, shutdown, &mut out).await?;
            } else {
                commands::metrics::show(&client.users(), format, &mut out).await?;
            }
        }
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let client = admin_client::AdminClient::new(config.client_config())?;
            let registration = Registration::new(name, email, password, confirm_password);
            commands::auth::register(client.identity(), registration, &mut out).await?;
        }
        Commands::Login { email, password } => {
            let client = admin_client::AdminClient::new(config.client_config())?;
            let email = email.or_else(|| config.auth.email.clone());
            let password = password.or_else(|| config.auth.password.clone());
            commands::auth::login(
                client.identity(),
                email.as_deref(),
                password.as_deref(),
                &mut out,
            )
            .await?;
        }
    }

    Ok(())
}
