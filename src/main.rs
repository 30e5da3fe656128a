use clap::Parser;
use sales_ledger::args::{Args, CategorySubcommand, Command, SaleSubcommand, UserSubcommand};
use sales_ledger::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().sales_home().path();
    let credentials = args.common().credentials();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),

        Command::User(user_args) => {
            let config = Config::load(home)?;
            match user_args.command() {
                UserSubcommand::Register(args) => {
                    commands::register(config, args.clone())?.print()
                }
                UserSubcommand::Login => commands::login(config, credentials)?.print(),
                UserSubcommand::List => commands::list_users(config)?.print(),
            }
        }

        Command::Category(category_args) => {
            let config = Config::load(home)?;
            match category_args.command() {
                CategorySubcommand::Add(args) => {
                    commands::add_category(config, args.clone())?.print()
                }
                CategorySubcommand::AddSub(args) => {
                    commands::add_subcategory(config, args.clone())?.print()
                }
                CategorySubcommand::List => commands::list_categories(config)?.print(),
                CategorySubcommand::Price(args) => commands::price(config, args.clone())?.print(),
            }
        }

        Command::Sale(sale_args) => {
            let config = Config::load(home)?;
            match sale_args.command() {
                SaleSubcommand::Add(args) => {
                    commands::add_sale(config, credentials, args.clone())?.print()
                }
                SaleSubcommand::Delete(args) => {
                    commands::delete_sale(config, args.clone())?.print()
                }
                SaleSubcommand::List(args) => commands::list_sales(config, args.clone())?.print(),
            }
        }

        Command::Report(report_args) => {
            let config = Config::load(home)?;
            commands::report(config, report_args.clone())?.print()
        }

        Command::Export(export_args) => {
            let config = Config::load(home)?;
            commands::export(config, export_args.clone())?.print()
        }

        Command::Backup => commands::backup(Config::load(home)?)?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                "sales_ledger",
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
