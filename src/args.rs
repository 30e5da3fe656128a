//! These structs provide the CLI interface for the sales CLI.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// sales: Record the sales of a small business and see where the revenue comes from.
///
/// Sales are recorded against a catalog of categories and subcategories, where each subcategory
/// has a price. Every sale is logged by a registered user. All data lives in a single JSON file
/// in the sales home directory; run `sales init` once to create it.
///
/// Commands that record sales need a logged-in user: pass --user and --password, or set
/// SALES_USER and SALES_PASSWORD.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the sales home directory, its config file and an empty data file.
    ///
    /// This is the first command you should run. Running it again does not touch existing data.
    Init,
    /// Register users and check credentials.
    User(UserArgs),
    /// Manage the category catalog.
    Category(CategoryArgs),
    /// Record, delete and list sales.
    Sale(SaleArgs),
    /// Show revenue rollups.
    Report(ReportArgs),
    /// Write all sales as CSV.
    Export(ExportArgs),
    /// Copy the data file into the backups directory.
    Backup,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the data file and configuration are held. Defaults to ~/sales
    #[arg(long, env = "SALES_HOME", default_value_t = default_sales_home())]
    sales_home: DisplayPath,

    /// The user to log in as.
    #[arg(long, env = "SALES_USER")]
    user: Option<String>,

    /// The password of --user.
    #[arg(long, env = "SALES_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl Common {
    pub fn new(log_level: LevelFilter, sales_home: PathBuf) -> Self {
        Self {
            log_level,
            sales_home: sales_home.into(),
            user: None,
            password: None,
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn sales_home(&self) -> &DisplayPath {
        &self.sales_home
    }

    /// The login given on the command line, if any. A missing password is treated as empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.user
            .as_deref()
            .map(|user| (user, self.password.as_deref().unwrap_or_default()))
    }
}

/// Args for the `sales user` command.
#[derive(Debug, Parser, Clone)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserSubcommand,
}

impl UserArgs {
    pub fn new(command: UserSubcommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &UserSubcommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserSubcommand {
    /// Register a new user.
    Register(RegisterArgs),
    /// Check the --user and --password credentials.
    Login,
    /// List registered users.
    List,
}

#[derive(Debug, Parser, Clone)]
pub struct RegisterArgs {
    /// The new username.
    pub username: String,
    /// The password. It is stored as given.
    pub password: String,
}

/// Args for the `sales category` command.
#[derive(Debug, Parser, Clone)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategorySubcommand,
}

impl CategoryArgs {
    pub fn new(command: CategorySubcommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &CategorySubcommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategorySubcommand {
    /// Add a top-level category.
    Add(AddCategoryArgs),
    /// Add a subcategory with a price. The category is created if needed.
    AddSub(AddSubcategoryArgs),
    /// List categories, subcategories and prices.
    List,
    /// Show the price of a subcategory.
    Price(PriceArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddCategoryArgs {
    /// The category name.
    pub name: String,
}

#[derive(Debug, Parser, Clone)]
pub struct AddSubcategoryArgs {
    /// The parent category.
    pub category: String,
    /// The subcategory name.
    pub name: String,
    /// The unit price, e.g. 3.50
    pub price: String,
}

#[derive(Debug, Parser, Clone)]
pub struct PriceArgs {
    pub category: String,
    pub subcategory: String,
}

/// Args for the `sales sale` command.
#[derive(Debug, Parser, Clone)]
pub struct SaleArgs {
    #[command(subcommand)]
    command: SaleSubcommand,
}

impl SaleArgs {
    pub fn new(command: SaleSubcommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &SaleSubcommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum SaleSubcommand {
    /// Record a sale for the logged-in user.
    Add(AddSaleArgs),
    /// Delete a sale by id.
    Delete(DeleteSaleArgs),
    /// List sales in the order they were recorded.
    List(ListSalesArgs),
}

#[derive(Debug, Parser, Clone, Default)]
pub struct AddSaleArgs {
    /// The category of the item sold.
    #[arg(long)]
    pub category: String,

    /// The subcategory of the item sold.
    #[arg(long)]
    pub subcategory: String,

    /// The amount. Defaults to the subcategory's price.
    #[arg(long)]
    pub amount: Option<String>,

    /// The date of the sale. Defaults to today (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Who bought it.
    #[arg(long)]
    pub buyer: Option<String>,
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteSaleArgs {
    /// The id of the sale to delete.
    pub id: u64,
}

#[derive(Debug, Parser, Clone, Default)]
pub struct ListSalesArgs {
    /// Only list sales logged by this user.
    #[arg(long = "by")]
    pub user: Option<String>,
}

/// Which rollup `sales report` shows.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Users, their categories and individual sales, then the overall total.
    #[default]
    Dashboard,
    /// Revenue and count per registered user.
    Users,
    /// Revenue and count per category.
    Categories,
    /// Revenue and count over all sales.
    Total,
    /// Revenue per category as a bar chart.
    Chart,
}

serde_plain::derive_display_from_serialize!(ReportKind);
serde_plain::derive_fromstr_from_deserialize!(ReportKind);

/// Args for the `sales report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// One of: dashboard, users, categories, total, chart
    #[arg(default_value_t = ReportKind::Dashboard)]
    kind: ReportKind,
}

impl ReportArgs {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }
}

/// Args for the `sales export` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExportArgs {
    /// The CSV file to write. Writes to stdout when omitted.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

fn default_sales_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("sales"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --sales-home or SALES_HOME instead of relying on the default \
                sales home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("sales")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
