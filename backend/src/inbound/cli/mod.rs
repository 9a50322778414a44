//! Command-line adapter built on clap.
//!
//! [`Cli`] parses arguments; [`run`] executes one [`Command`] against an
//! open [`Stockroom`] and returns the text to print. Rendering lives in
//! the private `render` module.

mod render;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::export::to_csv;
use crate::domain::ports::CollectionStore;
use crate::domain::{
    Capability, Category, CustomerInfo, EmailAddress, Error, InventoryFilter, LoginCredentials,
    NewProduct, NewUser, Product, ProductId, ProductPatch, Role, SaleRequest, StockStatus,
    Stockroom, SupplierId, UserId, UserPatch, reports,
};

/// `stockroom` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stockroom",
    about = "Inventory, supplier and point-of-sale records for a small shop",
    version
)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start a session.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Shared login secret.
        #[arg(long)]
        password: String,
    },
    /// End the current session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List products.
    Products {
        /// Only products in this category, e.g. "Graphics Card".
        #[arg(long)]
        category: Option<Category>,
        /// Only products at or below their threshold.
        #[arg(long)]
        low_stock: bool,
    },
    /// Create, edit or delete a product.
    #[command(subcommand)]
    Product(ProductCommand),
    /// List suppliers.
    Suppliers,
    /// Catalogue totals.
    Stats,
    /// Record a sale.
    Sell(SellArgs),
    /// List recorded sales.
    Sales {
        /// Only sales of this product.
        #[arg(long)]
        product: Option<ProductId>,
        /// Inclusive RFC 3339 lower bound.
        #[arg(long, requires = "to")]
        from: Option<DateTime<Utc>>,
        /// Inclusive RFC 3339 upper bound.
        #[arg(long, requires = "from")]
        to: Option<DateTime<Utc>>,
    },
    /// Manage user accounts.
    #[command(subcommand)]
    Users(UserCommand),
    /// Print a report.
    Report(ReportArgs),
}

/// Product maintenance.
#[derive(Debug, Clone, Subcommand)]
pub enum ProductCommand {
    /// Add a product.
    Add(NewProductArgs),
    /// Set the stock level of a product.
    Restock {
        /// Product to restock.
        id: ProductId,
        /// New stock level.
        #[arg(long)]
        quantity: u32,
    },
    /// Delete a product. Its sales remain in the ledger.
    Delete {
        /// Product to delete.
        id: ProductId,
    },
}

/// Fields of a new product.
#[derive(Debug, Clone, Args)]
pub struct NewProductArgs {
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Stock keeping unit code.
    #[arg(long)]
    pub sku: String,
    /// Catalogue category.
    #[arg(long)]
    pub category: Category,
    /// Supplier id.
    #[arg(long)]
    pub supplier: SupplierId,
    /// Unit price.
    #[arg(long)]
    pub price: Decimal,
    /// Opening stock.
    #[arg(long)]
    pub quantity: u32,
    /// Low-stock threshold.
    #[arg(long)]
    pub threshold: u32,
    /// Optional image reference.
    #[arg(long)]
    pub image_url: Option<String>,
}

/// A sale at the counter.
#[derive(Debug, Clone, Args)]
pub struct SellArgs {
    /// Product sold.
    #[arg(long)]
    pub product: ProductId,
    /// Units sold.
    #[arg(long)]
    pub quantity: u32,
    /// Unit price charged; defaults to the catalogue price.
    #[arg(long)]
    pub price: Option<Decimal>,
    /// Customer name.
    #[arg(long)]
    pub customer_name: String,
    /// Customer phone number.
    #[arg(long)]
    pub customer_phone: String,
    /// Customer email address.
    #[arg(long)]
    pub customer_email: String,
    /// Customer postal address.
    #[arg(long, default_value = "")]
    pub customer_address: String,
}

/// User administration.
#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// List accounts.
    List,
    /// Create an account.
    Add {
        /// Full name.
        #[arg(long)]
        name: String,
        /// Login email.
        #[arg(long)]
        email: String,
        /// Assigned role.
        #[arg(long)]
        role: Role,
    },
    /// Change an account's role.
    SetRole {
        /// Account to change.
        id: UserId,
        /// New role.
        role: Role,
    },
    /// Delete an account.
    Delete {
        /// Account to delete.
        id: UserId,
    },
}

/// Report selection and output options.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Report to print.
    pub kind: ReportKind,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Rows kept by the top-sellers report.
    #[arg(long, default_value_t = 5)]
    pub limit: usize,
    /// Inventory report category filter.
    #[arg(long)]
    pub category: Option<Category>,
    /// Inventory report stock status filter.
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

/// Available reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Ledger totals and monthly rollup.
    Sales,
    /// Best sellers by units.
    TopSellers,
    /// Per-category valuation.
    Categories,
    /// Per-supplier valuation.
    Suppliers,
    /// Full stock listing.
    Inventory,
    /// Reorder list.
    LowStock,
}

/// Rendering of report rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns.
    Table,
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed JSON.
    Json,
}

/// Stock status filter for the inventory report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// No units left.
    OutOfStock,
    /// At or below threshold.
    LowStock,
    /// Above threshold.
    InStock,
}

impl From<StatusArg> for StockStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::OutOfStock => Self::OutOfStock,
            StatusArg::LowStock => Self::LowStock,
            StatusArg::InStock => Self::InStock,
        }
    }
}

/// Failures surfaced by [`run`].
#[derive(Debug, Error)]
pub enum CliError {
    /// The use case was rejected.
    #[error(transparent)]
    Domain(#[from] Error),
    /// JSON output could not be produced.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    /// The domain error, when the failure came from a use case.
    pub fn domain(&self) -> Option<&Error> {
        match self {
            Self::Domain(error) => Some(error),
            Self::Encode(_) => None,
        }
    }
}

/// Execute `command` and return the text to print.
pub fn run<S: CollectionStore>(
    stockroom: &mut Stockroom<S>,
    command: Command,
) -> Result<String, CliError> {
    match command {
        Command::Login { email, password } => {
            let credentials =
                LoginCredentials::try_from_parts(&email, &password).map_err(Error::from)?;
            let user = stockroom.login(&credentials)?;
            Ok(format!("logged in as {} ({})", user.name(), user.role()))
        }
        Command::Logout => {
            stockroom.logout()?;
            Ok("logged out".to_owned())
        }
        Command::Whoami => Ok(stockroom
            .current_user()
            .map_or_else(|| "not logged in".to_owned(), render::user_line)),
        Command::Products {
            category,
            low_stock,
        } => {
            stockroom.session().require_user()?;
            let filter = InventoryFilter {
                category,
                status: None,
            };
            let rows: Vec<_> = reports::inventory_report(
                stockroom.products().list(),
                stockroom.suppliers().list(),
                filter,
            )
            .into_iter()
            .filter(|row| !low_stock || row.status != StockStatus::InStock)
            .collect();
            Ok(render::table(&rows))
        }
        Command::Product(command) => run_product(stockroom, command),
        Command::Suppliers => {
            stockroom.session().require_user()?;
            Ok(render::suppliers(stockroom.suppliers().list()))
        }
        Command::Stats => Ok(render::product_stats(&stockroom.product_stats()?)),
        Command::Sell(args) => {
            // An unknown product is reported by the sale itself, after the
            // session check.
            let unit_price = args.price.unwrap_or_else(|| {
                stockroom
                    .products()
                    .find(&args.product)
                    .map_or(Decimal::ZERO, Product::price)
            });
            let sale = stockroom.record_sale(SaleRequest {
                product_id: args.product,
                quantity: args.quantity,
                unit_price,
                customer: CustomerInfo {
                    name: args.customer_name,
                    phone: args.customer_phone,
                    email: args.customer_email,
                    address: args.customer_address,
                },
            })?;
            Ok(format!(
                "sale {} recorded: {} x {} = {}",
                sale.id(),
                sale.quantity(),
                sale.price(),
                sale.total_price()
            ))
        }
        Command::Sales { product, from, to } => {
            stockroom.session().require_user()?;
            let ledger = stockroom.sales();
            let mut sales = match (from, to) {
                (Some(start), Some(end)) => ledger.by_date_range(start, end),
                _ => ledger.list().iter().collect(),
            };
            if let Some(product_id) = product {
                sales.retain(|sale| sale.product_id() == &product_id);
            }
            Ok(render::sales(&sales))
        }
        Command::Users(command) => run_users(stockroom, command),
        Command::Report(args) => run_report(stockroom, &args),
    }
}

fn run_product<S: CollectionStore>(
    stockroom: &mut Stockroom<S>,
    command: ProductCommand,
) -> Result<String, CliError> {
    match command {
        ProductCommand::Add(args) => {
            let product = stockroom.add_product(NewProduct {
                name: args.name,
                sku: args.sku,
                category: args.category,
                supplier: args.supplier,
                price: args.price,
                quantity: args.quantity,
                threshold: args.threshold,
                image_url: args.image_url,
            })?;
            Ok(format!("added product {} ({})", product.id(), product.name()))
        }
        ProductCommand::Restock { id, quantity } => {
            let product = stockroom.update_product(
                &id,
                ProductPatch {
                    quantity: Some(quantity),
                    ..ProductPatch::default()
                },
            )?;
            Ok(format!(
                "{} now has {} in stock",
                product.name(),
                product.quantity()
            ))
        }
        ProductCommand::Delete { id } => {
            let product = stockroom.delete_product(&id)?;
            Ok(format!("deleted product {} ({})", product.id(), product.name()))
        }
    }
}

fn run_users<S: CollectionStore>(
    stockroom: &mut Stockroom<S>,
    command: UserCommand,
) -> Result<String, CliError> {
    match command {
        UserCommand::List => {
            stockroom.session().authorize(Capability::ManageUsers)?;
            Ok(stockroom
                .users()
                .list()
                .iter()
                .map(render::user_line)
                .collect::<Vec<_>>()
                .join("\n"))
        }
        UserCommand::Add { name, email, role } => {
            let email = EmailAddress::new(&email).map_err(Error::from)?;
            let user = stockroom.add_user(NewUser {
                name,
                email,
                role,
                avatar: None,
            })?;
            Ok(format!("added user {} ({})", user.id(), user.email()))
        }
        UserCommand::SetRole { id, role } => {
            let user = stockroom.update_user(
                &id,
                UserPatch {
                    role: Some(role),
                    ..UserPatch::default()
                },
            )?;
            Ok(render::user_line(&user))
        }
        UserCommand::Delete { id } => {
            let user = stockroom.delete_user(&id)?;
            Ok(format!("deleted user {} ({})", user.id(), user.email()))
        }
    }
}

fn run_report<S: CollectionStore>(
    stockroom: &Stockroom<S>,
    args: &ReportArgs,
) -> Result<String, CliError> {
    let format = args.format;
    match args.kind {
        ReportKind::Sales => {
            let stats = stockroom.sales_stats()?;
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&stats)?),
                OutputFormat::Csv => Ok(to_csv(&stats.monthly_rows())),
                OutputFormat::Table => Ok(render::sales_stats(&stats)),
            }
        }
        ReportKind::TopSellers => render::rows(&stockroom.top_selling_products(args.limit)?, format),
        ReportKind::Categories => render::rows(&stockroom.category_report()?, format),
        ReportKind::Suppliers => render::rows(&stockroom.supplier_report()?, format),
        ReportKind::Inventory => {
            let filter = InventoryFilter {
                category: args.category,
                status: args.status.map(StockStatus::from),
            };
            render::rows(&stockroom.inventory_report(filter)?, format)
        }
        ReportKind::LowStock => render::rows(&stockroom.low_stock_report()?, format),
    }
}
