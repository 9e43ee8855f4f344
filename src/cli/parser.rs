use crate::export::{ExportFormat, ReceiptKind};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for officedesk
/// Small-office business desk on a shared SQLite file
#[derive(Parser)]
#[command(
    name = "officedesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small-office business desk: customers, transactions with VAT, receipts and audit log on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or a shared location)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Customer records
    Customer {
        #[command(subcommand)]
        action: CustomerCmd,
    },

    /// Service catalog
    Service {
        #[command(subcommand)]
        action: ServiceCmd,
    },

    /// Billable transactions
    Tx {
        #[command(subcommand)]
        action: TxCmd,
    },

    /// Import transactions from an XLSX or CSV file
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Write the XLSX import template
    Template {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Generate a PDF receipt for a transaction
    Receipt {
        /// Transaction id
        id: i64,

        #[arg(long, value_enum, default_value = "payment")]
        kind: ReceiptKind,

        #[arg(long, help = "Notes printed on the receipt (default: transaction notes)")]
        notes: Option<String>,

        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[command(flatten)]
        company: CompanyArgs,

        #[arg(long = "save-settings", help = "Store the company fields as the new defaults")]
        save_settings: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show or change the company settings used on receipts
    Settings {
        #[arg(long)]
        show: bool,

        #[command(flatten)]
        company: CompanyArgs,
    },

    /// Print the audit log
    Log {
        #[arg(long, default_value_t = crate::db::audit::DEFAULT_LIMIT)]
        limit: usize,

        #[arg(long, help = "INSERT, UPDATE, DELETE or IMPORT")]
        action: Option<String>,

        #[arg(long, value_name = "NAME")]
        table: Option<String>,
    },

    /// Export transactions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, default_value = "all")]
        status: String,

        #[arg(long)]
        customer: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the database (integrity checks, vacuum, info)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}

#[derive(Subcommand)]
pub enum CustomerCmd {
    /// Create a customer
    Add { name: String },

    /// Profile, balance and transaction history
    Show { name: String },

    /// Overwrite customer fields (unspecified fields are kept)
    Edit {
        name: String,

        #[arg(long = "name", help = "New name")]
        new_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long = "tax-id")]
        tax_id: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long = "work-info")]
        work_info: Option<String>,
        #[arg(long = "portal-user")]
        portal_user: Option<String>,
        #[arg(long = "portal-secret")]
        portal_secret: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Names starting with a prefix (case-sensitive)
    Search {
        prefix: String,

        #[arg(long, default_value_t = crate::db::customers::PREFIX_LIMIT)]
        limit: usize,
    },

    /// Names containing every term
    Find {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        #[arg(long, default_value_t = crate::db::customers::FUZZY_LIMIT)]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum ServiceCmd {
    /// Add a service to the catalog
    Add { name: String },

    /// List services
    List,

    /// Delete a service; its transactions keep their data
    Del {
        id: i64,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TxCmd {
    /// Record a transaction
    Add {
        customer: String,
        service: String,
        /// Final cost including VAT
        final_cost: String,

        #[arg(long, default_value = "pending")]
        status: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, help = "Transaction date (YYYY-MM-DD, default today)")]
        date: Option<String>,
        #[arg(long = "attach", value_name = "FILE")]
        attach: Option<String>,
    },

    /// List transactions, newest first
    List {
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Show one transaction
    Show { id: i64 },

    /// Change status and/or notes
    Edit {
        id: i64,

        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a transaction
    Del {
        id: i64,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Combined filters
    Search {
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        min: Option<f64>,
        #[arg(long)]
        max: Option<f64>,
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Print (or open) the stored attachment
    Attachment {
        id: i64,

        #[arg(long)]
        open: bool,
    },
}

/// Company identity fields shared by `receipt` and `settings`.
#[derive(Args, Debug, Clone, Default)]
pub struct CompanyArgs {
    #[arg(long = "company-name")]
    pub company_name: Option<String>,
    #[arg(long, value_name = "FILE")]
    pub logo: Option<String>,
    #[arg(long, value_name = "FILE")]
    pub signature: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long = "tax-id")]
    pub tax_id: Option<String>,
}

impl CompanyArgs {
    pub fn overrides(&self) -> crate::core::receipt::CompanyOverrides {
        crate::core::receipt::CompanyOverrides {
            company_name: self.company_name.clone(),
            logo_path: self.logo.clone(),
            signature_path: self.signature.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            tax_id: self.tax_id.clone(),
        }
    }
}
