use clap::{Parser, Subcommand};

/// Command-line interface definition for rponto
/// CLI time clock: punches, sequence validation, corrections, daily summary
#[derive(Parser)]
#[command(
    name = "rponto",
    version = env!("CARGO_PKG_VERSION"),
    about = "A CLI time clock: register punches, validate daily sequences, audit corrections",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
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

    /// Print the current configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Manage the employee roster
    Roster {
        #[arg(long = "add", value_name = "ID", help = "Add or update an employee")]
        add: Option<String>,

        #[arg(long = "name", help = "Employee display name (with --add)")]
        name: Option<String>,

        #[arg(long = "pin", help = "Set a PIN for the employee (with --add)")]
        pin: Option<String>,

        #[arg(long = "deactivate", value_name = "ID", help = "Deactivate an employee")]
        deactivate: Option<String>,

        #[arg(long = "list", help = "List the roster")]
        list: bool,
    },

    /// Register a punch for an employee
    Punch {
        /// Employee id
        employee: String,

        /// Punch kind: in, lunch-out, lunch-in, out
        kind: String,

        /// Explicit timestamp (RFC 3339 or "YYYY-MM-DD HH:MM"); default = now
        #[arg(long = "at")]
        at: Option<String>,

        /// Employee PIN, required when the roster entry has one
        #[arg(long = "pin")]
        pin: Option<String>,

        /// Capturing device identifier
        #[arg(long = "device")]
        device: Option<String>,

        /// Location fix as "lat,lon[,accuracy_m]"
        #[arg(long = "location")]
        location: Option<String>,
    },

    /// List a day's events, corrections and findings
    List {
        employee: String,

        /// Date (YYYY-MM-DD), default = today
        date: Option<String>,
    },

    /// Re-run the detectors for a day, or resolve a finding
    Validate {
        employee: String,

        /// Date (YYYY-MM-DD), default = today
        date: Option<String>,

        /// Resolve the finding with this id instead of listing
        #[arg(long = "resolve", value_name = "ID")]
        resolve: Option<String>,

        /// Actor resolving the finding (with --resolve)
        #[arg(long = "by", requires = "resolve")]
        by: Option<String>,

        /// Mark the finding Ignored instead of JustificationAccepted
        #[arg(long = "ignore", requires = "resolve")]
        ignore: bool,

        /// Free-text detail recorded with the resolution
        #[arg(long = "details", requires = "resolve")]
        details: Option<String>,
    },

    /// Propose a timestamp correction for a recorded event
    Correct {
        /// Id of the event to correct
        event: String,

        /// Proposed timestamp (RFC 3339 or "YYYY-MM-DD HH:MM")
        #[arg(long = "to")]
        to: String,

        /// Why the recorded timestamp is wrong (minimum 10 characters)
        #[arg(long = "justification")]
        justification: String,

        /// Requesting actor id
        #[arg(long = "by")]
        by: String,

        /// Requesting actor display name
        #[arg(long = "name")]
        name: String,

        /// Approver id (mandatory when correcting your own event)
        #[arg(long = "approver")]
        approver: Option<String>,

        /// Approver display name
        #[arg(long = "approver-name")]
        approver_name: Option<String>,

        /// Attachment reference, repeatable
        #[arg(long = "evidence")]
        evidence: Vec<String>,
    },

    /// Approve, reject or cancel a pending correction
    Review {
        /// Correction id
        correction: String,

        #[arg(long = "approve", conflicts_with_all = ["reject", "cancel"])]
        approve: bool,

        #[arg(long = "reject", conflicts_with_all = ["approve", "cancel"])]
        reject: bool,

        #[arg(long = "cancel", conflicts_with_all = ["approve", "reject"])]
        cancel: bool,

        /// Acting actor id
        #[arg(long = "by")]
        by: String,

        /// Acting actor display name (required with --approve)
        #[arg(long = "name")]
        name: Option<String>,
    },

    /// Daily summary for an employee
    Summary {
        employee: String,

        /// Date (YYYY-MM-DD), default = today
        date: Option<String>,
    },

    /// Lock or unlock a day (locked days accept corrections only)
    Lock {
        employee: String,

        date: String,

        #[arg(long = "unlock")]
        unlock: bool,
    },

    /// Print rows from the audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the audit log table")]
        print: bool,
    },
}
