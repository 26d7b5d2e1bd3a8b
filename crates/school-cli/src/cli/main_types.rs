use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use school_core::core::domain::{AttendanceStatus, PaymentMethod, VerificationDecision};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "school-cli")]
#[command(about = "Command line client for the school management API")]
#[command(version)]
#[command(after_help = "Examples:
  school-cli auth login --email bursar@school.ac     # Sign in (prompts for password)
  school-cli students list --class 3                 # Students in class 3
  school-cli fees statement 42                       # Fee statement for student 42
  school-cli payments submit 42 15000 --method cash  # Record a cash payment
  school-cli receipts download 118                   # Save the receipt PDF for payment 118

Environment Variables:
  SCHOOL_API_URL   School API server URL
  RUST_LOG         Log filter (overrides --verbose)")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// School API server URL
    #[arg(long, global = true, env = "SCHOOL_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, register, refresh or sign out
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Student records
    Students {
        #[command(subcommand)]
        command: StudentCommands,
    },
    /// Classes, courses and Cambridge subjects
    Classes {
        #[command(subcommand)]
        command: ClassCommands,
    },
    /// Record and review attendance
    Attendance {
        #[command(subcommand)]
        command: AttendanceCommands,
    },
    /// Student fee statements
    Fees {
        #[command(subcommand)]
        command: FeeCommands,
    },
    /// Submit, review and verify payments
    Payments {
        #[command(subcommand)]
        command: PaymentCommands,
    },
    /// Payment receipts
    Receipts {
        #[command(subcommand)]
        command: ReceiptCommands,
    },
    /// Finance reports
    Reports {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Fee structure maintenance
    FeeStructures {
        #[command(subcommand)]
        command: FeeStructureCommands,
    },
    /// Show or change the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Sign in and store the session tokens in the OS keyring
    Login {
        #[arg(long)]
        email: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, default_value = "parent")]
        role: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Exchange the stored refresh token for a new access token
    Refresh,
    /// Show the signed-in user
    Whoami,
    /// Forget the stored session
    Logout,
}

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// List students
    List {
        #[arg(long = "class")]
        class_id: Option<i64>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one student
    Show { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ClassCommands {
    /// List classes
    List,
    /// Students enrolled in a class
    Students { class_id: i64 },
    /// Courses, optionally for one class
    Courses {
        #[arg(long = "class")]
        class_id: Option<i64>,
    },
    /// Cambridge subjects
    Subjects,
}

#[derive(Subcommand, Debug)]
pub enum AttendanceCommands {
    /// List attendance records
    List {
        #[arg(long)]
        student: Option<i64>,
        #[arg(long = "class")]
        class_id: Option<i64>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Mark one student for a day
    #[command(after_help = "Examples:
  school-cli attendance mark 42 --status present
  school-cli attendance mark 42 --status late --date 2024-03-11 --remarks \"bus delay\"")]
    Mark(MarkArgs),
    /// Check a student in with a scanned QR token
    Qr { token: String },
    /// Attendance totals for a student
    Summary {
        student_id: i64,
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Args, Debug)]
pub struct MarkArgs {
    pub student_id: i64,

    #[arg(long)]
    pub status: AttendanceStatus,

    /// Defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long = "class")]
    pub class_id: Option<i64>,

    #[arg(long)]
    pub remarks: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RangeArgs {
    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum FeeCommands {
    /// Fee statement with every charge and payment
    Statement { student_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum PaymentCommands {
    /// List payments
    List {
        #[arg(long)]
        student: Option<i64>,
        /// pending, verified or rejected
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Show one payment
    Show { id: i64 },
    /// Submit a payment, optionally with a bank slip image
    Submit(SubmitPaymentArgs),
    /// Verify or reject a submitted payment
    Verify {
        id: i64,
        #[arg(long)]
        decision: VerificationDecision,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Args, Debug)]
#[command(after_help = "Examples:
  school-cli payments submit 42 15000 --method cash
  school-cli payments submit 42 15000 --method bank_deposit --reference DEP-778 --slip ./slip.jpg")]
pub struct SubmitPaymentArgs {
    pub student_id: i64,

    pub amount: f64,

    /// cash, bank_transfer, bank_deposit, mobile_money, cheque or card
    #[arg(long)]
    pub method: PaymentMethod,

    #[arg(long)]
    pub reference: Option<String>,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub fee_structure: Option<i64>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Bank slip image to upload with the payment
    #[arg(long)]
    pub slip: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ReceiptCommands {
    /// Show the receipt for a payment
    Show { payment_id: i64 },
    /// Issue a receipt for a verified payment
    Generate { payment_id: i64 },
    /// Save the receipt PDF for a payment
    Download { payment_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Collection totals and recent payments
    Dashboard,
    /// Daily collections over a date range
    Collections {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Students with unpaid balances
    Outstanding {
        #[arg(long = "class")]
        class_id: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FeeStructureCommands {
    /// List fee structures
    List {
        #[arg(long = "class")]
        class_id: Option<i64>,
        /// Only active structures
        #[arg(long)]
        active: bool,
    },
    /// Show one fee structure
    Show { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration values
    Set {
        #[arg(long)]
        url: Option<String>,
        /// Directory receipts are saved under
        #[arg(long)]
        receipts_dir: Option<PathBuf>,
    },
}
