use crate::cli::main_types::{
    AttendanceCommands, AuthCommands, ClassCommands, ConfigCommands, FeeCommands,
    FeeStructureCommands, PaymentCommands, RangeArgs, ReceiptCommands, ReportCommands,
    StudentCommands, SubmitPaymentArgs,
};
use crate::cli::render::TableDisplay;
use school_core::api::models::{
    AttendanceEntry, AttendanceQuery, BankSlip, DateRange, FeeStructureQuery, PaymentQuery,
    PaymentSubmission, PaymentVerification, RegisterRequest, StudentQuery,
};
use school_core::core::state::LoadState;
use school_core::core::viewmodels::{
    AttendanceViewModel, FeeStatementViewModel, FeeStructureViewModel, FinanceReportsViewModel,
    LoginViewModel, PaymentViewModel, ReceiptViewModel, StudentsViewModel,
};
use school_core::error::{AppError, CliError, StorageError};
use school_core::storage::config::Config;
use school_core::utils::validation::validate_url;
use std::path::{Path, PathBuf};

/// Turn the terminal state of a view-model action into a command result
fn finish<T>(state: LoadState<T>) -> Result<T, AppError> {
    match state {
        LoadState::Loaded(value) => Ok(value),
        LoadState::Error(message) => Err(CliError::OperationFailed(message).into()),
        LoadState::Idle | LoadState::Loading => {
            Err(CliError::OperationFailed("Operation did not complete".to_string()).into())
        }
    }
}

fn read_password(given: Option<String>) -> Result<String, AppError> {
    match given {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: ").map_err(|e| {
            CliError::InvalidArguments(format!("Failed to read password: {e}")).into()
        }),
    }
}

impl From<RangeArgs> for DateRange {
    fn from(args: RangeArgs) -> Self {
        DateRange {
            from: args.from,
            to: args.to,
        }
    }
}

pub struct AuthHandler {
    view_model: LoginViewModel,
}

impl AuthHandler {
    pub fn new(view_model: LoginViewModel) -> Self {
        Self { view_model }
    }

    pub async fn handle(&self, command: AuthCommands, display: &TableDisplay) -> Result<(), AppError> {
        match command {
            AuthCommands::Login { email, password } => {
                let password = read_password(password)?;
                let user = finish(self.view_model.login(&email, &password).await)?;
                println!("Signed in as {} ({})", user.full_name, user.role);
            }
            AuthCommands::Register {
                email,
                full_name,
                role,
                phone,
                password,
            } => {
                let password = read_password(password)?;
                let user = finish(
                    self.view_model
                        .register(RegisterRequest {
                            email,
                            password,
                            full_name,
                            role,
                            phone,
                        })
                        .await,
                )?;
                println!("Registered and signed in as {}", user.full_name);
            }
            AuthCommands::Refresh => {
                finish(self.view_model.refresh_session().await)?;
                println!("Session refreshed");
            }
            AuthCommands::Whoami => {
                let user = finish(self.view_model.load_current_user().await)?;
                println!("{}", display.render_user(&user));
            }
            AuthCommands::Logout => {
                self.view_model
                    .logout()
                    .await
                    .into_std()
                    .map_err(|e| CliError::OperationFailed(e.into_string()))?;
                println!("Signed out");
            }
        }
        Ok(())
    }
}

pub struct StudentHandler {
    view_model: StudentsViewModel,
}

impl StudentHandler {
    pub fn new(view_model: StudentsViewModel) -> Self {
        Self { view_model }
    }

    pub async fn handle(&self, command: StudentCommands, display: &TableDisplay) -> Result<(), AppError> {
        match command {
            StudentCommands::List {
                class_id,
                search,
                limit,
            } => {
                let query = StudentQuery {
                    class_id,
                    search,
                    skip: None,
                    limit,
                };
                let students = finish(self.view_model.load_students(query).await)?;
                println!("{}", display.render_students(&students));
            }
            StudentCommands::Show { id } => {
                let student = finish(self.view_model.load_student(id).await)?;
                println!("{}", display.render_student(&student));
            }
        }
        Ok(())
    }
}

/// Class, course and subject listings plus attendance capture share one
/// view-model
pub struct AttendanceHandler {
    view_model: AttendanceViewModel,
}

impl AttendanceHandler {
    pub fn new(view_model: AttendanceViewModel) -> Self {
        Self { view_model }
    }

    pub async fn handle_classes(&self, command: ClassCommands, display: &TableDisplay) -> Result<(), AppError> {
        match command {
            ClassCommands::List => {
                let classes = finish(self.view_model.load_classes().await)?;
                println!("{}", display.render_classes(&classes));
            }
            ClassCommands::Students { class_id } => {
                let roster = finish(self.view_model.load_roster(class_id).await)?;
                println!("{}", display.render_students(&roster));
            }
            ClassCommands::Courses { class_id } => {
                let courses = finish(self.view_model.load_courses(class_id).await)?;
                println!("{}", display.render_courses(&courses));
            }
            ClassCommands::Subjects => {
                let subjects = finish(self.view_model.load_subjects().await)?;
                println!("{}", display.render_subjects(&subjects));
            }
        }
        Ok(())
    }

    pub async fn handle(&self, command: AttendanceCommands, display: &TableDisplay) -> Result<(), AppError> {
        match command {
            AttendanceCommands::List {
                student,
                class_id,
                date,
            } => {
                let query = AttendanceQuery {
                    student_id: student,
                    class_id,
                    date,
                    ..Default::default()
                };
                let records = finish(self.view_model.load_records(query).await)?;
                println!("{}", display.render_attendance(&records));
            }
            AttendanceCommands::Mark(args) => {
                let entry = AttendanceEntry {
                    student_id: args.student_id,
                    date: args
                        .date
                        .unwrap_or_else(|| chrono::Local::now().date_naive()),
                    status: args.status,
                    class_id: args.class_id,
                    remarks: args.remarks,
                };
                let record = finish(self.view_model.mark_student(entry).await)?;
                println!(
                    "Marked student {} {} on {}",
                    record.student_id, record.status, record.date
                );
            }
            AttendanceCommands::Qr { token } => {
                let result = finish(self.view_model.qr_check_in(&token).await)?;
                let name = result
                    .student_name
                    .unwrap_or_else(|| result.student_id.to_string());
                match result.message {
                    Some(message) => println!("{name}: {} ({message})", result.status),
                    None => println!("{name}: {}", result.status),
                }
            }
            AttendanceCommands::Summary { student_id, range } => {
                let summary = finish(self.view_model.load_summary(student_id, range.into()).await)?;
                println!("{}", display.render_attendance_summary(&summary));
            }
        }
        Ok(())
    }
}

pub struct FeeHandler {
    view_model: FeeStatementViewModel,
}

impl FeeHandler {
    pub fn new(view_model: FeeStatementViewModel) -> Self {
        Self { view_model }
    }

    pub async fn handle(&self, command: FeeCommands, display: &TableDisplay) -> Result<(), AppError> {
        match command {
            FeeCommands::Statement { student_id } => {
                let statement = finish(self.view_model.load_statement(student_id).await)?;
                println!("{}", display.render_statement(&statement));
            }
        }
        Ok(())
    }
}

pub struct PaymentHandler {
    view_model: PaymentViewModel,
}

impl PaymentHandler {
    pub fn new(view_model: PaymentViewModel) -> Self {
        Self { view_model }
    }

    pub async fn handle(&self, command: PaymentCommands, display: &TableDisplay) -> Result<(), AppError> {
        match command {
            PaymentCommands::List {
                student,
                status,
                range,
            } => {
                let query = PaymentQuery {
                    student_id: student,
                    status,
                    from: range.from,
                    to: range.to,
                };
                let payments = finish(self.view_model.load_payments(query).await)?;
                println!("{}", display.render_payments(&payments));
            }
            PaymentCommands::Show { id } => {
                let payment = finish(self.view_model.load_payment(id).await)?;
                println!("{}", display.render_payment(&payment));
            }
            PaymentCommands::Submit(args) => {
                let (submission, slip) = payment_submission(args)?;
                let payment = finish(self.view_model.submit_payment(submission, slip).await)?;
                println!("Payment {} submitted ({})", payment.id, payment.status);
            }
            PaymentCommands::Verify {
                id,
                decision,
                notes,
            } => {
                let payment = finish(
                    self.view_model
                        .verify_payment(
                            id,
                            PaymentVerification {
                                status: decision,
                                notes,
                            },
                        )
                        .await,
                )?;
                println!("Payment {} is now {}", payment.id, payment.status);
            }
        }
        Ok(())
    }
}

fn payment_submission(args: SubmitPaymentArgs) -> Result<(PaymentSubmission, Option<BankSlip>), AppError> {
    let slip = args.slip.as_deref().map(read_bank_slip).transpose()?;
    let submission = PaymentSubmission {
        student_id: args.student_id,
        amount: args.amount,
        payment_method: args.method,
        reference_number: args.reference,
        payment_date: args.date,
        fee_structure_id: args.fee_structure,
        notes: args.notes,
    };
    Ok((submission, slip))
}

fn read_bank_slip(path: &Path) -> Result<BankSlip, AppError> {
    let bytes = std::fs::read(path).map_err(|source| StorageError::FileIo {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "bank_slip".to_string());

    Ok(BankSlip {
        content_type: slip_content_type(path).to_string(),
        file_name,
        bytes,
    })
}

fn slip_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

pub struct ReceiptHandler {
    view_model: ReceiptViewModel,
}

impl ReceiptHandler {
    pub fn new(view_model: ReceiptViewModel) -> Self {
        Self { view_model }
    }

    pub async fn handle(&self, command: ReceiptCommands, display: &TableDisplay) -> Result<(), AppError> {
        match command {
            ReceiptCommands::Show { payment_id } => {
                let receipt = finish(self.view_model.load_receipt(payment_id).await)?;
                println!("{}", display.render_receipt(&receipt));
            }
            ReceiptCommands::Generate { payment_id } => {
                let receipt = finish(self.view_model.generate_receipt(payment_id).await)?;
                println!("{}", display.render_receipt(&receipt));
            }
            ReceiptCommands::Download { payment_id } => {
                let downloaded = finish(self.view_model.fetch_and_download(payment_id).await)?;
                println!(
                    "Saved {} ({} bytes)",
                    downloaded.path.display(),
                    downloaded.size_bytes
                );
            }
        }
        Ok(())
    }
}

pub struct ReportHandler {
    view_model: FinanceReportsViewModel,
}

impl ReportHandler {
    pub fn new(view_model: FinanceReportsViewModel) -> Self {
        Self { view_model }
    }

    pub async fn handle(&self, command: ReportCommands, display: &TableDisplay) -> Result<(), AppError> {
        match command {
            ReportCommands::Dashboard => {
                let dashboard = finish(self.view_model.load_dashboard().await)?;
                println!("{}", display.render_dashboard(&dashboard));
            }
            ReportCommands::Collections { range } => {
                let report = finish(self.view_model.load_collections(range.into()).await)?;
                println!("{}", display.render_collections(&report));
            }
            ReportCommands::Outstanding { class_id } => {
                let balances = finish(self.view_model.load_outstanding(class_id).await)?;
                println!("{}", display.render_outstanding(&balances));
            }
        }
        Ok(())
    }
}

pub struct FeeStructureHandler {
    view_model: FeeStructureViewModel,
}

impl FeeStructureHandler {
    pub fn new(view_model: FeeStructureViewModel) -> Self {
        Self { view_model }
    }

    pub async fn handle(
        &self,
        command: FeeStructureCommands,
        display: &TableDisplay,
    ) -> Result<(), AppError> {
        match command {
            FeeStructureCommands::List { class_id, active } => {
                let query = FeeStructureQuery {
                    class_id,
                    is_active: active.then_some(true),
                };
                let structures = finish(self.view_model.load_structures(query).await)?;
                println!("{}", display.render_fee_structures(&structures));
            }
            FeeStructureCommands::Show { id } => {
                let structure = finish(self.view_model.load_structure(id).await)?;
                println!("{}", display.render_fee_structure(&structure));
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        mut config: Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                println!("Current Configuration:");
                println!("=====================");
                println!(
                    "API URL: {}",
                    config.get_api_url().unwrap_or_else(|| "(not set)".to_string())
                );
                match config.receipts_base_dir() {
                    Ok(dir) => println!("Receipts directory: {}", dir.display()),
                    Err(_) => println!("Receipts directory: (not available)"),
                }
                Ok(())
            }
            ConfigCommands::Set { url, receipts_dir } => {
                if url.is_none() && receipts_dir.is_none() {
                    return Err(CliError::InvalidArguments(
                        "No configuration values provided. Use --url and/or --receipts-dir"
                            .to_string(),
                    )
                    .into());
                }
                if let Some(url) = url {
                    validate_url(&url)?;
                    println!("Set API URL to: {url}");
                    config.set_api_url(url);
                }
                if let Some(dir) = receipts_dir {
                    println!("Set receipts directory to: {}", dir.display());
                    config.receipts_dir = Some(dir);
                }
                config.save(config_path)?;
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }
}
