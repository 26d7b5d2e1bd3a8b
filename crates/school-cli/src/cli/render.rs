use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use school_core::core::domain::{
    AttendanceRecord, AttendanceSummary, CambridgeSubject, CollectionReport, Course,
    FeeStatement, FeeStructure, FinanceDashboard, OutstandingBalance, Payment, Receipt,
    SchoolClass, Student, User,
};
use school_core::core::viewmodels::NO_TRANSACTIONS_MESSAGE;

const NOT_AVAILABLE: &str = "-";

/// Renders domain values as terminal tables
pub struct TableDisplay {
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        let cells: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h).add_attribute(Attribute::Bold);
                if self.use_colors { cell.fg(Color::Cyan) } else { cell }
            })
            .collect();
        table.set_header(cells);
        table
    }

    fn id_cell(&self, id: i64) -> Cell {
        let cell = Cell::new(id);
        if self.use_colors { cell.fg(Color::Cyan) } else { cell }
    }

    fn key_value(&self, rows: &[(&str, String)]) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        for (key, value) in rows {
            table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
        }
        table.to_string()
    }

    pub fn render_user(&self, user: &User) -> String {
        self.key_value(&[
            ("ID", user.id.to_string()),
            ("Name", user.full_name.clone()),
            ("Email", user.email.clone()),
            ("Role", user.role.to_string()),
            ("Phone", optional(&user.phone)),
        ])
    }

    pub fn render_students(&self, students: &[Student]) -> String {
        if students.is_empty() {
            return "No students found".to_string();
        }
        let mut table = self.table(&["ID", "Admission No.", "Name", "Class", "Status"]);
        for student in students {
            table.add_row(vec![
                self.id_cell(student.id),
                Cell::new(&student.admission_number),
                Cell::new(student.full_name()),
                Cell::new(
                    student
                        .class_name
                        .clone()
                        .or_else(|| student.class_id.map(|id| id.to_string()))
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                ),
                Cell::new(student.status.as_str()),
            ]);
        }
        table.to_string()
    }

    pub fn render_student(&self, student: &Student) -> String {
        self.key_value(&[
            ("ID", student.id.to_string()),
            ("Admission No.", student.admission_number.clone()),
            ("Name", student.full_name()),
            ("Date of birth", optional(&student.date_of_birth)),
            ("Gender", optional(&student.gender)),
            ("Class", optional(&student.class_name)),
            ("Guardian", optional(&student.guardian_name)),
            ("Guardian phone", optional(&student.guardian_phone)),
            ("Guardian email", optional(&student.guardian_email)),
            ("Status", student.status.to_string()),
        ])
    }

    pub fn render_classes(&self, classes: &[SchoolClass]) -> String {
        let mut table = self.table(&["ID", "Name", "Stream", "Level", "Teacher", "Students"]);
        for class in classes {
            table.add_row(vec![
                self.id_cell(class.id),
                Cell::new(&class.name),
                Cell::new(optional(&class.stream)),
                Cell::new(optional(&class.level)),
                Cell::new(optional(&class.teacher_name)),
                Cell::new(class.student_count),
            ]);
        }
        table.to_string()
    }

    pub fn render_courses(&self, courses: &[Course]) -> String {
        let mut table = self.table(&["ID", "Code", "Name", "Teacher"]);
        for course in courses {
            table.add_row(vec![
                self.id_cell(course.id),
                Cell::new(optional(&course.code)),
                Cell::new(&course.name),
                Cell::new(optional(&course.teacher_name)),
            ]);
        }
        table.to_string()
    }

    pub fn render_subjects(&self, subjects: &[CambridgeSubject]) -> String {
        let mut table = self.table(&["ID", "Code", "Name", "Level"]);
        for subject in subjects {
            table.add_row(vec![
                self.id_cell(subject.id),
                Cell::new(&subject.code),
                Cell::new(&subject.name),
                Cell::new(optional(&subject.level)),
            ]);
        }
        table.to_string()
    }

    pub fn render_attendance(&self, records: &[AttendanceRecord]) -> String {
        if records.is_empty() {
            return "No attendance records found".to_string();
        }
        let mut table = self.table(&["Date", "Student", "Status", "Source", "Remarks"]);
        for record in records {
            table.add_row(vec![
                Cell::new(record.date),
                Cell::new(
                    record
                        .student_name
                        .clone()
                        .unwrap_or_else(|| record.student_id.to_string()),
                ),
                self.status_cell(record.status.as_str()),
                Cell::new(record.source.as_str()),
                Cell::new(optional(&record.remarks)),
            ]);
        }
        table.to_string()
    }

    pub fn render_attendance_summary(&self, summary: &AttendanceSummary) -> String {
        self.key_value(&[
            ("Student", summary.student_id.to_string()),
            ("Days", summary.total_days.to_string()),
            ("Present", summary.present.to_string()),
            ("Absent", summary.absent.to_string()),
            ("Late", summary.late.to_string()),
            ("Excused", summary.excused.to_string()),
            ("Attendance rate", format!("{:.1}%", summary.attendance_rate)),
        ])
    }

    /// Totals, then the transaction table or the empty-statement notice
    pub fn render_statement(&self, statement: &FeeStatement) -> String {
        let header = self.key_value(&[
            (
                "Student",
                statement
                    .student_name
                    .clone()
                    .unwrap_or_else(|| statement.student_id.to_string()),
            ),
            ("Admission No.", optional(&statement.admission_number)),
            ("Total fees", money(statement.total_fees)),
            ("Total paid", money(statement.total_paid)),
            ("Balance", money(statement.balance)),
        ]);

        if !statement.has_transactions() {
            return format!("{header}\n{NO_TRANSACTIONS_MESSAGE}");
        }

        let mut table = self.table(&["Date", "Description", "Type", "Amount", "Balance", "Reference"]);
        for transaction in &statement.transactions {
            table.add_row(vec![
                Cell::new(transaction.date),
                Cell::new(&transaction.description),
                Cell::new(transaction.kind.as_str()),
                Cell::new(money(transaction.amount)),
                Cell::new(transaction.balance.map(money).unwrap_or_else(|| NOT_AVAILABLE.to_string())),
                Cell::new(optional(&transaction.reference)),
            ]);
        }
        format!("{header}\n{table}")
    }

    pub fn render_payments(&self, payments: &[Payment]) -> String {
        if payments.is_empty() {
            return "No payments found".to_string();
        }
        let mut table = self.table(&["ID", "Student", "Amount", "Method", "Status", "Date", "Reference"]);
        for payment in payments {
            table.add_row(vec![
                self.id_cell(payment.id),
                Cell::new(
                    payment
                        .student_name
                        .clone()
                        .unwrap_or_else(|| payment.student_id.to_string()),
                ),
                Cell::new(money(payment.amount)),
                Cell::new(payment.payment_method.as_str()),
                self.status_cell(payment.status.as_str()),
                Cell::new(optional(&payment.payment_date)),
                Cell::new(optional(&payment.reference_number)),
            ]);
        }
        table.to_string()
    }

    pub fn render_payment(&self, payment: &Payment) -> String {
        self.key_value(&[
            ("ID", payment.id.to_string()),
            ("Student", payment.student_id.to_string()),
            ("Amount", money(payment.amount)),
            ("Method", payment.payment_method.to_string()),
            ("Status", payment.status.to_string()),
            ("Reference", optional(&payment.reference_number)),
            ("Date", optional(&payment.payment_date)),
            ("Bank slip", optional(&payment.bank_slip_url)),
            ("Verified at", optional(&payment.verified_at)),
            ("Notes", optional(&payment.notes)),
        ])
    }

    pub fn render_receipt(&self, receipt: &Receipt) -> String {
        self.key_value(&[
            ("Receipt No.", receipt.receipt_number.clone()),
            ("Payment", receipt.payment_id.to_string()),
            ("Student", optional(&receipt.student_name)),
            ("Amount", money(receipt.amount)),
            ("Issued", optional(&receipt.issued_at)),
        ])
    }

    pub fn render_dashboard(&self, dashboard: &FinanceDashboard) -> String {
        let summary = &dashboard.summary;
        let mut out = self.key_value(&[
            ("Expected", money(summary.total_expected)),
            ("Collected", money(summary.total_collected)),
            ("Outstanding", money(summary.total_outstanding)),
            ("Collection rate", format!("{:.1}%", summary.collection_rate)),
            ("Pending verifications", summary.pending_verifications.to_string()),
        ]);

        if !dashboard.collections_by_method.is_empty() {
            let mut table = self.table(&["Method", "Payments", "Total"]);
            for total in &dashboard.collections_by_method {
                table.add_row(vec![
                    Cell::new(total.method.as_str()),
                    Cell::new(total.count),
                    Cell::new(money(total.total)),
                ]);
            }
            out = format!("{out}\n{table}");
        }

        if !dashboard.recent_payments.is_empty() {
            out = format!(
                "{out}\nRecent payments\n{}",
                self.render_payments(&dashboard.recent_payments)
            );
        }
        out
    }

    pub fn render_collections(&self, report: &CollectionReport) -> String {
        let mut table = self.table(&["Date", "Payments", "Amount"]);
        for entry in &report.entries {
            table.add_row(vec![
                Cell::new(entry.date),
                Cell::new(entry.count),
                Cell::new(money(entry.amount)),
            ]);
        }
        format!(
            "{table}\nTotal collected: {} from {} payments",
            money(report.total_collected),
            report.payment_count
        )
    }

    pub fn render_outstanding(&self, balances: &[OutstandingBalance]) -> String {
        if balances.is_empty() {
            return "No outstanding balances".to_string();
        }
        let mut table = self.table(&["Student", "Name", "Class", "Balance", "Last payment"]);
        for balance in balances {
            table.add_row(vec![
                self.id_cell(balance.student_id),
                Cell::new(&balance.student_name),
                Cell::new(optional(&balance.class_name)),
                Cell::new(money(balance.balance)),
                Cell::new(optional(&balance.last_payment_date)),
            ]);
        }
        table.to_string()
    }

    pub fn render_fee_structures(&self, structures: &[FeeStructure]) -> String {
        if structures.is_empty() {
            return "No fee structures found".to_string();
        }
        let mut table = self.table(&["ID", "Name", "Amount", "Class", "Term", "Year", "Due", "Active"]);
        for structure in structures {
            table.add_row(vec![
                self.id_cell(structure.id),
                Cell::new(&structure.name),
                Cell::new(money(structure.amount)),
                Cell::new(optional(&structure.class_id)),
                Cell::new(optional(&structure.term)),
                Cell::new(optional(&structure.academic_year)),
                Cell::new(optional(&structure.due_date)),
                Cell::new(if structure.is_active { "yes" } else { "no" }),
            ]);
        }
        table.to_string()
    }

    pub fn render_fee_structure(&self, structure: &FeeStructure) -> String {
        self.key_value(&[
            ("ID", structure.id.to_string()),
            ("Name", structure.name.clone()),
            ("Amount", money(structure.amount)),
            ("Class", optional(&structure.class_id)),
            ("Term", optional(&structure.term)),
            ("Academic year", optional(&structure.academic_year)),
            ("Due", optional(&structure.due_date)),
            ("Description", optional(&structure.description)),
            ("Active", structure.is_active.to_string()),
        ])
    }

    fn status_cell(&self, status: &str) -> Cell {
        let cell = Cell::new(status);
        if !self.use_colors {
            return cell;
        }
        match status {
            "present" | "verified" => cell.fg(Color::Green),
            "absent" | "rejected" => cell.fg(Color::Red),
            "late" | "pending" => cell.fg(Color::Yellow),
            _ => cell,
        }
    }
}

fn optional<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_core::core::domain::{PaymentMethod, PaymentStatus, StudentStatus};

    fn statement(transactions: Vec<school_core::core::domain::Transaction>) -> FeeStatement {
        FeeStatement {
            student_id: 4,
            student_name: Some("Amina Okello".to_string()),
            admission_number: None,
            total_fees: 0.0,
            total_paid: 0.0,
            balance: 0.0,
            transactions,
        }
    }

    #[test]
    fn test_empty_statement_shows_notice() {
        let output = TableDisplay::new()
            .with_colors(false)
            .render_statement(&statement(Vec::new()));
        assert!(output.contains("Amina Okello"));
        assert!(output.ends_with(NO_TRANSACTIONS_MESSAGE));
    }

    #[test]
    fn test_statement_with_transactions_has_table() {
        let transaction = school_core::core::domain::Transaction {
            id: 1,
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            description: "Term 1 fees".to_string(),
            kind: school_core::core::domain::TransactionKind::Charge,
            amount: 15000.0,
            balance: None,
            reference: None,
        };
        let output = TableDisplay::new()
            .with_colors(false)
            .render_statement(&statement(vec![transaction]));
        assert!(output.contains("Term 1 fees"));
        assert!(output.contains("15000.00"));
        assert!(!output.contains(NO_TRANSACTIONS_MESSAGE));
    }

    #[test]
    fn test_render_payments() {
        let payment = Payment {
            id: 88,
            student_id: 7,
            student_name: None,
            amount: 2500.5,
            payment_method: PaymentMethod::MobileMoney,
            status: PaymentStatus::Pending,
            reference_number: Some("MM-1".to_string()),
            payment_date: None,
            bank_slip_url: None,
            verified_by: None,
            verified_at: None,
            notes: None,
        };
        let output = TableDisplay::new().with_colors(false).render_payments(&[payment]);
        assert!(output.contains("mobile_money"));
        assert!(output.contains("2500.50"));
        assert!(output.contains("MM-1"));

        assert_eq!(TableDisplay::new().render_payments(&[]), "No payments found");
    }

    #[test]
    fn test_render_students_falls_back_to_class_id() {
        let student = Student {
            id: 1,
            admission_number: "ADM-001".to_string(),
            first_name: "Baraka".to_string(),
            last_name: "Mwangi".to_string(),
            date_of_birth: None,
            gender: None,
            class_id: Some(3),
            class_name: None,
            guardian_name: None,
            guardian_phone: None,
            guardian_email: None,
            status: StudentStatus::Active,
            photo_url: None,
        };
        let output = TableDisplay::new().with_colors(false).render_students(&[student]);
        assert!(output.contains("Baraka Mwangi"));
        assert!(output.contains("ADM-001"));
    }
}
