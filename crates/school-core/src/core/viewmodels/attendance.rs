use crate::api::models::{
    AttendanceEntry, AttendanceQuery, BulkAttendanceRequest, CambridgeAttendanceRequest,
    CourseAttendanceRequest, DateRange,
};
use crate::core::domain::{
    AttendanceRecord, AttendanceSummary, BulkAttendanceResult, CambridgeSubject, CheckInResult,
    Course, SchoolClass, Student,
};
use crate::core::repositories::{AttendanceRepository, ClassRepository};
use crate::core::state::{LoadState, StateHolder};

/// Attendance capture: class register, course and Cambridge-subject
/// registers, single marks, QR check-in and per-student summaries.
#[derive(Debug)]
pub struct AttendanceViewModel {
    attendance: AttendanceRepository,
    classes: ClassRepository,
    class_list: StateHolder<Vec<SchoolClass>>,
    roster: StateHolder<Vec<Student>>,
    courses: StateHolder<Vec<Course>>,
    subjects: StateHolder<Vec<CambridgeSubject>>,
    records: StateHolder<Vec<AttendanceRecord>>,
    mark: StateHolder<AttendanceRecord>,
    submission: StateHolder<BulkAttendanceResult>,
    check_in: StateHolder<CheckInResult>,
    summary: StateHolder<AttendanceSummary>,
}

impl AttendanceViewModel {
    pub fn new(attendance: AttendanceRepository, classes: ClassRepository) -> Self {
        Self {
            attendance,
            classes,
            class_list: StateHolder::new(),
            roster: StateHolder::new(),
            courses: StateHolder::new(),
            subjects: StateHolder::new(),
            records: StateHolder::new(),
            mark: StateHolder::new(),
            submission: StateHolder::new(),
            check_in: StateHolder::new(),
            summary: StateHolder::new(),
        }
    }

    pub fn class_list(&self) -> &StateHolder<Vec<SchoolClass>> {
        &self.class_list
    }

    pub fn roster(&self) -> &StateHolder<Vec<Student>> {
        &self.roster
    }

    pub fn courses(&self) -> &StateHolder<Vec<Course>> {
        &self.courses
    }

    pub fn subjects(&self) -> &StateHolder<Vec<CambridgeSubject>> {
        &self.subjects
    }

    pub fn records(&self) -> &StateHolder<Vec<AttendanceRecord>> {
        &self.records
    }

    pub fn mark(&self) -> &StateHolder<AttendanceRecord> {
        &self.mark
    }

    /// Result of the last register submission (class, course or subject)
    pub fn submission(&self) -> &StateHolder<BulkAttendanceResult> {
        &self.submission
    }

    pub fn check_in(&self) -> &StateHolder<CheckInResult> {
        &self.check_in
    }

    pub fn summary(&self) -> &StateHolder<AttendanceSummary> {
        &self.summary
    }

    pub async fn load_classes(&self) -> LoadState<Vec<SchoolClass>> {
        self.class_list.run(self.classes.list_classes()).await
    }

    pub async fn load_roster(&self, class_id: i64) -> LoadState<Vec<Student>> {
        self.roster.run(self.classes.class_students(class_id)).await
    }

    pub async fn load_courses(&self, class_id: Option<i64>) -> LoadState<Vec<Course>> {
        self.courses.run(self.classes.list_courses(class_id)).await
    }

    pub async fn load_subjects(&self) -> LoadState<Vec<CambridgeSubject>> {
        self.subjects.run(self.classes.list_cambridge_subjects()).await
    }

    pub async fn load_records(&self, query: AttendanceQuery) -> LoadState<Vec<AttendanceRecord>> {
        self.records.run(self.attendance.attendance(query)).await
    }

    pub async fn mark_student(&self, entry: AttendanceEntry) -> LoadState<AttendanceRecord> {
        self.mark.run(self.attendance.record_attendance(entry)).await
    }

    pub async fn submit_class_register(
        &self,
        request: BulkAttendanceRequest,
    ) -> LoadState<BulkAttendanceResult> {
        self.submission
            .run(self.attendance.record_bulk_attendance(request))
            .await
    }

    pub async fn submit_course_register(
        &self,
        request: CourseAttendanceRequest,
    ) -> LoadState<BulkAttendanceResult> {
        self.submission
            .run(self.attendance.record_course_attendance(request))
            .await
    }

    pub async fn submit_cambridge_register(
        &self,
        request: CambridgeAttendanceRequest,
    ) -> LoadState<BulkAttendanceResult> {
        self.submission
            .run(self.attendance.record_cambridge_attendance(request))
            .await
    }

    pub async fn qr_check_in(&self, qr_token: &str) -> LoadState<CheckInResult> {
        self.check_in.run(self.attendance.qr_check_in(qr_token)).await
    }

    pub async fn load_summary(&self, student_id: i64, range: DateRange) -> LoadState<AttendanceSummary> {
        self.summary
            .run(self.attendance.attendance_summary(student_id, range))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::NETWORK_ERROR_MESSAGE;
    use crate::core::repositories::test_support::signed_in_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn view_model(server: &MockServer) -> AttendanceViewModel {
        let client = signed_in_client(server);
        AttendanceViewModel::new(
            AttendanceRepository::new(client.clone()),
            ClassRepository::new(client),
        )
    }

    #[tokio::test]
    async fn test_roster_then_empty_register() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/classes/3/students"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let view_model = view_model(&server);
        let roster = view_model.load_roster(3).await;
        assert_eq!(roster, LoadState::Loaded(Vec::new()));

        let submitted = view_model
            .submit_class_register(BulkAttendanceRequest {
                class_id: 3,
                date: chrono::NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
                records: Vec::new(),
            })
            .await;
        assert_eq!(submitted.error(), Some("No attendance records to submit"));
        assert!(view_model.submission().state().is_error());
    }

    #[tokio::test]
    async fn test_check_in_publishes_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/attendance/qr-check-in"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "student_id": 1, "status": "present", "message": "Welcome"
            })))
            .mount(&server)
            .await;

        let view_model = view_model(&server);
        let state = view_model.qr_check_in("QR-1").await;
        assert_eq!(state.data().and_then(|r| r.message.clone()), Some("Welcome".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_server_shows_network_message() {
        let client = crate::api::client::ApiClient::new(
            "http://127.0.0.1:1".to_string(),
            crate::storage::session::SessionContext::in_memory(),
        )
        .unwrap();
        let view_model = AttendanceViewModel::new(
            AttendanceRepository::new(client.clone()),
            ClassRepository::new(client),
        );

        let state = view_model.load_classes().await;
        assert_eq!(state.error(), Some(NETWORK_ERROR_MESSAGE));
    }
}
