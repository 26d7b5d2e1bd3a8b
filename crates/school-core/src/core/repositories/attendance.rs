use super::{require, run};
use crate::api::client::ApiClient;
use crate::api::models::{
    AttendanceEntry, AttendanceMark, AttendanceQuery, AttendanceRecordDto, AttendanceSummaryDto,
    BulkAttendanceRequest, BulkAttendanceResultDto, CambridgeAttendanceRequest,
    CheckInResponseDto, CourseAttendanceRequest, DateRange, QrCheckInRequest,
};
use crate::core::domain::{AttendanceRecord, AttendanceSummary, BulkAttendanceResult, CheckInResult};
use crate::core::result::NetworkResult;
use crate::error::{ApiError, ValidationError};
use reqwest::Method;
use serde::Serialize;

const ATTENDANCE_ENDPOINT: &str = "/attendance";
const BULK_ENDPOINT: &str = "/attendance/bulk";
const COURSE_ENDPOINT: &str = "/attendance/course";
const CAMBRIDGE_ENDPOINT: &str = "/attendance/cambridge";
const QR_CHECK_IN_ENDPOINT: &str = "/attendance/qr-check-in";

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    client: ApiClient,
}

impl AttendanceRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Mark one student
    pub async fn record_attendance(&self, entry: AttendanceEntry) -> NetworkResult<AttendanceRecord> {
        run("record_attendance", self.try_record_attendance(entry)).await
    }

    /// Daily register for a whole class
    pub async fn record_bulk_attendance(
        &self,
        request: BulkAttendanceRequest,
    ) -> NetworkResult<BulkAttendanceResult> {
        run(
            "record_bulk_attendance",
            self.try_submit_register(BULK_ENDPOINT, &request.records, &request),
        )
        .await
    }

    pub async fn record_course_attendance(
        &self,
        request: CourseAttendanceRequest,
    ) -> NetworkResult<BulkAttendanceResult> {
        run(
            "record_course_attendance",
            self.try_submit_register(COURSE_ENDPOINT, &request.records, &request),
        )
        .await
    }

    pub async fn record_cambridge_attendance(
        &self,
        request: CambridgeAttendanceRequest,
    ) -> NetworkResult<BulkAttendanceResult> {
        run(
            "record_cambridge_attendance",
            self.try_submit_register(CAMBRIDGE_ENDPOINT, &request.records, &request),
        )
        .await
    }

    /// Check in the student identified by a scanned QR token
    pub async fn qr_check_in(&self, qr_token: &str) -> NetworkResult<CheckInResult> {
        run("qr_check_in", self.try_qr_check_in(qr_token)).await
    }

    pub async fn attendance(&self, query: AttendanceQuery) -> NetworkResult<Vec<AttendanceRecord>> {
        run("attendance", self.try_attendance(query)).await
    }

    pub async fn attendance_summary(
        &self,
        student_id: i64,
        range: DateRange,
    ) -> NetworkResult<AttendanceSummary> {
        run("attendance_summary", self.try_attendance_summary(student_id, range)).await
    }

    async fn try_record_attendance(&self, entry: AttendanceEntry) -> Result<AttendanceRecord, ApiError> {
        let request = self
            .client
            .build_request(Method::POST, ATTENDANCE_ENDPOINT)
            .json(&entry);
        let dto: Option<AttendanceRecordDto> =
            self.client.fetch(request, ATTENDANCE_ENDPOINT).await?;
        Ok(AttendanceRecord::from(require(
            dto,
            ATTENDANCE_ENDPOINT,
            "No attendance data received",
        )?))
    }

    async fn try_submit_register<B>(
        &self,
        endpoint: &str,
        records: &[AttendanceMark],
        body: &B,
    ) -> Result<BulkAttendanceResult, ApiError>
    where
        B: Serialize + ?Sized,
    {
        if records.is_empty() {
            return Err(ValidationError::new("records", "No attendance records to submit").into());
        }

        let request = self.client.build_request(Method::POST, endpoint).json(body);
        let dto: Option<BulkAttendanceResultDto> = self.client.fetch(request, endpoint).await?;
        let result = BulkAttendanceResult::from(require(dto, endpoint, "No attendance data received")?);
        log::info!(
            "Attendance saved via {endpoint}: {} created, {} updated",
            result.created,
            result.updated
        );
        Ok(result)
    }

    async fn try_qr_check_in(&self, qr_token: &str) -> Result<CheckInResult, ApiError> {
        let qr_token = qr_token.trim();
        if qr_token.is_empty() {
            return Err(ValidationError::new("qr_token", "QR code is empty").into());
        }

        let request = self
            .client
            .build_request(Method::POST, QR_CHECK_IN_ENDPOINT)
            .json(&QrCheckInRequest {
                qr_token: qr_token.to_string(),
            });
        let dto: Option<CheckInResponseDto> =
            self.client.fetch(request, QR_CHECK_IN_ENDPOINT).await?;
        Ok(CheckInResult::from(require(
            dto,
            QR_CHECK_IN_ENDPOINT,
            "No check-in data received",
        )?))
    }

    async fn try_attendance(&self, query: AttendanceQuery) -> Result<Vec<AttendanceRecord>, ApiError> {
        let request = self
            .client
            .build_request(Method::GET, ATTENDANCE_ENDPOINT)
            .query(&query);
        let dtos: Option<Vec<AttendanceRecordDto>> =
            self.client.fetch(request, ATTENDANCE_ENDPOINT).await?;
        let dtos = require(dtos, ATTENDANCE_ENDPOINT, "No attendance data received")?;
        Ok(dtos.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn try_attendance_summary(
        &self,
        student_id: i64,
        range: DateRange,
    ) -> Result<AttendanceSummary, ApiError> {
        let endpoint = format!("{ATTENDANCE_ENDPOINT}/students/{student_id}/summary");
        let request = self.client.build_request(Method::GET, &endpoint).query(&range);
        let dto: Option<AttendanceSummaryDto> = self.client.fetch(request, &endpoint).await?;
        Ok(AttendanceSummary::from(require(
            dto,
            &endpoint,
            "No attendance summary received",
        )?))
    }
}
