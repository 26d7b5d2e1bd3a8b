use crate::api::models::{
    AttendanceRecordDto, AttendanceSummaryDto, BulkAttendanceResultDto, CheckInResponseDto,
};
use chrono::{DateTime, NaiveDate, Utc};

crate::wire_enum! {
    pub enum AttendanceStatus {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

crate::wire_enum! {
    /// How an attendance mark was captured
    pub enum AttendanceSource {
        Manual => "manual",
        Qr => "qr",
        Bulk => "bulk",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub class_id: Option<i64>,
    pub course_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub remarks: Option<String>,
    pub recorded_by: Option<i64>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub source: AttendanceSource,
}

impl From<AttendanceRecordDto> for AttendanceRecord {
    fn from(dto: AttendanceRecordDto) -> Self {
        Self {
            id: dto.id,
            student_id: dto.student_id,
            student_name: dto.student_name,
            date: dto.date,
            status: AttendanceStatus::from_wire(&dto.status),
            class_id: dto.class_id,
            course_id: dto.course_id,
            subject_id: dto.subject_id,
            remarks: dto.remarks,
            recorded_by: dto.recorded_by,
            check_in_time: dto.check_in_time,
            source: AttendanceSource::from_wire(dto.source.as_deref().unwrap_or("manual")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkAttendanceResult {
    pub created: u32,
    pub updated: u32,
    pub records: Vec<AttendanceRecord>,
}

impl From<BulkAttendanceResultDto> for BulkAttendanceResult {
    fn from(dto: BulkAttendanceResultDto) -> Self {
        Self {
            created: dto.created,
            updated: dto.updated,
            records: dto.records.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckInResult {
    pub student_id: i64,
    pub student_name: Option<String>,
    pub status: AttendanceStatus,
    pub check_in_time: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

impl From<CheckInResponseDto> for CheckInResult {
    fn from(dto: CheckInResponseDto) -> Self {
        Self {
            student_id: dto.student_id,
            student_name: dto.student_name,
            status: AttendanceStatus::from_wire(&dto.status),
            check_in_time: dto.check_in_time,
            message: dto.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub student_id: i64,
    pub total_days: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub excused: u32,
    pub attendance_rate: f64,
}

impl From<AttendanceSummaryDto> for AttendanceSummary {
    fn from(dto: AttendanceSummaryDto) -> Self {
        Self {
            student_id: dto.student_id,
            total_days: dto.total_days,
            present: dto.present,
            absent: dto.absent,
            late: dto.late,
            excused: dto.excused,
            attendance_rate: dto.attendance_rate,
        }
    }
}
