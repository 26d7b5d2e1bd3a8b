use crate::core::domain::AttendanceStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRecordDto {
    pub id: i64,
    pub student_id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    pub date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub recorded_by: Option<i64>,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Daily attendance for a single student
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// A whole class register for one day
#[derive(Debug, Clone, Serialize)]
pub struct BulkAttendanceRequest {
    pub class_id: i64,
    pub date: NaiveDate,
    pub records: Vec<AttendanceMark>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseAttendanceRequest {
    pub course_id: i64,
    pub date: NaiveDate,
    pub records: Vec<AttendanceMark>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CambridgeAttendanceRequest {
    pub subject_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    pub date: NaiveDate,
    pub records: Vec<AttendanceMark>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QrCheckInRequest {
    pub qr_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkAttendanceResultDto {
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub created: u32,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub updated: u32,
    #[serde(default)]
    pub records: Vec<AttendanceRecordDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInResponseDto {
    pub student_id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    pub status: String,
    #[serde(default)]
    pub check_in_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceSummaryDto {
    pub student_id: i64,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub total_days: u32,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub present: u32,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub absent: u32,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub late: u32,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub excused: u32,
    #[serde(default, deserialize_with = "super::lenient_f64")]
    pub attendance_rate: f64,
}

/// Query string for `GET /attendance`
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct AttendanceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

/// Inclusive date window used by summaries and reports
#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_request_serializes_lowercase_status() {
        let request = BulkAttendanceRequest {
            class_id: 3,
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            records: vec![AttendanceMark {
                student_id: 1,
                status: AttendanceStatus::Present,
                remarks: None,
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "class_id": 3,
                "date": "2024-05-06",
                "records": [{"student_id": 1, "status": "present"}]
            })
        );
    }

    #[test]
    fn test_summary_tolerates_string_numbers() {
        let json = r#"{"student_id": 5, "total_days": "20", "present": 18, "absent": 2, "attendance_rate": "90.0"}"#;
        let summary: AttendanceSummaryDto = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_days, 20);
        assert_eq!(summary.late, 0);
        assert_eq!(summary.attendance_rate, 90.0);
    }
}
