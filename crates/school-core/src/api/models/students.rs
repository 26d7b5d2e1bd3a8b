use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct StudentDto {
    pub id: i64,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub guardian_name: Option<String>,
    #[serde(default)]
    pub guardian_phone: Option<String>,
    #[serde(default)]
    pub guardian_email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Body for `POST /students`
#[derive(Debug, Clone, Serialize, Default)]
pub struct NewStudent {
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_email: Option<String>,
}

/// Partial update for `PUT /students/{id}`; only set fields are sent
#[derive(Debug, Clone, Serialize, Default)]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Query string for `GET /students`
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct StudentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub stream: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_u32")]
    pub student_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub teacher_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CambridgeSubjectDto {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub level: Option<String>,
}
