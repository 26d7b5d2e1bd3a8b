use crate::api::models::{CambridgeSubjectDto, ClassDto, CourseDto, StudentDto};
use chrono::NaiveDate;

crate::wire_enum! {
    pub enum StudentStatus {
        Active => "active",
        Inactive => "inactive",
        Graduated => "graduated",
        Transferred => "transferred",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: i64,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub status: StudentStatus,
    pub photo_url: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl From<StudentDto> for Student {
    fn from(dto: StudentDto) -> Self {
        Self {
            id: dto.id,
            admission_number: dto.admission_number,
            first_name: dto.first_name,
            last_name: dto.last_name,
            date_of_birth: dto.date_of_birth,
            gender: dto.gender,
            class_id: dto.class_id,
            class_name: dto.class_name,
            guardian_name: dto.guardian_name,
            guardian_phone: dto.guardian_phone,
            guardian_email: dto.guardian_email,
            status: StudentStatus::from_wire(dto.status.as_deref().unwrap_or("active")),
            photo_url: dto.photo_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchoolClass {
    pub id: i64,
    pub name: String,
    pub stream: Option<String>,
    pub level: Option<String>,
    pub teacher_name: Option<String>,
    pub student_count: u32,
}

impl From<ClassDto> for SchoolClass {
    fn from(dto: ClassDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            stream: dto.stream,
            level: dto.level,
            teacher_name: dto.teacher_name,
            student_count: dto.student_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub class_id: Option<i64>,
    pub teacher_name: Option<String>,
}

impl From<CourseDto> for Course {
    fn from(dto: CourseDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            code: dto.code,
            class_id: dto.class_id,
            teacher_name: dto.teacher_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CambridgeSubject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub level: Option<String>,
}

impl From<CambridgeSubjectDto> for CambridgeSubject {
    fn from(dto: CambridgeSubjectDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            code: dto.code,
            level: dto.level,
        }
    }
}
