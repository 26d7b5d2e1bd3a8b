use super::{require, run};
use crate::api::client::ApiClient;
use crate::api::models::{NewStudent, StudentDto, StudentQuery, StudentUpdate};
use crate::core::domain::Student;
use crate::core::result::NetworkResult;
use crate::error::ApiError;
use crate::utils::validation::validate_required;
use reqwest::Method;

const STUDENTS_ENDPOINT: &str = "/students";

#[derive(Debug, Clone)]
pub struct StudentRepository {
    client: ApiClient,
}

crate::impl_crud_service!(
    StudentRepository, Student,
    query: StudentQuery => list_students,
    get => get_student,
    create: NewStudent => create_student,
    update: StudentUpdate => update_student,
    delete => delete_student,
);

impl StudentRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_students(&self, query: StudentQuery) -> NetworkResult<Vec<Student>> {
        run("list_students", self.try_list_students(query)).await
    }

    pub async fn get_student(&self, id: i64) -> NetworkResult<Student> {
        run("get_student", self.try_get_student(id)).await
    }

    pub async fn create_student(&self, student: NewStudent) -> NetworkResult<Student> {
        run("create_student", self.try_create_student(student)).await
    }

    pub async fn update_student(&self, id: i64, update: StudentUpdate) -> NetworkResult<Student> {
        run("update_student", self.try_update_student(id, update)).await
    }

    /// Succeeds on any 2xx, with or without a body.
    pub async fn delete_student(&self, id: i64) -> NetworkResult<()> {
        run("delete_student", self.try_delete_student(id)).await
    }

    async fn try_list_students(&self, query: StudentQuery) -> Result<Vec<Student>, ApiError> {
        let request = self
            .client
            .build_request(Method::GET, STUDENTS_ENDPOINT)
            .query(&query);
        let dtos: Option<Vec<StudentDto>> = self.client.fetch(request, STUDENTS_ENDPOINT).await?;
        let dtos = require(dtos, STUDENTS_ENDPOINT, "No students data received")?;
        Ok(dtos.into_iter().map(Student::from).collect())
    }

    async fn try_get_student(&self, id: i64) -> Result<Student, ApiError> {
        let endpoint = student_endpoint(id);
        let request = self.client.build_request(Method::GET, &endpoint);
        let dto: Option<StudentDto> = self.client.fetch(request, &endpoint).await?;
        Ok(Student::from(require(dto, &endpoint, "No student data received")?))
    }

    async fn try_create_student(&self, student: NewStudent) -> Result<Student, ApiError> {
        validate_required("admission_number", &student.admission_number)?;
        validate_required("first_name", &student.first_name)?;
        validate_required("last_name", &student.last_name)?;

        let request = self
            .client
            .build_request(Method::POST, STUDENTS_ENDPOINT)
            .json(&student);
        let dto: Option<StudentDto> = self.client.fetch(request, STUDENTS_ENDPOINT).await?;
        let created = Student::from(require(dto, STUDENTS_ENDPOINT, "No student data received")?);
        log::info!("Created student {} ({})", created.id, created.admission_number);
        Ok(created)
    }

    async fn try_update_student(&self, id: i64, update: StudentUpdate) -> Result<Student, ApiError> {
        let endpoint = student_endpoint(id);
        let request = self.client.build_request(Method::PUT, &endpoint).json(&update);
        let dto: Option<StudentDto> = self.client.fetch(request, &endpoint).await?;
        Ok(Student::from(require(dto, &endpoint, "No student data received")?))
    }

    async fn try_delete_student(&self, id: i64) -> Result<(), ApiError> {
        let endpoint = student_endpoint(id);
        let request = self.client.build_request(Method::DELETE, &endpoint);
        self.client.send(request, &endpoint).await?;
        log::info!("Deleted student {id}");
        Ok(())
    }
}

fn student_endpoint(id: i64) -> String {
    format!("{STUDENTS_ENDPOINT}/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::StudentStatus;
    use crate::core::repositories::test_support::signed_in_client;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn student_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "admission_number": format!("ADM-{id:03}"),
            "first_name": "Amina",
            "last_name": "Okello",
            "class_id": 3,
            "class_name": "Grade 5 East",
            "status": "Active"
        })
    }

    #[tokio::test]
    async fn test_list_students_passes_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/students"))
            .and(query_param("class_id", "3"))
            .and(query_param("search", "amina"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([student_json(1), student_json(2)])),
            )
            .mount(&server)
            .await;

        let repo = StudentRepository::new(signed_in_client(&server));
        let students = repo
            .list_students(StudentQuery {
                class_id: Some(3),
                search: Some("amina".to_string()),
                ..Default::default()
            })
            .await
            .into_std()
            .unwrap();

        assert_eq!(students.len(), 2);
        assert_eq!(students[0].full_name(), "Amina Okello");
        assert_eq!(students[1].status, StudentStatus::Active);
    }

    #[tokio::test]
    async fn test_get_student_not_found_uses_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/students/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Student not found"})),
            )
            .mount(&server)
            .await;

        let result = StudentRepository::new(signed_in_client(&server))
            .get_student(99)
            .await;
        assert_eq!(result.error_message(), Some("Student not found"));
    }

    #[tokio::test]
    async fn test_get_student_null_body_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/students/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let result = StudentRepository::new(signed_in_client(&server))
            .get_student(5)
            .await;
        assert_eq!(result.error_message(), Some("No student data received"));
    }

    #[tokio::test]
    async fn test_create_and_update_student() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/students"))
            .and(body_json(json!({
                "admission_number": "ADM-007",
                "first_name": "Amina",
                "last_name": "Okello",
                "class_id": 3
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(student_json(7)))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/students/7"))
            .and(body_json(json!({"status": "graduated"})))
            .respond_with(ResponseTemplate::new(200).set_body_json({
                let mut body = student_json(7);
                body["status"] = json!("graduated");
                body
            }))
            .mount(&server)
            .await;

        let repo = StudentRepository::new(signed_in_client(&server));
        let created = repo
            .create_student(NewStudent {
                admission_number: "ADM-007".to_string(),
                first_name: "Amina".to_string(),
                last_name: "Okello".to_string(),
                class_id: Some(3),
                ..Default::default()
            })
            .await
            .into_std()
            .unwrap();
        assert_eq!(created.id, 7);

        let updated = repo
            .update_student(
                7,
                StudentUpdate {
                    status: Some("graduated".to_string()),
                    ..Default::default()
                },
            )
            .await
            .into_std()
            .unwrap();
        assert_eq!(updated.status, StudentStatus::Graduated);
    }

    #[tokio::test]
    async fn test_delete_student_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/students/7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = StudentRepository::new(signed_in_client(&server))
            .delete_student(7)
            .await;
        assert_eq!(result, NetworkResult::Success(()));
    }
}
