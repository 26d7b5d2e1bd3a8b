use super::{require, run};
use crate::api::client::ApiClient;
use crate::api::models::{CambridgeSubjectDto, ClassDto, CourseDto, StudentDto};
use crate::core::domain::{CambridgeSubject, Course, SchoolClass, Student};
use crate::core::result::NetworkResult;
use crate::error::ApiError;
use reqwest::Method;
use serde::de::DeserializeOwned;

const CLASSES_ENDPOINT: &str = "/classes";
const COURSES_ENDPOINT: &str = "/courses";
const CAMBRIDGE_SUBJECTS_ENDPOINT: &str = "/cambridge/subjects";

/// Read-only lookups used to pick what attendance is taken for
#[derive(Debug, Clone)]
pub struct ClassRepository {
    client: ApiClient,
}

impl ClassRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_classes(&self) -> NetworkResult<Vec<SchoolClass>> {
        run(
            "list_classes",
            self.fetch_list::<ClassDto, _>(CLASSES_ENDPOINT, &[], "No classes data received"),
        )
        .await
    }

    /// Roster of one class
    pub async fn class_students(&self, class_id: i64) -> NetworkResult<Vec<Student>> {
        let endpoint = format!("{CLASSES_ENDPOINT}/{class_id}/students");
        run(
            "class_students",
            self.fetch_list::<StudentDto, _>(&endpoint, &[], "No students data received"),
        )
        .await
    }

    pub async fn list_courses(&self, class_id: Option<i64>) -> NetworkResult<Vec<Course>> {
        let filter: Vec<(&str, String)> = class_id
            .map(|id| vec![("class_id", id.to_string())])
            .unwrap_or_default();
        run(
            "list_courses",
            self.fetch_list::<CourseDto, _>(COURSES_ENDPOINT, &filter, "No courses data received"),
        )
        .await
    }

    pub async fn list_cambridge_subjects(&self) -> NetworkResult<Vec<CambridgeSubject>> {
        run(
            "list_cambridge_subjects",
            self.fetch_list::<CambridgeSubjectDto, _>(
                CAMBRIDGE_SUBJECTS_ENDPOINT,
                &[],
                "No subjects data received",
            ),
        )
        .await
    }

    async fn fetch_list<D, T>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        empty_message: &str,
    ) -> Result<Vec<T>, ApiError>
    where
        D: DeserializeOwned,
        T: From<D>,
    {
        let request = self.client.build_request(Method::GET, endpoint).query(query);
        let dtos: Option<Vec<D>> = self.client.fetch(request, endpoint).await?;
        let dtos = require(dtos, endpoint, empty_message)?;
        Ok(dtos.into_iter().map(T::from).collect())
    }
}
