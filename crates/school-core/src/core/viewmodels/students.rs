use crate::api::models::{NewStudent, StudentQuery, StudentUpdate};
use crate::core::domain::Student;
use crate::core::repositories::StudentRepository;
use crate::core::services::{CrudService, ListService};
use crate::core::state::{LoadState, StateHolder};

/// Student list and detail screens.
///
/// Generic over the service so screens can be driven by any CRUD backend;
/// production code uses [`StudentRepository`].
#[derive(Debug)]
pub struct StudentsViewModel<R = StudentRepository> {
    service: R,
    students: StateHolder<Vec<Student>>,
    selected: StateHolder<Student>,
    deletion: StateHolder<()>,
}

impl<R> StudentsViewModel<R>
where
    R: CrudService<Student, NewStudent, StudentUpdate> + ListService<Student, Query = StudentQuery> + Sync,
{
    pub fn new(service: R) -> Self {
        Self {
            service,
            students: StateHolder::new(),
            selected: StateHolder::new(),
            deletion: StateHolder::new(),
        }
    }

    pub fn students(&self) -> &StateHolder<Vec<Student>> {
        &self.students
    }

    /// Student shown on the detail / edit screen
    pub fn selected(&self) -> &StateHolder<Student> {
        &self.selected
    }

    pub fn deletion(&self) -> &StateHolder<()> {
        &self.deletion
    }

    pub async fn load_students(&self, query: StudentQuery) -> LoadState<Vec<Student>> {
        self.students.run(self.service.list(query)).await
    }

    pub async fn load_student(&self, id: i64) -> LoadState<Student> {
        self.selected.run(self.service.get(id)).await
    }

    pub async fn create_student(&self, student: NewStudent) -> LoadState<Student> {
        self.selected.run(self.service.create(student)).await
    }

    pub async fn update_student(&self, id: i64, update: StudentUpdate) -> LoadState<Student> {
        self.selected.run(self.service.update(id, update)).await
    }

    pub async fn delete_student(&self, id: i64) -> LoadState<()> {
        self.deletion.run(self.service.delete(id)).await
    }
}
