use crate::api::models::{FeeStructureInput, FeeStructureQuery, FeeStructureUpdate};
use crate::core::domain::FeeStructure;
use crate::core::repositories::FeeStructureRepository;
use crate::core::services::{CrudService, ListService};
use crate::core::state::{LoadState, StateHolder};

/// Bursar screen for maintaining fee structures
#[derive(Debug)]
pub struct FeeStructureViewModel<R = FeeStructureRepository> {
    service: R,
    structures: StateHolder<Vec<FeeStructure>>,
    selected: StateHolder<FeeStructure>,
    deletion: StateHolder<()>,
}

impl<R> FeeStructureViewModel<R>
where
    R: CrudService<FeeStructure, FeeStructureInput, FeeStructureUpdate>
        + ListService<FeeStructure, Query = FeeStructureQuery>
        + Sync,
{
    pub fn new(service: R) -> Self {
        Self {
            service,
            structures: StateHolder::new(),
            selected: StateHolder::new(),
            deletion: StateHolder::new(),
        }
    }

    pub fn structures(&self) -> &StateHolder<Vec<FeeStructure>> {
        &self.structures
    }

    pub fn selected(&self) -> &StateHolder<FeeStructure> {
        &self.selected
    }

    pub fn deletion(&self) -> &StateHolder<()> {
        &self.deletion
    }

    pub async fn load_structures(&self, query: FeeStructureQuery) -> LoadState<Vec<FeeStructure>> {
        self.structures.run(self.service.list(query)).await
    }

    pub async fn load_structure(&self, id: i64) -> LoadState<FeeStructure> {
        self.selected.run(self.service.get(id)).await
    }

    pub async fn create_structure(&self, input: FeeStructureInput) -> LoadState<FeeStructure> {
        self.selected.run(self.service.create(input)).await
    }

    pub async fn update_structure(
        &self,
        id: i64,
        update: FeeStructureUpdate,
    ) -> LoadState<FeeStructure> {
        self.selected.run(self.service.update(id, update)).await
    }

    pub async fn delete_structure(&self, id: i64) -> LoadState<()> {
        self.deletion.run(self.service.delete(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repositories::test_support::signed_in_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_active_structures_for_class() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/fee-structures"))
            .and(query_param("class_id", "3"))
            .and(query_param("is_active", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Tuition Term 1", "amount": "150000", "class_id": 3}
            ])))
            .mount(&server)
            .await;

        let view_model =
            FeeStructureViewModel::new(FeeStructureRepository::new(signed_in_client(&server)));
        let state = view_model
            .load_structures(FeeStructureQuery {
                class_id: Some(3),
                is_active: Some(true),
            })
            .await;

        let structures = state.data().expect("structures loaded");
        assert_eq!(structures.len(), 1);
        assert_eq!(structures[0].amount, 150000.0);
        assert!(structures[0].is_active);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let view_model =
            FeeStructureViewModel::new(FeeStructureRepository::new(signed_in_client(&server)));
        let state = view_model
            .create_structure(FeeStructureInput {
                name: "Lab fee".to_string(),
                amount: -5.0,
                ..Default::default()
            })
            .await;

        assert_eq!(state.error(), Some("Amount must be greater than 0"));
        assert_eq!(view_model.selected().state(), state);
    }
}
