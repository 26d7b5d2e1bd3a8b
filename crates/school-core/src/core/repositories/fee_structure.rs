use super::{require, run};
use crate::api::client::ApiClient;
use crate::api::models::{FeeStructureDto, FeeStructureInput, FeeStructureQuery, FeeStructureUpdate};
use crate::core::domain::FeeStructure;
use crate::core::result::NetworkResult;
use crate::error::ApiError;
use crate::utils::validation::{validate_amount, validate_required};
use reqwest::Method;

const FEE_STRUCTURES_ENDPOINT: &str = "/finance/fee-structures";

#[derive(Debug, Clone)]
pub struct FeeStructureRepository {
    client: ApiClient,
}

crate::impl_crud_service!(
    FeeStructureRepository, FeeStructure,
    query: FeeStructureQuery => list_fee_structures,
    get => get_fee_structure,
    create: FeeStructureInput => create_fee_structure,
    update: FeeStructureUpdate => update_fee_structure,
    delete => delete_fee_structure,
);

impl FeeStructureRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_fee_structures(
        &self,
        query: FeeStructureQuery,
    ) -> NetworkResult<Vec<FeeStructure>> {
        run("list_fee_structures", self.try_list(query)).await
    }

    pub async fn get_fee_structure(&self, id: i64) -> NetworkResult<FeeStructure> {
        run("get_fee_structure", self.try_get(id)).await
    }

    pub async fn create_fee_structure(&self, input: FeeStructureInput) -> NetworkResult<FeeStructure> {
        run("create_fee_structure", self.try_create(input)).await
    }

    pub async fn update_fee_structure(
        &self,
        id: i64,
        update: FeeStructureUpdate,
    ) -> NetworkResult<FeeStructure> {
        run("update_fee_structure", self.try_update(id, update)).await
    }

    pub async fn delete_fee_structure(&self, id: i64) -> NetworkResult<()> {
        run("delete_fee_structure", self.try_delete(id)).await
    }

    async fn try_list(&self, query: FeeStructureQuery) -> Result<Vec<FeeStructure>, ApiError> {
        let request = self
            .client
            .build_request(Method::GET, FEE_STRUCTURES_ENDPOINT)
            .query(&query);
        let dtos: Option<Vec<FeeStructureDto>> =
            self.client.fetch(request, FEE_STRUCTURES_ENDPOINT).await?;
        let dtos = require(dtos, FEE_STRUCTURES_ENDPOINT, "No fee structures received")?;
        Ok(dtos.into_iter().map(FeeStructure::from).collect())
    }

    async fn try_get(&self, id: i64) -> Result<FeeStructure, ApiError> {
        let endpoint = fee_structure_endpoint(id);
        let request = self.client.build_request(Method::GET, &endpoint);
        let dto: Option<FeeStructureDto> = self.client.fetch(request, &endpoint).await?;
        Ok(FeeStructure::from(require(dto, &endpoint, "No fee structure received")?))
    }

    async fn try_create(&self, input: FeeStructureInput) -> Result<FeeStructure, ApiError> {
        validate_required("name", &input.name)?;
        validate_amount(input.amount)?;

        let request = self
            .client
            .build_request(Method::POST, FEE_STRUCTURES_ENDPOINT)
            .json(&input);
        let dto: Option<FeeStructureDto> =
            self.client.fetch(request, FEE_STRUCTURES_ENDPOINT).await?;
        Ok(FeeStructure::from(require(
            dto,
            FEE_STRUCTURES_ENDPOINT,
            "No fee structure received",
        )?))
    }

    async fn try_update(&self, id: i64, update: FeeStructureUpdate) -> Result<FeeStructure, ApiError> {
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
        }

        let endpoint = fee_structure_endpoint(id);
        let request = self.client.build_request(Method::PUT, &endpoint).json(&update);
        let dto: Option<FeeStructureDto> = self.client.fetch(request, &endpoint).await?;
        Ok(FeeStructure::from(require(dto, &endpoint, "No fee structure received")?))
    }

    async fn try_delete(&self, id: i64) -> Result<(), ApiError> {
        let endpoint = fee_structure_endpoint(id);
        let request = self.client.build_request(Method::DELETE, &endpoint);
        self.client.send(request, &endpoint).await?;
        Ok(())
    }
}

fn fee_structure_endpoint(id: i64) -> String {
    format!("{FEE_STRUCTURES_ENDPOINT}/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repositories::test_support::signed_in_client;
    use crate::core::services::{CreateService, DeleteService, ListService};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_through_service_trait() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/fee-structures"))
            .and(query_param("class_id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Term 1 tuition", "amount": "45000", "term": "Term 1", "academic_year": "2024"},
                {"id": 2, "name": "Bus", "amount": 6000, "is_active": false}
            ])))
            .mount(&server)
            .await;

        let repo = FeeStructureRepository::new(signed_in_client(&server));
        let structures = ListService::list(
            &repo,
            FeeStructureQuery {
                class_id: Some(3),
                ..Default::default()
            },
        )
        .await
        .into_std()
        .unwrap();

        assert_eq!(structures.len(), 2);
        assert!((structures[0].amount - 45000.0).abs() < f64::EPSILON);
        assert!(structures[0].is_active);
        assert!(!structures[1].is_active);
    }

    #[tokio::test]
    async fn test_create_validates_amount() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let repo = FeeStructureRepository::new(signed_in_client(&server));
        let result = repo
            .create(FeeStructureInput {
                name: "Lab fee".to_string(),
                amount: 0.0,
                ..Default::default()
            })
            .await;
        assert_eq!(result.error_message(), Some("Amount must be greater than 0"));
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/finance/fee-structures"))
            .and(body_json(json!({"name": "Lab fee", "amount": 2500.0, "class_id": 3})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 9, "name": "Lab fee", "amount": 2500, "class_id": 3
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/finance/fee-structures/9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let repo = FeeStructureRepository::new(signed_in_client(&server));
        let created = repo
            .create(FeeStructureInput {
                name: "Lab fee".to_string(),
                amount: 2500.0,
                class_id: Some(3),
                ..Default::default()
            })
            .await
            .into_std()
            .unwrap();
        assert_eq!(created.id, 9);

        assert!(repo.delete(9).await.is_success());
    }
}
