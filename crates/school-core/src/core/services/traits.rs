use crate::core::result::NetworkResult;
use async_trait::async_trait;

/// Trait for services that can list resources
#[async_trait]
pub trait ListService<T> {
    /// Filter accepted by [`ListService::list`]
    type Query: Send + 'static;

    async fn list(&self, query: Self::Query) -> NetworkResult<Vec<T>>;
}

/// Trait for services that can retrieve individual resources
#[async_trait]
pub trait GetService<T> {
    async fn get(&self, id: i64) -> NetworkResult<T>;
}

/// Trait for services that can create resources
#[async_trait]
pub trait CreateService<T, CreateInput> {
    async fn create(&self, input: CreateInput) -> NetworkResult<T>;
}

/// Trait for services that can update resources
#[async_trait]
pub trait UpdateService<T, UpdateInput> {
    async fn update(&self, id: i64, input: UpdateInput) -> NetworkResult<T>;
}

/// Trait for services that can delete resources
#[async_trait]
pub trait DeleteService {
    async fn delete(&self, id: i64) -> NetworkResult<()>;
}

/// Combined CRUD trait for full resource management
pub trait CrudService<T, CreateInput, UpdateInput>:
    ListService<T> + GetService<T> + CreateService<T, CreateInput> + UpdateService<T, UpdateInput> + DeleteService
{
}

impl<S, T, CreateInput, UpdateInput> CrudService<T, CreateInput, UpdateInput> for S where
    S: ListService<T>
        + GetService<T>
        + CreateService<T, CreateInput>
        + UpdateService<T, UpdateInput>
        + DeleteService
{
}

/// Implement the CRUD traits by delegating to a repository's inherent
/// methods.
#[macro_export]
macro_rules! impl_crud_service {
    (
        $repo:ty, $item:ty,
        query: $query:ty => $list:ident,
        get => $get:ident,
        create: $create_input:ty => $create:ident,
        update: $update_input:ty => $update:ident,
        delete => $delete:ident $(,)?
    ) => {
        #[async_trait::async_trait]
        impl $crate::core::services::ListService<$item> for $repo {
            type Query = $query;

            async fn list(&self, query: $query) -> $crate::core::result::NetworkResult<Vec<$item>> {
                self.$list(query).await
            }
        }

        #[async_trait::async_trait]
        impl $crate::core::services::GetService<$item> for $repo {
            async fn get(&self, id: i64) -> $crate::core::result::NetworkResult<$item> {
                self.$get(id).await
            }
        }

        #[async_trait::async_trait]
        impl $crate::core::services::CreateService<$item, $create_input> for $repo {
            async fn create(
                &self,
                input: $create_input,
            ) -> $crate::core::result::NetworkResult<$item> {
                self.$create(input).await
            }
        }

        #[async_trait::async_trait]
        impl $crate::core::services::UpdateService<$item, $update_input> for $repo {
            async fn update(
                &self,
                id: i64,
                input: $update_input,
            ) -> $crate::core::result::NetworkResult<$item> {
                self.$update(id, input).await
            }
        }

        #[async_trait::async_trait]
        impl $crate::core::services::DeleteService for $repo {
            async fn delete(&self, id: i64) -> $crate::core::result::NetworkResult<()> {
                self.$delete(id).await
            }
        }
    };
}
