use std::sync::Arc;

use super::endpoints;
use super::{http_status_with_reason, settle, Endpoint, MAPPING_FAILURE};
use crate::dto::{accept_all, CreateProductorRequest, Lenient, ProductorDto};
use crate::mapper::{to_productor, to_productor_list};
use crate::models::{ApiResult, Productor};
use crate::services::ApiClient;

const LIST: Endpoint = Endpoint {
    name: "productores.list",
    failure: "No se pudieron obtener los productores",
    backend_message: true,
    mapping_failure: MAPPING_FAILURE,
    network_prefix: "Error de red",
    status_message: http_status_with_reason,
};

const GET: Endpoint = Endpoint {
    name: "productores.get",
    failure: "Productor no encontrado",
    ..LIST
};

const CREATE: Endpoint = Endpoint {
    name: "productores.create",
    failure: "No se pudo crear el productor",
    ..LIST
};

/// 生产者仓库
pub struct ProductorRepository {
    api: Arc<ApiClient>,
}

impl ProductorRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_productores(&self) -> ApiResult<Vec<Productor>> {
        let outcome = self
            .api
            .get::<Vec<Lenient<ProductorDto>>>(endpoints::PRODUCTORES)
            .await;
        settle(&LIST, outcome, |items| {
            Ok(to_productor_list(accept_all(items, "productor")))
        })
    }

    pub async fn get_productor(&self, id: &str) -> ApiResult<Productor> {
        let outcome = self
            .api
            .get::<ProductorDto>(&endpoints::productor(id))
            .await;
        settle(&GET, outcome, to_productor)
    }

    pub async fn create_productor(&self, request: CreateProductorRequest) -> ApiResult<Productor> {
        let outcome = self
            .api
            .post::<_, ProductorDto>(endpoints::PRODUCTORES, &request)
            .await;
        settle(&CREATE, outcome, to_productor)
    }
}
