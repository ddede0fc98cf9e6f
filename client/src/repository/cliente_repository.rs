use std::sync::Arc;

use super::endpoints;
use super::{http_status_with_reason, settle, Endpoint, MAPPING_FAILURE};
use crate::dto::{accept_all, ClienteDto, Lenient};
use crate::mapper::to_cliente_from_dto;
use crate::models::{ApiResult, Cliente};
use crate::services::ApiClient;

const LIST: Endpoint = Endpoint {
    name: "clientes.list",
    failure: "No se pudieron obtener los clientes",
    backend_message: true,
    mapping_failure: MAPPING_FAILURE,
    network_prefix: "Error de red",
    status_message: http_status_with_reason,
};

const GET: Endpoint = Endpoint {
    name: "clientes.get",
    failure: "Cliente no encontrado",
    ..LIST
};

/// 客户仓库
pub struct ClienteRepository {
    api: Arc<ApiClient>,
}

impl ClienteRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_clientes(&self) -> ApiResult<Vec<Cliente>> {
        let outcome = self
            .api
            .get::<Vec<Lenient<ClienteDto>>>(endpoints::CLIENTES)
            .await;
        settle(&LIST, outcome, |items| {
            Ok(accept_all(items, "cliente")
                .into_iter()
                .map(to_cliente_from_dto)
                .collect())
        })
    }

    pub async fn get_cliente(&self, id: &str) -> ApiResult<Cliente> {
        let outcome = self.api.get::<ClienteDto>(&endpoints::cliente(id)).await;
        settle(&GET, outcome, |dto| Ok(to_cliente_from_dto(dto)))
    }
}
