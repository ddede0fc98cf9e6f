use std::sync::Arc;

use super::endpoints;
use super::{http_status_with_reason, settle, Endpoint, MAPPING_FAILURE};
use crate::dto::{accept_all, EntregaDto, Lenient, UpdateEstadoRequest};
use crate::mapper::{to_entrega, to_entrega_list};
use crate::models::{ApiResult, Entrega};
use crate::services::ApiClient;

const LIST: Endpoint = Endpoint {
    name: "entregas.list",
    failure: "No se pudieron obtener las entregas",
    backend_message: true,
    mapping_failure: MAPPING_FAILURE,
    network_prefix: "Error de red",
    status_message: http_status_with_reason,
};

const GET: Endpoint = Endpoint {
    name: "entregas.get",
    failure: "Entrega no encontrada",
    ..LIST
};

const BY_PEDIDO: Endpoint = Endpoint {
    name: "entregas.by_pedido",
    failure: "No se pudieron obtener las entregas del pedido",
    ..LIST
};

const UPDATE_ESTADO: Endpoint = Endpoint {
    name: "entregas.update_estado",
    failure: "No se pudo actualizar la entrega",
    ..LIST
};

/// 配送仓库
pub struct EntregaRepository {
    api: Arc<ApiClient>,
}

impl EntregaRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_entregas(&self) -> ApiResult<Vec<Entrega>> {
        let outcome = self
            .api
            .get::<Vec<Lenient<EntregaDto>>>(endpoints::ENTREGAS)
            .await;
        settle(&LIST, outcome, |items| {
            Ok(to_entrega_list(accept_all(items, "entrega")))
        })
    }

    pub async fn get_entrega(&self, id: &str) -> ApiResult<Entrega> {
        let outcome = self.api.get::<EntregaDto>(&endpoints::entrega(id)).await;
        settle(&GET, outcome, to_entrega)
    }

    pub async fn get_entregas_by_pedido(&self, pedido_id: &str) -> ApiResult<Vec<Entrega>> {
        let outcome = self
            .api
            .get::<Vec<Lenient<EntregaDto>>>(&endpoints::entregas_by_pedido(pedido_id))
            .await;
        settle(&BY_PEDIDO, outcome, |items| {
            Ok(to_entrega_list(accept_all(items, "entrega")))
        })
    }

    /// 更新配送状态 (如 `en_camino`、`entregada`)
    pub async fn update_estado_entrega(&self, id: &str, estado: &str) -> ApiResult<Entrega> {
        let request = UpdateEstadoRequest {
            estado: estado.to_string(),
        };
        let outcome = self
            .api
            .patch::<_, EntregaDto>(&endpoints::entrega(id), &request)
            .await;
        settle(&UPDATE_ESTADO, outcome, to_entrega)
    }
}
