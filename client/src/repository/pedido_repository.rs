use std::sync::Arc;

use serde_json::Value;

use super::endpoints;
use super::{server_status, settle, settle_unit, Endpoint};
use crate::dto::{accept_all, CreatePedidoRequest, Lenient, PedidoDto, UpdateEstadoRequest};
use crate::mapper::{to_pedido, to_pedido_list};
use crate::models::{ApiResult, EstadoPedido, Pedido};
use crate::services::ApiClient;

/// 单个订单映射失败的提示
const PEDIDO_MAPPING_FAILURE: &str = "Error al convertir el pedido: datos incompletos del backend";

const LIST: Endpoint = Endpoint {
    name: "pedidos.list",
    failure: "Error al obtener pedidos",
    backend_message: true,
    mapping_failure: PEDIDO_MAPPING_FAILURE,
    network_prefix: "Error de red",
    status_message: server_status,
};

const BY_CLIENTE: Endpoint = Endpoint {
    name: "pedidos.by_cliente",
    failure: "Error al obtener pedidos del cliente",
    ..LIST
};

const GET: Endpoint = Endpoint {
    name: "pedidos.get",
    failure: "Error al obtener el pedido",
    ..LIST
};

const CREATE: Endpoint = Endpoint {
    name: "pedidos.create",
    failure: "Error al crear el pedido",
    ..LIST
};

const UPDATE_ESTADO: Endpoint = Endpoint {
    name: "pedidos.update_estado",
    failure: "Error al actualizar el pedido",
    ..LIST
};

const DELETE: Endpoint = Endpoint {
    name: "pedidos.delete",
    failure: "Error al eliminar el pedido",
    ..LIST
};

/// 订单仓库
///
/// 列表接口丢弃无法映射的订单;单个订单映射失败则整体失败
pub struct PedidoRepository {
    api: Arc<ApiClient>,
}

impl PedidoRepository {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all_pedidos(&self) -> ApiResult<Vec<Pedido>> {
        let outcome = self
            .api
            .get::<Vec<Lenient<PedidoDto>>>(endpoints::PEDIDOS)
            .await;
        settle(&LIST, outcome, |items| {
            Ok(to_pedido_list(accept_all(items, "pedido")))
        })
    }

    pub async fn get_pedidos_by_cliente(&self, cliente_id: &str) -> ApiResult<Vec<Pedido>> {
        let outcome = self
            .api
            .get::<Vec<Lenient<PedidoDto>>>(&endpoints::pedidos_by_cliente(cliente_id))
            .await;
        settle(&BY_CLIENTE, outcome, |items| {
            Ok(to_pedido_list(accept_all(items, "pedido")))
        })
    }

    pub async fn get_pedido(&self, id: &str) -> ApiResult<Pedido> {
        let outcome = self.api.get::<PedidoDto>(&endpoints::pedido(id)).await;
        settle(&GET, outcome, to_pedido)
    }

    pub async fn create_pedido(&self, request: CreatePedidoRequest) -> ApiResult<Pedido> {
        let outcome = self
            .api
            .post::<_, PedidoDto>(endpoints::PEDIDOS, &request)
            .await;
        settle(&CREATE, outcome, to_pedido)
    }

    pub async fn update_estado_pedido(&self, id: &str, estado: EstadoPedido) -> ApiResult<Pedido> {
        let request = UpdateEstadoRequest {
            estado: estado.as_wire().to_string(),
        };
        let outcome = self
            .api
            .put::<_, PedidoDto>(&endpoints::pedido(id), &request)
            .await;
        settle(&UPDATE_ESTADO, outcome, to_pedido)
    }

    pub async fn delete_pedido(&self, id: &str) -> ApiResult<()> {
        let outcome = self.api.delete::<Value>(&endpoints::pedido(id)).await;
        settle_unit(&DELETE, outcome)
    }
}
