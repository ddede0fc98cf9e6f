use serde::{Deserialize, Serialize};

use crate::dto::envelope::{IdOnlyDto, WireEntity, WireRef};

/// 订单中的客户 (后端使用 `.populate('cliente')`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClienteDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
}

impl WireEntity for ClienteDto {
    fn wire_id(&self) -> Option<&str> {
        Some(self.id.as_str())
    }
}

/// 订单行: 只有商品ID、数量与单价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoItemDto {
    #[serde(default)]
    pub producto: WireRef<IdOnlyDto>,
    pub cantidad: u32,
    pub precio: f64,
}

/// 后端订单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub cliente: WireRef<ClienteDto>,
    #[serde(default)]
    pub items: Vec<PedidoItemDto>,
    pub total: f64,

    /// pendiente, en_preparacion, en_camino, entregado, cancelado
    pub estado: String,

    #[serde(default)]
    pub direccion_entrega: Option<String>,
    #[serde(default)]
    pub notas_entrega: Option<String>,

    /// 订单日期,DTO中可选但映射时必需
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// 下单请求中的一行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PedidoItemRequest {
    pub producto: String,
    pub cantidad: u32,
}

/// 下单请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePedidoRequest {
    pub items: Vec<PedidoItemRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion_entrega: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas_entrega: Option<String>,
}

/// 状态更新请求 (订单与配送共用)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEstadoRequest {
    pub estado: String,
}
