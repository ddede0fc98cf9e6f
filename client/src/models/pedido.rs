use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::producto::Producto;

/// 订单中的客户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cliente {
    pub id: String,
    pub nombre: String,
    pub email: String,
    pub telefono: String,
    pub direccion: String,
}

/// 订单行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoItem {
    pub producto: Producto,
    pub cantidad: u32,
    pub precio: f64,
}

impl PedidoItem {
    pub fn subtotal(&self) -> f64 {
        self.precio * f64::from(self.cantidad)
    }
}

/// 订单状态
///
/// 状态流转:
/// Pendiente -> EnPreparacion -> EnCamino -> Entregado
///     |             |              |
///     +-------------+--------------+---> Cancelado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoPedido {
    Pendiente,
    EnPreparacion,
    EnCamino,
    Entregado,
    Cancelado,
}

impl EstadoPedido {
    /// 解析后端状态字符串
    ///
    /// 大小写不敏感;未知值回退为 `Pendiente`。
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "en_preparacion" => EstadoPedido::EnPreparacion,
            "en_camino" => EstadoPedido::EnCamino,
            "entregado" => EstadoPedido::Entregado,
            "cancelado" => EstadoPedido::Cancelado,
            "pendiente" => EstadoPedido::Pendiente,
            unknown => {
                tracing::warn!(estado = %unknown, "Unknown order status, defaulting to pendiente");
                EstadoPedido::Pendiente
            }
        }
    }

    /// 后端使用的字符串形式
    pub fn as_wire(&self) -> &'static str {
        match self {
            EstadoPedido::Pendiente => "pendiente",
            EstadoPedido::EnPreparacion => "en_preparacion",
            EstadoPedido::EnCamino => "en_camino",
            EstadoPedido::Entregado => "entregado",
            EstadoPedido::Cancelado => "cancelado",
        }
    }

    /// 是否为终态
    pub fn is_final(&self) -> bool {
        matches!(self, EstadoPedido::Entregado | EstadoPedido::Cancelado)
    }
}

/// 订单 (领域模型)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pedido {
    pub id: String,
    pub cliente: Cliente,
    pub items: Vec<PedidoItem>,
    pub total: f64,
    pub estado: EstadoPedido,

    /// 创建时间,映射时必需
    pub fecha: DateTime<Utc>,
}

impl Pedido {
    /// 订单中的商品件数
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.cantidad).sum()
    }
}
