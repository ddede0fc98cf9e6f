use crate::dto::{ClienteDto, PedidoDto, PedidoItemDto, WireRef};
use crate::models::{Cliente, EstadoPedido, MappingError, Pedido, PedidoItem, Producto};
use crate::utils::time_utils::parse_backend_time;

/// PedidoItemDto → PedidoItem
///
/// 订单响应不内嵌商品详情,只能用ID与单价合成最小商品。
pub fn to_pedido_item(dto: PedidoItemDto) -> Result<PedidoItem, MappingError> {
    let producto_id = dto
        .producto
        .id()
        .ok_or_else(|| MappingError::MissingField("items.producto".to_string()))?
        .to_string();

    Ok(PedidoItem {
        producto: Producto::minimal(producto_id, dto.precio),
        cantidad: dto.cantidad,
        precio: dto.precio,
    })
}

/// PedidoDto → Pedido
///
/// - `createdAt` 必需,缺失或无法解析即映射失败
/// - 客户: 使用内嵌对象,仅有ID时名称回退为 `Cliente #<id>`
/// - 客户地址缺失时回退为订单的配送地址
pub fn to_pedido(dto: PedidoDto) -> Result<Pedido, MappingError> {
    let created_at = dto
        .created_at
        .as_deref()
        .ok_or_else(|| MappingError::MissingField("createdAt".to_string()))?;
    let fecha = parse_backend_time(created_at)
        .map_err(|_| MappingError::InvalidTimestamp(created_at.to_string()))?;

    let cliente = to_cliente(&dto.cliente, dto.direccion_entrega.as_deref())?;

    let items = dto
        .items
        .into_iter()
        .map(to_pedido_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Pedido {
        id: dto.id,
        cliente,
        items,
        total: dto.total,
        estado: EstadoPedido::from_wire(&dto.estado),
        fecha,
    })
}

/// 批量映射,无法映射的订单记录日志后丢弃
pub fn to_pedido_list(dtos: Vec<PedidoDto>) -> Vec<Pedido> {
    dtos.into_iter()
        .filter_map(|dto| {
            let pedido_id = dto.id.clone();
            match to_pedido(dto) {
                Ok(pedido) => Some(pedido),
                Err(e) => {
                    tracing::warn!(pedido_id = %pedido_id, error = %e, "Dropping unmappable order");
                    None
                }
            }
        })
        .collect()
}

/// ClienteDto → Cliente (客户列表接口)
pub fn to_cliente_from_dto(dto: ClienteDto) -> Cliente {
    Cliente {
        nombre: dto.nombre.unwrap_or_else(|| fallback_nombre(&dto.id)),
        email: dto.email.unwrap_or_default(),
        telefono: dto.telefono.unwrap_or_default(),
        direccion: dto.direccion.unwrap_or_default(),
        id: dto.id,
    }
}

fn to_cliente(
    cliente: &WireRef<ClienteDto>,
    direccion_entrega: Option<&str>,
) -> Result<Cliente, MappingError> {
    let id = cliente
        .id()
        .ok_or_else(|| MappingError::MissingField("cliente".to_string()))?
        .to_string();

    let embedded = cliente.embedded();
    let field = |pick: fn(&ClienteDto) -> Option<&String>| embedded.and_then(pick).cloned();

    Ok(Cliente {
        nombre: field(|c| c.nombre.as_ref()).unwrap_or_else(|| fallback_nombre(&id)),
        email: field(|c| c.email.as_ref()).unwrap_or_default(),
        telefono: field(|c| c.telefono.as_ref()).unwrap_or_default(),
        direccion: field(|c| c.direccion.as_ref())
            .or_else(|| direccion_entrega.map(str::to_string))
            .unwrap_or_default(),
        id,
    })
}

fn fallback_nombre(id: &str) -> String {
    format!("Cliente #{}", id)
}
