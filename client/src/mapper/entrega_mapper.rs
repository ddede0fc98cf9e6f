use crate::dto::EntregaDto;
use crate::models::{Entrega, MappingError};
use crate::utils::time_utils::parse_backend_time;

/// EntregaDto → Entrega
///
/// 订单引用必须有ID;日期字段无法解析时按缺失处理。
pub fn to_entrega(dto: EntregaDto) -> Result<Entrega, MappingError> {
    let pedido_id = dto
        .pedido
        .id()
        .ok_or_else(|| MappingError::MissingField("pedido".to_string()))?
        .to_string();

    let repartidor = dto
        .repartidor
        .as_ref()
        .and_then(|r| r.id())
        .map(str::to_string);

    let parse = |value: Option<&str>| value.and_then(|s| parse_backend_time(s).ok());

    Ok(Entrega {
        id: dto.id,
        pedido_id,
        repartidor,
        estado: dto.estado,
        direccion: dto.direccion,
        fecha_estimada: parse(dto.fecha_estimada.as_deref()),
        fecha: parse(dto.created_at.as_deref()),
    })
}

pub fn to_entrega_list(dtos: Vec<EntregaDto>) -> Vec<Entrega> {
    dtos.into_iter()
        .filter_map(|dto| {
            let entrega_id = dto.id.clone();
            to_entrega(dto)
                .map_err(|e| {
                    tracing::warn!(entrega_id = %entrega_id, error = %e, "Dropping unmappable delivery");
                })
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entrega_with_embedded_pedido() {
        let json = r#"{
            "_id": "e1",
            "pedido": {"_id": "o1", "total": 1000},
            "repartidor": "r7",
            "estado": "en_camino",
            "fechaEstimada": "2025-06-01T18:00:00.000Z",
            "createdAt": "no-es-fecha"
        }"#;
        let dto: EntregaDto = serde_json::from_str(json).unwrap();
        let entrega = to_entrega(dto).unwrap();

        assert_eq!(entrega.pedido_id, "o1");
        assert_eq!(entrega.repartidor.as_deref(), Some("r7"));
        assert!(entrega.fecha_estimada.is_some());
        assert!(entrega.fecha.is_none());
    }

    #[test]
    fn test_entrega_without_pedido_id_fails() {
        let json = r#"{"_id": "e1", "pedido": {}, "estado": "pendiente"}"#;
        let dto: EntregaDto = serde_json::from_str(json).unwrap();
        assert!(to_entrega(dto).is_err());
        assert!(to_entrega_list(vec![]).is_empty());
    }
}
