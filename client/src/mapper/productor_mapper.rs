use crate::dto::ProductorDto;
use crate::models::{MappingError, Productor};

/// ProductorDto → Productor
///
/// 字段直接复制,缺失的可选文本字段回退为空字符串。
/// 空白 `_id` 返回 `MappingError::MissingField`。
pub fn to_productor(dto: ProductorDto) -> Result<Productor, MappingError> {
    if dto.id.trim().is_empty() {
        return Err(MappingError::MissingField("_id".to_string()));
    }

    Ok(Productor {
        id: dto.id,
        nombre: Some(dto.nombre.unwrap_or_default()),
        ubicacion: Some(dto.ubicacion.unwrap_or_default()),
        telefono: Some(dto.telefono.unwrap_or_default()),
        email: Some(dto.email.unwrap_or_default()),
        imagen: dto.imagen,
        imagen_thumbnail: dto.imagen_thumbnail,
    })
}

pub fn to_productor_list(dtos: Vec<ProductorDto>) -> Vec<Productor> {
    dtos.into_iter()
        .filter_map(|dto| match to_productor(dto) {
            Ok(productor) => Some(productor),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping productor without id");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: &str) -> ProductorDto {
        ProductorDto {
            id: id.to_string(),
            nombre: Some("Huerta Doña Rosa".to_string()),
            ubicacion: None,
            telefono: None,
            email: Some("rosa@huerta.cl".to_string()),
            descripcion: None,
            imagen: None,
            imagen_thumbnail: None,
        }
    }

    #[test]
    fn test_missing_text_fields_become_empty() {
        let productor = to_productor(dto("prod1")).unwrap();
        assert_eq!(productor.id, "prod1");
        assert_eq!(productor.nombre.as_deref(), Some("Huerta Doña Rosa"));
        assert_eq!(productor.ubicacion.as_deref(), Some(""));
        assert_eq!(productor.telefono.as_deref(), Some(""));
        assert_eq!(productor.email.as_deref(), Some("rosa@huerta.cl"));
        assert!(productor.imagen.is_none());
    }

    #[test]
    fn test_blank_id_is_rejected() {
        assert_eq!(
            to_productor(dto("  ")).unwrap_err(),
            MappingError::MissingField("_id".to_string())
        );
    }

    #[test]
    fn test_list_drops_productor_without_id() {
        let productores = to_productor_list(vec![dto("prod1"), dto(""), dto("prod2")]);
        let ids: Vec<&str> = productores.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["prod1", "prod2"]);
    }
}
