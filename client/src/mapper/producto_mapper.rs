use crate::dto::{PartialProductorDto, ProductoDto};
use crate::mapper::image_url::absolute_image_url;
use crate::models::{MappingError, Producto, Productor};

/// ProductoDto → Producto
///
/// - `productor`: ID字符串 → 占位生产者; 对象 → 复制后端已populate的字段
/// - `imagen`: 优先原图,原图缺失时使用缩略图,转换为绝对URL
/// - `imagen_thumbnail`: 折叠进 `imagen` 后置空
///
/// # 错误
/// 生产者引用没有ID时返回 `MappingError::MissingProductorId`
pub fn to_producto(dto: ProductoDto, image_base_url: &str) -> Result<Producto, MappingError> {
    let productor = resolve_productor(&dto)?;
    Ok(to_producto_with_productor(dto, productor, image_base_url))
}

/// 已持有完整生产者数据时使用
pub fn to_producto_with_productor(
    dto: ProductoDto,
    productor: Productor,
    image_base_url: &str,
) -> Producto {
    let imagen = canonical_image(&dto, image_base_url);

    Producto {
        id: dto.id,
        nombre: dto.nombre,
        descripcion: dto.descripcion,
        precio: dto.precio,
        unidad: dto.unidad,
        stock: dto.stock,
        categoria: dto.categoria,
        disponible: dto.disponible,
        productor: Some(productor),
        imagen,
        imagen_thumbnail: None,
    }
}

/// 批量映射,无法映射的商品记录日志后丢弃
pub fn to_producto_list(dtos: Vec<ProductoDto>, image_base_url: &str) -> Vec<Producto> {
    dtos.into_iter()
        .filter_map(|dto| {
            let producto_id = dto.id.clone();
            match to_producto(dto, image_base_url) {
                Ok(producto) => Some(producto),
                Err(e) => {
                    tracing::warn!(producto_id = %producto_id, error = %e, "Dropping unmappable product");
                    None
                }
            }
        })
        .collect()
}

fn resolve_productor(dto: &ProductoDto) -> Result<Productor, MappingError> {
    let id = dto
        .productor
        .id()
        .ok_or_else(|| MappingError::MissingProductorId {
            producto_id: dto.id.clone(),
        })?
        .to_string();

    Ok(match dto.productor.embedded() {
        Some(partial) => from_partial(id, partial),
        None => Productor::placeholder(id),
    })
}

fn from_partial(id: String, partial: &PartialProductorDto) -> Productor {
    Productor {
        id,
        nombre: partial.nombre.clone(),
        ubicacion: partial.ubicacion.clone(),
        telefono: partial.telefono.clone(),
        email: partial.email.clone(),
        imagen: partial.imagen.clone(),
        imagen_thumbnail: partial.imagen_thumbnail.clone(),
    }
}

fn canonical_image(dto: &ProductoDto, image_base_url: &str) -> Option<String> {
    let non_blank = |path: &&String| !path.trim().is_empty();
    dto.imagen
        .as_ref()
        .filter(non_blank)
        .or_else(|| dto.imagen_thumbnail.as_ref().filter(non_blank))
        .and_then(|path| absolute_image_url(image_base_url, path))
}
