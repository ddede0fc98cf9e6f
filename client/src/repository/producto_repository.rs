use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use super::endpoints;
use super::{http_status_with_reason, settle, settle_unit, Endpoint};
use crate::dto::{accept_all, CreateProductoRequest, Lenient, ProductoDto, UpdateProductoRequest};
use crate::mapper::{to_producto, to_producto_list};
use crate::models::{ApiError, ApiResult, Producto};
use crate::services::ApiClient;

const fn productos_endpoint(
    name: &'static str,
    failure: &'static str,
    mapping_failure: &'static str,
) -> Endpoint {
    Endpoint {
        name,
        failure,
        backend_message: false,
        mapping_failure,
        network_prefix: "Error de red",
        status_message: http_status_with_reason,
    }
}

const LIST: Endpoint = productos_endpoint(
    "productos.list",
    "No se pudieron obtener los productos",
    "No se pudieron obtener los productos",
);
const GET: Endpoint = productos_endpoint(
    "productos.get",
    "Producto no encontrado",
    "No se pudo convertir el producto",
);
const BY_PRODUCTOR: Endpoint = productos_endpoint(
    "productos.by_productor",
    "No se pudieron obtener los productos del productor",
    "No se pudieron obtener los productos del productor",
);
const CREATE: Endpoint = productos_endpoint(
    "productos.create",
    "No se pudo crear el producto",
    "No se pudo convertir el producto creado",
);
const UPDATE: Endpoint = productos_endpoint(
    "productos.update",
    "No se pudo actualizar el producto",
    "No se pudo convertir el producto actualizado",
);
const DELETE: Endpoint = productos_endpoint(
    "productos.delete",
    "No se pudo eliminar el producto",
    "No se pudo eliminar el producto",
);
const UPLOAD: Endpoint = Endpoint {
    network_prefix: "Error al subir imagen",
    ..productos_endpoint(
        "productos.upload_image",
        "No se pudo subir la imagen",
        "No se pudo convertir el producto",
    )
};

/// 商品仓库
pub struct ProductoRepository {
    api: Arc<ApiClient>,

    /// 图片相对路径的前缀主机
    image_base_url: String,
}

impl ProductoRepository {
    pub fn new(api: Arc<ApiClient>, image_base_url: impl Into<String>) -> Self {
        Self {
            api,
            image_base_url: image_base_url.into(),
        }
    }

    /// 全部商品
    ///
    /// 无法映射的商品被丢弃 (记录警告),不影响其余结果
    pub async fn get_productos(&self) -> ApiResult<Vec<Producto>> {
        let outcome = self
            .api
            .get::<Vec<Lenient<ProductoDto>>>(endpoints::PRODUCTOS)
            .await;
        settle(&LIST, outcome, |items| {
            Ok(to_producto_list(accept_all(items, "producto"), &self.image_base_url))
        })
    }

    pub async fn get_producto(&self, id: &str) -> ApiResult<Producto> {
        let outcome = self.api.get::<ProductoDto>(&endpoints::producto(id)).await;
        settle(&GET, outcome, |dto| to_producto(dto, &self.image_base_url))
    }

    pub async fn get_productos_by_productor(&self, productor_id: &str) -> ApiResult<Vec<Producto>> {
        let outcome = self
            .api
            .get::<Vec<Lenient<ProductoDto>>>(&endpoints::productos_by_productor(productor_id))
            .await;
        settle(&BY_PRODUCTOR, outcome, |items| {
            Ok(to_producto_list(accept_all(items, "producto"), &self.image_base_url))
        })
    }

    pub async fn create_producto(&self, request: CreateProductoRequest) -> ApiResult<Producto> {
        let outcome = self
            .api
            .post::<_, ProductoDto>(endpoints::PRODUCTOS, &request)
            .await;
        settle(&CREATE, outcome, |dto| to_producto(dto, &self.image_base_url))
    }

    /// 部分更新,只发送 `Some` 字段
    pub async fn update_producto(
        &self,
        id: &str,
        request: UpdateProductoRequest,
    ) -> ApiResult<Producto> {
        if request.is_empty() {
            return ApiResult::error_with_cause(
                "No hay cambios para actualizar",
                ApiError::InvalidRequest("empty update".to_string()),
            );
        }

        let outcome = self
            .api
            .put::<_, ProductoDto>(&endpoints::producto(id), &request)
            .await;
        settle(&UPDATE, outcome, |dto| to_producto(dto, &self.image_base_url))
    }

    pub async fn delete_producto(&self, id: &str) -> ApiResult<()> {
        let outcome = self.api.delete::<Value>(&endpoints::producto(id)).await;
        settle_unit(&DELETE, outcome)
    }

    /// 上传商品图片 (multipart字段 `file`),返回更新后的商品
    pub async fn upload_image(&self, id: &str, image: &Path) -> ApiResult<Producto> {
        let outcome = self
            .api
            .upload_file::<ProductoDto>(&endpoints::producto_imagen(id), endpoints::UPLOAD_FIELD, image)
            .await;
        settle(&UPLOAD, outcome, |dto| to_producto(dto, &self.image_base_url))
    }
}
