use serde::{Deserialize, Serialize};

use crate::dto::envelope::{WireEntity, WireRef};

/// 新建商品的默认分类
pub const DEFAULT_CATEGORIA: &str = "Lacteos";

fn default_true() -> bool {
    true
}

/// 商品响应中的生产者对象 (可能只populate了部分字段)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialProductorDto {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub imagen_thumbnail: Option<String>,
}

impl WireEntity for PartialProductorDto {
    fn wire_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// 后端商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductoDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub precio: f64,

    /// kg、unidad、litro 等
    pub unidad: String,

    #[serde(default)]
    pub categoria: Option<String>,

    /// ID字符串或生产者对象
    #[serde(default)]
    pub productor: WireRef<PartialProductorDto>,

    #[serde(default = "default_true")]
    pub disponible: bool,
    pub stock: i32,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub imagen_thumbnail: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// 创建商品请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductoRequest {
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    pub unidad: String,
    pub stock: i32,

    /// 如 "Lacteos"、"Conservas"
    pub categoria: String,

    pub disponible: bool,

    /// 相对路径,如 "uploads/....png"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen_thumbnail: Option<String>,

    /// 生产者ID
    pub productor: String,
}

impl CreateProductoRequest {
    /// 新建商品: 默认分类 "Lacteos"、上架,图片稍后单独上传
    pub fn new(
        nombre: String,
        descripcion: String,
        precio: f64,
        unidad: String,
        stock: i32,
        productor_id: String,
    ) -> Self {
        Self {
            nombre,
            descripcion,
            precio,
            unidad,
            stock,
            categoria: DEFAULT_CATEGORIA.to_string(),
            disponible: true,
            imagen: None,
            imagen_thumbnail: None,
            productor: productor_id,
        }
    }
}

/// 更新商品请求,仅发送非空字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disponible: Option<bool>,
}

impl UpdateProductoRequest {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.descripcion.is_none()
            && self.precio.is_none()
            && self.stock.is_none()
            && self.disponible.is_none()
    }
}
