use serde::{Deserialize, Serialize};

/// 后端生产者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductorDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub imagen_thumbnail: Option<String>,
}

/// 创建生产者请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductorRequest {
    pub nombre: String,
    pub ubicacion: String,
    pub telefono: String,
    pub email: String,
}
