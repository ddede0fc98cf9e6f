use serde::{Deserialize, Serialize};

use crate::dto::envelope::{IdOnlyDto, WireRef};

/// 后端配送记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntregaDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub pedido: WireRef<IdOnlyDto>,
    #[serde(default)]
    pub repartidor: Option<WireRef<IdOnlyDto>>,
    pub estado: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub fecha_estimada: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
