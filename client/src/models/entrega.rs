use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 配送 (领域模型)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrega {
    pub id: String,
    pub pedido_id: String,
    pub repartidor: Option<String>,

    /// pendiente / en_camino / entregado / fallido 等,原样保留
    pub estado: String,

    pub direccion: Option<String>,
    pub fecha_estimada: Option<DateTime<Utc>>,
    pub fecha: Option<DateTime<Utc>>,
}
