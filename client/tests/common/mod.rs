//! 测试公共模块
//!
//! 提供Mock后端与测试夹具,遵循优雅即简约的原则。
//! 后端由 wiremock 模拟,存储使用内存实现或临时目录。

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use saborlocal_client::services::SessionManager;
use saborlocal_client::{AppConfig, AppState};
use serde_json::{json, Value};
use wiremock::MockServer;

/// 测试用图片主机
pub const IMAGE_HOST: &str = "https://img.saborlocal.test";

/// 指向Mock服务器的配置
pub fn test_config(server: &MockServer, data_dir: &Path) -> AppConfig {
    AppConfig::new(data_dir.to_path_buf())
        .with_api_base_url(format!("{}/api/", server.uri()))
        .with_image_base_url(IMAGE_HOST)
        .with_timeouts(5, 10)
}

/// 内存会话 + Mock后端
pub fn in_memory_state(server: &MockServer) -> AppState {
    let config = test_config(server, Path::new("/nonexistent/saborlocal"));
    AppState::with_session(config, Arc::new(SessionManager::in_memory()))
        .expect("AppState should build against mock server")
}

/// 磁盘存储 + Mock后端
pub async fn on_disk_state(server: &MockServer, data_dir: &Path) -> AppState {
    AppState::new(test_config(server, data_dir))
        .await
        .expect("AppState should open stores in temp dir")
}

/// 成功信封
pub fn ok_envelope(data: Value) -> Value {
    json!({"success": true, "data": data})
}

/// 业务失败信封
pub fn failed_envelope(message: &str) -> Value {
    json!({"success": false, "message": message})
}

pub fn user_json(id: &str, email: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "nombre": "Ana Pérez",
        "email": email,
        "role": role,
        "telefono": "+56 9 1234 5678",
        "createdAt": "2025-03-01T10:00:00.000Z"
    })
}

pub fn auth_json(token: &str, id: &str, email: &str, role: &str) -> Value {
    json!({
        "accessToken": token,
        "user": user_json(id, email, role)
    })
}

/// 商品夹具,`productor` 可以是ID字符串或对象
pub fn producto_json(id: &str, productor: Value) -> Value {
    json!({
        "_id": id,
        "nombre": "Queso de cabra",
        "descripcion": "Madurado 3 meses",
        "precio": 6500,
        "unidad": "unidad",
        "categoria": "Lacteos",
        "productor": productor,
        "disponible": true,
        "stock": 12,
        "imagen": "/uploads/queso.png",
        "imagenThumbnail": "/uploads/thumbs/queso.png",
        "createdAt": "2025-03-01T10:00:00.000Z"
    })
}

/// 订单夹具,`created_at` 为 `None` 时省略该字段
pub fn pedido_json(id: &str, cliente: Value, created_at: Option<&str>) -> Value {
    let mut pedido = json!({
        "_id": id,
        "cliente": cliente,
        "items": [
            {"producto": "p1", "cantidad": 2, "precio": 6500},
            {"producto": {"_id": "p2"}, "cantidad": 1, "precio": 3000}
        ],
        "total": 16000,
        "estado": "en_preparacion",
        "direccionEntrega": "Av. Providencia 123"
    });
    if let Some(ts) = created_at {
        pedido["createdAt"] = json!(ts);
    }
    pedido
}

pub fn entrega_json(id: &str, pedido: Value) -> Value {
    json!({
        "_id": id,
        "pedido": pedido,
        "repartidor": "r1",
        "estado": "en_camino",
        "direccion": "Av. Providencia 123",
        "fechaEstimada": "2025-03-02T18:00:00.000Z",
        "createdAt": "2025-03-01T12:00:00.000Z"
    })
}
