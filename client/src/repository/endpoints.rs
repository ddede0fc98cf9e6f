//! REST路径 (相对于API基础地址)
//!
//! 路径中的ID按单个路径段编码,`/`、`?`、`#` 不会改变目标地址。

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const AUTH_LOGIN: &str = "auth/login";
pub const AUTH_REGISTER: &str = "auth/register";
pub const AUTH_CREATE_PRODUCTOR: &str = "auth/create-productor";
pub const AUTH_PROFILE: &str = "auth/profile";
pub const AUTH_USERS: &str = "auth/users";

pub const PRODUCTOS: &str = "productos";
pub const PRODUCTORES: &str = "productores";
pub const CLIENTES: &str = "clientes";
pub const PEDIDOS: &str = "pedidos";
pub const ENTREGAS: &str = "entregas";

/// 上传表单的文件字段名
pub const UPLOAD_FIELD: &str = "file";

/// RFC 3986 非保留字符之外全部编码
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

pub fn producto(id: &str) -> String {
    format!("{}/{}", PRODUCTOS, segment(id))
}

pub fn productos_by_productor(productor_id: &str) -> String {
    format!("{}/productor/{}", PRODUCTOS, segment(productor_id))
}

pub fn producto_imagen(id: &str) -> String {
    format!("{}/{}/imagen", PRODUCTOS, segment(id))
}

pub fn productor(id: &str) -> String {
    format!("{}/{}", PRODUCTORES, segment(id))
}

pub fn cliente(id: &str) -> String {
    format!("{}/{}", CLIENTES, segment(id))
}

pub fn pedido(id: &str) -> String {
    format!("{}/{}", PEDIDOS, segment(id))
}

pub fn pedidos_by_cliente(cliente_id: &str) -> String {
    format!("{}/cliente/{}", PEDIDOS, segment(cliente_id))
}

pub fn entrega(id: &str) -> String {
    format!("{}/{}", ENTREGAS, segment(id))
}

pub fn entregas_by_pedido(pedido_id: &str) -> String {
    format!("{}/pedido/{}", ENTREGAS, segment(pedido_id))
}
