//! 线上传输对象 (DTO)
//!
//! 与后端JSON结构一一对应,和领域模型解耦。
//! 后端使用Mongo风格的 `_id` 与 camelCase 字段名。

pub mod auth;
pub mod entrega;
pub mod envelope;
pub mod pedido;
pub mod producto;
pub mod productor;

pub use auth::{AuthData, CreateProductorUserRequest, LoginRequest, RegisterRequest, UserDto};
pub use entrega::EntregaDto;
pub use envelope::{accept_all, ApiEnvelope, IdOnlyDto, Lenient, WireEntity, WireRef};
pub use pedido::{
    ClienteDto, CreatePedidoRequest, PedidoDto, PedidoItemDto, PedidoItemRequest,
    UpdateEstadoRequest,
};
pub use producto::{CreateProductoRequest, PartialProductorDto, ProductoDto, UpdateProductoRequest};
pub use productor::{CreateProductorRequest, ProductorDto};
