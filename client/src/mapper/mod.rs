//! 领域映射层
//!
//! 纯函数,无副作用: 每个映射器接收一个DTO,构造领域模型或失败。
//! 后端数据形状不一致 (可空字段、ID与对象混用) 的兼容策略集中在这里。

pub mod entrega_mapper;
pub mod image_url;
pub mod pedido_mapper;
pub mod producto_mapper;
pub mod productor_mapper;
pub mod user_mapper;

pub use entrega_mapper::{to_entrega, to_entrega_list};
pub use image_url::absolute_image_url;
pub use pedido_mapper::{to_cliente_from_dto, to_pedido, to_pedido_item, to_pedido_list};
pub use producto_mapper::{to_producto, to_producto_list, to_producto_with_productor};
pub use productor_mapper::{to_productor, to_productor_list};
pub use user_mapper::{to_user, to_user_list};
