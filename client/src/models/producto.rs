use serde::{Deserialize, Serialize};

/// 生产者 (领域模型)
///
/// 不变量: `id` 永不为空,其余字段均可缺失。
/// 仅有ID时,映射层会构造所有字段为 `None` 的占位生产者。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Productor {
    pub id: String,
    pub nombre: Option<String>,
    pub ubicacion: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub imagen: Option<String>,
    pub imagen_thumbnail: Option<String>,
}

impl Productor {
    /// 仅含ID的占位生产者
    pub fn placeholder(id: String) -> Self {
        Self {
            id,
            nombre: None,
            ubicacion: None,
            telefono: None,
            email: None,
            imagen: None,
            imagen_thumbnail: None,
        }
    }

    /// 是否只有ID (未被后端populate)
    pub fn is_placeholder(&self) -> bool {
        self.nombre.is_none()
            && self.ubicacion.is_none()
            && self.telefono.is_none()
            && self.email.is_none()
    }
}

/// 商品 (领域模型)
///
/// `productor` 仅在订单行的合成商品中为 `None`:
/// 订单响应不内嵌商品详情,也就无从得知生产者。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: String,
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,

    /// kg、unidad、litro 等
    pub unidad: String,

    pub stock: i32,
    pub categoria: Option<String>,
    pub disponible: bool,
    pub productor: Option<Productor>,

    /// 绝对URL
    pub imagen: Option<String>,
    pub imagen_thumbnail: Option<String>,
}

impl Producto {
    /// 订单行使用的最小商品
    ///
    /// 只知道ID与单价,名称回退为 `Producto #<id>`。
    pub fn minimal(id: String, precio: f64) -> Self {
        Self {
            nombre: format!("Producto #{}", id),
            id,
            descripcion: String::new(),
            precio,
            unidad: String::new(),
            stock: 0,
            categoria: None,
            disponible: true,
            productor: None,
            imagen: None,
            imagen_thumbnail: None,
        }
    }

    pub fn productor_id(&self) -> Option<&str> {
        self.productor.as_ref().map(|p| p.id.as_str())
    }

    pub fn in_stock(&self) -> bool {
        self.disponible && self.stock > 0
    }
}
