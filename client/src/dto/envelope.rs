use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 后端统一响应信封
///
/// 所有接口都返回 `{success, message?, data?}`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// 拥有后端 `_id` 的实体
pub trait WireEntity {
    fn wire_id(&self) -> Option<&str>;
}

/// 关联字段: 后端可能返回ID字符串,也可能返回populate后的对象
///
/// 按JSON节点类型显式解码:
/// - 字符串 → `Id`
/// - 对象 → `Embedded`
/// - `null` 或字段缺失 → `Missing`
/// - 其他 → 解码错误
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireRef<T> {
    Id(String),
    Embedded(T),
    Missing,
}

impl<T> Default for WireRef<T> {
    fn default() -> Self {
        WireRef::Missing
    }
}

impl<T: WireEntity> WireRef<T> {
    /// 关联对象的ID,空字符串视为缺失
    pub fn id(&self) -> Option<&str> {
        let id = match self {
            WireRef::Id(id) => Some(id.as_str()),
            WireRef::Embedded(entity) => entity.wire_id(),
            WireRef::Missing => None,
        };
        id.filter(|id| !id.trim().is_empty())
    }

    pub fn embedded(&self) -> Option<&T> {
        match self {
            WireRef::Embedded(entity) => Some(entity),
            WireRef::Id(_) | WireRef::Missing => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for WireRef<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(WireRef::Missing),
            Value::String(id) => Ok(WireRef::Id(id)),
            object @ Value::Object(_) => serde_json::from_value(object)
                .map(WireRef::Embedded)
                .map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected id string or object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 列表元素的独立解码结果
///
/// 单个元素形状不符时只丢弃该元素,不影响整个列表。
#[derive(Debug)]
pub struct Lenient<T> {
    id: Option<String>,
    decoded: Result<T, String>,
}

impl<T> Lenient<T> {
    /// 解码成功的元素;失败的记录日志后丢弃
    pub fn accept(self, entity: &'static str) -> Option<T> {
        match self.decoded {
            Ok(item) => Some(item),
            Err(error) => {
                tracing::warn!(
                    entity,
                    id = self.id.as_deref().unwrap_or("<sin id>"),
                    error = error.as_str(),
                    "Dropping undecodable list element"
                );
                None
            }
        }
    }
}

impl<'de, T> Deserialize<'de> for Lenient<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let id = value.get("_id").and_then(Value::as_str).map(str::to_string);
        let decoded = serde_json::from_value(value).map_err(|e| e.to_string());
        Ok(Lenient { id, decoded })
    }
}

/// 逐个接受列表元素
pub fn accept_all<T>(items: Vec<Lenient<T>>, entity: &'static str) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| item.accept(entity))
        .collect()
}

/// 仅含 `_id` 的引用对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdOnlyDto {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

impl WireEntity for IdOnlyDto {
    fn wire_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
