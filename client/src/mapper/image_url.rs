/// 将后端返回的图片路径转换为绝对URL
///
/// - 已是 `http://` 或 `https://` 开头: 原样返回
/// - 否则: 以 `base_url` 为前缀,两者之间恰好一个 `/`
/// - 空白路径视为无图片
///
/// # 示例
/// ```
/// use saborlocal_client::mapper::absolute_image_url;
/// assert_eq!(
///     absolute_image_url("https://host", "/uploads/x.png").as_deref(),
///     Some("https://host/uploads/x.png")
/// );
/// ```
pub fn absolute_image_url(base_url: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(path.to_string());
    }

    Some(format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}
