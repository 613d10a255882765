/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a prefixed id with `len` upper-case hex chars, e.g. `ORD-1A2B3C4D`.
///
/// The hex part comes from a v4 UUID, so `len` is capped at 32.
pub fn prefixed_hex_id(prefix: &str, len: usize) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    let len = len.min(hex.len());
    format!("{}-{}", prefix, hex[..len].to_uppercase())
}
