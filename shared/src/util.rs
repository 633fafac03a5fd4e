/// 当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque UUID-v4 resource id.
///
/// Used for orders, buyers and employees alike so ids never leak
/// creation order.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
