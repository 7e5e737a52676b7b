use serde_json::{json, Value};

pub fn log_info(component: &str, event: &str, details: Value) {
    eprintln!("{}", log_record(component, None, event, details));
}

pub fn log_error(component: &str, event: &str, details: Value) {
    eprintln!("{}", log_record(component, Some("error"), event, details));
}

/// One JSON log line; `level` is omitted for informational events.
pub fn log_record(component: &str, level: Option<&str>, event: &str, details: Value) -> Value {
    let mut record = json!({
        "component": component,
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    });
    if let (Some(level), Some(object)) = (level, record.as_object_mut()) {
        object.insert("level".to_string(), Value::from(level));
    }
    record
}
