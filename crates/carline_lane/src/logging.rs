//! Structured JSON log lines on stderr.

use serde_json::{json, Value};

pub fn log_info(component: &str, event: &str, details: Value) {
    eprintln!("{}", log_line(component, None, event, details));
}

pub fn log_error(component: &str, event: &str, details: Value) {
    eprintln!("{}", log_line(component, Some("error"), event, details));
}

fn log_line(component: &str, level: Option<&str>, event: &str, details: Value) -> Value {
    let mut line = json!({
        "component": component,
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    });
    if let (Some(level), Some(object)) = (level, line.as_object_mut()) {
        object.insert("level".to_string(), Value::from(level));
    }
    line
}
