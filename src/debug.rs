//! Debug trace file for MCP tool traffic.

use chrono::Local;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const TRACE_LIMIT: usize = 1000;

/// Writes tool calls and results to a trace file when `--debug` is set.
pub struct DebugLogger {
    enabled: bool,
    trace_file: Option<Mutex<File>>,
    trace_path: Option<PathBuf>,
}

impl DebugLogger {
    /// Create a new debug logger; opens the trace file only when enabled.
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = PathBuf::from(format!("/tmp/zephyr_scale_mcp_trace_{}.log", timestamp));
        Self::with_path(path)
    }

    fn disabled() -> Self {
        Self {
            enabled: false,
            trace_file: None,
            trace_path: None,
        }
    }

    /// Trace into an explicit file.
    pub fn with_path(path: PathBuf) -> Self {
        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
        {
            Ok(file) => {
                tracing::info!(path = %path.display(), "Trace file opened");
                Self {
                    enabled: true,
                    trace_file: Some(Mutex::new(file)),
                    trace_path: Some(path),
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to create trace file: {}", e);
                Self {
                    enabled: true,
                    trace_file: None,
                    trace_path: None,
                }
            }
        }
    }

    pub fn trace_path(&self) -> Option<&Path> {
        self.trace_path.as_deref()
    }

    /// Log a message to the tracing subscriber and the trace file.
    pub fn log(&self, message: &str) {
        if !self.enabled {
            return;
        }

        tracing::debug!("{}", message);

        if let Some(ref file) = self.trace_file {
            if let Ok(mut f) = file.lock() {
                let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                let _ = writeln!(f, "[{}] {}", timestamp, message);
                let _ = f.flush();
            }
        }
    }

    pub fn log_tool_call(&self, tool_name: &str, params: &Value) {
        if !self.enabled {
            return;
        }

        self.log(&format!(
            "TOOL CALL: {} | params: {}",
            tool_name,
            truncate_json(params, TRACE_LIMIT)
        ));
    }

    pub fn log_tool_result(&self, tool_name: &str, result: &Value) {
        if !self.enabled {
            return;
        }

        self.log(&format!(
            "TOOL RESULT: {} | result: {}",
            tool_name,
            truncate_json(result, TRACE_LIMIT)
        ));
    }

    pub fn log_error(&self, context: &str, error: &str) {
        if !self.enabled {
            return;
        }

        self.log(&format!("ERROR [{}]: {}", context, error));
    }
}

impl std::fmt::Debug for DebugLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugLogger")
            .field("enabled", &self.enabled)
            .field("trace_path", &self.trace_path)
            .finish()
    }
}

/// Serialize and cut to at most `max_len` bytes on a char boundary.
fn truncate_json(value: &Value, max_len: usize) -> String {
    let s = value.to_string();
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disabled_logger_has_no_file() {
        let logger = DebugLogger::new(false);
        assert!(logger.trace_path().is_none());
        logger.log_tool_call("get_projects", &json!({"max_results": 25}));
    }

    #[test]
    fn test_trace_file_records_calls_and_results() {
        let path = std::env::temp_dir().join(format!(
            "zephyr_scale_mcp_trace_test_{}.log",
            std::process::id()
        ));
        let logger = DebugLogger::with_path(path.clone());
        assert_eq!(logger.trace_path(), Some(path.as_path()));

        logger.log_tool_call("get_folder", &json!({"folder_id": 7}));
        logger.log_tool_result("get_folder", &json!("{\"id\": 7}"));
        logger.log_error("update_status", "Invalid JSON format for status_data");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("TOOL CALL: get_folder | params: {\"folder_id\":7}"));
        assert!(contents.contains("TOOL RESULT: get_folder"));
        assert!(contents.contains("ERROR [update_status]: Invalid JSON format for status_data"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_truncate_json_respects_char_boundaries() {
        let value = json!("ééééé");
        let out = truncate_json(&value, 4);
        assert!(out.ends_with("...(truncated)"));
        assert!(out.starts_with("\"é"));

        assert_eq!(truncate_json(&json!({"a": 1}), 100), "{\"a\":1}");
    }
}
