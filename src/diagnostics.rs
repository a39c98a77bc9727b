//! Tagged console diagnostics for the sync pipeline.

#[cfg(target_arch = "wasm32")]
pub fn log_sync(scope: &str, details: &str) {
    web_sys::console::log_1(&format_line(scope, details).into());
}

#[cfg(target_arch = "wasm32")]
pub fn log_sync_error(scope: &str, details: &str) {
    web_sys::console::error_1(&format_line(scope, details).into());
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(dead_code)]
pub fn log_sync(scope: &str, details: &str) {
    eprintln!("{}", format_line(scope, details));
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(dead_code)]
pub fn log_sync_error(scope: &str, details: &str) {
    eprintln!("{}", format_line(scope, details));
}

fn format_line(scope: &str, details: &str) -> String {
    if details.trim().is_empty() {
        format!("[sync] {scope}")
    } else {
        format!("[sync] {scope} | {details}")
    }
}
