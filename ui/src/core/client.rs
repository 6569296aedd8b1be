//! HTTP boundary for report submissions: one multipart POST per user action.
//! The exchange returns raw status + body; classification is the caller's
//! job (`core::submission`).

use std::fmt;

/// Path of the analysis endpoint, relative to the serving origin.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// A file the user picked, already read into memory by the file engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Raw result of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

#[derive(Debug)]
pub struct TransportError(reqwest::Error);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request failed: {}", self.0)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Post the selected file as the single `file` field of a multipart form.
pub async fn submit_report(file: SelectedFile) -> Result<HttpReply, TransportError> {
    let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.name);
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = reqwest::Client::new()
        .post(analyze_url())
        .multipart(form)
        .send()
        .await
        .map_err(TransportError)?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(TransportError)?;
    Ok(HttpReply { status, body })
}

/// On the web the endpoint is origin-relative; natively (tests, tooling) it
/// defaults to a local service.
fn analyze_url() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let origin = web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default();
        format!("{origin}{ANALYZE_PATH}")
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        format!("http://127.0.0.1:8080{ANALYZE_PATH}")
    }
}
