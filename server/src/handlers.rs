//! HTTP handlers for the QR label endpoints.

use axum::Json;
use axum::extract::State;
use axum::response::Html;
use serde::Deserialize;
use serde_json::{Value, json};

use label_engine::{LabelError, RenderedLabel, encode_png, to_data_uri};

use crate::config::ServerConfig;

const DEFAULT_SIZE_MM: f64 = 30.0;

type ApiResult = Result<Json<Value>, (axum::http::StatusCode, Json<Value>)>;

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> (axum::http::StatusCode, Json<Value>) {
    (
        axum::http::StatusCode::from_u16(status)
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "error": message })),
    )
}

/// POST /qr-gen/generate request body.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub admission_number: String,
    pub size: Option<f64>,
    pub label_size: Option<String>,
}

/// GET /qr-gen – generator page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// GET /qr-gen/health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// POST /qr-gen/generate – render a QR label and return it as a data URI
pub async fn generate(
    State(config): State<ServerConfig>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult {
    match render_label(&config, &req) {
        Ok(body) => Ok(Json(body)),
        Err(e) if e.is_invalid_input() => {
            tracing::debug!(error = %e, "Rejected label request");
            Err(err_json(400, &e.to_string()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Label rendering failed");
            Err(err_json(500, &e.to_string()))
        }
    }
}

fn render_label(config: &ServerConfig, req: &GenerateRequest) -> Result<Value, LabelError> {
    let admission_number = validate_request(req)?;

    let rendered = match req.label_size.as_deref() {
        Some(key) => {
            let font_data = label_engine::font::load_font_data(config.font_path.as_deref())?;
            let font = label_engine::font::parse_font(&font_data)?;
            label_engine::render_thermal(admission_number, key, &font)?
        }
        None => {
            label_engine::render_plain(admission_number, req.size.unwrap_or(DEFAULT_SIZE_MM))?
        }
    };

    response_body(req, admission_number, &rendered)
}

/// Reject bad input before any filesystem or rendering work happens.
fn validate_request(req: &GenerateRequest) -> Result<&str, LabelError> {
    let admission_number = req.admission_number.trim();
    if admission_number.is_empty() {
        return Err(LabelError::InvalidInput(
            "Admission number is required".to_string(),
        ));
    }
    if let Some(key) = req.label_size.as_deref() {
        label_engine::resolve_preset(key)?;
    }
    Ok(admission_number)
}

fn response_body(
    req: &GenerateRequest,
    admission_number: &str,
    rendered: &RenderedLabel,
) -> Result<Value, LabelError> {
    let png = encode_png(&rendered.image, rendered.dpi)?;

    let mut body = serde_json::Map::new();
    body.insert("success".to_string(), json!(true));
    body.insert("image".to_string(), json!(to_data_uri(&png)));
    body.insert("admission_number".to_string(), json!(admission_number));
    body.insert("dpi".to_string(), json!(rendered.dpi));
    body.insert("width_px".to_string(), json!(rendered.width_px));
    body.insert("height_px".to_string(), json!(rendered.height_px));
    match (&req.label_size, &rendered.label_text) {
        (Some(key), Some(text)) => {
            body.insert("label_size".to_string(), json!(key));
            body.insert("label_text".to_string(), json!(text));
        }
        _ => {
            body.insert(
                "size_mm".to_string(),
                json!(req.size.unwrap_or(DEFAULT_SIZE_MM)),
            );
        }
    }

    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(admission: &str, size: Option<f64>, label_size: Option<&str>) -> GenerateRequest {
        GenerateRequest {
            admission_number: admission.to_string(),
            size,
            label_size: label_size.map(str::to_string),
        }
    }

    #[test]
    fn empty_admission_number_is_rejected() {
        let err = validate_request(&request("", None, None)).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "Admission number is required");
    }

    #[test]
    fn whitespace_admission_number_is_rejected_for_any_size() {
        for label in [None, Some("60x40"), Some("40x30")] {
            let err = validate_request(&request("   ", Some(25.0), label)).unwrap_err();
            assert!(err.is_invalid_input());
            assert!(err.to_string().contains("Admission number is required"));
        }
    }

    #[test]
    fn unknown_label_size_is_rejected_before_rendering() {
        let err = validate_request(&request("A123", None, Some("99x99"))).unwrap_err();
        assert!(err.is_invalid_input());
        let msg = err.to_string();
        assert!(msg.contains("60x40") && msg.contains("40x30"));
    }

    #[test]
    fn valid_request_passes_validation_trimmed() {
        let req = request(" A123 ", None, Some("60x40"));
        let id = validate_request(&req).unwrap();
        assert_eq!(id, "A123");
    }

    #[test]
    fn general_mode_renders_full_response() {
        let config = ServerConfig::default();
        let body = render_label(&config, &request("A123", Some(30.0), None)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["admission_number"], "A123");
        assert_eq!(body["dpi"], 300);
        assert_eq!(body["width_px"], 354);
        assert_eq!(body["height_px"], 354);
        assert_eq!(body["size_mm"], 30.0);
        assert!(
            body["image"]
                .as_str()
                .unwrap()
                .starts_with("data:image/png;base64,")
        );
    }

    #[test]
    fn general_mode_oversized_request_is_a_client_error() {
        let config = ServerConfig::default();
        let err = render_label(&config, &request("A1", Some(100_000.0), None)).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn general_mode_defaults_to_30mm() {
        let config = ServerConfig::default();
        let body = render_label(&config, &request("A123", None, None)).unwrap();
        assert_eq!(body["width_px"], 354);
        assert_eq!(body["size_mm"], 30.0);
    }

    #[test]
    fn thermal_mode_reports_label_metadata() {
        let config = ServerConfig::default();
        // Needs a system font; skip quietly where none is installed.
        if label_engine::font::load_font_data(None).is_err() {
            return;
        }
        let body = render_label(&config, &request("A123", None, Some("60x40"))).unwrap();
        assert_eq!(body["dpi"], 203);
        assert_eq!(body["width_px"], 480);
        assert_eq!(body["height_px"], 320);
        assert_eq!(body["label_size"], "60x40");
        assert_eq!(body["label_text"], "WCN26F-A123");
    }

    #[test]
    fn err_json_maps_status_codes() {
        let (status, body) = err_json(400, "bad input");
        assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(body.0["error"], "bad input");
    }
}
