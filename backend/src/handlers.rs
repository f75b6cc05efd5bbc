use axum::extract::{Form, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::models::SharedState;
use crate::page::{render_error_page, render_page, GeneratedQr};
use crate::qr::{render_png, render_png_base64, QrRenderError};

pub const DOWNLOAD_FILENAME: &str = "qrcode.png";

#[derive(Deserialize)]
pub struct GenerateForm {
    pub url: String,
}

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub url: String,
}

/// 渲染失败时返回的错误页
pub struct ErrorPage {
    error: QrRenderError,
    debug: bool,
}

impl ErrorPage {
    fn new(error: QrRenderError, debug: bool) -> Self {
        Self { error, debug }
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let (status, message) = if self.error.is_input_too_long() {
            warn!("Rejected input: {}", self.error);
            (
                StatusCode::BAD_REQUEST,
                "The text is too long to fit in a QR code.",
            )
        } else {
            error!("Failed to generate QR code: {}", self.error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong while generating the QR code.",
            )
        };
        let detail = self.debug.then(|| self.error.to_string());
        (status, Html(render_error_page(message, detail.as_deref()))).into_response()
    }
}

pub async fn index_handler() -> Html<String> {
    Html(render_page(None))
}

pub async fn generate_handler(
    State(state): State<SharedState>,
    Form(form): Form<GenerateForm>,
) -> Result<Html<String>, ErrorPage> {
    debug!("Generating QR code for {} bytes of input", form.url.len());
    let png_base64 =
        render_png_base64(&form.url).map_err(|e| ErrorPage::new(e, state.debug))?;
    Ok(Html(render_page(Some(&GeneratedQr {
        text: &form.url,
        png_base64: &png_base64,
    }))))
}

pub async fn download_handler(
    State(state): State<SharedState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ErrorPage> {
    let png = render_png(&query.url).map_err(|e| ErrorPage::new(e, state.debug))?;
    debug!(
        "Serving {} ({} bytes) for {} bytes of input",
        DOWNLOAD_FILENAME,
        png.len(),
        query.url.len()
    );
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        png,
    )
        .into_response())
}
