use base64::Engine as _;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

/// 每个模块渲染成 10x10 像素
pub const MODULE_PIXELS: u32 = 10;
/// 四周留白（模块数），qrcode 对普通二维码固定为 4
pub const QUIET_ZONE_MODULES: u32 = 4;
pub const EC_LEVEL: EcLevel = EcLevel::L;

#[derive(Debug, thiserror::Error)]
pub enum QrRenderError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] QrError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

impl QrRenderError {
    pub fn is_input_too_long(&self) -> bool {
        matches!(self, QrRenderError::Encode(QrError::DataTooLong))
    }
}

/// Build the QR matrix for `text`. The smallest version that fits is chosen
/// automatically, starting from version 1.
pub fn encode(text: &str) -> Result<QrCode, QrError> {
    QrCode::with_error_correction_level(text.as_bytes(), EC_LEVEL)
}

/// Render `text` as a black-on-white grayscale PNG.
///
/// Output is deterministic: the same input always produces the same bytes,
/// which is what lets the inline image and the download share this path.
pub fn render_png(text: &str) -> Result<Vec<u8>, QrRenderError> {
    let code = encode(text)?;
    let img = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .build();

    let mut bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageLuma8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn render_png_base64(text: &str) -> Result<String, QrRenderError> {
    let bytes = render_png(text)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use qrcode::Color;

    /// Sample the centre of every module in a rendered PNG and compare the
    /// result with the matrix the library produces for `text`.
    pub(crate) fn assert_png_encodes(png: &[u8], text: &str) {
        let decoded = image::load_from_memory(png).unwrap().to_luma8();
        let code = encode(text).unwrap();
        let modules = code.width() as u32;
        let expected_side = (modules + 2 * QUIET_ZONE_MODULES) * MODULE_PIXELS;
        assert_eq!(decoded.width(), expected_side);
        assert_eq!(decoded.height(), expected_side);

        let colors = code.to_colors();
        for y in 0..modules {
            for x in 0..modules {
                let px = (x + QUIET_ZONE_MODULES) * MODULE_PIXELS + MODULE_PIXELS / 2;
                let py = (y + QUIET_ZONE_MODULES) * MODULE_PIXELS + MODULE_PIXELS / 2;
                let dark = decoded.get_pixel(px, py).0[0] < 128;
                let want = colors[(y * modules + x) as usize] == Color::Dark;
                assert_eq!(dark, want, "module ({x}, {y}) mismatch");
            }
        }
    }

    #[test]
    fn renders_example_url() {
        let png = render_png("https://example.com").unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
        assert_png_encodes(&png, "https://example.com");
    }

    #[test]
    fn short_input_fits_in_version_one() {
        let code = encode("hello").unwrap();
        assert_eq!(code.version(), qrcode::Version::Normal(1));
        assert_eq!(code.error_correction_level(), EcLevel::L);
    }

    #[test]
    fn version_grows_with_input() {
        let long = "https://example.com/".repeat(10);
        let code = encode(&long).unwrap();
        assert!(code.width() > 21);
        assert_png_encodes(&render_png(&long).unwrap(), &long);
    }

    #[test]
    fn quiet_zone_is_white() {
        let png = render_png("quiet").unwrap();
        let img = image::load_from_memory(&png).unwrap().to_luma8();
        let border = QUIET_ZONE_MODULES * MODULE_PIXELS;
        for i in 0..img.width() {
            for j in 0..border {
                assert_eq!(img.get_pixel(i, j).0[0], 255);
                assert_eq!(img.get_pixel(j, i).0[0], 255);
            }
        }
    }

    #[test]
    fn output_is_deterministic() {
        let a = render_png("https://example.com/a?b=c&d=e").unwrap();
        let b = render_png("https://example.com/a?b=c&d=e").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_ascii_input_is_encoded() {
        let text = "https://例え.jp/パス";
        assert_png_encodes(&render_png(text).unwrap(), text);
    }

    #[test]
    fn empty_input_still_renders() {
        let png = render_png("").unwrap();
        assert_png_encodes(&png, "");
    }

    #[test]
    fn oversized_input_is_rejected() {
        let text = "x".repeat(4000);
        let err = render_png(&text).unwrap_err();
        assert!(err.is_input_too_long());
    }

    #[test]
    fn base64_matches_raw_png() {
        let raw = render_png("https://example.com").unwrap();
        let b64 = render_png_base64("https://example.com").unwrap();
        let back = base64::engine::general_purpose::STANDARD.decode(b64).unwrap();
        assert_eq!(raw, back);
    }
}
