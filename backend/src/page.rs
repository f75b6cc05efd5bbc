/// A freshly generated code, passed back into the page for the POST re-render.
pub struct GeneratedQr<'a> {
    pub text: &'a str,
    pub png_base64: &'a str,
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QR Code Generator</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            display: flex;
            justify-content: center;
            align-items: center;
            padding: 20px;
        }

        .container {
            background: white;
            padding: 40px;
            border-radius: 20px;
            box-shadow: 0 20px 60px rgba(0, 0, 0, 0.3);
            max-width: 500px;
            width: 100%;
        }

        h1 { color: #667eea; text-align: center; margin-bottom: 10px; font-size: 2em; }

        .subtitle { text-align: center; color: #666; margin-bottom: 30px; font-size: 0.9em; }

        .input-group { margin-bottom: 20px; }

        label { display: block; margin-bottom: 8px; color: #333; font-weight: 600; }

        input[type="text"] {
            width: 100%;
            padding: 12px 15px;
            border: 2px solid #e0e0e0;
            border-radius: 10px;
            font-size: 16px;
            transition: border-color 0.3s;
        }

        input[type="text"]:focus { outline: none; border-color: #667eea; }

        .btn {
            width: 100%;
            padding: 12px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            border: none;
            border-radius: 10px;
            font-size: 16px;
            font-weight: 600;
            cursor: pointer;
            transition: transform 0.2s;
        }

        .btn:hover { transform: translateY(-2px); }
        .btn:active { transform: translateY(0); }

        .qr-result { margin-top: 30px; text-align: center; animation: fadeIn 0.5s; }

        @keyframes fadeIn {
            from { opacity: 0; transform: translateY(10px); }
            to { opacity: 1; transform: translateY(0); }
        }

        .qr-image {
            background: white;
            padding: 20px;
            border-radius: 10px;
            display: inline-block;
            margin-bottom: 15px;
            box-shadow: 0 5px 15px rgba(0, 0, 0, 0.1);
        }

        .qr-image img { display: block; max-width: 100%; }

        .download-btn {
            display: inline-block;
            padding: 10px 30px;
            background: #4CAF50;
            color: white;
            text-decoration: none;
            border-radius: 8px;
            font-weight: 600;
            transition: background 0.3s;
        }

        .download-btn:hover { background: #45a049; }

        .loading { display: none; text-align: center; margin-top: 20px; color: #667eea; }
        .loading.show { display: block; }

        .error { margin-top: 20px; color: #c0392b; text-align: center; word-break: break-word; }
    </style>
</head>
<body>
    <div class="container">
        <h1>QR Code Generator</h1>
        <p class="subtitle">Turn any link into a QR code</p>
"#;

const PAGE_TAIL: &str = r#"    </div>

    <script>
        document.getElementById('qrForm').addEventListener('submit', function() {
            document.getElementById('loading').classList.add('show');
        });
    </script>
</body>
</html>
"#;

pub(crate) fn escape_html_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `/download` link for `text`, with the value form-urlencoded.
pub fn download_href(text: &str) -> String {
    // 单个字符串字段的序列化不会失败
    let query = serde_urlencoded::to_string(&[("url", text)]).unwrap_or_default();
    format!("/download?{query}")
}

fn push_form(out: &mut String, value: &str) {
    out.push_str(&format!(
        r#"        <form id="qrForm" method="POST" action="/generate">
            <div class="input-group">
                <label for="url">Enter a URL or link:</label>
                <input type="text" id="url" name="url" placeholder="https://example.com" value="{}" required>
            </div>
            <button type="submit" class="btn">Generate QR Code</button>
        </form>

        <div class="loading" id="loading">
            <p>Generating QR Code...</p>
        </div>
"#,
        escape_html_text(value)
    ));
}

fn push_result(out: &mut String, qr: &GeneratedQr<'_>) {
    out.push_str(&format!(
        r#"
        <div class="qr-result">
            <div class="qr-image">
                <img src="data:image/png;base64,{}" alt="QR Code">
            </div>
            <br>
            <a href="{}" class="download-btn">Download QR Code</a>
        </div>
"#,
        qr.png_base64,
        escape_html_text(&download_href(qr.text))
    ));
}

pub fn render_page(result: Option<&GeneratedQr<'_>>) -> String {
    let mut out = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + 1024);
    out.push_str(PAGE_HEAD);
    push_form(&mut out, result.map(|r| r.text).unwrap_or_default());
    if let Some(qr) = result {
        push_result(&mut out, qr);
    }
    out.push_str(PAGE_TAIL);
    out
}

/// Same layout as the form page, with an error message in place of the result.
/// `detail` is only shown when debug mode is on.
pub fn render_error_page(message: &str, detail: Option<&str>) -> String {
    let mut out = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + 512);
    out.push_str(PAGE_HEAD);
    push_form(&mut out, "");
    out.push_str(&format!(
        "        <p class=\"error\">{}</p>\n",
        escape_html_text(message)
    ));
    if let Some(detail) = detail {
        out.push_str(&format!(
            "        <pre class=\"error\">{}</pre>\n",
            escape_html_text(detail)
        ));
    }
    out.push_str(PAGE_TAIL);
    out
}
