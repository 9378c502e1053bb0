//! Static HTML page that hosts the title.
//!
//! [`render_document`] produces the document head (title, meta tags, body
//! font) and embeds one child fragment verbatim in `<body>`. The child is
//! normally [`title_markup`] followed by [`bootstrap_script`].

use serde::{Deserialize, Serialize};

/// Inter, the proportional body font.
const BODY_FONT_STYLESHEET: &str =
    "https://fonts.googleapis.com/css2?family=Inter:wght@100..900&display=swap";

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub lang: String,
    pub title: String,
    pub charset: String,
    pub viewport: String,
    pub description: String,
    pub author: String,
    pub robots: String,
    pub theme_color: String,
    pub body_font: String,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            lang: "en".to_owned(),
            title: "0NLY AI".to_owned(),
            charset: "UTF-8".to_owned(),
            viewport: "width=device-width, initial-scale=1.0".to_owned(),
            description: "0NLY AI".to_owned(),
            author: "Tim Pietrusky".to_owned(),
            robots: "index, follow".to_owned(),
            theme_color: "#000000".to_owned(),
            body_font: "Inter".to_owned(),
        }
    }
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Full HTML5 document with `child` as the only body content.
pub fn render_document(meta: &PageMetadata, child: &str) -> String {
    let e = escape_html;
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<title>{title}</title>
<meta charset="{charset}">
<meta name="viewport" content="{viewport}">
<meta name="description" content="{description}">
<meta name="author" content="{author}">
<meta name="robots" content="{robots}">
<meta name="theme-color" content="{theme}">
<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
<link rel="stylesheet" href="{stylesheet}">
<style>html,body{{margin:0;background:#000;}}body{{font-family:"{font}",sans-serif;}}</style>
</head>
<body>
{child}
</body>
</html>
"#,
        lang = e(&meta.lang),
        title = e(&meta.title),
        charset = e(&meta.charset),
        viewport = e(&meta.viewport),
        description = e(&meta.description),
        author = e(&meta.author),
        robots = e(&meta.robots),
        theme = e(&meta.theme_color),
        stylesheet = e(BODY_FONT_STYLESHEET),
        font = e(&meta.body_font),
    )
}

/// Full-viewport black stage with a centered band, 30% of the height,
/// holding the title canvas.
pub fn title_markup(canvas_id: &str) -> String {
    format!(
        concat!(
            r#"<div style="position:relative;width:100%;height:100vh;background:#000;overflow:hidden;display:flex;align-items:center;justify-content:center">"#,
            r#"<div style="position:relative;width:100%;height:30%;display:flex;align-items:center;justify-content:center;overflow:hidden">"#,
            r#"<canvas id="{id}" style="width:100%;height:100%"></canvas>"#,
            "</div></div>"
        ),
        id = escape_html(canvas_id)
    )
}

/// ES module that loads the wasm bindings from `module_path` and mounts the
/// title on the canvas with id `canvas_id`.
pub fn bootstrap_script(module_path: &str, canvas_id: &str) -> String {
    let js_string = |s: &str| serde_json::Value::from(s).to_string().replace("</", "<\\/");
    format!(
        "<script type=\"module\">\nimport init, {{ mount_title }} from {module};\nawait init();\nwindow.flowTitle = mount_title(document.getElementById({id}));\n</script>",
        module = js_string(module_path),
        id = js_string(canvas_id),
    )
}
