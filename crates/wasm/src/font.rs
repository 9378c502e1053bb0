//! Loads and registers the title web font.

use flow_title_core::error::TitleError;
use flow_title_core::FontSpec;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, FontFace, FontFaceDescriptors};

fn font_error(err: JsValue) -> TitleError {
    TitleError::FontLoad(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}

/// Fetches `spec` and adds it to `document.fonts` so canvas text can use it.
pub async fn load_font(document: &Document, spec: &FontSpec) -> Result<(), TitleError> {
    let descriptors = FontFaceDescriptors::new();
    descriptors.set_weight(&spec.weight);
    let face = FontFace::new_with_str_and_descriptors(&spec.family, &spec.source(), &descriptors)
        .map_err(font_error)?;
    let promise = face.load().map_err(font_error)?;
    JsFuture::from(promise).await.map_err(font_error)?;
    document.fonts().add(&face).map_err(font_error)?;
    log::info!("loaded font {} {}", spec.family, spec.weight);
    Ok(())
}
