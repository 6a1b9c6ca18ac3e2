//! Conversions between core results and JavaScript values.

use heicmeta_core::MetadataError;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Serialize a value as a plain JavaScript object (maps become objects).
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

pub(crate) fn to_js_error(e: MetadataError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
