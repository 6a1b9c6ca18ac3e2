//! heicmeta WASM - WebAssembly bindings for heicmeta
//!
//! This crate exposes the pure-Rust parts of heicmeta-core to
//! JavaScript/TypeScript. Container parsing stays on the JavaScript side;
//! metadata items are passed in as bytes.
//!
//! # Module Structure
//!
//! - `decode` - XMP property-list and Exif decoding of single payloads
//! - `types` - `JsMetadataSet`, an in-memory metadata set with enumeration
//! - `convert` - Result and error conversion to JavaScript values
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsMetadataSet } from '@heicmeta/wasm';
//!
//! await init();
//!
//! const set = new JsMetadataSet();
//! const id = set.push_mime('application/rdf+xml', xmpBytes);
//! console.log(set.apple_time(id));
//! ```

use wasm_bindgen::prelude::*;

mod convert;
mod decode;
mod types;

#[cfg(all(test, target_arch = "wasm32"))]
mod fixtures;

// Re-export public types
pub use decode::{
    decode_apple_solar, decode_apple_time, decode_solar_schedule, decode_time_schedule,
    decode_xmp_plist, exif_summary, strip_nul_bytes,
};
pub use types::JsMetadataSet;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
