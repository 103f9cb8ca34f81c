use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn generate_logo(workspace_json: &str, one_based_index: bool) -> Result<String, JsValue> {
    let options = crate::GeneratorOptions {
        one_based_index,
        ..crate::GeneratorOptions::default()
    };
    crate::generate_from_json(workspace_json, options).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

#[wasm_bindgen]
pub fn generate_logo_from_xml(workspace_xml: &str, one_based_index: bool) -> Result<String, JsValue> {
    let options = crate::GeneratorOptions {
        one_based_index,
        ..crate::GeneratorOptions::default()
    };
    crate::generate_from_xml(workspace_xml, options).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
