use facemap_shared::upload::UPLOAD_FIELD;
use facemap_shared::{
    AnalysisResult, AnalysisTransport, ApiConfig, ConfigSources, ImageSource, TransportError,
    UploadRequest,
};
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use std::future::Future;
use wasm_bindgen::JsValue;

/// A file picked or dropped by the user.
#[derive(Clone)]
pub struct BrowserImage(GlooFile);

impl From<GlooFile> for BrowserImage {
    fn from(file: GlooFile) -> Self {
        Self(file)
    }
}

impl ImageSource for BrowserImage {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.raw_mime_type()
    }

    fn size(&self) -> u64 {
        self.0.size()
    }
}

/// Posts the image as `multipart/form-data`; the browser fills in the
/// boundary.
pub struct GlooTransport;

impl AnalysisTransport for GlooTransport {
    type File = BrowserImage;

    fn analyze(
        &self,
        endpoint: &str,
        request: UploadRequest<BrowserImage>,
    ) -> impl Future<Output = Result<AnalysisResult, TransportError>> {
        let endpoint = endpoint.to_string();

        async move {
            let file = request.into_file().0;
            let form_data = web_sys::FormData::new().map_err(js_request_error)?;
            form_data
                .append_with_blob_and_filename(UPLOAD_FIELD, file.as_ref(), &file.name())
                .map_err(js_request_error)?;

            let response = Request::post(&endpoint)
                .body(form_data)
                .map_err(|e| TransportError::Request(e.to_string()))?
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;

            if !response.ok() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(TransportError::Status { status, body });
            }

            let text = response
                .text()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()))?;
            AnalysisResult::from_json(&text).map_err(|e| TransportError::Decode(e.to_string()))
        }
    }
}

fn js_request_error(err: JsValue) -> TransportError {
    TransportError::Request(format!("{:?}", err))
}

/// Resolves the analysis service address once, at startup.
pub fn load_config() -> ApiConfig {
    ApiConfig::resolve(&ConfigSources {
        runtime: runtime_api_url(),
        build_time: option_env!("FACEMAP_API_URL").map(str::to_string),
        production: !cfg!(debug_assertions),
    })
}

// `window.ENV.API_URL`, written by the container entrypoint into env-config.js.
fn runtime_api_url() -> Option<String> {
    let window = web_sys::window()?;
    let env = js_sys::Reflect::get(&window, &JsValue::from_str("ENV")).ok()?;
    if env.is_undefined() || env.is_null() {
        return None;
    }
    js_sys::Reflect::get(&env, &JsValue::from_str("API_URL"))
        .ok()?
        .as_string()
}
