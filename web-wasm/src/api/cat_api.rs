//! TheCatAPI連携（ブラウザ fetch）

use cat_discovery_common::{
    API_KEY_HEADER, Candidate, CandidateSource, DEFAULT_API_BASE, FetchError, search_url,
    take_first,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ビルド時に `CAT_API_KEY` が設定されていればヘッダーに付与する
const BUILD_API_KEY: Option<&str> = option_env!("CAT_API_KEY");

pub struct CatApi {
    search_url: String,
    api_key: Option<String>,
}

impl Default for CatApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, BUILD_API_KEY.map(str::to_string))
    }
}

impl CatApi {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            search_url: search_url(base_url),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

impl CandidateSource for CatApi {
    async fn fetch_candidate(&self) -> Result<Candidate, FetchError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(&self.search_url, &opts).map_err(transport)?;
        if let Some(key) = &self.api_key {
            request
                .headers()
                .set(API_KEY_HEADER, key)
                .map_err(transport)?;
        }

        let window = web_sys::window()
            .ok_or_else(|| FetchError::Transport("window is not available".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let resp: Response = resp_value.dyn_into().map_err(transport)?;

        if !resp.ok() {
            return Err(FetchError::Status(resp.status()));
        }

        let json = JsFuture::from(resp.json().map_err(decode)?)
            .await
            .map_err(decode)?;
        let candidates: Vec<Candidate> = serde_wasm_bindgen::from_value(json)
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        take_first(candidates)
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn transport(value: JsValue) -> FetchError {
    FetchError::Transport(js_message(&value))
}

fn decode(value: JsValue) -> FetchError {
    FetchError::Decode(js_message(&value))
}
