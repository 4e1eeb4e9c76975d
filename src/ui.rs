//! Playground UI 静态文件服务
//!
//! 页面在浏览器中加载推理库并直接运行，完成后把结果回报给 Operation Log API

use axum::{
    Router,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Json, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "web/"]
struct Assets;

/// 创建 UI 路由
///
/// 作为主应用的 fallback：`/api` 下未匹配的路径返回 JSON 404，
/// 其余路径先查找静态文件，找不到且不像文件名时回退到 `index.html`
pub fn create_ui_router() -> Router {
    Router::new().fallback(serve_asset)
}

async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if path == "api" || path.starts_with("api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "message": "Not Found" })),
        )
            .into_response();
    }

    let path = if path.is_empty() { "index.html" } else { path };
    if let Some(response) = embedded(path) {
        return response;
    }

    let looks_like_file = path.rsplit('/').next().is_some_and(|name| name.contains('.'));
    if looks_like_file {
        return StatusCode::NOT_FOUND.into_response();
    }

    embedded("index.html").unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

fn embedded(path: &str) -> Option<Response> {
    let file = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(([(header::CONTENT_TYPE, mime.as_ref().to_string())], file.data).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_embedded() {
        let index = Assets::get("index.html").expect("index.html 未嵌入");
        let html = String::from_utf8_lossy(&index.data);
        assert!(html.contains("/api/operations"));
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_404() {
        let response = serve_asset(Uri::from_static("/api/unknown")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_client_routes_fall_back_to_index() {
        let response = serve_asset(Uri::from_static("/history")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let response = serve_asset(Uri::from_static("/missing.js")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
