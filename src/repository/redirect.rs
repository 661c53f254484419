use super::listing::{extension, is_directory_key};
use hyper::{header, Body, Response, StatusCode};

/// 转码媒体替换的源文件后缀
pub const M3U8_SOURCE_EXTENSION: &str = "mp4";

/// 指向签名url的跳转
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    pub fn new(location: impl Into<String>) -> Self {
        Redirect {
            location: location.into(),
        }
    }
    /// 转换为 302 响应
    pub fn into_response(self) -> Result<Response<Body>, hyper::http::Error> {
        Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, self.location)
            .header(header::CACHE_CONTROL, "no-store")
            .body(Body::empty())
    }
}

/// mp4文件对应的m3u8文件key，只替换末尾的后缀
pub fn m3u8_candidate(reference: &str) -> Option<String> {
    if is_directory_key(reference) {
        return None;
    }
    let ext = extension(reference)?;
    if !ext.eq_ignore_ascii_case(M3U8_SOURCE_EXTENSION) {
        return None;
    }
    let stem = &reference[..reference.len() - ext.len()];
    Some(format!("{}m3u8", stem))
}
