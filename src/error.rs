use bytes::Bytes;
use hyper::{body::to_bytes, Body, Response, StatusCode};
use serde_derive::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("不支持网络路径")]
    PathNotSupported,
    #[error("{0}")]
    HyperError(#[from] hyper::Error),
    #[error("{0}")]
    HttpError(#[from] hyper::http::Error),
    #[error("OSS返回了成功，但消息体解析失败，请自行解析")]
    OssInvalidResponse(Option<Bytes>),
    #[error("OSS返回了错误，HTTP状态码：{0}，错误内容：{1}")]
    OssError(StatusCode, OssError),
    #[error("OSS返回了错误，HTTP状态码：{0}，无法解析的错误内容：{1:?}")]
    OssInvalidError(StatusCode, Bytes),
}

impl Error {
    /// 返回OSS响应的HTTP状态码，非OSS响应错误时返回None
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::OssError(code, _) | Error::OssInvalidError(code, _) => Some(*code),
            _ => None,
        }
    }
}

/// OSS返回的错误信息
#[derive(Debug, Deserialize, Clone)]
pub struct OssError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "RequestId", default)]
    pub request_id: String,
    #[serde(rename = "HostId", default)]
    pub host_id: String,
}

impl fmt::Display for OssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

//解析OSS返回的错误消息体
pub(crate) async fn normal_error(response: Response<Body>) -> Error {
    let status_code = response.status();
    match to_bytes(response.into_body()).await {
        Err(_) => Error::OssInvalidError(status_code, Bytes::new()),
        Ok(response_bytes) => parse_error(status_code, response_bytes),
    }
}

pub(crate) fn parse_error(status_code: StatusCode, response_bytes: Bytes) -> Error {
    match serde_xml_rs::from_reader::<&[u8], OssError>(&response_bytes) {
        Ok(oss_error) => Error::OssError(status_code, oss_error),
        Err(_) => Error::OssInvalidError(status_code, response_bytes),
    }
}
