use crate::{
    error::parse_error,
    request::{Oss, OssRequest},
    Error,
};
use base64::{engine::general_purpose, Engine};
use bytes::Bytes;
use hyper::{Method, StatusCode};
use std::collections::HashMap;

/// 获取文件的元信息
///
/// 具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31984.html)
pub struct HeadObject {
    req: OssRequest,
}
impl HeadObject {
    pub(super) fn new(oss: Oss) -> Self {
        HeadObject {
            req: OssRequest::new(oss, Method::HEAD),
        }
    }
    /// 限制必须源文件的ETag值和提供的ETag相等
    ///
    pub fn set_if_match(mut self, if_match: impl ToString) -> Self {
        self.req.insert_header("If-Match", if_match);
        self
    }
    /// 发送请求
    ///
    pub async fn send(self) -> Result<HashMap<String, String>, Error> {
        //构建http请求
        let mut response = self.req.send_to_oss()?.await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let headers = response.headers_mut();
                headers.remove("server");
                headers.remove("date");
                headers.remove("connection");
                headers.remove("x-oss-request-id");
                headers.remove("accept-ranges");
                let result = headers
                    .iter()
                    .map(|(key, value)| {
                        let key = key.to_string();
                        let mut value = String::from_utf8(value.as_bytes().to_vec())
                            .unwrap_or_else(|_| String::new());
                        if &key == "etag" {
                            value = value.trim_matches('"').to_owned();
                        }
                        (key, value)
                    })
                    .collect::<HashMap<String, String>>();
                Ok(result)
            }
            _ => {
                //HEAD请求没有消息体，错误信息在x-oss-err头中
                let x_oss_error = response.headers().get("x-oss-err").and_then(|header| {
                    general_purpose::STANDARD.decode(header).ok().map(Bytes::from)
                });
                match x_oss_error {
                    None => Err(Error::OssInvalidError(status_code, Bytes::new())),
                    Some(response_bytes) => Err(parse_error(status_code, response_bytes)),
                }
            }
        }
    }
    /// 判断文件是否存在，文件不存在时返回false，其他错误原样返回
    pub async fn exists(self) -> Result<bool, Error> {
        match self.send().await {
            Ok(_) => Ok(true),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
