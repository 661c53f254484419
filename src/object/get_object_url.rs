use crate::{
    common::ContentDisposition,
    request::{Oss, OssRequest},
};
use chrono::{DateTime, Utc};
use hyper::Method;

/// 获取文件的url
///
/// 私有文件可以通过此方法获取一个授权url，在过期时间之前可以直接下载此文件
///
/// 具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31952.html)
pub struct GetObjectUrl {
    req: OssRequest,
    expires: DateTime<Utc>,
}
impl GetObjectUrl {
    pub(super) fn new(oss: Oss, expires: DateTime<Utc>) -> Self {
        GetObjectUrl {
            req: OssRequest::new(oss, Method::GET),
            expires,
        }
    }
    /// 设置版本id
    ///
    /// 只有开启了版本控制时才需要设置
    ///
    pub fn set_version_id(mut self, version_id: impl ToString) -> Self {
        self.req.insert_query("versionId", version_id);
        self
    }
    /// 设置数据处理参数，比如图片缩放、视频截帧
    pub fn set_process(mut self, process: impl ToString) -> Self {
        self.req.insert_query("x-oss-process", process);
        self
    }
    /// 设置响应时的content-disposition
    ///
    pub fn set_response_content_disposition(
        mut self,
        content_disposition: ContentDisposition,
    ) -> Self {
        self.req
            .insert_query("response-content-disposition", content_disposition);
        self
    }
    /// 生成url
    ///
    pub fn build(mut self) -> String {
        self.req.query_sign(self.expires);
        self.req.uri()
    }
}
