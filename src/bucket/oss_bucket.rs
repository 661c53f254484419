use super::{GetBucketAcl, ListObjects};
use crate::{request::Oss, OssObject};

/// OSS存储空间，实现了文件列表、存储空间ACL等API
#[derive(Debug, Clone)]
pub struct OssBucket {
    pub(crate) oss: Oss,
}

impl OssBucket {
    pub(crate) fn new(mut oss: Oss, bucket: impl ToString, endpoint: impl ToString) -> Self {
        oss.set_bucket(bucket);
        oss.set_endpoint(endpoint);
        OssBucket { oss }
    }
    /// 设置自定义域名
    ///
    pub fn set_custom_domain(mut self, custom_domain: impl ToString, enable_https: bool) -> Self {
        self.oss.set_endpoint(custom_domain);
        self.oss.set_https(enable_https);
        self
    }
    /// 存储空间名称
    pub fn name(&self) -> &str {
        self.oss.bucket.as_deref().unwrap_or("")
    }
    /// 初始化OssObject
    pub fn object(&self, object: impl ToString) -> OssObject {
        OssObject::new(self.oss.clone(), object)
    }
    /// 查询存储空间中全部文件信息
    pub fn list_objects(&self) -> ListObjects {
        ListObjects::new(self.oss.clone())
    }
    /// 查询存储空间的ACL
    pub fn get_bucket_acl(&self) -> GetBucketAcl {
        GetBucketAcl::new(self.oss.clone())
    }
}
