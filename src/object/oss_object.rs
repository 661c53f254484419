use super::{GetObject, GetObjectUrl, HeadObject};
use crate::request::Oss;
use chrono::{DateTime, Utc};

/// OSS对象，实现了下载文件、获取文件元信息、生成访问url等API
#[derive(Debug, Clone)]
pub struct OssObject {
    pub(crate) oss: Oss,
}

impl OssObject {
    pub(crate) fn new(mut oss: Oss, object: impl ToString) -> Self {
        oss.set_object(object);
        OssObject { oss }
    }
    /// 下载文件
    pub fn get_object(&self) -> GetObject {
        GetObject::new(self.oss.clone())
    }
    /// 获取文件的元信息
    pub fn head_object(&self) -> HeadObject {
        HeadObject::new(self.oss.clone())
    }
    /// 获取文件的访问url，expires为url的过期时间
    pub fn get_object_url(&self, expires: DateTime<Utc>) -> GetObjectUrl {
        GetObjectUrl::new(self.oss.clone(), expires)
    }
}
