use crate::{request::Oss, OssBucket};

/// OSS容器入口，持有AccessKey信息，通过 bucket 方法进入存储空间
#[derive(Debug, Clone)]
pub struct OssClient {
    pub(crate) oss: Oss,
}

impl OssClient {
    /// 初始化一个OssClient容器，以便后续使用
    ///
    /// - ak_id ： 阿里云AccessKey ID
    /// - ak_secret：阿里云AccessKey Secret
    ///
    pub fn new(ak_id: &str, ak_secret: &str) -> Self {
        OssClient {
            oss: Oss::new(ak_id, ak_secret),
        }
    }
    /// 设置STS临时凭证的security token
    pub fn set_security_token(mut self, security_token: impl ToString) -> Self {
        self.oss.set_security_token(security_token);
        self
    }
    /// 禁用https
    pub fn disable_https(mut self) -> Self {
        self.oss.set_https(false);
        self
    }
    /// 初始化OssBucket
    ///
    /// endpoint 为完整的访问域名，比如 oss-cn-beijing.aliyuncs.com
    pub fn bucket(&self, bucket: &str, endpoint: &str) -> OssBucket {
        OssBucket::new(self.oss.clone(), bucket, endpoint)
    }
    /// AccessKey ID
    pub fn access_key_id(&self) -> &str {
        &self.oss.ak_id
    }
}
