//! 存储空间是用于存储文件（Object）的容器，所有的文件都必须隶属于某个存储空间。

#[doc(hidden)]
pub use self::oss_bucket::OssBucket;
pub use self::{get_bucket_acl::GetBucketAcl, list_objects::ListObjects};

mod get_bucket_acl;
mod list_objects;
mod oss_bucket;
