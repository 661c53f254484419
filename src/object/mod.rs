//! 对象是 OSS 存储数据的基本单元，对象由元信息、用户数据和文件名（Key）组成，对象由存储空间内部唯一的Key来标识。

pub use self::get_object::GetObject;
pub use self::get_object_url::GetObjectUrl;
pub use self::head_object::HeadObject;
#[doc(hidden)]
pub use self::oss_object::OssObject;

mod get_object;
mod get_object_url;
mod head_object;
mod oss_object;
