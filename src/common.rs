//! 公共数据定义
//!
//!
use chrono::DateTime;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

// -------------------------- 公共方法 --------------------------
//编码查询参数值
const URL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');
pub(crate) fn url_encode(input: &str) -> String {
    utf8_percent_encode(input, URL_ENCODE).to_string()
}

//编码签名值等不允许出现/的查询参数
const QUERY_ENCODE: &AsciiSet = &URL_ENCODE.add(b'/');
pub(crate) fn query_encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE).to_string()
}

// -------------------------- 公共数据 --------------------------

/// 访问权限ACL
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Acl {
    /// 仅用于文件ACL，代表文件ACL继承存储空间ACL
    #[serde(rename = "default")]
    Default,
    /// 私有，读写请求全部需要经过授权
    #[serde(rename = "private")]
    Private,
    /// 公共读，存储空间中的文件可以被匿名读取，但无法写入文件
    #[serde(rename = "public-read")]
    PublicRead,
    /// 公共读写，存储空间中的文件可以被匿名读取和写入
    #[serde(rename = "public-read-write")]
    PublicReadWrite,
}
impl fmt::Display for Acl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Acl::Default => "default",
            Acl::Private => "private",
            Acl::PublicRead => "public-read",
            Acl::PublicReadWrite => "public-read-write",
        };
        write!(f, "{}", value)
    }
}

///存储类型
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq)]
pub enum StorageClass {
    /// 标准存储
    Standard,
    /// 低频访问
    IA,
    /// 归档存储
    Archive,
    /// 冷归档存储
    ColdArchive,
    /// 深度冷归档存储
    DeepColdArchive,
}
impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageClass::Standard => f.write_str("Standard"),
            StorageClass::IA => f.write_str("IA"),
            StorageClass::Archive => f.write_str("Archive"),
            StorageClass::ColdArchive => f.write_str("ColdArchive"),
            StorageClass::DeepColdArchive => f.write_str("DeepColdArchive"),
        }
    }
}

/// http头，content-disposition
#[derive(Debug, Clone)]
pub enum ContentDisposition {
    Inline,
    Attachment,
    AttachmentWithNewName(String),
}
impl fmt::Display for ContentDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentDisposition::Inline => f.write_str("inline"),
            ContentDisposition::AttachmentWithNewName(file_name) => {
                let content_disposition_value = format!(
                    "attachment;filename=\"{0}\";filename*=UTF-8''{0}",
                    url_encode(file_name)
                );
                f.write_str(&content_disposition_value)
            }
            ContentDisposition::Attachment => f.write_str("attachment"),
        }
    }
}

/// 文件列表
#[derive(Debug, Deserialize, Default)]
pub struct ObjectsList {
    /// 本次查询使用的前缀
    #[serde(rename = "Prefix", default)]
    pub prefix: Option<String>,
    /// 本次查询使用的分组字符
    #[serde(rename = "Delimiter", default)]
    pub delimiter: Option<String>,
    /// 结果是否被截断
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
    /// 下一次查询使用的token
    #[serde(rename = "NextContinuationToken", default)]
    pub next_continuation_token: Option<String>,
    /// 文件信息
    #[serde(rename = "Contents", default)]
    pub contents: Vec<ObjectInfo>,
    /// 分组信息，即目录
    #[serde(rename = "CommonPrefixes", default)]
    pub common_prefixes: Vec<CommonPrefix>,
}

/// 文件信息
#[derive(Debug, Deserialize, Clone)]
pub struct ObjectInfo {
    /// 文件名，即完整路径
    #[serde(rename = "Key")]
    pub key: String,
    /// 最后修改时间，ISO8601格式
    #[serde(rename = "LastModified")]
    pub last_modified: String,
    /// ETag
    #[serde(rename = "ETag", default)]
    pub e_tag: String,
    /// 文件大小，单位字节
    #[serde(rename = "Size")]
    pub size: u64,
    /// 存储类型
    #[serde(rename = "StorageClass", default = "default_storage_class")]
    pub storage_class: StorageClass,
}

impl ObjectInfo {
    /// 最后修改时间的unix时间戳，解析失败时返回None
    pub fn last_modified_timestamp(&self) -> Option<i64> {
        DateTime::parse_from_rfc3339(&self.last_modified)
            .ok()
            .map(|date| date.timestamp())
    }
}

fn default_storage_class() -> StorageClass {
    StorageClass::Standard
}

/// 目录信息
#[derive(Debug, Deserialize, Clone)]
pub struct CommonPrefix {
    #[serde(rename = "Prefix")]
    pub prefix: String,
}
