//! 语言字符串，英文

const STRINGS: &[(&str, &str)] = &[
    ("access_key", "Access ID"),
    ("bucketname", "Bucket name"),
    ("cannotdownload", "Cannot download this file"),
    ("configplugin", "Aliyun OSS bucket settings"),
    ("duration", "Pre-Signed URL expiration time (in minutes)"),
    (
        "duration_help",
        "The time after which the Pre-Signed URL should expire (in minutes).",
    ),
    ("endpoint", "Endpoint"),
    (
        "errorwhilecommunicatingwith",
        "Error while communicating with the repository",
    ),
    ("m3u8_bucket", "Bucket holding m3u8 media"),
    (
        "needaccesskey",
        "Access key is required to connect to the OSS bucket",
    ),
    ("ossbucket:addinstance", "Add a new Aliyun OSS bucket instance"),
    ("ossbucket:view", "View Aliyun OSS bucket repository"),
    ("pluginname", "Aliyun OSS bucket"),
    ("pluginname_help", "Aliyun OSS bucket repository"),
    (
        "privacy:metadata",
        "The Aliyun OSS bucket repository plugin does not store any personal data, but can transmit files from the host to Aliyun OSS.",
    ),
    ("required", "Required"),
    ("secret_key", "Access Secret"),
    ("storageclass", "Storage class"),
    ("unknownsource", "Unknown source"),
    ("use_m3u8_bucket", "Use m3u8 media bucket"),
];

/// 查询语言字符串，未知的标识原样返回并加上方括号
pub fn get_string(key: &str) -> String {
    STRINGS
        .binary_search_by(|(k, _)| k.cmp(&key))
        .map(|index| STRINGS[index].1.to_owned())
        .unwrap_or_else(|_| format!("[[{}]]", key))
}
