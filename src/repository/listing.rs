//! 把OSS的文件列表转换为宿主的仓库列表格式

use crate::common::ObjectInfo;
use serde_derive::Serialize;

/// 列表中不展示的文件后缀，m3u8切片产生的ts文件
pub const EXCLUDED_EXTENSION: &str = "ts";

/// 缩略图尺寸
pub const THUMBNAIL_SIZE: u32 = 64;

/// 缩略图地址
pub trait IconResolver {
    /// 目录图标
    fn folder_icon(&self, size: u32) -> String;
    /// 按文件后缀选择的图标
    fn file_icon(&self, file_name: &str, size: u32) -> String;
}

/// 按宿主图标目录拼接地址，比如 {base_url}/f/folder-64.png
#[derive(Debug, Clone)]
pub struct PixIcons {
    base_url: String,
}

impl PixIcons {
    pub fn new(base_url: impl Into<String>) -> Self {
        PixIcons {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

impl Default for PixIcons {
    fn default() -> Self {
        PixIcons::new("/pix")
    }
}

impl IconResolver for PixIcons {
    fn folder_icon(&self, size: u32) -> String {
        format!("{}/f/folder-{}.png", self.base_url, size)
    }
    fn file_icon(&self, file_name: &str, size: u32) -> String {
        format!("{}/f/{}-{}.png", self.base_url, icon_family(file_name), size)
    }
}

// 根据mime类型归类图标
fn icon_family(file_name: &str) -> &'static str {
    let mime = match mime_guess::from_path(file_name).first() {
        Some(mime) => mime,
        None => return "unknown",
    };
    match (mime.type_().as_str(), mime.subtype().as_str()) {
        ("image", _) => "image",
        ("video", _) => "video",
        ("audio", _) => "audio",
        ("text", _) => "text",
        (_, "pdf") => "pdf",
        (_, sub) if sub.ends_with("mpegurl") => "video",
        (_, "zip") | (_, "gzip") | (_, "x-tar") | (_, "x-7z-compressed") => "archive",
        (_, sub) if sub.contains("rar") => "archive",
        (_, sub) if sub.contains("spreadsheet") || sub == "vnd.ms-excel" => "spreadsheet",
        (_, sub) if sub.contains("presentation") || sub == "vnd.ms-powerpoint" => "powerpoint",
        (_, sub) if sub.contains("wordprocessing") || sub == "msword" => "document",
        _ => "unknown",
    }
}

/// 列表中的一项，目录或者文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub title: String,
    /// 目录才有，始终为空，由宿主动态加载
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ListingEntry>>,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datemodified: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub thumbnail: String,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
}

impl ListingEntry {
    pub fn is_dir(&self) -> bool {
        self.children.is_some()
    }
}

/// 面包屑导航
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathCrumb {
    pub name: String,
    pub path: String,
}

/// 浏览结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub list: Vec<ListingEntry>,
    pub path: Vec<PathCrumb>,
    pub manage: bool,
    pub dynload: bool,
    pub nologin: bool,
    pub nosearch: bool,
}

impl Listing {
    /// 宿主需要的json格式
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// 搜索结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub list: Vec<ListingEntry>,
    pub dynload: bool,
    pub pages: u32,
    pub page: u32,
}

impl SearchResult {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// 路径的最后一段，目录的末尾/会被忽略
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    }
}

/// 文件后缀，不含点
pub fn extension(path: &str) -> Option<&str> {
    let name = basename(path);
    match name.rfind('.') {
        Some(index) if index + 1 < name.len() => Some(&name[index + 1..]),
        _ => None,
    }
}

/// 以/结尾的key是目录占位
pub fn is_directory_key(key: &str) -> bool {
    key.ends_with('/')
}

/// 是否从列表中排除
pub fn is_excluded(key: &str) -> bool {
    extension(key).map_or(false, |ext| ext.eq_ignore_ascii_case(EXCLUDED_EXTENSION))
}

/// 浏览路径转换为查询前缀，"" 和 "." 代表根目录
pub fn normalize_prefix(path: &str) -> Option<String> {
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() || path == "." {
        return None;
    }
    if path.ends_with('/') {
        Some(path.to_owned())
    } else {
        Some(format!("{}/", path))
    }
}

/// 从存储空间根目录到当前前缀的导航
pub fn breadcrumbs(bucket: &str, prefix: Option<&str>) -> Vec<PathCrumb> {
    let mut crumbs = vec![PathCrumb {
        name: bucket.to_owned(),
        path: String::new(),
    }];
    let mut current = String::new();
    for segment in prefix
        .unwrap_or("")
        .split('/')
        .filter(|segment| !segment.is_empty())
    {
        current.push_str(segment);
        current.push('/');
        crumbs.push(PathCrumb {
            name: segment.to_owned(),
            path: current.clone(),
        });
    }
    crumbs
}

/// 拆分 bucket/path/to/file 格式的路径
pub fn explode_path(path: &str) -> (String, String) {
    match path.split_once('/') {
        Some((bucket, uri)) => (bucket.to_owned(), uri.to_owned()),
        None => (path.to_owned(), String::new()),
    }
}

/// 超过最大长度时截断并加上省略号
pub fn short_filename(name: &str, max_length: usize) -> String {
    if name.chars().count() >= max_length {
        let truncated: String = name.chars().take(max_length).collect();
        format!("{}...", truncated.trim())
    } else {
        name.to_owned()
    }
}

pub fn directory_entry(prefix: &str, icons: &dyn IconResolver) -> ListingEntry {
    ListingEntry {
        title: basename(prefix).to_owned(),
        children: Some(Vec::new()),
        path: prefix.to_owned(),
        size: None,
        datemodified: None,
        source: None,
        thumbnail: icons.folder_icon(THUMBNAIL_SIZE),
        thumbnail_width: THUMBNAIL_SIZE,
        thumbnail_height: THUMBNAIL_SIZE,
    }
}

pub fn file_entry(object: &ObjectInfo, icons: &dyn IconResolver) -> ListingEntry {
    let title = basename(&object.key);
    ListingEntry {
        title: title.to_owned(),
        children: None,
        path: object.key.clone(),
        size: Some(object.size),
        datemodified: object.last_modified_timestamp(),
        source: Some(object.key.clone()),
        thumbnail: icons.file_icon(title, THUMBNAIL_SIZE),
        thumbnail_width: THUMBNAIL_SIZE,
        thumbnail_height: THUMBNAIL_SIZE,
    }
}

/// 文件对象转换为列表项，目录占位和排除的后缀返回None
pub fn object_entry(object: &ObjectInfo, icons: &dyn IconResolver) -> Option<ListingEntry> {
    if is_directory_key(&object.key) || is_excluded(&object.key) {
        None
    } else {
        Some(file_entry(object, icons))
    }
}
