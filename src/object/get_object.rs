use crate::{
    error::normal_error,
    request::{Oss, OssRequest},
    Error,
};
use bytes::Bytes;
use futures_util::StreamExt;
use hyper::{body::to_bytes, Method};
use std::path::Path;
use tokio::{
    fs::{create_dir_all, OpenOptions},
    io::{AsyncWriteExt, BufWriter},
};

/// 获取文件内容
///
/// 具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31980.html)
pub struct GetObject {
    req: OssRequest,
}
impl GetObject {
    pub(super) fn new(oss: Oss) -> Self {
        GetObject {
            req: OssRequest::new(oss, Method::GET),
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
    /// 设置响应时的range
    ///
    /// 文件字节索引是从0开始，例如文件大小是500字节，则索引范围为 0 - 499
    pub fn set_range(mut self, start: usize, end: usize) -> Self {
        self.req
            .insert_header("Range", format!("bytes={}-{}", start, end));
        self
    }
    /// 下载文件保存到磁盘，已存在的文件会被覆盖
    ///
    /// 不支持网络路径，如果需要保存到smb\nfs等网络存储，请先挂载到本地，再使用本地路径地址
    pub async fn download_to_file(self, save_path: impl AsRef<Path>) -> Result<u64, Error> {
        let save_path = save_path.as_ref();
        //判断路径
        if save_path.to_string_lossy().contains("://") {
            return Err(Error::PathNotSupported);
        }
        //发起请求
        let response = self.req.send_to_oss()?.await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                //创建目录
                if let Some(dir) = save_path.parent() {
                    create_dir_all(dir).await?;
                }
                //创建文件
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(save_path)
                    .await?;
                //创建写入缓冲区
                let mut writer = BufWriter::with_capacity(131072, file);
                let mut written = 0u64;
                //读取字节流
                let mut body = response.into_body();
                while let Some(chunk) = body.next().await {
                    let data = chunk?;
                    written += data.len() as u64;
                    writer.write_all(&data).await?;
                }
                writer.flush().await?;
                writer.shutdown().await?;
                Ok(written)
            }
            _ => Err(normal_error(response).await),
        }
    }
    /// 下载文件，直接将内容返回
    ///
    /// 如果文件较大，此方法可能占用过多内存，谨慎使用
    pub async fn download_to_buf(self) -> Result<Bytes, Error> {
        let response = self.req.send_to_oss()?.await?;
        let status_code = response.status();
        match status_code {
            code if code.is_success() => Ok(to_bytes(response.into_body()).await?),
            _ => Err(normal_error(response).await),
        }
    }
}
