//! # 工作区后端 API 客户端
//!
//! [`WorkspaceApi`] 描述会话核心依赖的全部后端接口，
//! [`HttpWorkspaceApi`] 是基于 `reqwest` 的实现。
//!
//! ## 约定
//! - 客户端只负责收发和解码，不解释 `status` 字段，业务判断由会话控制器完成
//! - 不设置超时、不重试：挂起的请求会一直等待，失败由用户重新触发
//! - HTTP 状态码不作为失败依据（与浏览器 fetch 一致），以响应体是否能解码为准
//! - 路径段做百分号编码，查询参数做 URL 编码
//! - 预览和导出地址只用于导航，客户端只负责拼出地址

use std::future::Future;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::models::project::{
    BundleSaveRequest, FileContentResponse, FileListResponse, InitResponse, ProjectConfig,
    ProjectListResponse, RunResponse, SaveFileRequest, StatusResponse,
};
use crate::models::settings::AppConfig;

/// 会话核心使用的后端接口
pub trait WorkspaceApi: Send + Sync {
    /// `POST /api/init`
    fn init_project(
        &self,
        config: &ProjectConfig,
    ) -> impl Future<Output = WorkspaceResult<InitResponse>> + Send;

    /// `GET /api/projects`
    fn list_projects(&self) -> impl Future<Output = WorkspaceResult<Vec<String>>> + Send;

    /// `GET /api/project/{name}/files`
    fn list_files(&self, project: &str)
    -> impl Future<Output = WorkspaceResult<Vec<String>>> + Send;

    /// `GET /api/file?project=&path=`
    fn read_file(
        &self,
        project: &str,
        path: &str,
    ) -> impl Future<Output = WorkspaceResult<FileContentResponse>> + Send;

    /// `POST /api/file`
    fn save_file(
        &self,
        request: &SaveFileRequest,
    ) -> impl Future<Output = WorkspaceResult<StatusResponse>> + Send;

    /// `POST /api/run/{project}`
    fn run_project(&self, project: &str)
    -> impl Future<Output = WorkspaceResult<RunResponse>> + Send;

    /// 三栏模式 `POST /save`，响应内容不解析
    fn save_bundle(
        &self,
        request: &BundleSaveRequest,
    ) -> impl Future<Output = WorkspaceResult<()>> + Send;

    /// `GET /api/preview/{project}` 的完整地址
    fn preview_url(&self, project: &str) -> WorkspaceResult<String>;

    /// `GET /api/export/{project}` 的完整地址
    fn export_url(&self, project: &str) -> WorkspaceResult<String>;

    /// 三栏模式 `GET /export/{name}` 的完整地址
    fn bundle_export_url(&self, name: &str) -> WorkspaceResult<String>;
}

/// 基于 reqwest 的后端客户端
#[derive(Debug, Clone)]
pub struct HttpWorkspaceApi {
    client: Client,
    base: Url,
}

impl HttpWorkspaceApi {
    /// 以后端根地址创建客户端
    ///
    /// # 错误
    /// 地址无法解析或不能作为根地址（如 `mailto:`）时返回 `Validation`
    pub fn new(base_url: &str) -> WorkspaceResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| WorkspaceError::Validation(format!("后端地址无效 {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(WorkspaceError::Validation(format!(
                "后端地址不能作为根地址: {}",
                base_url
            )));
        }
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    pub fn from_config(config: &AppConfig) -> WorkspaceResult<Self> {
        Self::new(&config.api_base_url)
    }

    /// 在根地址后追加路径段，每段单独做百分号编码
    ///
    /// 例如根地址 `http://host/` + `["api", "project", "my app", "files"]`
    /// → `http://host/api/project/my%20app/files`
    pub fn endpoint(&self, segments: &[&str]) -> WorkspaceResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| WorkspaceError::Validation("后端地址不能作为根地址".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> WorkspaceResult<T> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}

/// 解码 JSON 响应体；非 2xx 状态仅记录日志，能否解码才决定成败
async fn decode<T: DeserializeOwned>(response: Response) -> WorkspaceResult<T> {
    let status = response.status();
    if !status.is_success() {
        log::warn!("后端返回非成功状态码 {}: {}", status, response.url());
    }
    response
        .json::<T>()
        .await
        .map_err(|e| WorkspaceError::Network(format!("解析响应失败: {}", e)))
}

impl WorkspaceApi for HttpWorkspaceApi {
    async fn init_project(&self, config: &ProjectConfig) -> WorkspaceResult<InitResponse> {
        let url = self.endpoint(&["api", "init"])?;
        log::debug!("POST {}", url);
        let response = self.client.post(url).json(config).send().await?;
        decode(response).await
    }

    async fn list_projects(&self) -> WorkspaceResult<Vec<String>> {
        let url = self.endpoint(&["api", "projects"])?;
        let body: ProjectListResponse = self.get_json(url).await?;
        Ok(body.projects)
    }

    async fn list_files(&self, project: &str) -> WorkspaceResult<Vec<String>> {
        let url = self.endpoint(&["api", "project", project, "files"])?;
        let body: FileListResponse = self.get_json(url).await?;
        Ok(body.files)
    }

    async fn read_file(&self, project: &str, path: &str) -> WorkspaceResult<FileContentResponse> {
        let mut url = self.endpoint(&["api", "file"])?;
        url.query_pairs_mut()
            .append_pair("project", project)
            .append_pair("path", path);
        self.get_json(url).await
    }

    async fn save_file(&self, request: &SaveFileRequest) -> WorkspaceResult<StatusResponse> {
        let url = self.endpoint(&["api", "file"])?;
        log::debug!("POST {} ({})", url, request.path);
        let response = self.client.post(url).json(request).send().await?;
        decode(response).await
    }

    async fn run_project(&self, project: &str) -> WorkspaceResult<RunResponse> {
        let url = self.endpoint(&["api", "run", project])?;
        log::debug!("POST {}", url);
        let response = self.client.post(url).send().await?;
        decode(response).await
    }

    async fn save_bundle(&self, request: &BundleSaveRequest) -> WorkspaceResult<()> {
        let url = self.endpoint(&["save"])?;
        log::debug!("POST {} ({})", url, request.name);
        let response = self.client.post(url).json(request).send().await?;
        if !response.status().is_success() {
            log::warn!("保存接口返回状态码 {}，按成功处理", response.status());
        }
        Ok(())
    }

    fn preview_url(&self, project: &str) -> WorkspaceResult<String> {
        Ok(self.endpoint(&["api", "preview", project])?.to_string())
    }

    fn export_url(&self, project: &str) -> WorkspaceResult<String> {
        Ok(self.endpoint(&["api", "export", project])?.to_string())
    }

    fn bundle_export_url(&self, name: &str) -> WorkspaceResult<String> {
        Ok(self.endpoint(&["export", name])?.to_string())
    }
}
