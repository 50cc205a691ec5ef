//! 测试替身：记录界面事件的 [`RecordingSink`] 和可编排响应的 [`FakeApi`]。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::models::project::{
    BundleSaveRequest, FileContentResponse, InitResponse, ProjectConfig, RunResponse,
    SaveFileRequest, StatusResponse,
};
use crate::models::ui::{UiEvent, UiSink};
use crate::services::api::WorkspaceApi;

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingSink {
    /// 取出并清空已记录的事件
    pub fn take(&self) -> Vec<UiEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    pub fn count(&self, pred: impl Fn(&UiEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl UiSink for RecordingSink {
    fn emit(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// 后端调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Init(ProjectConfig),
    ListProjects,
    ListFiles(String),
    ReadFile { project: String, path: String },
    SaveFile(SaveFileRequest),
    Run(String),
    SaveBundle(BundleSaveRequest),
}

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<ApiCall>>,
    init: Mutex<Option<WorkspaceResult<(String, Option<String>)>>>,
    projects: Mutex<Option<WorkspaceResult<Vec<String>>>>,
    files: Mutex<HashMap<String, Vec<String>>>,
    contents: Mutex<HashMap<(String, String), Option<String>>>,
    save_status: Mutex<Option<WorkspaceResult<String>>>,
    run: Mutex<Option<WorkspaceResult<RunResponse>>>,
    bundle: Mutex<Option<WorkspaceResult<()>>>,
    file_gates: Mutex<HashMap<String, Arc<Notify>>>,
    list_gates: Mutex<HashMap<String, Arc<Notify>>>,
    run_gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn with_init(self, status: &str, project: Option<&str>) -> Self {
        *self.init.lock().unwrap() = Some(Ok((status.into(), project.map(String::from))));
        self
    }

    pub fn with_init_error(self, error: WorkspaceError) -> Self {
        *self.init.lock().unwrap() = Some(Err(error));
        self
    }

    pub fn with_projects(self, projects: &[&str]) -> Self {
        *self.projects.lock().unwrap() =
            Some(Ok(projects.iter().map(|p| p.to_string()).collect()));
        self
    }

    pub fn with_projects_error(self, error: WorkspaceError) -> Self {
        *self.projects.lock().unwrap() = Some(Err(error));
        self
    }

    pub fn with_files(self, project: &str, files: &[&str]) -> Self {
        self.files.lock().unwrap().insert(
            project.into(),
            files.iter().map(|f| f.to_string()).collect(),
        );
        self
    }

    /// `content` 为 None 时模拟响应中缺少 `content` 字段
    pub fn with_content(self, project: &str, path: &str, content: Option<&str>) -> Self {
        self.contents
            .lock()
            .unwrap()
            .insert((project.into(), path.into()), content.map(String::from));
        self
    }

    pub fn with_save_status(self, status: &str) -> Self {
        *self.save_status.lock().unwrap() = Some(Ok(status.into()));
        self
    }

    pub fn with_save_error(self, error: WorkspaceError) -> Self {
        *self.save_status.lock().unwrap() = Some(Err(error));
        self
    }

    pub fn with_run(self, output: Option<&str>, error: Option<&str>) -> Self {
        *self.run.lock().unwrap() = Some(Ok(RunResponse {
            output: output.map(String::from),
            error: error.map(String::from),
        }));
        self
    }

    pub fn with_run_error(self, error: WorkspaceError) -> Self {
        *self.run.lock().unwrap() = Some(Err(error));
        self
    }

    pub fn with_bundle_error(self, error: WorkspaceError) -> Self {
        *self.bundle.lock().unwrap() = Some(Err(error));
        self
    }

    /// 让指定路径的文件读取挂起，直到返回的 Notify 被触发
    pub fn gate_file(&self, path: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.file_gates
            .lock()
            .unwrap()
            .insert(path.into(), gate.clone());
        gate
    }

    /// 让指定项目的文件列表请求挂起，直到返回的 Notify 被触发
    pub fn gate_list(&self, project: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.list_gates
            .lock()
            .unwrap()
            .insert(project.into(), gate.clone());
        gate
    }

    /// 让指定项目的运行请求挂起，直到返回的 Notify 被触发
    pub fn gate_run(&self, project: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.run_gates
            .lock()
            .unwrap()
            .insert(project.into(), gate.clone());
        gate
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn not_configured<T>(what: &str) -> WorkspaceResult<T> {
    Err(WorkspaceError::Network(format!("{} 未配置", what)))
}

impl WorkspaceApi for FakeApi {
    async fn init_project(&self, config: &ProjectConfig) -> WorkspaceResult<InitResponse> {
        self.record(ApiCall::Init(config.clone()));
        let scripted = self.init.lock().unwrap().clone();
        match scripted {
            Some(Ok((status, project))) => Ok(InitResponse { status, project }),
            Some(Err(e)) => Err(e),
            None => not_configured("init"),
        }
    }

    async fn list_projects(&self) -> WorkspaceResult<Vec<String>> {
        self.record(ApiCall::ListProjects);
        let scripted = self.projects.lock().unwrap().clone();
        scripted.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn list_files(&self, project: &str) -> WorkspaceResult<Vec<String>> {
        self.record(ApiCall::ListFiles(project.into()));
        let gate = self.list_gates.lock().unwrap().get(project).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let files = self.files.lock().unwrap().get(project).cloned();
        files.map(Ok).unwrap_or_else(|| not_configured("files"))
    }

    async fn read_file(&self, project: &str, path: &str) -> WorkspaceResult<FileContentResponse> {
        self.record(ApiCall::ReadFile {
            project: project.into(),
            path: path.into(),
        });
        let gate = self.file_gates.lock().unwrap().get(path).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let content = self
            .contents
            .lock()
            .unwrap()
            .get(&(project.to_string(), path.to_string()))
            .cloned();
        match content {
            Some(content) => Ok(FileContentResponse { content }),
            None => not_configured("file"),
        }
    }

    async fn save_file(&self, request: &SaveFileRequest) -> WorkspaceResult<StatusResponse> {
        self.record(ApiCall::SaveFile(request.clone()));
        let scripted = self.save_status.lock().unwrap().clone();
        match scripted {
            Some(Ok(status)) => Ok(StatusResponse { status }),
            Some(Err(e)) => Err(e),
            None => Ok(StatusResponse {
                status: "saved".into(),
            }),
        }
    }

    async fn run_project(&self, project: &str) -> WorkspaceResult<RunResponse> {
        self.record(ApiCall::Run(project.into()));
        let gate = self.run_gates.lock().unwrap().get(project).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let scripted = self.run.lock().unwrap().clone();
        scripted.unwrap_or_else(|| Ok(RunResponse::default()))
    }

    async fn save_bundle(&self, request: &BundleSaveRequest) -> WorkspaceResult<()> {
        self.record(ApiCall::SaveBundle(request.clone()));
        let scripted = self.bundle.lock().unwrap().clone();
        scripted.unwrap_or(Ok(()))
    }

    fn preview_url(&self, project: &str) -> WorkspaceResult<String> {
        Ok(format!("http://backend/api/preview/{}", project))
    }

    fn export_url(&self, project: &str) -> WorkspaceResult<String> {
        Ok(format!("http://backend/api/export/{}", project))
    }

    fn bundle_export_url(&self, name: &str) -> WorkspaceResult<String> {
        Ok(format!("http://backend/export/{}", name))
    }
}
