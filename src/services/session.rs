//! # 项目会话控制器
//!
//! 持有当前视图、项目、文件选择、文件浏览器、编辑器适配器和主题，
//! 编排对工作区后端的初始化/加载/保存/运行/导出调用，并驱动界面更新。
//!
//! ## 状态与并发
//! - 会话状态是单写者对象，放在 `std::sync::Mutex` 中；锁只在同步片段内持有，
//!   **绝不跨越 `.await`**，因此多个请求可以同时在途
//! - 不做去重、取消或超时：连续点击保存会发出多个请求
//! - 每个请求在发出时记录目标（项目、项目纪元、文件路径、票据），
//!   响应到达时只有仍与当前会话匹配才会应用，否则丢弃并记录 debug 日志
//!
//! ## 视图状态机
//! `Initializer`（初始）→ 初始化成功 / 打开项目 → `Ide`；"返回"动作 → `Initializer`。
//! 每次切换到 `Ide` 都会先刷新编辑器布局，再更新预览。
//!
//! ## 错误处理
//! - 初始化、保存、运行失败：短暂通知（运行失败写入控制台）
//! - 项目列表、文件列表、文件加载失败：仅记录日志，界面无变化
//! - 任何失败都不修改会话状态

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::models::project::{Project, ProjectConfig, STATUS_SAVED, STATUS_SUCCESS, SaveFileRequest};
use crate::models::ui::{ConsoleTag, NotificationLevel, Theme, UiEvent, UiSink, View};
use crate::services::api::WorkspaceApi;
use crate::services::editor::{EditorAdapter, drives_preview};
use crate::services::file_browser::FileBrowser;
use crate::services::preferences::{PreferenceStore, THEME_KEY};
use crate::services::preview;

/// 运行项目时控制台的第一行
pub const RUNNING_BANNER: &str = "Running project...";

/// 运行结果因项目已切换而被丢弃时追加的提示行
pub const RUN_DISCARDED: &str = "Run result discarded: project changed";

/// 会话状态
///
/// 不变量：只有属于当前项目的文件才能成为激活文件；切换项目时清除激活文件并销毁编辑器实例。
#[derive(Debug, Default)]
pub struct SessionState {
    view: View,
    project: Option<String>,
    /// 每次切换项目递增，用于识别过期的文件列表和运行结果
    project_epoch: u64,
    file: Option<String>,
    /// 最新一次文件加载请求的票据
    file_ticket: u64,
    /// 每次视图切换动作（打开项目、返回）递增；进行中的打开只有在其间没有新动作时才切换视图
    view_epoch: u64,
    browser: FileBrowser,
    editor: EditorAdapter,
    theme: Theme,
}

/// 文件加载请求在发出时记录的目标
#[derive(Debug, Clone)]
struct FileRequestTag {
    project: String,
    epoch: u64,
    path: String,
    ticket: u64,
}

impl SessionState {
    fn is_current_project(&self, project: &str, epoch: u64) -> bool {
        self.project_epoch == epoch && self.project.as_deref() == Some(project)
    }

    fn matches_file_request(&self, tag: &FileRequestTag) -> bool {
        self.is_current_project(&tag.project, tag.epoch) && self.file_ticket == tag.ticket
    }
}

/// 会话状态的只读快照，用于 IPC 查询和测试断言
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub view: View,
    pub project: Option<String>,
    pub file: Option<String>,
    pub files: Vec<String>,
    pub theme: Theme,
    pub editor_instance: Option<u64>,
    pub buffer: Option<String>,
}

/// 项目会话控制器
///
/// 泛型参数：
/// - `A` - 后端 API（生产中为 `HttpWorkspaceApi`）
/// - `U` - 界面事件接收端
/// - `P` - 主题偏好存储
pub struct SessionController<A, U, P> {
    api: A,
    ui: U,
    prefs: P,
    state: Mutex<SessionState>,
}

impl<A, U, P> SessionController<A, U, P>
where
    A: WorkspaceApi,
    U: UiSink,
    P: PreferenceStore,
{
    pub fn new(api: A, ui: U, prefs: P) -> Self {
        Self {
            api,
            ui,
            prefs,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    /// 锁中毒时继续使用内部数据：会话状态的每次修改都是完整的同步片段
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let s = self.lock();
        SessionSnapshot {
            view: s.view,
            project: s.project.clone(),
            file: s.file.clone(),
            files: s.browser.entries().to_vec(),
            theme: s.theme,
            editor_instance: s.editor.instance_id(),
            buffer: s.editor.value().map(String::from),
        }
    }

    // ======== 启动与视图 ========

    /// 应用启动流程：恢复主题偏好、显示初始化视图、加载项目列表
    pub async fn bootstrap(&self) {
        let theme = match self.prefs.get(THEME_KEY).await {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
                log::warn!("未知的主题偏好值 {:?}，使用默认主题", value);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("读取主题偏好失败，使用默认主题: {}", e);
                Theme::default()
            }
        };

        let view = {
            let mut s = self.lock();
            s.theme = theme;
            s.view
        };
        self.ui.emit(UiEvent::theme(theme));
        self.ui.emit(UiEvent::ShowView { view });

        self.list_projects().await;
    }

    /// "返回"/"新建项目"动作：切回初始化视图并重新加载项目列表
    pub async fn show_initializer(&self) {
        {
            let mut s = self.lock();
            s.view = View::Initializer;
            s.view_epoch += 1;
        }
        self.ui.emit(UiEvent::ShowView {
            view: View::Initializer,
        });
        self.list_projects().await;
    }

    /// 切换到 IDE 视图
    ///
    /// 编辑器在隐藏期间会测量错误，因此切换后先刷新编辑器，再更新预览。
    fn show_ide(&self) {
        let mut s = self.lock();
        s.view = View::Ide;
        self.ui.emit(UiEvent::ShowView { view: View::Ide });
        s.editor.refresh(&self.ui);
        self.render_preview(&s);
    }

    // ======== 项目 ========

    /// 获取所有项目名称并推送为下拉框候选项
    ///
    /// 失败只记录日志，按空列表处理，不向用户报错。
    pub async fn list_projects(&self) -> Vec<String> {
        let projects = match self.api.list_projects().await {
            Ok(projects) => projects,
            Err(e) => {
                log::error!("加载项目列表失败: {}", e);
                Vec::new()
            }
        };
        self.ui.emit(UiEvent::ProjectOptions {
            projects: projects.clone(),
        });
        projects
    }

    /// 初始化新项目
    ///
    /// 成功时记录项目、加载文件列表（并打开第一个文件）、切换到 IDE 视图并提示成功；
    /// 失败时提示错误，视图保持不变。
    ///
    /// # 错误
    /// - `Validation` - 项目名不合法，请求不会发出
    /// - `Network` - 请求失败
    /// - `Application` - `status` 不是 `"success"`
    /// - `MissingData` - 成功响应中缺少 `project`
    pub async fn initialize(&self, config: &ProjectConfig) -> WorkspaceResult<Project> {
        let result = self.try_initialize(config).await;
        match &result {
            Ok(project) => {
                log::info!("项目初始化成功: {}", project.name);
                self.ui.emit(UiEvent::notify(
                    NotificationLevel::Success,
                    "Project initialized successfully!",
                ));
            }
            Err(e) => {
                log::warn!("项目初始化失败: {}", e);
                self.ui.emit(UiEvent::notify(
                    NotificationLevel::Error,
                    format!("Failed to initialize project: {}", e),
                ));
            }
        }
        result
    }

    async fn try_initialize(&self, config: &ProjectConfig) -> WorkspaceResult<Project> {
        let config = config.validated()?;
        let response = self.api.init_project(&config).await?;

        if response.status != STATUS_SUCCESS {
            return Err(WorkspaceError::Application(response.status));
        }
        let name = response
            .project
            .filter(|p| !p.is_empty())
            .ok_or(WorkspaceError::MissingData("project"))?;

        self.enter_project(&name).await;
        Ok(Project { name, config })
    }

    /// 打开已有项目；空名称（下拉框未选择）时什么都不做
    pub async fn open_project(&self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.enter_project(name).await;
    }

    async fn enter_project(&self, name: &str) {
        let (epoch, view_epoch) = self.select_project(name);
        self.load_project_files(name, epoch).await;

        // 期间又切换了项目或返回了初始化视图：由更新的那次动作决定视图
        let still_current = {
            let s = self.lock();
            s.is_current_project(name, epoch) && s.view_epoch == view_epoch
        };
        if still_current {
            self.show_ide();
        }
    }

    /// 设为当前项目：清除激活文件、销毁编辑器、清空文件列表
    ///
    /// # 返回值
    /// `(项目纪元, 视图纪元)`
    fn select_project(&self, name: &str) -> (u64, u64) {
        let mut s = self.lock();
        s.project_epoch += 1;
        s.view_epoch += 1;
        s.project = Some(name.to_string());
        s.file = None;
        s.editor.teardown(&self.ui);
        s.browser.clear(&self.ui);
        self.ui.emit(UiEvent::ActiveFile { path: None });
        (s.project_epoch, s.view_epoch)
    }

    async fn load_project_files(&self, project: &str, epoch: u64) {
        let files = match self.api.list_files(project).await {
            Ok(files) => files,
            Err(e) => {
                log::error!("加载项目 {} 的文件列表失败: {}", project, e);
                return;
            }
        };

        let first = {
            let mut s = self.lock();
            if !s.is_current_project(project, epoch) {
                log::debug!("丢弃过期的文件列表响应: {}", project);
                return;
            }
            s.browser.set_entries(files, &self.ui);
            s.browser.first().map(String::from)
        };

        if let Some(first) = first {
            self.open_file(&first).await;
        }
    }

    // ======== 文件 ========

    /// 打开当前项目中的文件
    ///
    /// 成功时以新内容和模式重新绑定编辑器，并标记激活文件和激活标签页。
    /// 没有激活项目、请求失败、响应缺少 `content` 或响应已过期时，会话状态不变。
    pub async fn open_file(&self, path: &str) {
        let tag = {
            let mut s = self.lock();
            let Some(project) = s.project.clone() else {
                log::debug!("没有激活项目，忽略打开文件: {}", path);
                return;
            };
            s.file_ticket += 1;
            FileRequestTag {
                project,
                epoch: s.project_epoch,
                path: path.to_string(),
                ticket: s.file_ticket,
            }
        };

        let response = match self.api.read_file(&tag.project, &tag.path).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("加载文件 {} 失败: {}", tag.path, e);
                return;
            }
        };
        let Some(content) = response.content else {
            log::warn!("文件 {} 的响应缺少 content 字段", tag.path);
            return;
        };

        let mut s = self.lock();
        if !s.matches_file_request(&tag) {
            log::debug!("丢弃过期的文件响应: {}/{}", tag.project, tag.path);
            return;
        }
        s.file = Some(tag.path.clone());
        s.editor.bind(&content, &tag.path, &self.ui);
        s.browser.mark_active(&tag.path, &self.ui);
        self.ui.emit(UiEvent::ActiveFile {
            path: Some(tag.path),
        });
    }

    /// 保存激活文件（内容取自编辑器实时缓冲区）
    ///
    /// 没有激活文件时不发出任何请求。结果只以通知形式报告，不修改文件列表。
    pub async fn save_active_file(&self) {
        let request = {
            let s = self.lock();
            match (&s.project, &s.file, s.editor.value()) {
                (Some(project), Some(path), Some(content)) => SaveFileRequest {
                    project: project.clone(),
                    path: path.clone(),
                    content: content.to_string(),
                },
                _ => {
                    log::debug!("没有激活文件，跳过保存");
                    return;
                }
            }
        };

        match self.api.save_file(&request).await {
            Ok(response) if response.status == STATUS_SAVED => {
                log::info!("已保存 {}/{}", request.project, request.path);
                self.ui.emit(UiEvent::notify(
                    NotificationLevel::Success,
                    "File saved successfully!",
                ));
            }
            Ok(response) => {
                log::warn!("保存 {} 返回状态 {:?}", request.path, response.status);
                self.ui.emit(UiEvent::notify(
                    NotificationLevel::Error,
                    format!("Failed to save file: {}", request.path),
                ));
            }
            Err(e) => {
                log::error!("保存 {} 失败: {}", request.path, e);
                self.ui.emit(UiEvent::notify(
                    NotificationLevel::Error,
                    "Failed to save file",
                ));
            }
        }
    }

    /// 编辑器组件的输入回传
    ///
    /// 激活文件是 HTML/CSS/JS 时，每次输入恰好触发一次预览更新。
    pub fn editor_input(&self, instance: u64, content: String) {
        let mut s = self.lock();
        if !s.editor.apply_input(instance, content) {
            return;
        }
        if s.file.as_deref().is_some_and(drives_preview) {
            self.render_preview(&s);
        }
    }

    // ======== 预览、运行、导出 ========

    /// 显式刷新预览
    pub fn refresh_preview(&self) {
        let s = self.lock();
        self.render_preview(&s);
    }

    fn render_preview(&self, s: &SessionState) {
        let endpoint = || {
            let project = s.project.as_deref()?;
            self.api
                .preview_url(project)
                .map_err(|e| log::error!("生成预览地址失败: {}", e))
                .ok()
        };
        if let Some(target) = preview::project_target(
            s.project.is_some(),
            s.file.as_deref(),
            s.editor.value(),
            endpoint,
        ) {
            target.render(&self.ui);
        }
    }

    /// 运行当前项目，把输出追加到控制台
    ///
    /// 先清空控制台，`output` 以成功标记追加、`error` 以错误标记追加（两者都有时先 output）；
    /// 请求失败追加一行错误。结果到达时已切换项目则丢弃，只追加一行提示，
    /// 控制台不会停留在运行中的状态。
    pub async fn run(&self) {
        let (project, epoch) = {
            let s = self.lock();
            match &s.project {
                Some(project) => (project.clone(), s.project_epoch),
                None => return,
            }
        };

        self.ui.emit(UiEvent::ConsoleClear {
            banner: RUNNING_BANNER.to_string(),
        });

        let result = self.api.run_project(&project).await;
        if !self.lock().is_current_project(&project, epoch) {
            log::debug!("丢弃过期的运行结果: {}", project);
            self.ui.emit(UiEvent::ConsoleLine {
                tag: ConsoleTag::Info,
                text: RUN_DISCARDED.to_string(),
            });
            return;
        }

        match result {
            Ok(response) => {
                if let Some(output) = response.output.filter(|o| !o.is_empty()) {
                    self.ui.emit(UiEvent::ConsoleLine {
                        tag: ConsoleTag::Success,
                        text: output,
                    });
                }
                if let Some(error) = response.error.filter(|e| !e.is_empty()) {
                    self.ui.emit(UiEvent::ConsoleLine {
                        tag: ConsoleTag::Error,
                        text: error,
                    });
                }
            }
            Err(e) => {
                log::error!("运行项目 {} 失败: {}", project, e);
                self.ui.emit(UiEvent::ConsoleLine {
                    tag: ConsoleTag::Error,
                    text: "Failed to run project".to_string(),
                });
            }
        }
    }

    /// 导出当前项目：整页导航到后端导出地址，由下载完成导出
    pub fn export(&self) {
        let Some(project) = self.lock().project.clone() else {
            return;
        };
        match self.api.export_url(&project) {
            Ok(url) => self.ui.emit(UiEvent::Navigate { url }),
            Err(e) => log::error!("生成导出地址失败: {}", e),
        }
    }

    // ======== 主题 ========

    /// 切换主题、持久化并更新切换按钮图标
    ///
    /// 持久化失败只记录日志，本次会话中的主题依然切换。
    pub async fn toggle_theme(&self) -> Theme {
        let theme = {
            let mut s = self.lock();
            s.theme = s.theme.toggled();
            s.theme
        };
        self.ui.emit(UiEvent::theme(theme));

        if let Err(e) = self.prefs.set(THEME_KEY, theme.as_str()).await {
            log::warn!("保存主题偏好失败: {}", e);
        }
        theme
    }
}
