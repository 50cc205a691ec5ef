//! # 技术栈解析
//!
//! 从一段自然语言描述（如 "FastAPI with React"）中按关键词规则识别技术栈，
//! 生成依赖清单：栈名称、系统包和应用依赖。初始化表单可据此预填前后端选项。
//!
//! 关键词按单词边界、忽略大小写匹配，规则按固定顺序应用；
//! 栈名称按规则顺序以 `" + "` 连接，两类包列表去重后按字典序排列。

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{WorkspaceError, WorkspaceResult};

/// 描述文本的最大字符数
pub const MAX_PROMPT_CHARS: usize = 4096;

/// 没有识别出任何技术栈时的栈名称
pub const UNKNOWN_STACK: &str = "Unknown";

/// 规则在初始化表单中对应的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Backend,
    Frontend,
    /// Node 运行时：只有在没有识别出前端框架时才单独成为一个栈
    Runtime,
    Utility,
}

struct StackRule {
    pattern: &'static str,
    /// 初始化表单中的选项值
    kind: &'static str,
    role: Role,
    stack: Option<&'static str>,
    system_packages: &'static [&'static str],
    app_dependencies: &'static [&'static str],
}

const RULES: &[StackRule] = &[
    StackRule {
        pattern: r"\bdjango\b",
        kind: "django",
        role: Role::Backend,
        stack: Some("Python/Django"),
        system_packages: &["python3-dev", "libpq-dev", "build-essential"],
        app_dependencies: &["Django>=3.2", "psycopg2-binary"],
    },
    StackRule {
        pattern: r"\bflask\b",
        kind: "flask",
        role: Role::Backend,
        stack: Some("Python/Flask"),
        system_packages: &["python3-dev", "build-essential"],
        app_dependencies: &["Flask>=2.0"],
    },
    StackRule {
        pattern: r"\bfastapi\b",
        kind: "fastapi",
        role: Role::Backend,
        stack: Some("Python/FastAPI"),
        system_packages: &["python3-dev", "build-essential"],
        app_dependencies: &["fastapi", "uvicorn[standard]"],
    },
    StackRule {
        pattern: r"\breact\b",
        kind: "react",
        role: Role::Frontend,
        stack: Some("JavaScript/React"),
        system_packages: &["nodejs", "npm", "build-essential"],
        app_dependencies: &["react", "react-dom"],
    },
    StackRule {
        pattern: r"\bvue\b",
        kind: "vue",
        role: Role::Frontend,
        stack: Some("JavaScript/Vue"),
        system_packages: &["nodejs", "npm", "build-essential"],
        app_dependencies: &["vue"],
    },
    StackRule {
        pattern: r"\bnode\b|\bexpress\b",
        kind: "express",
        role: Role::Runtime,
        stack: Some("JavaScript/Node"),
        system_packages: &["nodejs", "npm"],
        app_dependencies: &["express"],
    },
    StackRule {
        pattern: r"\btailwind\b",
        kind: "tailwind",
        role: Role::Utility,
        stack: None,
        system_packages: &["nodejs", "npm"],
        app_dependencies: &["tailwindcss"],
    },
    StackRule {
        pattern: r"\bpostgres\b|\bpostgresql\b|\bpg\b",
        kind: "postgres",
        role: Role::Utility,
        stack: None,
        system_packages: &["postgresql-client", "libpq-dev"],
        app_dependencies: &["psycopg2-binary"],
    },
    StackRule {
        pattern: r"\bmongodb\b|\bmongo\b",
        kind: "mongodb",
        role: Role::Utility,
        stack: None,
        system_packages: &["mongodb-clients"],
        app_dependencies: &["pymongo"],
    },
];

static RULE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| Regex::new(&format!("(?i){}", rule.pattern)).unwrap())
        .collect()
});

/// 依赖清单
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackManifest {
    /// 识别出的栈名称，如 "Python/FastAPI + JavaScript/React"
    pub stack: String,
    pub system_packages: Vec<String>,
    pub app_dependencies: Vec<String>,
}

/// 初始化表单的预填建议
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSuggestion {
    /// 第一个识别出的前端框架
    pub frontend: Option<String>,
    /// 第一个识别出的后端框架（Node/Express 也算后端）
    pub backend: Option<String>,
    /// 识别出的工具和数据库
    pub utilities: Vec<String>,
}

/// 校验描述文本并返回命中的规则（按规则顺序）
fn matched_rules(prompt: &str) -> WorkspaceResult<Vec<&'static StackRule>> {
    let text = prompt.trim();
    if text.is_empty() {
        return Err(WorkspaceError::Validation("描述不能为空".into()));
    }
    if text.chars().count() > MAX_PROMPT_CHARS {
        return Err(WorkspaceError::Validation(format!(
            "描述过长（too large），最多 {} 个字符",
            MAX_PROMPT_CHARS
        )));
    }

    Ok(RULES
        .iter()
        .zip(RULE_PATTERNS.iter())
        .filter(|(_, re)| re.is_match(text))
        .map(|(rule, _)| rule)
        .collect())
}

/// 从描述文本生成依赖清单
///
/// # 错误
/// 去除首尾空白后为空，或超过 [`MAX_PROMPT_CHARS`] 个字符时返回 `Validation`
pub fn detect_stack(prompt: &str) -> WorkspaceResult<StackManifest> {
    let matched = matched_rules(prompt)?;
    let has_frontend = matched.iter().any(|r| r.role == Role::Frontend);

    let mut stacks: Vec<&str> = Vec::new();
    let mut system_packages = BTreeSet::new();
    let mut app_dependencies = BTreeSet::new();

    for rule in &matched {
        if let Some(stack) = rule.stack {
            if !(rule.role == Role::Runtime && has_frontend) {
                stacks.push(stack);
            }
        }
        system_packages.extend(rule.system_packages.iter().copied());
        app_dependencies.extend(rule.app_dependencies.iter().copied());
    }

    if stacks.is_empty() {
        stacks.push(UNKNOWN_STACK);
        system_packages.insert("build-essential");
    }

    log::debug!("识别到技术栈: {}", stacks.join(" + "));

    Ok(StackManifest {
        stack: stacks.join(" + "),
        system_packages: system_packages.into_iter().map(String::from).collect(),
        app_dependencies: app_dependencies.into_iter().map(String::from).collect(),
    })
}

/// 从描述文本生成初始化表单的预填建议
pub fn suggest_config(prompt: &str) -> WorkspaceResult<ConfigSuggestion> {
    let matched = matched_rules(prompt)?;
    let first = |role: Role| {
        matched
            .iter()
            .find(|r| r.role == role)
            .map(|r| r.kind.to_string())
    };

    Ok(ConfigSuggestion {
        frontend: first(Role::Frontend),
        backend: first(Role::Backend).or_else(|| first(Role::Runtime)),
        utilities: matched
            .iter()
            .filter(|r| r.role == Role::Utility)
            .map(|r| r.kind.to_string())
            .collect(),
    })
}
