//! # 通用工具函数模块
//!
//! - `path` - 配置目录定位、文件扩展名提取

pub mod path;
