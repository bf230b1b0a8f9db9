//! zworkspace - 编辑器工作区模型
//!
//! 模块结构：
//! - models: 数据模型（路径规范化、文件树投影、选择、回收站、历史）
//! - kernel: 工作区状态与操作（WorkspaceStore）、导入导出、服务端口与适配器

pub mod kernel;
pub mod models;
