//! 从 TOML 文件加载目标课程列表

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::info;

use crate::models::desired_class::{ClassList, DesiredClass};

/// 加载并归一化 classes.toml 中声明的课程
///
/// 返回的列表顺序即文件中的声明顺序，也就是报名尝试的顺序。
pub async fn load_classes(path: impl AsRef<Path>) -> Result<Vec<DesiredClass>> {
    let path = path.as_ref();

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取课程文件: {}", path.display()))?;

    let list: ClassList = toml::from_str(&content)
        .with_context(|| format!("无法解析课程文件: {}", path.display()))?;

    let classes: Vec<DesiredClass> = list
        .classes
        .iter()
        .map(DesiredClass::normalized)
        .collect();

    for class in &classes {
        info!("已加载课程: {}", class.display_label());
    }

    Ok(classes)
}
