//! 门户导航 - 业务能力层
//!
//! 负责报名开始前的所有页面流转：登录门户、等待 REGIS 新标签页、
//! 逐级点进选课页面、取出 "Enter New Course" iframe 的入口 URL。
//! 这一段 UI 结构是外部的脆弱契约，选择器和链接文本都来自线上页面。

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chromiumoxide::{Browser, Page};
use tracing::{debug, info, warn};

use crate::browser::tab_watch;
use crate::config::Config;
use crate::services::select_surface::escape_js;
use crate::utils::wait::wait_until;

/// REGIS 入口链接文本
const REGIS_LINK_TEXT: &str = "Registrar Information Systems (REGIS)";

/// 选课页面的链接文本（点击后不一定生效，需要校验重试）
const COURSE_ENROLLMENT_LINK_TEXT: &str = "Course Enrollment";

/// 打开新课程录入 iframe 的按钮文本
const ENTER_NEW_COURSE_TEXT: &str = "Enter New Course";

/// 页面上按可见文本点击的元素种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlTag {
    Anchor,
    Span,
    Button,
}

impl HtmlTag {
    fn tag_name(&self) -> &'static str {
        match self {
            HtmlTag::Anchor => "a",
            HtmlTag::Span => "span",
            HtmlTag::Button => "button",
        }
    }
}

/// 生成"点击第一个文本包含 `text` 的元素"的 JS，求值结果是是否点到
pub fn text_click_js(tag: HtmlTag, text: &str) -> String {
    format!(
        r#"
        (() => {{
            const hit = document.evaluate(
                "//{tag}[contains(., '{text}')]",
                document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null,
            ).singleNodeValue;
            if (!hit) return false;
            hit.click();
            return true;
        }})()
        "#,
        tag = tag.tag_name(),
        text = escape_js(text),
    )
}

/// 生成"文本包含 `text` 的元素是否存在"的 JS
pub fn text_exists_js(tag: HtmlTag, text: &str) -> String {
    format!(
        r#"
        document.evaluate(
            "//{tag}[contains(., '{text}')]",
            document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null,
        ).singleNodeValue !== null
        "#,
        tag = tag.tag_name(),
        text = escape_js(text),
    )
}

/// 门户导航器
pub struct PortalNavigator {
    username: String,
    password: String,
    nav_timeout: Duration,
    poll_interval: Duration,
    nav_click_retries: u32,
}

impl PortalNavigator {
    /// 按配置创建导航器
    pub fn new(config: &Config) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            nav_timeout: Duration::from_millis(config.navigation_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            nav_click_retries: config.nav_click_retries,
        }
    }

    /// 登录门户：填入用户名密码并提交
    pub async fn sign_in(&self, page: &Page) -> Result<()> {
        if self.username.is_empty() || self.password.is_empty() {
            bail!("未配置 USERNAME / PASSWORD 环境变量");
        }

        info!("🔑 正在登录门户...");

        let js_code = format!(
            r#"
            (() => {{
                const user = document.querySelector('input[name=login]');
                const pass = document.querySelector('input[name=password]');
                if (!user || !pass) return false;
                user.value = '{username}';
                user.dispatchEvent(new Event('input', {{ bubbles: true }}));
                pass.value = '{password}';
                pass.dispatchEvent(new Event('input', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            username = escape_js(&self.username),
            password = escape_js(&self.password),
        );

        let filled: bool = page.evaluate(js_code).await?.into_value()?;
        if !filled {
            bail!("登录页上找不到用户名/密码输入框");
        }

        let submit = page
            .find_element("input[type=submit]")
            .await
            .context("登录页上找不到提交按钮")?;
        submit.click().await?;

        self.wait_for_navigation(page).await?;
        info!("✓ 登录完成");

        Ok(())
    }

    /// 点击 REGIS 链接并等待它打开的新标签页
    pub async fn open_regis(&self, browser: &Browser, page: &Page) -> Result<Page> {
        info!("正在打开 REGIS...");

        let pages_before = browser.pages().await?.len();

        let clicked: bool = page
            .evaluate(text_click_js(HtmlTag::Anchor, REGIS_LINK_TEXT))
            .await?
            .into_value()?;
        if !clicked {
            bail!("门户页上找不到 REGIS 链接");
        }

        // REGIS 在新标签页打开，等下一个 page 出现再切过去
        let regis_page =
            tab_watch::wait_for_new_page(browser, pages_before, self.nav_timeout).await?;

        info!("✓ REGIS 标签页已打开");
        Ok(regis_page)
    }

    /// 逐级点进选课页面，返回 "Enter New Course" iframe 的入口 URL
    ///
    /// "Course Enrollment" 链接点击后经常不生效，所以每次点击后
    /// 校验入口按钮是否出现，最多重试 `nav_click_retries` 次。
    pub async fn open_enroll_entry(&self, page: &Page) -> Result<String> {
        let verify_window = self.nav_timeout / self.nav_click_retries.max(1);

        let mut entry_visible = false;
        for attempt in 1..=self.nav_click_retries {
            let clicked: bool = page
                .evaluate(text_click_js(HtmlTag::Anchor, COURSE_ENROLLMENT_LINK_TEXT))
                .await?
                .into_value()?;
            debug!(
                "第 {} 次点击 Course Enrollment，命中链接: {}",
                attempt, clicked
            );

            let ready = wait_until(verify_window, self.poll_interval, || async move {
                let exists: bool = page
                    .evaluate(text_exists_js(HtmlTag::Span, ENTER_NEW_COURSE_TEXT))
                    .await?
                    .into_value()?;
                Ok(exists)
            })
            .await?;

            if ready {
                entry_visible = true;
                break;
            }
            warn!("⚠️ 第 {} 次点击 Course Enrollment 未生效", attempt);
        }

        if !entry_visible {
            bail!(
                "点击 Course Enrollment {} 次后仍未进入选课页面",
                self.nav_click_retries
            );
        }

        // 弹出 iframe，不触发整页跳转
        let clicked: bool = page
            .evaluate(text_click_js(HtmlTag::Span, ENTER_NEW_COURSE_TEXT))
            .await?
            .into_value()?;
        if !clicked {
            bail!("找不到 Enter New Course 按钮");
        }

        let iframe_ready = wait_until(self.nav_timeout, self.poll_interval, || async move {
            let exists: bool = page
                .evaluate("document.querySelector('iframe') !== null")
                .await?
                .into_value()?;
            Ok(exists)
        })
        .await?;
        if !iframe_ready {
            bail!("等待 Enter New Course iframe 出现超时");
        }

        let entry_url: String = page
            .evaluate("document.querySelector('iframe').src")
            .await?
            .into_value()?;

        info!("✓ 课程录入入口: {}", entry_url);
        Ok(entry_url)
    }

    /// 带超时的整页跳转等待
    async fn wait_for_navigation(&self, page: &Page) -> Result<()> {
        tokio::time::timeout(self.nav_timeout, page.wait_for_navigation())
            .await
            .map_err(|_| anyhow::anyhow!("等待页面跳转超时"))??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_click_js_builds_xpath_per_tag() {
        let js = text_click_js(HtmlTag::Anchor, "Course Enrollment");
        assert!(js.contains("//a[contains(., 'Course Enrollment')]"));

        let js = text_click_js(HtmlTag::Span, "Save");
        assert!(js.contains("//span[contains(., 'Save')]"));

        let js = text_click_js(HtmlTag::Button, "Ok");
        assert!(js.contains("//button[contains(., 'Ok')]"));
    }

    #[test]
    fn test_text_js_escapes_quotes() {
        let js = text_exists_js(HtmlTag::Span, "O'Brien");
        assert!(js.contains("O\\'Brien"));
    }
}
