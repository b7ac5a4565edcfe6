/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 门户首页 URL
    pub portal_url: String,
    /// 门户登录用户名
    pub username: String,
    /// 门户登录密码
    pub password: String,
    /// 是否带界面运行浏览器（方便人工观察报名过程）
    pub visible_browser: bool,
    /// 浏览器可执行文件路径（None 时用系统默认）
    pub chrome_path: Option<String>,
    /// 目标课程清单文件
    pub classes_file: String,
    /// 每步选择之间的额外延迟（毫秒）
    pub action_delay_ms: u64,
    /// 级联下拉框就绪等待时限（毫秒）
    pub resolve_timeout_ms: u64,
    /// 就绪条件轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 页面跳转等待时限（毫秒）
    pub navigation_timeout_ms: u64,
    /// Course Enrollment 链接的点击重试次数
    pub nav_click_retries: u32,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portal_url: "https://access.caltech.edu".to_string(),
            username: String::new(),
            password: String::new(),
            visible_browser: true,
            chrome_path: None,
            classes_file: "classes.toml".to_string(),
            action_delay_ms: 0,
            resolve_timeout_ms: 10_000,
            poll_interval_ms: 200,
            navigation_timeout_ms: 15_000,
            nav_click_retries: 3,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            portal_url: std::env::var("PORTAL_URL").unwrap_or(default.portal_url),
            username: std::env::var("USERNAME").unwrap_or(default.username),
            password: std::env::var("PASSWORD").unwrap_or(default.password),
            visible_browser: std::env::var("VISIBLE_BROWSER").ok().and_then(|v| v.parse().ok()).unwrap_or(default.visible_browser),
            chrome_path: std::env::var("CHROME_PATH").ok(),
            classes_file: std::env::var("CLASSES_FILE").unwrap_or(default.classes_file),
            action_delay_ms: std::env::var("ACTION_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.action_delay_ms),
            resolve_timeout_ms: std::env::var("RESOLVE_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.resolve_timeout_ms),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            navigation_timeout_ms: std::env::var("NAVIGATION_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.navigation_timeout_ms),
            nav_click_retries: std::env::var("NAV_CLICK_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.nav_click_retries),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
