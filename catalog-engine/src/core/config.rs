use std::path::PathBuf;

/// 目录引擎配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/storefront | 工作目录 |
/// | CATALOG_FILE | catalog.json | 目录快照文件名 (相对工作目录) |
/// | DEFAULT_CATEGORY_ID | 1 | 分类解析失败时的兜底分类 ID |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/storefront cargo run --bin cli-import feed.json
/// ```
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// 工作目录，存储目录快照、日志等文件
    pub work_dir: String,
    /// 目录快照文件名
    pub catalog_file: String,
    /// 分类解析兜底 ID
    pub default_category_id: i64,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl CatalogConfig {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/storefront".into()),
            catalog_file: std::env::var("CATALOG_FILE").unwrap_or_else(|_| "catalog.json".into()),
            default_category_id: std::env::var("DEFAULT_CATEGORY_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, catalog_file: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.catalog_file = catalog_file.into();
        config
    }

    /// 目录快照的完整路径
    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.catalog_file)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
