//! Storefront Catalog Engine - 零售商城目录引擎
//!
//! # 架构概述
//!
//! 本模块是商城目录子系统的核心，提供以下功能：
//!
//! - **目录存储** (`services/catalog_service`): 商品与分类的唯一权威数据源
//! - **持久化** (`persistence`): 文件快照存储，临时文件 + 原子重命名
//! - **导入引擎** (`services/import_service`): 外部数据批次的替换/增量合并
//! - **分类解析** (`services/category_resolver`): 分类名称 → 规范 ID
//! - **查询过滤** (`services/product_query`): 分类/品牌/价格区间过滤与排序
//!
//! # 模块结构
//!
//! ```text
//! catalog-engine/src/
//! ├── core/          # 配置
//! ├── common/        # 错误类型、日志
//! ├── persistence/   # 存储后端 (文件 / 内存)
//! └── services/      # 目录存储、导入、解析、查询
//! ```
//!
//! HTTP 路由、会话、鉴权等均属外部协作方，不在本 crate 范围内。

pub mod common;
pub mod core;
pub mod persistence;
pub mod services;

// Re-export 公共类型
pub use common::{CatalogError, CatalogResult};
pub use common::logger::{init_logger, init_logger_with_file};
pub use core::CatalogConfig;
pub use persistence::{CatalogBackend, CatalogData, FileBackend, MemoryBackend};
pub use services::{
    CatalogService, CategoryRecord, CategoryResolver, ImportBatch, ImportReport, ImportService,
    ProductFilter, ProductQuery, ProductRecord, SortKey,
};
