use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::directory::DbDirectory;
use crate::orders::{OrderService, SnapshotStore};

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式实体数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | orders | Arc<OrderService> | 订单工作流服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式实体数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 订单工作流服务
    pub orders: Arc<OrderService>,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        orders: Arc<OrderService>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            orders,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录
    /// 2. 实体数据库 (work_dir/entities.db)
    /// 3. 订单快照库 (work_dir/orders.redb)
    /// 4. JWT 服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        std::fs::create_dir_all(&config.work_dir).expect("Failed to create work directory");

        let db = crate::db::connect(&config.entity_db_dir().to_string_lossy())
            .await
            .expect("Failed to initialize entity database");

        let store = SnapshotStore::open(config.snapshot_db_path())
            .expect("Failed to open snapshot store");
        let directory = Arc::new(DbDirectory::new(db.clone()));
        let orders = Arc::new(OrderService::new(store, directory));

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), db, jwt_service, orders)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取订单工作流服务
    pub fn orders(&self) -> Arc<OrderService> {
        self.orders.clone()
    }
}
