use std::sync::Arc;

use socketioxide::SocketIo;
use socketioxide::layer::SocketIoLayer;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{
    AuthService, MenuService, OrderNotifier, OrderService, PaymentService, ReportService,
    RestaurantService, SocketNotifier, UserService,
};
use crate::utils::AppResult;

/// 服务器状态 - 持有配置、数据库和推送通道
///
/// 所有字段都是浅拷贝 (Surreal 内部是 Arc)，每个请求 clone 一份。
/// 服务对象按需构造，不持有额外状态。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | notifier | Arc<dyn OrderNotifier> | 订单状态推送 |
/// | socket_layer | Option<SocketIoLayer> | Socket.IO 层，测试环境为 None |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub notifier: Arc<dyn OrderNotifier>,
    pub socket_layer: Option<SocketIoLayer>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 打开数据库 (`DB_CONN_STRING`)
    /// 2. 创建 Socket.IO 层并注册房间事件
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db_service =
            DbService::new(&config.db_conn_string, &config.db_namespace, &config.db_name).await?;

        let (socket_layer, io) = SocketIo::new_layer();
        let notifier = Arc::new(SocketNotifier::new(io));

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            notifier,
            socket_layer: Some(socket_layer),
        })
    }

    /// 内存数据库 + 指定推送实现，没有 Socket.IO 层
    pub async fn in_memory(config: Config, notifier: Arc<dyn OrderNotifier>) -> AppResult<Self> {
        let db_service = DbService::memory().await?;
        Ok(Self {
            config,
            db: db_service.db,
            notifier,
            socket_layer: None,
        })
    }

    pub fn menu_service(&self) -> MenuService {
        MenuService::new(self.db.clone())
    }

    pub fn restaurant_service(&self) -> RestaurantService {
        RestaurantService::new(self.db.clone())
    }

    pub fn order_service(&self) -> OrderService {
        OrderService::new(
            self.db.clone(),
            self.notifier.clone(),
            self.config.default_tax_rate,
        )
    }

    pub fn payment_service(&self) -> PaymentService {
        PaymentService::new(self.order_service())
    }

    pub fn report_service(&self) -> ReportService {
        ReportService::new(self.db.clone(), self.config.default_tax_rate)
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.db.clone())
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.db.clone())
    }
}
