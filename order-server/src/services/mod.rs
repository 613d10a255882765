//! 业务服务层
//!
//! | 服务 | 说明 |
//! |------|------|
//! | [`MenuService`] | 菜单查询、创建、分类维护 |
//! | [`RestaurantService`] | 餐厅、门店、来源、工位、打印机、活动 |
//! | [`OrderService`] | 价格预览、下单、状态流转 |
//! | [`PaymentService`] | 模拟支付，预览单转订单 |
//! | [`ReportService`] | 销售报表 |
//! | [`UserService`] | 用户同步 |
//! | [`AuthService`] | 模拟验证码登录 |
//! | [`OrderNotifier`] | 订单状态实时推送 |

pub mod auth_service;
pub mod menu_service;
pub mod notifier;
pub mod order_service;
pub mod payment_service;
pub mod report_service;
pub mod restaurant_service;
pub mod user_service;

pub use auth_service::{AuthService, ConsumeOutcome, SessionTokens};
pub use menu_service::MenuService;
pub use notifier::{OrderNotifier, RecordingNotifier, SocketNotifier};
pub use order_service::{OrderService, PaymentStamp};
pub use payment_service::PaymentService;
pub use report_service::ReportService;
pub use restaurant_service::RestaurantService;
pub use user_service::UserService;
