//! Order Pricing Module
//!
//! 金额全部是整数分 (cents)。税率是浮点数，乘完后向下取整。
//!
//! - [`item_calculator`]: 单个订单项 (规格、加料超额)
//! - [`order_calculator`]: 整单 (小计、税、折扣)

mod item_calculator;
mod order_calculator;

pub use item_calculator::*;
pub use order_calculator::*;
