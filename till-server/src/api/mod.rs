//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`products`] - 商品管理接口
//! - [`bills`] - 账单管理接口
//! - [`analytics`] - 销售统计接口
//! - [`stock_updates`] - 库存修正审计接口

pub mod analytics;
pub mod auth;
pub mod bills;
pub mod health;
pub mod products;
pub mod stock_updates;
