//! # 示例应用程序
//!
//! 演示如何扫描组件、装配依赖并通过代理调用 Bean

mod service;

use anyhow::Context;
use clap::Parser;
use component_macros::component_scan;
use di_abstractions::BeanContainer;
use di_impl::BeanProxy;
use infrastructure_composition::{ApplicationBuilder, LoggingConfig};
use service::UserService;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 配置文件路径，文件不存在时使用默认配置
    #[arg(short, long, default_value = "config/app.toml")]
    config: String,

    /// 日志级别，指定后覆盖配置文件
    #[arg(long)]
    log_level: Option<String>,
}

/// 扫描配置
#[component_scan("example_app.service")]
pub struct AppConfig;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut builder = ApplicationBuilder::new()
        .with_optional_settings_file(&args.config)
        .enable_logging(true);
    if let Some(level) = &args.log_level {
        builder = builder.with_logging(LoggingConfig::default().with_level(level));
    }

    let context = builder
        .build_for::<AppConfig>()
        .context("启动应用上下文失败")?;

    let stats = context.stats();
    info!(
        "容器启动完成: {} 个定义, {} 个单例, 耗时 {}ms",
        stats.definitions, stats.singletons, stats.startup_millis
    );

    let bean = context.get_bean("user_service")?;
    let user_service = bean
        .downcast_ref::<BeanProxy<UserService>>()
        .context("user_service 应该已被代理")?;

    user_service.invoke("test", UserService::test);
    info!("代理目标名称: {}", user_service.target().bean_name());

    Ok(())
}
