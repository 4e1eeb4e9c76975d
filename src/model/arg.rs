use std::path::PathBuf;

use clap::Parser;

use super::config::Config;

/// 浏览器端推理 Playground 与操作日志服务
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = Config::default_config_path())]
    pub config: PathBuf,

    /// SQLite 数据库文件路径（覆盖配置文件与环境变量）
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// 监听地址
    #[arg(long)]
    pub host: Option<String>,

    /// 监听端口
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// 命令行参数优先级最高，最后应用
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref database) = self.database {
            config.database_path = database.clone();
        }
        if let Some(ref host) = self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}
