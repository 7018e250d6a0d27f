use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use mini_ddl::cfg::{self, Config};
use mini_ddl::db_error::Result;
use mini_ddl::schema::{io, Column, ColumnDefault, RenderOptions, COLUMN_DEFAULT_NULL};
use tokio::sync::broadcast;
use tracing::{error, info};

/// 把列定义渲染为 MySQL DDL 片段
#[derive(Parser)]
#[command(name = "mini-ddl", version)]
struct Cli {
    /// 配置文件路径，默认读取 MINI_DDL_CONFIG 或 ./config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 渲染单个列
    Render(RenderArgs),
    /// 渲染文件中的所有列，每行一个
    File { path: PathBuf },
    /// 按列名比较两个文件中的列
    Compare { old: PathBuf, new: PathBuf },
    /// 把 JSON 列文件转成二进制快照
    Snapshot { input: PathBuf, output: PathBuf },
    /// 文件变化时重新渲染，Ctrl-C 退出
    Watch { path: PathBuf },
}

#[derive(Args)]
struct RenderArgs {
    #[arg(long)]
    name: String,
    #[arg(long = "type")]
    type_in_db: String,
    #[arg(long)]
    not_null: bool,
    #[arg(long)]
    auto_increment: bool,
    /// 带引号的默认值
    #[arg(long, conflicts_with = "default_expr")]
    default: Option<String>,
    /// 不带引号的默认表达式，都不指定时为 DEFAULT NULL
    #[arg(long)]
    default_expr: Option<String>,
    #[arg(long, default_value = "")]
    extra: String,
}

impl RenderArgs {
    fn column_default(&self) -> ColumnDefault {
        if let Some(value) = &self.default {
            ColumnDefault::value(value.as_str())
        } else if let Some(expr) = &self.default_expr {
            ColumnDefault::expression(expr.as_str())
        } else {
            COLUMN_DEFAULT_NULL.clone()
        }
    }

    fn build(&self) -> Result<Column> {
        Column::builder(self.name.as_str(), self.type_in_db.as_str())
            .nullable(!self.not_null)
            .auto_increment(self.auto_increment)
            .default(self.column_default())
            .extra(self.extra.as_str())
            .build()
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => cfg::load_config(),
    };
    // 配置加载失败时日志尚未初始化，只能直接写 stderr
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    mini_ddl::init_tracing(&config.log_level);

    if let Err(e) = run(cli, config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    cfg::set_config(config)?;

    match cli.command {
        Command::Render(args) => {
            let column = args.build()?;
            println!("{}", column.definition_with(&cfg::render_options()?));
        }
        Command::File { path } => print_file(&path)?,
        Command::Compare { old, new } => compare(&old, &new)?,
        Command::Snapshot { input, output } => {
            let columns = io::read_columns(&input)?;
            io::write_snapshot(&output, &columns)?;
            info!("已写入 {} 列到 {}", columns.len(), output.display());
        }
        Command::Watch { path } => watch(path, cli.config).await?,
    }
    Ok(())
}

fn render_file(path: &Path, options: &RenderOptions) -> Result<String> {
    let columns = io::read_columns(path)?;
    Ok(columns.iter().map(|c| c.definition_with(options)).join("\n"))
}

fn print_file(path: &Path) -> Result<()> {
    println!("{}", render_file(path, &cfg::render_options()?)?);
    Ok(())
}

/// 列名比较：+ 新增，- 删除，~ 结构不同。只有默认值或 extra 不同的列视为未变化
fn compare(old: &Path, new: &Path) -> Result<()> {
    let old: BTreeMap<String, Column> = io::read_columns(old)?
        .into_iter()
        .map(|c| (c.name.clone(), c))
        .collect();
    let new: BTreeMap<String, Column> = io::read_columns(new)?
        .into_iter()
        .map(|c| (c.name.clone(), c))
        .collect();
    let options = cfg::render_options()?;

    for name in old.keys().chain(new.keys()).unique() {
        let (a, b) = (old.get(name), new.get(name));
        if Column::equals(a, b) {
            continue;
        }
        match (a, b) {
            (Some(a), None) => println!("- {}", a.definition_with(&options)),
            (None, Some(b)) => println!("+ {}", b.definition_with(&options)),
            (Some(_), Some(b)) => println!("~ {}", b.definition_with(&options)),
            (None, None) => {}
        }
    }
    Ok(())
}

async fn watch(path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    print_file(&path)?;
    let render_path = path.clone();
    let mut handles = vec![cfg::watch_file(path, shutdown_tx.subscribe(), move || {
        match cfg::render_options().and_then(|opts| render_file(&render_path, &opts)) {
            Ok(sql) => println!("{sql}\n"),
            Err(e) => error!("重新渲染失败: {}", e),
        }
    })?];

    let config_path = config_path.unwrap_or_else(cfg::get_config_path);
    if config_path.exists() {
        handles.push(cfg::watch_config(config_path, shutdown_tx.subscribe())?);
    }

    tokio::signal::ctrl_c().await?;
    let _ = shutdown_tx.send(());
    for handle in handles {
        let _ = handle.await;
    }
    Ok(())
}
