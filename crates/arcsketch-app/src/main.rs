//! arcsketch 回放程序入口
//! 读取 JSON 事件脚本，驱动圆弧命令，把完成的圆弧和每帧预览以 JSON 输出

mod replay;

use anyhow::{bail, Context, Result};
use arcsketch_ui::CommandRegistry;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // 初始化日志，输出到 stderr，stdout 只留给结果
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    let registry = CommandRegistry::new();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: arcsketch <script.json> | arcsketch --commands");
    };
    if path == "--commands" {
        for name in registry.complete("") {
            println!("{}", name);
        }
        return Ok(());
    }

    let text = std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;
    let script: replay::Script =
        serde_json::from_str(&text).with_context(|| format!("invalid script {}", path))?;
    info!("Replaying {} ({} events)", script.command, script.events.len());

    let report = replay::run(&script, &registry)?;
    info!("{} arc(s) finished", report.arcs.len());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
