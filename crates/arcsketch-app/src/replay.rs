//! 事件脚本回放
//!
//! 宿主负责把指针事件翻译成命令调用：按下和拖动用捕捉后的指针更新
//! 当前步骤的点，抬起或单击提交，完成的圆弧登记到捕捉引擎供后续捕捉。

use anyhow::{Context, Result};
use arcsketch_core::geometry::Arc;
use arcsketch_core::math::Point2;
use arcsketch_core::snap::{SnapConfig, SnapEngine};
use arcsketch_ui::{
    create_command, BuiltinLocalizer, Command, CommandRegistry, CommandResult, DrawCall,
    RecordingRenderer, Session, StoredConfig, ViewState, POINT_COUNT,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 回放脚本
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// 命令名或别名，如 `ARC3P`、`AC`
    pub command: String,
    /// 界面语言（`en` / `zh`）
    #[serde(default)]
    pub language: Option<String>,
    /// 命令的持久化配置
    #[serde(default)]
    pub config: Option<serde_json::Value>,
    #[serde(default)]
    pub view: ViewState,
    #[serde(default)]
    pub snap: SnapConfig,
    /// 已有图形，参与捕捉
    #[serde(default)]
    pub arcs: Vec<Arc>,
    /// 完成后继续画下一个
    #[serde(default)]
    pub repeat: bool,
    pub events: Vec<Event>,
}

/// 指针事件
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Press { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Release { x: f64, y: f64 },
    /// 不拖动的单击
    Tap { x: f64, y: f64 },
    Draw,
    Restart,
}

/// 一帧预览
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// 触发该帧的事件序号
    pub event: usize,
    pub step: usize,
    pub prompt: String,
    pub calls: Vec<DrawCall>,
}

/// 回放结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub command: String,
    pub arcs: Vec<Arc>,
    pub frames: Vec<Frame>,
}

/// 回放宿主
pub struct Replay {
    command: Box<dyn Command>,
    engine: SnapEngine,
    localizer: BuiltinLocalizer,
    view: ViewState,
    pointer: Point2,
    dragging: bool,
    repeat: bool,
    report: Report,
}

impl Replay {
    pub fn new(script: &Script, registry: &CommandRegistry) -> Result<Self> {
        let kind = registry.resolve(&script.command)?;
        let stored = script
            .config
            .clone()
            .map(StoredConfig::from_value)
            .transpose()
            .context("invalid command config")?;
        let localizer = script
            .language
            .as_deref()
            .map(BuiltinLocalizer::for_language)
            .unwrap_or_default();

        let mut engine = SnapEngine::new(script.snap.clone());
        for arc in &script.arcs {
            engine.add_arc(*arc);
        }

        let mut command = create_command(kind);
        {
            let session = Session::new(script.view, &mut engine, &localizer);
            command
                .initialize(&session, stored.as_ref())
                .with_context(|| format!("failed to initialize {}", kind.name()))?;
        }

        Ok(Self {
            report: Report {
                command: command.name().to_string(),
                ..Report::default()
            },
            command,
            engine,
            localizer,
            view: script.view,
            pointer: Point2::origin(),
            dragging: false,
            repeat: script.repeat,
        })
    }

    /// 处理一个事件
    pub fn handle(&mut self, index: usize, event: Event) {
        let was_complete = self.command.is_complete();
        let result = {
            let mut session = Session::new(self.view, &mut self.engine, &self.localizer);
            session.move_to(self.pointer);
            session.dragging = self.dragging;

            let mut force_draw = false;
            let result = match event {
                Event::Press { x, y } => {
                    session.dragging = true;
                    session.move_to(Point2::new(x, y));
                    track(self.command.as_mut(), session.hover_point());
                    session.request_redraw();
                    None
                }
                Event::Move { x, y } => {
                    session.move_to(Point2::new(x, y));
                    if session.dragging {
                        track(self.command.as_mut(), session.hover_point());
                        session.request_redraw();
                    }
                    None
                }
                Event::Release { x, y } => {
                    session.move_to(Point2::new(x, y));
                    if session.dragging {
                        track(self.command.as_mut(), session.hover_point());
                    }
                    let result = self.command.click(&mut session);
                    session.dragging = false;
                    Some(result)
                }
                Event::Tap { x, y } => {
                    session.dragging = false;
                    session.move_to(Point2::new(x, y));
                    Some(self.command.click(&mut session))
                }
                Event::Draw => {
                    force_draw = true;
                    None
                }
                Event::Restart => {
                    self.command.restart();
                    session.request_redraw();
                    None
                }
            };
            debug!(index, ?event, step = self.command.step(), "event handled");

            if session.take_redraw() || force_draw {
                let mut renderer = RecordingRenderer::new();
                self.command.draw(&session, &mut renderer);
                self.report.frames.push(Frame {
                    event: index,
                    step: self.command.step(),
                    prompt: self.command.prompt().to_string(),
                    calls: renderer.calls,
                });
            }

            self.pointer = session.pointer();
            self.dragging = session.dragging;
            result
        };

        if let Some(CommandResult::Finished(arc)) = result {
            if !was_complete {
                self.report.arcs.push(arc);
                self.engine.add_arc(arc);
            }
            if self.repeat {
                self.command.restart();
            }
        }
    }

    pub fn into_report(self) -> Report {
        self.report
    }
}

/// 把指针位置交给当前步骤
fn track(command: &mut dyn Command, point: Point2) {
    let step = command.step();
    if step < POINT_COUNT {
        command.set_step_point(step, point);
    }
}

/// 回放整个脚本
pub fn run(script: &Script, registry: &CommandRegistry) -> Result<Report> {
    let mut replay = Replay::new(script, registry)?;
    for (index, event) in script.events.iter().enumerate() {
        replay.handle(index, *event);
    }
    Ok(replay.into_report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn replay(json: &str) -> Result<Report> {
        let script: Script = serde_json::from_str(json)?;
        run(&script, &CommandRegistry::new())
    }

    #[test]
    fn test_three_point_taps() {
        let report = replay(
            r#"{
                "command": "ARC",
                "events": [
                    {"type": "tap", "x": 0.0, "y": 0.0},
                    {"type": "tap", "x": 1.0, "y": 1.0},
                    {"type": "tap", "x": 2.0, "y": 0.0},
                    {"type": "tap", "x": 9.0, "y": 9.0}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(report.arcs.len(), 1);
        assert_relative_eq!(report.arcs[0].center(), Point2::new(1.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(report.arcs[0].radius(), 1.0, epsilon = 1e-9);
        assert_eq!(report.frames.last().map(|f| f.step), Some(POINT_COUNT));
    }

    #[test]
    fn test_center_start_end_drag_with_readout() {
        let report = replay(
            r#"{
                "command": "AC",
                "config": {"decimal": 0},
                "events": [
                    {"type": "press", "x": 0.0, "y": 0.0},
                    {"type": "release", "x": 0.0, "y": 0.0},
                    {"type": "press", "x": 10.0, "y": 0.0},
                    {"type": "release", "x": 10.0, "y": 0.0},
                    {"type": "press", "x": 10.0, "y": 1.0},
                    {"type": "move", "x": 0.1, "y": 10.0},
                    {"type": "release", "x": 0.0, "y": 10.0}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(report.arcs.len(), 1);
        assert_relative_eq!(report.arcs[0].sweep_degrees(), 90.0, epsilon = 1e-9);

        // 拖动终点时显示角度文字
        let drag_frame = report.frames.iter().find(|f| f.event == 5).unwrap();
        assert!(drag_frame
            .calls
            .iter()
            .any(|c| matches!(c, DrawCall::Text { text, .. } if text == "89.00°")));
    }

    #[test]
    fn test_repeat_snaps_to_finished_arc() {
        let report = replay(
            r#"{
                "command": "ARC3P",
                "repeat": true,
                "events": [
                    {"type": "tap", "x": 0.0, "y": 0.0},
                    {"type": "tap", "x": 50.0, "y": 50.0},
                    {"type": "tap", "x": 100.0, "y": 0.0},
                    {"type": "tap", "x": 98.0, "y": 2.0},
                    {"type": "tap", "x": 150.0, "y": 50.0},
                    {"type": "tap", "x": 200.0, "y": 0.0}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(report.arcs.len(), 2);
        assert_relative_eq!(report.arcs[1].start_point(), Point2::new(100.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_drag_away_from_snapped_start_shows_handle() {
        let report = replay(
            r#"{
                "command": "ARC3P",
                "arcs": [
                    {"center": [0.0, 0.0], "radius": 10.0, "start_angle": 0.0, "sweep_angle": 1.0}
                ],
                "events": [
                    {"type": "press", "x": 9.5, "y": 0.2},
                    {"type": "release", "x": 9.5, "y": 0.2},
                    {"type": "press", "x": 200.0, "y": 150.0},
                    {"type": "move", "x": 210.0, "y": 150.0}
                ]
            }"#,
        )
        .unwrap();

        let frame = report.frames.iter().find(|f| f.event == 3).unwrap();
        assert_eq!(frame.step, 1);
        let handles: Vec<_> = frame
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Handle { point, .. } => Some(*point),
                _ => None,
            })
            .collect();
        assert_eq!(handles, vec![Point2::new(210.0, 150.0)]);

        // 起点用的是捕捉到的端点
        let guide = frame.calls.iter().find_map(|c| match c {
            DrawCall::Line { p1, .. } => Some(*p1),
            _ => None,
        });
        assert_eq!(guide, Some(Point2::new(10.0, 0.0)));
    }

    #[test]
    fn test_unknown_command() {
        assert!(replay(r#"{"command": "CIRCLE", "events": []}"#).is_err());
    }

    #[test]
    fn test_invalid_view_rejected() {
        let err = replay(
            r#"{
                "command": "AT",
                "view": {
                    "zoom": 0.0,
                    "dpi": 96.0,
                    "window": {"min": [0.0, 0.0], "max": [1.0, 1.0]}
                },
                "events": []
            }"#,
        );
        assert!(err.is_err());
    }
}
