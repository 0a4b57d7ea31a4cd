use anyhow::Context;
use bridge::{DashboardBridge, DashboardModel};
use charts::{color, ChartCanvas};
use clap::Parser;
use dashcore::charts::{ChartId, ChartKind, ChartState};
use dashcore::dashboard::present::EMPTY_CLASSIFICATIONS;
use dashcore::model::StatusLevel;
use dashcore::notify::{Notification, NotificationPhase};
use dashcore::{DashboardCommand, DashboardConfig};
use iced::{
    time,
    widget::{
        button, column, container, row, scrollable, stack, text, Canvas, Column, Container, Row,
    },
    Alignment, Border, Color, Element, Length, Subscription, Task, Theme,
};
use std::path::PathBuf;
use std::time::Duration;

mod bridge;
mod charts;

#[derive(Parser)]
#[command(author, version, about = "Classification monitoring dashboard")]
struct Args {
    /// Load dashboard settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend base URL, overriding the config file
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading dashboard config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    config.validate().context("validating dashboard config")?;

    let bridge = DashboardBridge::start(&config)?;
    iced::application(
        move || Visualizer::boot(bridge.clone()),
        Visualizer::update,
        Visualizer::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .run()
    .context("running dashboard window")?;

    Ok(())
}

fn application_title(_: &Visualizer) -> String {
    "Classification Dashboard".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_millis(250)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

struct Visualizer {
    bridge: DashboardBridge,
    model: DashboardModel,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    ClassifyNow,
    ToggleAutoRefresh,
    RefreshNow,
}

impl Visualizer {
    fn boot(bridge: DashboardBridge) -> (Self, Task<Message>) {
        let model = bridge.snapshot();
        (Visualizer { bridge, model }, Task::none())
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => state.model = state.bridge.snapshot(),
            Message::ClassifyNow => state.bridge.send(DashboardCommand::ClassifyNow),
            Message::ToggleAutoRefresh => state.bridge.send(DashboardCommand::ToggleAutoRefresh),
            Message::RefreshNow => state.bridge.send(DashboardCommand::Refresh),
        }
        Task::none()
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let model = &state.model;

        let classify = {
            let control = button(text(model.classify_button.label.clone())).padding(10);
            if model.classify_button.enabled && !model.classify_pending {
                control.on_press(Message::ClassifyNow)
            } else {
                control
            }
        };
        let toolbar = row![
            text("Classification Dashboard").size(26),
            status_badge(model),
            text(if model.loading { "Refreshing..." } else { "" }).size(12),
            classify,
            button(text(model.auto_refresh_label.clone()))
                .on_press(Message::ToggleAutoRefresh)
                .padding(10),
            button("Refresh now")
                .on_press(Message::RefreshNow)
                .padding(10),
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        let details = model
            .status
            .iter()
            .flat_map(|summary| summary.details.iter())
            .fold(Column::new().spacing(4), |col, (name, value)| {
                col.push(text(format!("{}: {}", name, value)).size(14))
            });
        let info = model.info.iter().fold(Column::new().spacing(2), |col, (key, value)| {
            col.push(text(format!("{}: {}", key, value)).size(12))
        });

        let left = column![
            text("Status").size(20),
            details,
            text("System info").size(16),
            info,
            text("Recent classifications").size(20),
            Container::new(scrollable(classification_list(model)).height(Length::Fill)).padding(6),
            text(format!(
                "Cycles: {} ok / {} failed",
                model.metrics.completed, model.metrics.failed
            ))
            .size(12),
        ]
        .spacing(10)
        .width(Length::Fixed(360.0));

        let right = ChartId::ALL
            .iter()
            .fold(Column::new().spacing(12).width(Length::Fill), |col, id| {
                col.push(chart_panel(model, *id))
            });

        let body = row![left, scrollable(right)].spacing(20);
        let layout = column![toolbar, body].spacing(16).padding(20);

        stack![
            Container::new(layout)
                .width(Length::Fill)
                .height(Length::Fill),
            notification_overlay(&model.notifications),
        ]
        .into()
    }
}

fn status_badge(model: &DashboardModel) -> Element<'_, Message> {
    let Some(summary) = &model.status else {
        return text("Waiting for the server...").size(16).into();
    };
    let tint = match summary.level {
        StatusLevel::Operational => Color::from_rgb8(0x27, 0xae, 0x60),
        StatusLevel::Degraded => Color::from_rgb8(0xf3, 0x9c, 0x12),
        StatusLevel::Offline | StatusLevel::Unknown => Color::from_rgb8(0xe7, 0x4c, 0x3c),
    };
    let label = match &summary.message {
        Some(message) => format!("{} ({})", summary.text, message),
        None => summary.text.to_string(),
    };
    text(label).size(16).color(tint).into()
}

fn classification_list(model: &DashboardModel) -> Column<'_, Message> {
    match &model.rows {
        Some(rows) if !rows.is_empty() => rows.iter().fold(Column::new().spacing(6), |col, entry| {
            col.push(
                row![
                    column![
                        text(entry.class_name.clone()).size(15),
                        text(entry.timestamp.clone()).size(11),
                    ]
                    .width(Length::Fill),
                    text(entry.confidence.clone()).size(14),
                ]
                .align_y(Alignment::Center),
            )
        }),
        Some(_) => Column::new().push(text(EMPTY_CLASSIFICATIONS).size(12)),
        None => Column::new().push(text("No data yet").size(12)),
    }
}

fn chart_panel(model: &DashboardModel, id: ChartId) -> Element<'_, Message> {
    let title = model.chart_titles.get(&id).copied().unwrap_or(id.name());
    let Some(chart) = model.charts.get(&id) else {
        return text(title).size(18).into();
    };
    let canvas = Canvas::new(ChartCanvas::new(chart))
        .width(Length::Fill)
        .height(Length::Fixed(200.0));
    column![text(title).size(18), canvas, chart_legend(chart)]
        .spacing(6)
        .into()
}

fn chart_legend(chart: &ChartState) -> Row<'_, Message> {
    let values = chart.values();
    let colors = chart
        .datasets
        .first()
        .map(|dataset| dataset.colors.as_slice())
        .unwrap_or(&[]);
    chart
        .labels
        .iter()
        .enumerate()
        .fold(Row::new().spacing(10), |legend, (index, label)| {
            let entry = match chart.kind {
                ChartKind::Line => label.clone(),
                _ => format!("{} ({})", label, values.get(index).copied().unwrap_or(0.0)),
            };
            let tint = match (chart.kind, colors.is_empty()) {
                (ChartKind::Line, _) | (_, true) => Color::WHITE,
                _ => color(colors[index % colors.len()]),
            };
            legend.push(text(entry).size(11).color(tint))
        })
}

fn notification_overlay(notifications: &[Notification]) -> Element<'_, Message> {
    let toasts = notifications
        .iter()
        .fold(Column::new().spacing(8), |col, notification| {
            let mut background = color(notification.kind.color());
            if notification.phase == NotificationPhase::Exiting {
                background.a = 0.4;
            }
            col.push(
                container(text(notification.message.clone()).size(14).color(Color::WHITE))
                    .padding(12)
                    .max_width(300.0)
                    .style(move |_theme: &Theme| container::Style {
                        background: Some(background.into()),
                        border: Border {
                            radius: 8.0.into(),
                            ..Border::default()
                        },
                        ..container::Style::default()
                    }),
            )
        });
    Container::new(toasts)
        .padding(20)
        .align_right(Length::Fill)
        .into()
}
