use chrono::{DateTime, Utc};
use client_core::{JobListView, ScrollMetrics};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::JobItem;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
};

const REPAINT_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

pub struct JobBoardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: JobListView,
    status: String,
    mounted: bool,
    worker_failed: bool,
    last_scroll: Option<ScrollMetrics>,
}

impl JobBoardApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: JobListView::default(),
            status: "Starting...".to_string(),
            mounted: false,
            worker_failed: false,
            last_scroll: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::ViewUpdated(view) => self.view = view,
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "ui: {}", err.message());
                    self.worker_failed |= err.is_fatal();
                    self.status = err.status_line();
                }
            }
        }
    }

    fn send(&mut self, cmd: BackendCommand) -> bool {
        if self.worker_failed {
            return false;
        }
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
    }

    fn mount_once(&mut self) {
        if !self.mounted {
            self.mounted = self.send(BackendCommand::Mount);
        }
    }

    fn report_scroll(&mut self, metrics: ScrollMetrics) {
        if self.last_scroll == Some(metrics) {
            return;
        }
        if self.send(BackendCommand::Scrolled(metrics)) {
            self.last_scroll = Some(metrics);
        }
    }

    fn show_error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.view.error_banner.clone() else {
            return;
        };
        ui.horizontal(|ui| {
            ui.colored_label(ui.visuals().error_fg_color, banner.message);
            if ui.button("Retry").clicked() {
                self.send(BackendCommand::Retry);
            }
        });
        ui.separator();
    }

    fn show_job_list(&mut self, ui: &mut egui::Ui) {
        let now = Utc::now();
        let output = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for job in &self.view.items {
                    render_job_card(ui, job, now);
                }
                if self.view.show_footer_spinner {
                    ui.vertical_centered(|ui| {
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                }
            });

        self.report_scroll(ScrollMetrics::new(
            output.state.offset.y,
            output.inner_rect.height(),
            output.content_size.y,
        ));
    }
}

fn render_job_card(ui: &mut egui::Ui, job: &JobItem, now: DateTime<Utc>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(job.title.as_str());
        let subtitle = job.subtitle();
        if !subtitle.is_empty() {
            ui.label(subtitle);
        }
        if let Some(salary) = &job.salary {
            ui.weak(salary.as_str());
        }
        if let Some(age) = job.posted_age_label(now) {
            ui.weak(format!("Posted {age}"));
        }
    });
    ui.add_space(6.0);
}

impl eframe::App for JobBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.mount_once();

        egui::TopBottomPanel::top("job_board_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Jobs");
                ui.weak(self.status.as_str());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_error_banner(ui);
            if self.view.show_empty_state {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label("No jobs found.");
                });
            }
            self.show_job_list(ui);
        });

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

impl Drop for JobBoardApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Unmount);
    }
}

#[cfg(test)]
mod tests {
    use client_core::{ErrorBanner, JobListView};
    use crossbeam_channel::bounded;

    use super::*;
    use crate::controller::events::{UiError, UiErrorContext};

    #[test]
    fn mounts_once_and_applies_view_updates() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let mut app = JobBoardApp::new(cmd_tx, ui_rx);

        app.mount_once();
        app.mount_once();
        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::Mount));
        assert!(cmd_rx.try_recv().is_err());

        let view = JobListView {
            error_banner: Some(ErrorBanner {
                message: "Failed to fetch jobs.".to_string(),
            }),
            ..JobListView::default()
        };
        ui_tx.send(UiEvent::ViewUpdated(view.clone())).expect("send");
        app.process_ui_events();
        assert_eq!(app.view, view);
    }

    #[test]
    fn repeated_scroll_geometry_is_sent_once() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded(8);
        let mut app = JobBoardApp::new(cmd_tx, ui_rx);
        let metrics = ScrollMetrics::new(120.0, 400.0, 900.0);

        app.report_scroll(metrics);
        app.report_scroll(metrics);
        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::Scrolled(metrics)));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn fatal_worker_error_stops_dispatching() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let mut app = JobBoardApp::new(cmd_tx, ui_rx);

        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::Configuration,
                "invalid api base url",
            )))
            .expect("send");
        app.process_ui_events();
        app.mount_once();

        assert!(cmd_rx.try_recv().is_err());
        assert!(app.status.contains("misconfigured"), "{}", app.status);
    }

    #[test]
    fn dropping_the_app_unmounts_the_worker() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded(8);
        drop(JobBoardApp::new(cmd_tx, ui_rx));

        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::Unmount));
    }
}
