// Agent Studio GUI - Main Entry Point
// Desktop application for creating, editing, and chatting with agent personas

mod config;
mod reply;
mod state;
mod ui;

use config::{Config, ReplyMode};
use eframe::egui;
use state::AppState;
use std::time::{Duration, Instant};
use ui::render_app_layout;

/// How often to repaint while waiting on a remote reply
const REMOTE_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> eframe::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    tracing::info!(?config, "Configuration loaded");
    if config.reply.mode == ReplyMode::Remote {
        tracing::info!(endpoint = %config.reply.endpoint, "Replies come from the chat endpoint");
    }

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Agents Platform")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AI Agents Platform",
        options,
        Box::new(move |_cc| Box::new(AgentStudioApp::new(&config))),
    )
}

/// Main application struct
/// Owns the application state and drives reply delivery each frame
struct AgentStudioApp {
    /// Application state (agents, selection, conversation, UI preferences)
    state: AppState,
}

impl AgentStudioApp {
    /// Create a new application instance
    fn new(config: &Config) -> Self {
        Self {
            state: AppState::from_config(config),
        }
    }

    /// How long until the next frame is needed to deliver a reply
    fn repaint_delay(&self, now: Instant) -> Option<Duration> {
        if !self.state.session.has_pending_replies() {
            return None;
        }
        Some(match self.state.session.next_due() {
            Some(due) => due.saturating_duration_since(now).min(REMOTE_POLL_INTERVAL),
            None => REMOTE_POLL_INTERVAL,
        })
    }
}

impl eframe::App for AgentStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let summary = self.state.poll_replies(now);
        if summary.delivered > 0 || summary.discarded > 0 {
            tracing::debug!(
                delivered = summary.delivered,
                discarded = summary.discarded,
                "Replies processed"
            );
        }

        render_app_layout(ctx, &mut self.state);

        if let Some(delay) = self.repaint_delay(Instant::now()) {
            ctx.request_repaint_after(delay);
        }
    }
}
