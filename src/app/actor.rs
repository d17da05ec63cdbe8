//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let commands = self.state.mount();
        self.send_all(commands);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let commands = self.state.handle_response(response);
                    self.send_all(commands);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send_all(&self, commands: Vec<NetworkCommand>) {
        for cmd in commands {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navigation
            UiEvent::SwitchPage(page) => {
                let commands = self.state.switch_page(page);
                self.send_all(commands);
            }
            UiEvent::NextPage => {
                let commands = self.state.next_page();
                self.send_all(commands);
            }
            UiEvent::PrevPage => {
                let commands = self.state.prev_page();
                self.send_all(commands);
            }
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),

            // Data
            UiEvent::Refetch => {
                let commands = self.state.refetch();
                self.send_all(commands);
            }

            // Reports
            UiEvent::GenerateReport => {
                let today = chrono::Local::now().date_naive();
                if let Some(cmd) = self.state.generate_report(today) {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::DownloadReport(format) => {
                if let Some(cmd) = self.state.download_selected(format) {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Appearance
            UiEvent::ToggleTheme => self.state.toggle_theme(),

            // Popups
            UiEvent::ToggleNotifications => self.state.toggle_notifications(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::Dismiss => self.state.dismiss(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
