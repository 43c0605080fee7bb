//! # Application Controller
//!
//! The controller orchestrates the calculator components and manages the
//! event loop. It connects user input to commands, hands calculations to the
//! background service and applies their outcomes in order.
//!
//! While a calculation is in flight, calculator input is queued and replayed
//! in arrival order once the outcome has been applied, so a fast typist never
//! races the network. Clear and quit act immediately.

use crate::profile::{get_blank_profile, CalcProfile, IniProfileStore};
use crate::repl::{
    commands::{CommandEvent, CommandRegistry},
    events::{InputEvent, ViewEvent},
    io::{EventStream, RenderStream},
    models::CalculationTicket,
    services::{CalculationClient, CalculationService, ServiceMessage},
    view_models::ViewModel,
    views::{TerminalRenderer, ViewRenderer},
};
use crate::{cmd_args::CommandLineArgs, config};
use anyhow::Result;
use crossterm::event::{Event, MouseButton, MouseEventKind};
use std::collections::VecDeque;
use std::time::Duration;

/// How long to wait for terminal input before checking for finished work
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Hint shown in the status bar until the first input
const STARTUP_HINT: &str = "Ctrl+C quit · Esc clear";

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    calculation_service: CalculationService,
    event_stream: ES,
    /// Calculator input received while a calculation was in flight
    deferred_events: VecDeque<CommandEvent>,
    health_recheck_delay: Duration,
    /// Only the report of this health check may change the backend status
    latest_health_check: u64,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create new application controller with injected I/O streams (dependency injection)
    pub fn with_io_streams(
        cmd_args: CommandLineArgs,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let profile_path = config::get_profile_path();
        let mut profile = Self::load_profile(cmd_args.profile(), &profile_path)?;

        if let Some(server) = cmd_args.server() {
            tracing::debug!("Server overridden from command line: {server}");
            profile = profile.with_server(server);
        }

        Self::with_profile(profile, event_stream, render_stream)
    }

    /// Create a controller for an already resolved profile
    pub fn with_profile(profile: CalcProfile, event_stream: ES, render_stream: RS) -> Result<Self> {
        let mut view_model = ViewModel::new();

        // Pass RenderStream ownership to the View layer (TerminalRenderer)
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;

        // Synchronize view model with actual terminal size
        let (width, height) = view_renderer.terminal_size();
        view_model.update_terminal_size(width, height);
        view_model.set_server(profile.server());
        view_model.set_status_message(STARTUP_HINT);
        view_model.collect_pending_view_events();

        let client = CalculationClient::new(&profile)?;
        tracing::info!("Calculation service at {}", client.calculate_url());

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            calculation_service: CalculationService::new(client),
            event_stream,
            deferred_events: VecDeque::new(),
            health_recheck_delay: profile.health_recheck_delay(),
            latest_health_check: 0,
            should_quit: false,
        })
    }

    /// Load profile from INI file or return blank profile if not found
    fn load_profile(profile_name: &str, profile_path: &str) -> Result<CalcProfile> {
        tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);

        let profile = match IniProfileStore::new(profile_path).get_profile(profile_name)? {
            Some(profile) => {
                tracing::debug!("Profile loaded successfully, server: {}", profile.server());
                profile
            }
            None => {
                tracing::debug!("Profile '{}' not found, using blank profile", profile_name);
                get_blank_profile()
            }
        };

        Ok(profile)
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        // Initialize view renderer (handles all terminal setup)
        self.view_renderer.initialize()?;
        self.view_renderer.render_full(&self.view_model)?;

        self.schedule_health_check(Duration::ZERO);

        // Main event loop
        let result = self.event_loop().await;

        // Restore the terminal even when the loop failed
        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.event_stream.poll(POLL_INTERVAL)? {
                let event = self.event_stream.read()?;
                self.process_event(event)?;
            }

            while let Some(message) = self.calculation_service.poll_response() {
                self.handle_service_message(message)?;
            }
            self.render_pending()?;

            // Let background jobs progress on single-threaded runtimes
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Process a single terminal event without running the full event loop
    pub fn process_event(&mut self, event: Event) -> Result<()> {
        let Some(input) = Self::to_input_event(event) else {
            return Ok(());
        };
        tracing::debug!("Received input event: {:?}", input);

        if let InputEvent::TerminalResized { width, height } = input {
            self.view_model.update_terminal_size(width, height);
            self.view_renderer.update_size(width, height);
            return self.render_pending();
        }

        let events = self.command_registry.process_event(&input)?;
        if events.is_empty() {
            return Ok(());
        }
        tracing::debug!("Command events generated: {:?}", events);

        self.view_model.clear_status_message();
        for event in events {
            self.apply_command_event(event)?;
        }
        self.render_pending()
    }

    fn to_input_event(event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key_event) => Some(InputEvent::KeyPressed(key_event)),
            Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::MouseClicked {
                    column: mouse_event.column,
                    row: mouse_event.row,
                }),
                _ => None,
            },
            Event::Resize(width, height) => Some(InputEvent::TerminalResized { width, height }),
            _ => None,
        }
    }

    /// Apply a command event to the view model
    fn apply_command_event(&mut self, event: CommandEvent) -> Result<()> {
        if event.is_deferrable() && self.view_model.is_calculating() {
            tracing::debug!("Deferring {:?} until the calculation settles", event);
            self.deferred_events.push_back(event);
            return Ok(());
        }

        match event {
            CommandEvent::DigitRequested { digit } => self.view_model.input_digit(digit),
            CommandEvent::DecimalPointRequested => self.view_model.input_decimal_point(),
            CommandEvent::OperatorRequested { operator } => {
                if let Some(ticket) = self.view_model.choose_operator(operator) {
                    self.submit(ticket);
                }
            }
            CommandEvent::EvaluateRequested => {
                if let Some(ticket) = self.view_model.evaluate() {
                    self.submit(ticket);
                }
            }
            CommandEvent::ClearRequested => {
                if !self.deferred_events.is_empty() {
                    tracing::debug!("Dropping {} deferred inputs", self.deferred_events.len());
                }
                self.deferred_events.clear();
                self.view_model.clear();
            }
            CommandEvent::QuitRequested => {
                self.should_quit = true;
            }
            CommandEvent::NoAction => {
                // Do nothing
            }
        }

        Ok(())
    }

    fn submit(&mut self, ticket: CalculationTicket) {
        tracing::debug!(
            "Submitting calculation #{}: {} {} {}",
            ticket.id.value(),
            ticket.request.a,
            ticket.request.operator,
            ticket.request.b
        );
        self.calculation_service.execute_async(ticket);
    }

    /// Apply a finished background job
    pub fn handle_service_message(&mut self, message: ServiceMessage) -> Result<()> {
        match message {
            ServiceMessage::CalculationFinished { id, outcome } => {
                if !self.view_model.apply_calculation_outcome(id, &outcome) {
                    return Ok(());
                }
                if outcome.is_err() {
                    self.schedule_health_check(self.health_recheck_delay);
                }
                self.replay_deferred_events()?;
            }
            ServiceMessage::HealthChecked { check, status } => {
                // An older check must not overwrite a failure it never saw
                if check < self.latest_health_check {
                    tracing::debug!(check, "Discarding superseded health check");
                    return Ok(());
                }
                self.view_model.set_backend_status(status);
            }
        }
        self.render_pending()
    }

    fn schedule_health_check(&mut self, delay: Duration) {
        self.latest_health_check = self.calculation_service.check_health_async(delay);
    }

    /// Replay queued input until it runs out or starts another calculation
    fn replay_deferred_events(&mut self) -> Result<()> {
        while !self.view_model.is_calculating() {
            let Some(event) = self.deferred_events.pop_front() else {
                break;
            };
            self.apply_command_event(event)?;
        }
        Ok(())
    }

    /// Wait until no calculation is in flight, applying outcomes as they arrive
    pub async fn wait_for_idle(&mut self) -> Result<()> {
        while self.view_model.is_calculating() {
            match self.calculation_service.next_message().await {
                Some(message) => self.handle_service_message(message)?,
                None => break,
            }
        }
        Ok(())
    }

    /// Process view events for selective rendering instead of always doing full redraws
    fn render_pending(&mut self) -> Result<()> {
        let view_events = self.view_model.collect_pending_view_events();
        if view_events.is_empty() {
            return Ok(());
        }

        if view_events.contains(&ViewEvent::FullRedrawRequired) {
            return self.view_renderer.render_full(&self.view_model);
        }

        // Each area once, however many updates touched it
        for event in [
            ViewEvent::DisplayUpdateRequired,
            ViewEvent::StatusBarUpdateRequired,
        ] {
            if view_events.contains(&event) {
                self.view_renderer
                    .handle_view_event(&event, &self.view_model)?;
            }
        }
        Ok(())
    }

    /// Get reference to view model (for testing)
    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    /// Number of inputs waiting for the in-flight calculation
    pub fn deferred_event_count(&self) -> usize {
        self.deferred_events.len()
    }

    /// Check if the application should quit (for testing)
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::io::{MockEventStream, MockRenderStream};
    use crate::repl::models::{BackendStatus, CalculationFailure, RequestId};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

    fn controller() -> AppController<MockEventStream, MockRenderStream> {
        // Nothing listens here; these tests never let a job finish
        let profile = get_blank_profile().with_server("http://127.0.0.1:9");
        AppController::with_profile(profile, MockEventStream::empty(), MockRenderStream::new())
            .unwrap()
    }

    fn key(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
    }

    fn type_keys(controller: &mut AppController<MockEventStream, MockRenderStream>, keys: &str) {
        for ch in keys.chars() {
            controller.process_event(key(ch)).unwrap();
        }
    }

    fn in_flight(controller: &AppController<MockEventStream, MockRenderStream>) -> RequestId {
        controller.view_model().calculator().in_flight_id().unwrap()
    }

    #[tokio::test]
    async fn input_during_calculation_should_be_deferred_and_replayed_in_order() {
        let mut controller = controller();
        type_keys(&mut controller, "2+3+");
        let first = in_flight(&controller);

        type_keys(&mut controller, "4=");
        assert_eq!(controller.deferred_event_count(), 2);
        assert_eq!(controller.view_model().display_text(), "3");

        controller
            .handle_service_message(ServiceMessage::CalculationFinished {
                id: first,
                outcome: Ok(5.0),
            })
            .unwrap();

        // '4' was replayed onto a fresh entry, '=' sent 5 + 4
        assert_eq!(controller.deferred_event_count(), 0);
        assert_eq!(controller.view_model().display_text(), "4");
        let second = in_flight(&controller);
        assert_ne!(first, second);

        controller
            .handle_service_message(ServiceMessage::CalculationFinished {
                id: second,
                outcome: Ok(9.0),
            })
            .unwrap();
        assert_eq!(controller.view_model().display_text(), "9");
        assert!(!controller.view_model().is_calculating());
    }

    #[tokio::test]
    async fn clear_should_drop_deferred_input_and_stale_outcome() {
        let mut controller = controller();
        type_keys(&mut controller, "8*2=");
        let id = in_flight(&controller);
        type_keys(&mut controller, "77");

        controller
            .process_event(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        assert_eq!(controller.deferred_event_count(), 0);

        controller
            .handle_service_message(ServiceMessage::CalculationFinished {
                id,
                outcome: Ok(16.0),
            })
            .unwrap();
        assert_eq!(controller.view_model().display_text(), "0");
    }

    #[tokio::test]
    async fn failed_calculation_should_show_error() {
        let mut controller = controller();
        type_keys(&mut controller, "5/0=");
        let id = in_flight(&controller);

        controller
            .handle_service_message(ServiceMessage::CalculationFinished {
                id,
                outcome: Err(CalculationFailure::rejected("division by zero")),
            })
            .unwrap();

        assert_eq!(controller.view_model().display_text(), "Error");
        assert!(controller.view_model().pending_expression().is_none());
    }

    #[tokio::test]
    async fn stale_health_check_should_not_replace_failure() {
        let mut controller = controller();
        controller.schedule_health_check(Duration::ZERO);
        let startup_check = controller.latest_health_check;
        type_keys(&mut controller, "2+3=");
        let id = in_flight(&controller);

        controller
            .handle_service_message(ServiceMessage::CalculationFinished {
                id,
                outcome: Err(CalculationFailure::unavailable()),
            })
            .unwrap();
        let recheck = controller.latest_health_check;
        assert!(recheck > startup_check);

        controller
            .handle_service_message(ServiceMessage::HealthChecked {
                check: startup_check,
                status: BackendStatus::Connected,
            })
            .unwrap();
        assert!(matches!(
            controller.view_model().status_line().backend_status(),
            BackendStatus::Failed(_)
        ));

        controller
            .handle_service_message(ServiceMessage::HealthChecked {
                check: recheck,
                status: BackendStatus::Disconnected,
            })
            .unwrap();
        assert_eq!(
            controller.view_model().status_line().backend_status(),
            &BackendStatus::Disconnected
        );
    }

    #[tokio::test]
    async fn ctrl_c_should_quit_even_while_calculating() {
        let mut controller = controller();
        type_keys(&mut controller, "1+1=");

        controller
            .process_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            )))
            .unwrap();

        assert!(controller.should_quit());
    }

    #[tokio::test]
    async fn keypad_click_should_enter_digit() {
        let mut controller = controller();
        let seven = controller.view_model().keypad().buttons()[0];

        controller
            .process_event(Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: seven.column + 2,
                row: seven.row,
                modifiers: KeyModifiers::NONE,
            }))
            .unwrap();

        assert_eq!(controller.view_model().display_text(), "7");
    }

    #[tokio::test]
    async fn resize_should_update_terminal_size() {
        let mut controller = controller();

        controller.process_event(Event::Resize(100, 40)).unwrap();

        assert_eq!(controller.view_model().terminal_size(), (100, 40));
    }
}
