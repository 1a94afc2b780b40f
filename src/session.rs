//! Interactive binding session for one device.
//!
//! A [`BindingSession`] walks rows of [`ACTIONS`] and turns press/release pairs
//! from the target device into bindings on a [`DeviceConfig`]. The host owns the
//! session, forwards input and frame ticks, draws the row texts, and finally calls
//! [`BindingSession::finish`] (or simply drops the session to cancel).
//!
//! # Row lifecycle
//! - **Awaiting start:** the cursor row waits for the confirm input (whatever the
//!   device already has bound to `a`). Other input is left to the host, typically
//!   for cursor navigation.
//! - **Capturing:** the first input pressed is held. Releasing that same control
//!   assigns it to the row; anything else pressed meanwhile is swallowed.
//!   On a skippable row, holding past the skip threshold clears the row instead.
//! - **Done:** a configure-all session ran off the end of the list.
//!
//! In configure-all mode each finished row starts capture on the next one
//! without waiting for confirm.
//!
//! # Example
//! ```
//! use stickbind::{BindingSession, DeviceConfig, DeviceId, Input, InputType};
//!
//! let pad = DeviceId::Joystick(0);
//! let cfg = DeviceConfig::new(pad, "Pad", "guid");
//! let mut session = BindingSession::new(cfg, true);
//!
//! // Bind D-Pad Up to button 11.
//! session.handle_input(Input::new(pad, InputType::Button, 11, 1));
//! session.handle_input(Input::new(pad, InputType::Button, 11, 0));
//! assert_eq!(session.row_status(0).unwrap().to_string(), "BUTTON 11");
//! assert_eq!(session.cursor(), 1);
//! ```

use crate::action::{self, ActionDesc, ACTIONS, ACTION_COUNT, HOTKEY_ACTION};
use crate::binding::DeviceConfig;
use crate::error::{Error, Result};
use crate::event::{Input, InputEvent};
use crate::options::SessionOptions;
use crate::store::ConfigStore;
use std::fmt;
use std::time::Duration;

/// Text shown in a row's mapping column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    NotDefined,
    PressAnything,
    /// Seconds left before the row is skipped.
    HoldToSkip(u32),
    AlreadyTaken,
    /// Upper-cased description of the bound input.
    Assigned(String),
}

impl RowStatus {
    fn assigned(input: &Input) -> Self {
        RowStatus::Assigned(input.description().to_uppercase())
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStatus::NotDefined => f.write_str("-Not defined-"),
            RowStatus::PressAnything => f.write_str("Press anything"),
            RowStatus::HoldToSkip(secs) => write!(f, "Hold for {secs}s to skip"),
            RowStatus::AlreadyTaken => f.write_str("Already taken"),
            RowStatus::Assigned(text) => f.write_str(text),
        }
    }
}

/// The input currently held down during capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldInput {
    pub input: Input,
    pub elapsed_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingStart { row: usize },
    Capturing { row: usize, held: Option<HeldInput> },
    Done,
}

/// Result of asking to finish the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Ready,
    /// The Menu button is unbound; show the prompt and pass the answer to
    /// [`BindingSession::resolve_hotkey`].
    NeedsHotkey(HotkeyPrompt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyPrompt {
    pub message: String,
    pub yes: &'static str,
    pub no: &'static str,
}

/// Answer to the missing Menu button prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyChoice {
    /// YES: share the fallback action's input.
    UseFallback,
    /// NO: store the disabled placeholder.
    Disable,
}

pub const TITLE: &str = "Configuring";
pub const SKIP_HINT: &str = "Hold any button to skip";

type CompletionCallback = Box<dyn FnOnce(&DeviceConfig)>;

/// Binding state machine for one device.
pub struct BindingSession {
    config: DeviceConfig,
    options: SessionOptions,
    configuring_all: bool,
    cursor: usize,
    phase: Phase,
    rows: Vec<RowStatus>,
    on_complete: Option<CompletionCallback>,
}

impl BindingSession {
    /// Opens a session with default options.
    ///
    /// `reconfigure_all` clears every existing binding and starts capturing the
    /// first row immediately.
    pub fn new(config: DeviceConfig, reconfigure_all: bool) -> Self {
        Self::build(config, reconfigure_all, SessionOptions::default())
    }

    /// Opens a session with custom options.
    ///
    /// Fails with [`Error::UnknownAction`] when an action named in `options` is
    /// not in the action table.
    pub fn with_options(config: DeviceConfig, reconfigure_all: bool, options: SessionOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(config, reconfigure_all, options))
    }

    fn build(mut config: DeviceConfig, reconfigure_all: bool, options: SessionOptions) -> Self {
        tracing::info!(
            device = %config.device_id,
            name = %config.device_name,
            reconfigure_all,
            "configuring device"
        );

        if reconfigure_all {
            config.clear();
        }

        let mut rows: Vec<RowStatus> = ACTIONS
            .iter()
            .map(|a| match config.input_for(a.name) {
                Some(input) => RowStatus::assigned(input),
                None => RowStatus::NotDefined,
            })
            .collect();

        let phase = if reconfigure_all {
            rows[0] = RowStatus::PressAnything;
            Phase::Capturing { row: 0, held: None }
        } else {
            Phase::AwaitingStart { row: 0 }
        };

        Self {
            config,
            options,
            configuring_all: reconfigure_all,
            cursor: 0,
            phase,
            rows,
            on_complete: None,
        }
    }

    /// Registers a callback run once, after the configuration is saved.
    pub fn on_complete(mut self, callback: impl FnOnce(&DeviceConfig) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_configuring_all(&self) -> bool {
        self.configuring_all
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.phase, Phase::Capturing { .. })
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// The input currently held, if any.
    pub fn held(&self) -> Option<HeldInput> {
        match self.phase {
            Phase::Capturing { held, .. } => held,
            _ => None,
        }
    }

    /// Status text of `row`, or `None` past the end of the table.
    pub fn row_status(&self, row: usize) -> Option<&RowStatus> {
        self.rows.get(row)
    }

    /// `(action, status)` for every row, in table order.
    pub fn rows(&self) -> impl Iterator<Item = (&'static ActionDesc, &RowStatus)> {
        ACTIONS.iter().zip(self.rows.iter())
    }

    pub fn title(&self) -> &'static str {
        TITLE
    }

    /// Device line under the title, e.g. `GAMEPAD 1`.
    pub fn subtitle(&self) -> String {
        self.config.device_id.label()
    }

    /// Whether [`SKIP_HINT`] applies to the cursor row.
    pub fn skip_hint_visible(&self) -> bool {
        !self.is_done() && ACTIONS[self.cursor].skippable
    }

    /// Moves the cursor to `row`. Refused while capturing.
    ///
    /// From [`Phase::Done`] this re-enters single-row configuration.
    pub fn select_row(&mut self, row: usize) -> bool {
        if self.is_capturing() || row >= ACTION_COUNT {
            return false;
        }
        self.cursor = row;
        self.phase = Phase::AwaitingStart { row };
        true
    }

    /// Moves the cursor by `delta` rows, stopping at either end.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        let target = self
            .cursor
            .saturating_add_signed(delta)
            .min(ACTION_COUNT - 1);
        target != self.cursor && self.select_row(target)
    }

    /// Begins capture on the cursor row, as if the confirm input was pressed.
    pub fn start_capture(&mut self) -> bool {
        let Phase::AwaitingStart { row } = self.phase else {
            return false;
        };
        self.rows[row] = RowStatus::PressAnything;
        self.phase = Phase::Capturing { row, held: None };
        tracing::debug!(action = ACTIONS[row].name, "capture started");
        true
    }

    /// Feeds one input. Returns `true` when the session consumed it.
    ///
    /// Input from other devices is never consumed.
    pub fn handle_input(&mut self, input: Input) -> bool {
        if input.device != self.config.device_id {
            return false;
        }

        match self.phase {
            Phase::Done => false,
            Phase::AwaitingStart { .. } => {
                input.is_pressed()
                    && self.config.is_mapped_to(&self.options.confirm_action, &input)
                    && self.start_capture()
            }
            Phase::Capturing { row, held } => {
                if input.is_pressed() {
                    if held.is_none() {
                        self.phase = Phase::Capturing {
                            row,
                            held: Some(HeldInput { input, elapsed_ms: 0 }),
                        };
                    }
                    return true;
                }

                match held {
                    Some(h) if h.input.matches(&input) => {
                        self.phase = Phase::Capturing { row, held: None };
                        if self.assign(h.input, row) {
                            self.row_done(row);
                        }
                    }
                    _ => {}
                }
                true
            }
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.handle_input(event.input)
    }

    /// Advances hold time by one frame.
    pub fn update(&mut self, delta: Duration) {
        let Phase::Capturing { row, held: Some(mut held) } = self.phase else {
            return;
        };
        let action = &ACTIONS[row];
        if !action.skippable {
            return;
        }

        let delta_ms = u32::try_from(delta.as_millis()).unwrap_or(u32::MAX);
        let threshold = self.options.hold_to_skip_ms;
        let prev_sec = held.elapsed_ms / 1000;
        held.elapsed_ms = held.elapsed_ms.saturating_add(delta_ms);
        let cur_sec = held.elapsed_ms / 1000;

        if held.elapsed_ms >= threshold {
            self.rows[row] = RowStatus::NotDefined;
            self.config.unmap_input(action.name);
            self.phase = Phase::Capturing { row, held: None };
            tracing::debug!(action = action.name, "row skipped");
            self.row_done(row);
        } else {
            self.phase = Phase::Capturing { row, held: Some(held) };
            if prev_sec != cur_sec {
                self.rows[row] = RowStatus::HoldToSkip((threshold / 1000).saturating_sub(cur_sec));
            }
        }
    }

    /// Binds `input` to the row's action unless another action already owns it.
    ///
    /// The hotkey is exempt on both sides: it may share an input, and an input
    /// owned only by the hotkey is free for other actions.
    fn assign(&mut self, input: Input, row: usize) -> bool {
        let action = &ACTIONS[row];
        let taken = !action.is_hotkey()
            && self.config.mapped_to(&input).iter().any(|owner| {
                !owner.eq_ignore_ascii_case(action.name) && !owner.eq_ignore_ascii_case(HOTKEY_ACTION)
            });

        if taken {
            self.rows[row] = RowStatus::AlreadyTaken;
            tracing::debug!(action = action.name, input = %input, "input already taken");
            return false;
        }

        let input = Input {
            configured: true,
            ..input
        };
        self.rows[row] = RowStatus::assigned(&input);
        self.config.map_input(action.name, input);
        tracing::info!("mapped [{}] -> {}", input, action.name);
        true
    }

    fn row_done(&mut self, row: usize) {
        if !self.configuring_all {
            self.phase = Phase::AwaitingStart { row };
            return;
        }

        let next = row + 1;
        if next < ACTION_COUNT {
            self.cursor = next;
            self.rows[next] = RowStatus::PressAnything;
            self.phase = Phase::Capturing { row: next, held: None };
        } else {
            self.configuring_all = false;
            self.phase = Phase::Done;
            tracing::debug!(device = %self.config.device_id, "all rows configured");
        }
    }

    /// Checks whether the session can be saved as is.
    pub fn confirm(&self) -> Confirmation {
        if self.config.has_mapping(HOTKEY_ACTION) {
            return Confirmation::Ready;
        }
        let fallback = action::find(&self.options.hotkey_fallback_action)
            .map(|a| a.name)
            .unwrap_or(self.options.hotkey_fallback_action.as_str());
        Confirmation::NeedsHotkey(HotkeyPrompt {
            message: format!(
                "You didn't choose a Menu Button. This is required for exiting games with a controller. \
                 Do you want to use the {fallback} Button default? Please answer Yes to use {fallback} \
                 Button or No to not set a Menu Button."
            ),
            yes: "YES",
            no: "NO",
        })
    }

    /// Applies the user's answer to the missing Menu button prompt.
    pub fn resolve_hotkey(&mut self, choice: HotkeyChoice) {
        let input = match choice {
            HotkeyChoice::UseFallback => {
                match self.config.input_for(&self.options.hotkey_fallback_action) {
                    Some(input) => *input,
                    None => {
                        tracing::warn!(
                            fallback = %self.options.hotkey_fallback_action,
                            "fallback action is unbound; disabling the Menu button"
                        );
                        Input::disabled_hotkey()
                    }
                }
            }
            HotkeyChoice::Disable => Input::disabled_hotkey(),
        };
        self.config.map_input(HOTKEY_ACTION, input);
    }

    /// Saves the configuration, runs the completion callback and hands the
    /// configuration back to the host.
    pub fn finish<S: ConfigStore + ?Sized>(mut self, store: &mut S) -> Result<DeviceConfig> {
        if !self.config.has_mapping(HOTKEY_ACTION) {
            return Err(Error::HotkeyUnresolved);
        }
        store.write_device_config(&self.config)?;
        if let Some(callback) = self.on_complete.take() {
            callback(&self.config);
        }
        Ok(self.config)
    }

    /// [`confirm`](Self::confirm), asking `ask` if needed, then [`finish`](Self::finish).
    pub fn confirm_with<S, F>(mut self, store: &mut S, ask: F) -> Result<DeviceConfig>
    where
        S: ConfigStore + ?Sized,
        F: FnOnce(&HotkeyPrompt) -> HotkeyChoice,
    {
        if let Confirmation::NeedsHotkey(prompt) = self.confirm() {
            let choice = ask(&prompt);
            self.resolve_hotkey(choice);
        }
        self.finish(store)
    }

    /// Closes the dialog without saving.
    pub fn cancel(self) {
        tracing::debug!(device = %self.config.device_id, "configuration cancelled");
    }
}

impl fmt::Debug for BindingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSession")
            .field("device", &self.config.device_id)
            .field("configuring_all", &self.configuring_all)
            .field("cursor", &self.cursor)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
