//! # Engine
//!
//! Main loop controller: owns the screen stack and the event queue, redraws the
//! top screen, reads input and routes it to the screen and the global commands.
//!
//! Screens are managed with four transitions:
//! - replace the current screen (linear progression)
//! - push a screen, keeping the current one to return to (hub and spoke)
//! - push a screen and run it in a nested loop until it closes (dialog)
//! - close the current screen and return to the one below
//!
//! Loop control travels as [`Error::ExitLoop`] and [`Error::ExitAllLoops`];
//! [`Engine::run`] turns them into its return value.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

pub mod current;
pub mod stack;

use std::{collections::HashMap, rc::Rc, sync::Arc, thread::JoinHandle};

pub use self::{
    current::CurrentScreen,
    stack::{LoopMarker, ScreenStack, StackEntry},
};
use crate::{
    console::Console,
    constants::{
        DEFAULT_QUIT_MESSAGE, DEFAULT_SCREEN_HEIGHT, DEFAULT_WIDTH, MAX_UNHANDLED_INPUTS,
        SPACER_GLYPH, SPACER_LINES,
    },
    error::{Error, Result},
    event::{Event, EventQueue, EventSender, EventTag, Payload},
    input::{self, InputSource, ReadRequest, TerminalInput},
    keymap::{GlobalCommand, KeyMap},
    prompt::Prompt,
    screen::{same_screen, KeyOutcome, QuitDialog, Screen, ScreenArgs},
};

/// Event callback with its bound data; handlers may drive the engine.
type Handler = Rc<dyn Fn(&mut Engine, &Event) -> Result<()>>;

/// Builds the dialog shown when the user asks to quit.
pub type QuitScreenFactory = Rc<dyn Fn(&Engine, &str) -> Rc<dyn QuitDialog>>;

/// Per-invocation state of one main loop.
#[derive(Default)]
struct LoopState {
    last_screen: Option<Rc<dyn Screen>>,
    unhandled: u32,
}

/// Screen stack and main loop controller.
pub struct Engine {
    header: String,
    width: usize,
    screen_height: usize,
    spacer: String,
    redraw: bool,
    screens: ScreenStack,
    queue: EventQueue,
    handlers: HashMap<EventTag, Vec<Handler>>,
    input_thread: Option<JoinHandle<()>>,
    input: Arc<dyn InputSource>,
    console: Console,
    current: CurrentScreen,
    keymap: KeyMap,
    quit_screen: Option<QuitScreenFactory>,
    quit_message: String,
    on_quit: Option<Box<dyn FnMut()>>,
}

impl Engine {
    /// Engine with default settings reading from the terminal.
    pub fn new(title: impl Into<String>) -> Self {
        Self::builder(title).build()
    }

    pub fn builder(title: impl Into<String>) -> EngineBuilder {
        EngineBuilder::new(title)
    }

    // =========================================================================
    // Running
    // =========================================================================

    /// Runs until no screen is left or the user quits.
    ///
    /// Returns `true` when the stack ran empty and `false` when every loop was
    /// ended by a quit.
    pub fn run(&mut self) -> Result<bool> {
        tracing::debug!(screens = self.screens.len(), "starting main loop");
        match self.mainloop() {
            Ok(()) | Err(Error::ExitLoop) => Ok(true),
            Err(Error::ExitAllLoops) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn mainloop(&mut self) -> Result<()> {
        self.redraw = true;
        let mut state = LoopState::default();

        while !self.screens.is_empty() {
            match self.cycle(&mut state) {
                Ok(()) => {}
                Err(Error::ExitLoop) => break,
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// One pass of the main loop: events, redraw, prompt, input.
    fn cycle(&mut self, state: &mut LoopState) -> Result<()> {
        self.process_events(None)?;

        if self.redraw {
            self.console.print_line(&self.spacer)?;
        }

        let top = self.top_entry()?;
        let changed = !state
            .last_screen
            .as_ref()
            .is_some_and(|last| same_screen(&**last, &*top.screen));

        if self.redraw || changed {
            state.unhandled = 0;
            if !self.do_redraw()? {
                return Ok(());
            }
        }

        let entry = self.top_entry()?;
        state.last_screen = Some(Rc::clone(&entry.screen));

        let prompt = entry.screen.prompt(self, &entry.args);
        let Some(prompt) = self.absorb("prompt", prompt)? else {
            return Ok(());
        };
        // The screen took care of input itself
        let Some(prompt) = prompt else {
            self.redraw();
            return Ok(());
        };

        let key = self.raw_input(&prompt, false)?;

        let args = self.top_entry()?.args;
        if self.input(&args, &key)? {
            self.redraw();
        } else {
            state.unhandled += 1;
        }

        if state.unhandled >= MAX_UNHANDLED_INPUTS {
            self.redraw();
        }
        Ok(())
    }

    /// Draws the top screen. Returns whether input should be read afterwards.
    ///
    /// An entry marked to start a nested loop runs that loop here, so the
    /// marker flips to running in the same step that enters the loop.
    fn do_redraw(&mut self) -> Result<bool> {
        let entry = self.top_entry()?;
        self.current.set(Some(Rc::clone(&entry.screen)));

        if entry.marker == LoopMarker::Start {
            if let Some(top) = self.screens.top_mut() {
                top.marker = LoopMarker::Running;
            }
            tracing::debug!(depth = self.screens.len(), "entering nested main loop");
            self.mainloop()?;
            tracing::debug!(depth = self.screens.len(), "nested main loop finished");
            // Show the caller again before asking for input
            self.redraw();
            return Ok(false);
        }

        if !self.redraw {
            // Invalid input earlier; just prompt again
            return Ok(true);
        }

        let drawn = self.refresh_and_show(&entry);
        match self.absorb("refresh", drawn)? {
            Some(wants_input) => {
                self.redraw = false;
                Ok(wants_input)
            }
            None => Ok(false),
        }
    }

    fn refresh_and_show(&mut self, entry: &StackEntry) -> Result<bool> {
        let wants_input = entry.screen.refresh(self, &entry.args)?;
        entry.screen.show(self)?;
        Ok(wants_input)
    }

    /// Top entry, or the end of this loop if nothing is left to show.
    fn top_entry(&self) -> Result<StackEntry> {
        self.screens.top().cloned().ok_or(Error::ExitLoop)
    }

    // =========================================================================
    // Screen Transitions
    // =========================================================================

    /// Adds a screen to the bottom of the stack.
    ///
    /// Meant for building the initial hierarchy before [`Engine::run`].
    pub fn schedule_screen(&mut self, screen: Rc<dyn Screen>, args: ScreenArgs) {
        self.screens
            .prepend(StackEntry::new(screen, args, LoopMarker::None));
        tracing::debug!(screens = self.screens.len(), "screen scheduled");
    }

    /// Replaces the current screen.
    ///
    /// The replaced entry's loop marker is kept, so a dialog that switches to
    /// another screen still ends its nested loop when that screen closes.
    pub fn switch_screen(&mut self, screen: Rc<dyn Screen>, args: ScreenArgs) -> Result<()> {
        self.screens
            .replace_top(screen, args)
            .ok_or(Error::EmptyStack)?;
        tracing::debug!(screens = self.screens.len(), "screen replaced");
        self.redraw();
        Ok(())
    }

    /// Shows a screen, returning to the current one when it closes.
    pub fn switch_screen_with_return(&mut self, screen: Rc<dyn Screen>, args: ScreenArgs) {
        self.screens
            .push(StackEntry::new(screen, args, LoopMarker::None));
        tracing::debug!(screens = self.screens.len(), "screen pushed");
        self.redraw();
    }

    /// Shows a screen right away and returns only once it has closed.
    pub fn switch_screen_modal(&mut self, screen: Rc<dyn Screen>, args: ScreenArgs) -> Result<()> {
        self.screens
            .push(StackEntry::new(screen, args, LoopMarker::Start));
        tracing::debug!(screens = self.screens.len(), "modal screen pushed");
        self.do_redraw()?;
        Ok(())
    }

    /// Closes the top screen.
    ///
    /// `expected`, if given, must be the screen on top. Closing the origin of a
    /// nested loop ends that loop; closing the last screen ends the current one.
    pub fn close_screen(&mut self, expected: Option<&dyn Screen>) -> Result<()> {
        let entry = self.screens.pop().ok_or(Error::EmptyStack)?;
        tracing::debug!(screens = self.screens.len(), "screen closed");

        if let Some(expected) = expected {
            if !same_screen(&*entry.screen, expected) {
                return Err(Error::ScreenMismatch);
            }
        }

        match entry.marker {
            LoopMarker::Start => Err(Error::LoopNotStarted),
            LoopMarker::Running => Err(Error::ExitLoop),
            LoopMarker::None if self.screens.is_empty() => Err(Error::ExitLoop),
            LoopMarker::None => {
                self.redraw();
                Ok(())
            }
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Routes a typed key: first to the top screen, then to the global commands.
    ///
    /// Returns whether the key was handled.
    pub fn input(&mut self, args: &ScreenArgs, key: &str) -> Result<bool> {
        let mut global_key = Some(key.to_string());

        if let Some(entry) = self.screens.top().cloned() {
            let outcome = entry.screen.input(self, args, key);
            match self.absorb("input", outcome)? {
                None => return Ok(false),
                Some(KeyOutcome::Consumed) => return Ok(true),
                Some(KeyOutcome::Unhandled) => global_key = None,
                Some(KeyOutcome::Forward(forwarded)) => global_key = Some(forwarded),
            }
        }

        // The screen may have changed the stack; re-check before global commands
        if self.screens.is_empty() {
            return Ok(false);
        }
        let Some(command) = global_key.as_deref().and_then(|k| self.keymap.resolve(k)) else {
            return Ok(false);
        };

        match command {
            GlobalCommand::Refresh => {
                self.do_redraw()?;
            }
            GlobalCommand::Continue => self.close_screen(None)?,
            GlobalCommand::Quit => self.quit()?,
        }
        Ok(true)
    }

    /// Asks for confirmation if a quit screen is configured, then ends all loops.
    fn quit(&mut self) -> Result<()> {
        if let Some(factory) = self.quit_screen.clone() {
            let dialog = factory(self, &self.quit_message);
            self.switch_screen_modal(dialog.clone(), None)?;
            if !dialog.answer() {
                tracing::debug!("quit declined");
                return Ok(());
            }
        }

        if let Some(on_quit) = self.on_quit.as_mut() {
            on_quit();
        }
        tracing::info!("application quit");
        Err(Error::ExitAllLoops)
    }

    /// Reads one input from the user on a background thread.
    pub fn raw_input(&mut self, prompt: &Prompt, hidden: bool) -> Result<String> {
        self.request_input(prompt, hidden)?;
        self.await_input()
    }

    /// Starts the background read without waiting for it.
    pub fn request_input(&mut self, prompt: &Prompt, hidden: bool) -> Result<()> {
        if self
            .input_thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
        {
            return Err(Error::InputInFlight);
        }

        let request = ReadRequest {
            prompt: prompt.to_string(),
            hidden,
            width: self.width,
            source: Arc::clone(&self.input),
            console: self.console.clone(),
            sender: self.queue.sender(),
        };
        let thread = input::spawn_reader(request).map_err(Error::Spawn)?;
        tracing::debug!(hidden, "input thread started");
        self.input_thread = Some(thread);
        Ok(())
    }

    /// Processes events until the requested input arrives.
    pub fn await_input(&mut self) -> Result<String> {
        let event = self
            .process_events(Some(EventTag::Input))?
            .ok_or(Error::QueueDisconnected)?;

        // The worker exits right after posting
        if let Some(thread) = self.input_thread.take() {
            if thread.join().is_err() {
                tracing::warn!("input thread panicked");
            }
        }

        Ok(match event.payload {
            Payload::Input(value) => value,
            _ => String::new(),
        })
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Registers `callback` to run with `data` for every message tagged `tag`.
    ///
    /// Handlers for one tag run in registration order. They get the engine, so
    /// a message can request a redraw or a screen transition.
    pub fn register_event_handler<D, F>(&mut self, tag: EventTag, callback: F, data: D)
    where
        D: 'static,
        F: Fn(&mut Engine, &Event, &D) -> Result<()> + 'static,
    {
        self.handlers
            .entry(tag)
            .or_default()
            .push(Rc::new(move |engine, event| callback(engine, event, &data)));
    }

    /// Dispatches queued messages.
    ///
    /// Without `return_at`, drains what is queued and returns `None`. With it,
    /// blocks until a message with that tag arrives and returns it; everything
    /// dequeued before it is dispatched first. Messages without handlers are
    /// dropped.
    pub fn process_events(&mut self, return_at: Option<EventTag>) -> Result<Option<Event>> {
        loop {
            let event = if return_at.is_some() {
                self.queue.get().map_err(|_| Error::QueueDisconnected)?
            } else {
                match self.queue.try_get() {
                    Some(event) => event,
                    None => return Ok(None),
                }
            };

            if Some(event.tag) == return_at {
                return Ok(Some(event));
            }

            // Cloned out so handlers can borrow the engine mutably
            let Some(handlers) = self.handlers.get(&event.tag).cloned() else {
                tracing::trace!(tag = ?event.tag, "no handler, message dropped");
                continue;
            };
            tracing::debug!(tag = ?event.tag, handlers = handlers.len(), "dispatching event");
            for handler in handlers {
                let result = handler(self, &event);
                self.absorb("event handler", result)?;
            }
        }
    }

    /// Reports application failures on the queue and lets everything else through.
    fn absorb<T>(&self, context: &str, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(Error::Screen(err)) => {
                report(&self.queue, context, err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Marks the current screen for redrawing on the next cycle.
    pub fn redraw(&mut self) {
        self.redraw = true;
    }

    pub const fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Application title.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Columns available for rendering.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Lines per page for screens that don't set their own height.
    pub const fn screen_height(&self) -> usize {
        self.screen_height
    }

    /// Screen currently shown, shared with engines using the same registry.
    pub fn current_screen(&self) -> Option<Rc<dyn Screen>> {
        self.current.get()
    }

    pub const fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub const fn console(&self) -> &Console {
        &self.console
    }

    pub const fn screens(&self) -> &ScreenStack {
        &self.screens
    }

    /// Handle for posting messages from other threads.
    pub fn event_sender(&self) -> EventSender {
        self.queue.sender()
    }

    pub fn quit_message(&self) -> &str {
        &self.quit_message
    }
}

fn report(queue: &EventQueue, context: &str, err: anyhow::Error) {
    tracing::error!(context, "{err:#}");
    queue.put(Event::exception(context, err));
}

// =============================================================================
// Builder
// =============================================================================

/// Configures an [`Engine`].
pub struct EngineBuilder {
    title: String,
    width: usize,
    screen_height: usize,
    queue: Option<EventQueue>,
    input: Option<Arc<dyn InputSource>>,
    console: Option<Console>,
    current: Option<CurrentScreen>,
    keymap: KeyMap,
    quit_screen: Option<QuitScreenFactory>,
    quit_message: String,
    on_quit: Option<Box<dyn FnMut()>>,
}

impl EngineBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: DEFAULT_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            queue: None,
            input: None,
            console: None,
            current: None,
            keymap: KeyMap::default(),
            quit_screen: None,
            quit_message: DEFAULT_QUIT_MESSAGE.to_string(),
            on_quit: None,
        }
    }

    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Page height used when paginating long widgets.
    #[must_use]
    pub fn screen_height(mut self, lines: usize) -> Self {
        self.screen_height = lines;
        self
    }

    /// Uses an existing queue, e.g. one producers already hold senders for.
    #[must_use]
    pub fn queue(mut self, queue: EventQueue) -> Self {
        self.queue = Some(queue);
        self
    }

    #[must_use]
    pub fn input(mut self, source: impl InputSource + 'static) -> Self {
        self.input = Some(Arc::new(source));
        self
    }

    #[must_use]
    pub fn console(mut self, console: Console) -> Self {
        self.console = Some(console);
        self
    }

    /// Shares the current-screen slot with other engines.
    #[must_use]
    pub fn current_screen(mut self, current: CurrentScreen) -> Self {
        self.current = Some(current);
        self
    }

    #[must_use]
    pub fn keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Dialog run modally on quit; quitting proceeds only if it answers yes.
    #[must_use]
    pub fn quit_screen<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Engine, &str) -> Rc<dyn QuitDialog> + 'static,
    {
        self.quit_screen = Some(Rc::new(factory));
        self
    }

    #[must_use]
    pub fn quit_message(mut self, message: impl Into<String>) -> Self {
        self.quit_message = message.into();
        self
    }

    /// Called once the user has quit, before the loops unwind.
    #[must_use]
    pub fn on_quit(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_quit = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Engine {
        let spacer = vec![SPACER_GLYPH.to_string().repeat(self.width); SPACER_LINES].join("\n");
        Engine {
            header: self.title,
            width: self.width,
            screen_height: self.screen_height,
            spacer,
            redraw: true,
            screens: ScreenStack::new(),
            queue: self.queue.unwrap_or_default(),
            handlers: HashMap::new(),
            input_thread: None,
            input: self.input.unwrap_or_else(|| Arc::new(TerminalInput)),
            console: self.console.unwrap_or_default(),
            current: self.current.unwrap_or_default(),
            keymap: self.keymap,
            quit_screen: self.quit_screen,
            quit_message: self.quit_message,
            on_quit: self.on_quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{input::ScriptedInput, screen::ScreenBase};

    #[derive(Default)]
    struct Blank {
        base: ScreenBase,
    }

    impl Screen for Blank {
        fn base(&self) -> &ScreenBase {
            &self.base
        }
    }

    fn engine(lines: &[&str]) -> (Engine, crate::console::Captured) {
        let (console, captured) = Console::capture();
        let engine = Engine::builder("unit")
            .width(10)
            .console(console)
            .input(ScriptedInput::new(lines.iter().copied()))
            .build();
        (engine, captured)
    }

    #[test]
    fn test_spacer_spans_width() {
        let (engine, _) = engine(&[]);
        assert_eq!(engine.spacer, "==========\n==========");
        assert_eq!(engine.header(), "unit");
        assert!(engine.redraw_pending());
    }

    #[test]
    fn test_close_of_unstarted_loop_is_rejected() {
        let (mut engine, _) = engine(&[]);
        engine
            .screens
            .push(StackEntry::new(Rc::new(Blank::default()), None, LoopMarker::Start));

        assert!(matches!(
            engine.close_screen(None),
            Err(Error::LoopNotStarted)
        ));
    }

    #[test]
    fn test_closing_running_entry_ends_its_loop() {
        let (mut engine, _) = engine(&[]);
        engine
            .screens
            .push(StackEntry::new(Rc::new(Blank::default()), None, LoopMarker::None));
        engine
            .screens
            .push(StackEntry::new(Rc::new(Blank::default()), None, LoopMarker::Running));

        assert!(matches!(engine.close_screen(None), Err(Error::ExitLoop)));
        assert_eq!(engine.screens().len(), 1);
    }

    #[test]
    fn test_switch_keeps_marker_of_replaced_entry() {
        let (mut engine, _) = engine(&[]);
        engine
            .screens
            .push(StackEntry::new(Rc::new(Blank::default()), None, LoopMarker::Running));

        engine.switch_screen(Rc::new(Blank::default()), None).unwrap();

        assert_eq!(engine.screens().top().map(|e| e.marker), Some(LoopMarker::Running));
    }

    #[test]
    fn test_modal_push_marks_running_before_nested_loop() {
        let _serial = crate::input::serial();
        let (mut engine, captured) = engine(&["c"]);

        engine
            .switch_screen_modal(Rc::new(Blank::default()), None)
            .unwrap();

        assert!(engine.screens().is_empty());
        assert!(captured.contents().contains("Screen.."));
        assert!(engine.redraw_pending());
    }

    #[test]
    fn test_input_without_screen_is_unhandled() {
        let (mut engine, _) = engine(&[]);
        assert!(!engine.input(&None, "q").unwrap());
    }

    #[test]
    fn test_input_past_unhandled_limit() {
        let _serial = crate::input::serial();
        let (mut engine, _) = engine(&["1", "2", "3", "4", "5", "c"]);
        engine.schedule_screen(Rc::new(Blank::default()), None);
        assert!(engine.run().unwrap());
    }
}
