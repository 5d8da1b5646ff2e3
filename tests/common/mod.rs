//! # Test Harness
//!
//! Provides an engine wired to scripted input and a captured console, plus
//! probe screens that record every callback the engine makes.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::{Mutex, MutexGuard},
};

use screenstack::{
    Captured, Console, Engine, EngineBuilder, EventTag, KeyOutcome, Prompt, Result, Screen,
    ScreenArgs, ScreenBase, ScriptedInput,
};

/// Global lock to ensure engine tests run sequentially.
/// Echoed reads share one process-wide guard; concurrent tests would abandon
/// each other's reads.
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Shared record of screen callbacks, in call order.
pub type Log = Rc<RefCell<Vec<String>>>;

/// Failure reports seen on the queue, as `context: message`.
pub type Reports = Rc<RefCell<Vec<String>>>;

type InputHook = Box<dyn Fn(&Probe, &mut Engine, &str) -> Result<KeyOutcome>>;

/// Engine reading scripted lines and printing into memory.
pub struct TestApp {
    pub engine: Engine,
    pub input: ScriptedInput,
    pub output: Captured,
    pub log: Log,
    /// Guard for the test lock
    #[allow(dead_code)]
    test_guard: MutexGuard<'static, ()>,
}

impl TestApp {
    /// Creates an app that will read `lines`, in order.
    pub fn new(lines: &[&str]) -> Self {
        Self::with_builder(Engine::builder("Test App").width(120), lines)
    }

    /// Like `new`, starting from a preconfigured builder.
    pub fn with_builder(builder: EngineBuilder, lines: &[&str]) -> Self {
        // Recover from poisoned mutex (if a previous test panicked while holding the lock)
        let test_guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let input = ScriptedInput::new(lines.iter().copied());
        let (console, output) = Console::capture();
        let engine = builder.console(console).input(input.clone()).build();

        Self {
            engine,
            input,
            output,
            log: Log::default(),
            test_guard,
        }
    }

    /// Creates a probe screen recording into this app's log.
    pub fn probe(&self, name: &str) -> Probe {
        Probe::new(name, &self.log)
    }

    /// Collects every failure report the engine dispatches.
    pub fn collect_reports(&mut self) -> Reports {
        let reports = Reports::default();
        self.engine.register_event_handler(
            EventTag::Exception,
            |_, event, reports: &Reports| {
                if let Some(report) = event.exception_report() {
                    reports.borrow_mut().push(report.to_string());
                }
                Ok(())
            },
            Rc::clone(&reports),
        );
        reports
    }

    /// Recorded callbacks.
    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Number of recorded callbacks equal to `call`.
    pub fn count(&self, call: &str) -> usize {
        self.log.borrow().iter().filter(|c| *c == call).count()
    }

    /// Everything printed so far.
    pub fn printed(&self) -> String {
        self.output.contents()
    }
}

/// Screen recording `name:callback` for each engine call.
pub struct Probe {
    base: ScreenBase,
    name: String,
    log: Log,
    on_input: Option<InputHook>,
    failing_refreshes: Cell<u32>,
    failing_prompts: Cell<u32>,
}

impl Probe {
    pub fn new(name: &str, log: &Log) -> Self {
        Self {
            base: ScreenBase::default(),
            name: name.to_string(),
            log: Rc::clone(log),
            on_input: None,
            failing_refreshes: Cell::new(0),
            failing_prompts: Cell::new(0),
        }
    }

    /// Handles input with `hook` instead of forwarding every key.
    pub fn on_input(
        mut self,
        hook: impl Fn(&Probe, &mut Engine, &str) -> Result<KeyOutcome> + 'static,
    ) -> Self {
        self.on_input = Some(Box::new(hook));
        self
    }

    /// Makes the next `count` refreshes fail.
    pub fn failing_refreshes(self, count: u32) -> Self {
        self.failing_refreshes.set(count);
        self
    }

    /// Makes the next `count` prompts fail.
    pub fn failing_prompts(self, count: u32) -> Self {
        self.failing_prompts.set(count);
        self
    }

    /// Appends `name:call` to the log.
    pub fn record(&self, call: &str) {
        self.log.borrow_mut().push(format!("{}:{call}", self.name));
    }

    pub fn into_rc(self) -> Rc<Self> {
        Rc::new(self)
    }
}

impl Screen for Probe {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn setup(&self, _args: &ScreenArgs) -> bool {
        self.record("setup");
        true
    }

    fn refresh(&self, _engine: &mut Engine, _args: &ScreenArgs) -> Result<bool> {
        self.record("refresh");
        let failing = self.failing_refreshes.get();
        if failing > 0 {
            self.failing_refreshes.set(failing - 1);
            return Err(anyhow::anyhow!("{} is broken", self.name).into());
        }
        self.base
            .set_window(vec![format!("== {} ==", self.name).into()]);
        Ok(true)
    }

    fn show(&self, engine: &mut Engine) -> Result<()> {
        self.record("show");
        self.base.show_all(engine)
    }

    fn input(&self, engine: &mut Engine, _args: &ScreenArgs, key: &str) -> Result<KeyOutcome> {
        self.record(&format!("input:{key}"));
        match &self.on_input {
            Some(hook) => hook(self, engine, key),
            None => Ok(KeyOutcome::Forward(key.to_string())),
        }
    }

    fn prompt(&self, engine: &mut Engine, _args: &ScreenArgs) -> Result<Option<Prompt>> {
        let failing = self.failing_prompts.get();
        if failing > 0 {
            self.failing_prompts.set(failing - 1);
            return Err(anyhow::anyhow!("{} has no prompt", self.name).into());
        }
        Ok(Some(Prompt::default().with_global_options(engine.keymap())))
    }

    fn entry(&self) {
        self.record("entry");
    }

    fn exit(&self) {
        self.record("exit");
    }
}
