// src/cli/mod.rs

//! The application layer: a fluent builder around a [`Console`] and the argv
//! dispatcher that drives it.

pub mod args;
pub mod dispatcher;
pub mod help;

use crate::core::color::Style;
use crate::core::command::Command;
use crate::core::console::Console;
use crate::core::errors::ConsoleResult;
use crate::core::invocation::Container;
use crate::core::theme::Theme;
use crate::models::{Flag, Hook};
use log::debug;
use std::fmt;

type ExitCallback = Box<dyn Fn(i32)>;

/// A command-line application.
///
/// ```no_run
/// use consola::Application;
///
/// let mut app = Application::new("todo", "1.0.0")
///     .headtitle("Todo manager")
///     .show_footer(true);
/// let code = app.handle(std::env::args().skip(1).collect());
/// std::process::exit(code);
/// ```
pub struct Application {
    console: Console,
    locale: Option<String>,
    on_exit: Option<ExitCallback>,
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("console", &self.console)
            .field("locale", &self.locale)
            .field("has_exit_callback", &self.on_exit.is_some())
            .finish()
    }
}

impl Application {
    /// An application writing to standard output.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::with_console(Console::new(name, version))
    }

    /// Wraps an existing console, e.g. one writing to a test sink.
    pub fn with_console(console: Console) -> Self {
        Self {
            console,
            locale: None,
            on_exit: None,
        }
    }

    /// Records the preferred locale. Messages are compiled in, so this only
    /// shows up in the logs.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        debug!("Locale '{}' requested, built with '{}'", locale, env!("CONSOLA_LANG_EFFECTIVE"));
        self.locale = Some(locale);
        self
    }

    /// Replaces the `name, version` help header.
    pub fn headtitle(mut self, title: impl Into<String>) -> Self {
        self.console.set_headtitle(title);
        self
    }

    /// Shows or hides the help header.
    pub fn show_header(self, show: bool) -> Self {
        self.console.set_flag(Flag::Header, show);
        self
    }

    /// Shows or hides the help footer.
    pub fn show_footer(self, show: bool) -> Self {
        self.console.set_flag(Flag::Footer, show);
        self
    }

    /// Text printed above the help, e.g. a banner.
    pub fn logo(mut self, logo: impl Into<String>) -> Self {
        self.console.set_logo(logo);
        self
    }

    /// Switches to a built-in theme, a user theme or a theme file.
    ///
    /// # Errors
    /// Returns `ConsoleError::ThemeNotFound` or `ConsoleError::ThemeParse`.
    pub fn theme(self, name: &str) -> ConsoleResult<Self> {
        self.console.set_theme(Theme::find(name)?);
        Ok(self)
    }

    /// Defines styles on the current theme; `names` may list several, separated by `|`.
    pub fn define_colors(self, names: &str, style: Style) -> Self {
        self.console.writer().theme_mut().define(names, style);
        self
    }

    /// Uses `container` to build and invoke commands.
    pub fn container(mut self, container: impl Container + 'static) -> Self {
        self.console.set_container(Box::new(container));
        self
    }

    /// Runs `callback` at `hook` around every handler.
    pub fn hook(mut self, hook: Hook, callback: impl Fn(bool, &dyn Command) + 'static) -> Self {
        self.console.set_hook(hook, callback);
        self
    }

    /// Enables the `Logger` component; `prefix` starts every logged line.
    pub fn logger(mut self, prefix: impl Into<String>) -> Self {
        self.console.set_logger(prefix);
        self
    }

    /// Runs `key` when argv names no command.
    ///
    /// # Errors
    /// Returns `ConsoleError::CommandNotFound` when `key` is not registered yet.
    pub fn default_command(mut self, key: &str) -> ConsoleResult<Self> {
        self.console.set_default_command(key)?;
        Ok(self)
    }

    /// Registers `C` under its type name.
    ///
    /// # Errors
    /// See [`Console::register_type`].
    pub fn command<C: Command + Default + 'static>(mut self) -> ConsoleResult<Self> {
        self.console.register_type::<C>()?;
        Ok(self)
    }

    /// Registers commands the container builds.
    ///
    /// # Errors
    /// See [`Console::register_many`].
    pub fn commands(mut self, identities: &[&str]) -> ConsoleResult<Self> {
        self.console.register_many(identities)?;
        Ok(self)
    }

    /// Registers an already built command.
    ///
    /// # Errors
    /// See [`Console::register_instance`].
    pub fn command_instance(mut self, identity: &str, command: Box<dyn Command>) -> ConsoleResult<Self> {
        self.console.register_instance(identity, command)?;
        Ok(self)
    }

    /// Called with the exit code once [`Application::handle`] is done.
    pub fn on_exit(mut self, callback: impl Fn(i32) + 'static) -> Self {
        self.on_exit = Some(Box::new(callback));
        self
    }

    /// The console behind the application.
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Mutable access to the console.
    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    /// Runs `argv` (without the binary name) and returns the exit code.
    pub fn handle(&mut self, argv: Vec<String>) -> i32 {
        let code = dispatcher::handle(&self.console, argv);
        debug!("'{}' finished with exit code {}", self.console.name(), code);
        if let Some(callback) = &self.on_exit {
            callback(code);
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::AnsiColor;
    use crate::core::command::Context;
    use crate::core::errors::ConsoleError;
    use crate::models::{CommandDefinition, Value};
    use crate::ui::writer::{MemorySink, Writer};
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    // --- Setup ---
    #[derive(Default)]
    struct Hello;

    impl Command for Hello {
        fn definition(&self) -> CommandDefinition {
            CommandDefinition::new("hello").group("Demo").description("Says hello")
        }

        fn handle(&mut self, ctx: &mut Context<'_>) -> anyhow::Result<Value> {
            ctx.writer().styled("greeting", "hi");
            Ok(json!(4))
        }
    }

    fn app() -> (Application, MemorySink) {
        let sink = MemorySink::new();
        let console = Console::with_writer("demo", "0.9", Writer::with_sink(Box::new(sink.clone())));
        (Application::with_console(console), sink)
    }

    #[test]
    fn test_builder_and_exit_callback() {
        let (app, sink) = app();
        let seen = Rc::new(Cell::new(-1));
        let recorder = Rc::clone(&seen);
        let mut app = app
            .headtitle("Demo tool")
            .show_footer(true)
            .command::<Hello>()
            .unwrap()
            .default_command("hello")
            .unwrap()
            .on_exit(move |code| recorder.set(code));

        assert_eq!(app.handle(Vec::new()), 4);
        assert_eq!(seen.get(), 4);
        assert_eq!(sink.contents(), "hi");

        sink.clear();
        app.handle(vec!["--help".into()]);
        let out = sink.contents();
        assert!(out.contains("Demo tool"));
        assert!(out.contains("hello  Says hello"));
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn test_define_colors_and_theme() {
        let (app, _) = app();
        let app = app.define_colors("greeting|salute", Style::new().fg(AnsiColor::Green));
        assert!(app.console().theme().has_style("salute"));

        let err = app.theme("no-such-theme").unwrap_err();
        assert!(matches!(err, ConsoleError::ThemeNotFound(_)));
    }

    #[test]
    fn test_hooks_through_builder() {
        let (app, _) = app();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&calls);
        let mut app = app
            .hook(Hook::Before, move |suppress, _| log.borrow_mut().push(suppress))
            .command::<Hello>()
            .unwrap();
        app.handle(vec!["hello".into()]);
        assert_eq!(*calls.borrow(), vec![false]);
    }
}
