// src/core/console.rs

//! The command runtime.

use crate::components::icon::ComponentSettings;
use crate::core::command::Command;
use crate::core::errors::{ConsoleError, ConsoleResult};
use crate::core::invocation::{self, Container, HookFn};
use crate::core::output_cache::{self, OutputCache};
use crate::core::registry::{CommandEntry, Registry};
use crate::core::theme::Theme;
use crate::models::{Flag, Flags, Hook, ParamMap, ParsedValues, Value};
use crate::ui::ascii_art::FontRegistry;
use crate::ui::reader::Reader;
use crate::ui::writer::Writer;
use log::debug;
use scopeguard::ScopeGuard;
use std::any::type_name;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// The runtime behind an application: registered commands, the themed writer
/// and reader, hooks, flags and the silent-run output cache.
///
/// A console is single-threaded. Handlers receive it through their
/// [`Context`](crate::core::command::Context) and may call other commands on it.
pub struct Console {
    name: String,
    version: String,
    registry: Registry,
    output_cache: RefCell<OutputCache>,
    writer: RefCell<Writer>,
    reader: RefCell<Reader>,
    fonts: RefCell<FontRegistry>,
    hooks: HashMap<Hook, HookFn>,
    container: Option<Box<dyn Container>>,
    flags: Cell<Flags>,
    headtitle: Option<String>,
    logo: Option<String>,
    default_command: Option<String>,
    logger_prefix: Option<String>,
    components: ComponentSettings,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("commands", &self.registry.names())
            .field("flags", &self.flags.get())
            .field("has_container", &self.container.is_some())
            .finish_non_exhaustive()
    }
}

impl Console {
    /// A console writing to standard output.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::with_writer(name, version, Writer::stdout())
    }

    /// A console writing through `writer`, e.g. one backed by a [`MemorySink`](crate::ui::writer::MemorySink).
    pub fn with_writer(name: impl Into<String>, version: impl Into<String>, writer: Writer) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            registry: Registry::new(),
            output_cache: RefCell::new(OutputCache::new()),
            writer: RefCell::new(writer),
            reader: RefCell::new(Reader::default()),
            fonts: RefCell::new(FontRegistry::default()),
            hooks: HashMap::new(),
            container: None,
            flags: Cell::new(Flags::default()),
            headtitle: None,
            logo: None,
            default_command: None,
            logger_prefix: None,
            components: ComponentSettings::default(),
        }
    }

    /// Application name shown in help and version output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Application version.
    pub fn version(&self) -> &str {
        &self.version
    }

    // --- Collaborators ---

    /// Borrows the writer.
    ///
    /// # Panics
    /// If the writer is already borrowed; drop the guard before calling
    /// another command.
    pub fn writer(&self) -> RefMut<'_, Writer> {
        self.writer.borrow_mut()
    }

    /// Borrows the reader.
    pub fn reader(&self) -> RefMut<'_, Reader> {
        self.reader.borrow_mut()
    }

    /// Replaces the reader, e.g. with one driven by a `ScriptedPrompter`.
    pub fn set_reader(&mut self, reader: Reader) {
        self.reader = RefCell::new(reader);
    }

    /// Borrows the font registry.
    pub fn fonts(&self) -> RefMut<'_, FontRegistry> {
        self.fonts.borrow_mut()
    }

    /// The writer's current theme.
    pub fn theme(&self) -> Ref<'_, Theme> {
        Ref::map(self.writer.borrow(), Writer::theme)
    }

    /// Switches the writer's theme.
    pub fn set_theme(&self, theme: Theme) {
        debug!("Switching theme to '{}'", theme.name());
        self.writer().set_theme(theme);
    }

    /// Shared settings of the alert, badge and logger components.
    pub fn components(&self) -> &ComponentSettings {
        &self.components
    }

    /// The dependency-injection container, if any.
    pub fn container(&self) -> Option<&dyn Container> {
        self.container.as_deref()
    }

    /// Sets the container used to build and invoke commands.
    pub fn set_container(&mut self, container: Box<dyn Container>) {
        self.container = Some(container);
    }

    // --- Configuration ---

    /// Sets the callback for `hook`, replacing any previous one.
    pub fn set_hook(&mut self, hook: Hook, callback: impl Fn(bool, &dyn Command) + 'static) {
        self.hooks.insert(hook, Box::new(callback));
    }

    pub(crate) fn run_hook(&self, hook: Hook, suppress: bool, command: &dyn Command) {
        if let Some(callback) = self.hooks.get(&hook) {
            callback(suppress, command);
        }
    }

    /// Turns a console switch on or off.
    pub fn set_flag(&self, flag: Flag, value: bool) {
        let mut flags = self.flags.get();
        flags.set(flag, value);
        self.flags.set(flags);
    }

    /// Reads a console switch.
    pub fn flag(&self, flag: Flag) -> bool {
        self.flags.get().get(flag)
    }

    /// Header line of the application help, if customised.
    pub fn headtitle(&self) -> Option<&str> {
        self.headtitle.as_deref()
    }

    /// Replaces the default `name, version` help header.
    pub fn set_headtitle(&mut self, title: impl Into<String>) {
        self.headtitle = Some(title.into());
    }

    /// Logo printed above the application help.
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    /// Sets the logo printed above the application help.
    pub fn set_logo(&mut self, logo: impl Into<String>) {
        self.logo = Some(logo.into());
    }

    /// Enables the logger component with `prefix`.
    pub fn set_logger(&mut self, prefix: impl Into<String>) {
        self.logger_prefix = Some(prefix.into());
    }

    /// Prefix of the logger component; `None` while it is disabled.
    pub fn logger_prefix(&self) -> Option<&str> {
        self.logger_prefix.as_deref()
    }

    /// Sets the command run when argv names none.
    ///
    /// # Errors
    /// Returns `ConsoleError::CommandNotFound` when `key` does not resolve.
    pub fn set_default_command(&mut self, key: &str) -> ConsoleResult<()> {
        let identity = self
            .registry
            .resolve(key)
            .map(|e| e.identity.clone())
            .ok_or_else(|| ConsoleError::command_not_found(key))?;
        self.default_command = Some(identity);
        Ok(())
    }

    /// Identity of the default command.
    pub fn default_command(&self) -> Option<&str> {
        self.default_command.as_deref()
    }

    // --- Registration ---

    /// Registers the command the container builds for `identity`.
    ///
    /// # Errors
    /// Returns `ConsoleError::InvalidCommand` when no container is configured,
    /// the container cannot build `identity`, or the command's name is empty.
    pub fn register(&mut self, identity: &str) -> ConsoleResult<()> {
        let container = self
            .container
            .as_ref()
            .ok_or_else(|| ConsoleError::invalid_command(identity, "no container configured"))?;
        let command = container
            .make(identity)
            .ok_or_else(|| ConsoleError::invalid_command(identity, "the container cannot build it"))?;
        self.register_instance(identity, command)
    }

    /// Registers `C` under its type name. The container builds it when it can,
    /// otherwise `C::default()` is used.
    ///
    /// # Errors
    /// Returns `ConsoleError::InvalidCommand` when the command's name is empty.
    pub fn register_type<C: Command + Default + 'static>(&mut self) -> ConsoleResult<()> {
        let identity = type_name::<C>();
        let command = self
            .container
            .as_ref()
            .and_then(|c| c.make(identity))
            .unwrap_or_else(|| Box::new(C::default()));
        self.register_instance(identity, command)
    }

    /// Registers an already built command under `identity`.
    ///
    /// # Errors
    /// Returns `ConsoleError::InvalidCommand` when the command's name is empty.
    pub fn register_instance(&mut self, identity: &str, command: Box<dyn Command>) -> ConsoleResult<()> {
        let definition = command.definition();
        if definition.name.trim().is_empty() {
            return Err(ConsoleError::invalid_command(identity, "the command name is empty"));
        }
        let parsed = Rc::new(RefCell::new(ParsedValues::defaults(&definition)));
        let action = invocation::bind(identity.to_string(), command, Rc::clone(&parsed));
        self.registry
            .insert(CommandEntry::new(identity, definition, parsed, action));
        Ok(())
    }

    /// Registers every identity in order, stopping at the first failure.
    ///
    /// # Errors
    /// The first registration error.
    pub fn register_many(&mut self, identities: &[&str]) -> ConsoleResult<()> {
        identities.iter().try_for_each(|identity| self.register(identity))
    }

    // --- Lookup ---

    /// The entry `key` resolves to, by identity, then name, then alias.
    pub fn find(&self, key: &str) -> Option<&CommandEntry> {
        self.registry.resolve(key)
    }

    /// Whether `key` resolves to a command.
    pub fn exists(&self, key: &str) -> bool {
        self.registry.exists(key)
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[CommandEntry] {
        self.registry.entries()
    }

    /// Forgets every memoized lookup, including misses.
    pub fn reset_resolver_cache(&self) {
        self.registry.reset_cache();
    }

    // --- Invocation ---

    /// Calls a command by identity, name or alias with `suppress = true`.
    /// Option keys given as `--name` are accepted.
    ///
    /// # Errors
    /// Returns `ConsoleError::CommandNotFound` for unknown keys, otherwise the
    /// handler's own error.
    pub fn call(&self, key: &str, arguments: ParamMap, options: ParamMap) -> anyhow::Result<Value> {
        let entry = self
            .registry
            .resolve(key)
            .ok_or_else(|| ConsoleError::command_not_found(key))?;
        entry.invoke(self, arguments, invocation::normalize_options(options), true)
    }

    /// Like [`Console::call`], but everything the command writes is captured
    /// and stored in the output cache instead of being shown.
    ///
    /// # Errors
    /// As [`Console::call`]. Nothing is cached when the call fails.
    pub fn call_silent(&self, key: &str, arguments: ParamMap, options: ParamMap) -> anyhow::Result<Value> {
        let options = invocation::normalize_options(options);
        let cache_key = self.cache_key(key, &arguments, &options);

        self.writer().push_buffer();
        let guard = scopeguard::guard((), |()| {
            if let Ok(mut writer) = self.writer.try_borrow_mut() {
                writer.pop_buffer();
            }
        });
        let result = self.call(key, arguments, options);
        ScopeGuard::into_inner(guard);

        let captured = self.writer().pop_buffer().unwrap_or_default();
        let value = result?;
        self.output_cache.borrow_mut().store(cache_key, captured);
        Ok(value)
    }

    /// The output of a silent run, served from the cache when this exact run
    /// already happened.
    ///
    /// # Errors
    /// As [`Console::call_silent`].
    pub fn capture_output(&self, key: &str, arguments: ParamMap, options: ParamMap) -> anyhow::Result<String> {
        let options = invocation::normalize_options(options);
        let cache_key = self.cache_key(key, &arguments, &options);

        let cached = self.output_cache.borrow().get(&cache_key).map(str::to_string);
        if let Some(output) = cached {
            debug!("Output cache hit for '{}'", key);
            return Ok(output);
        }

        self.call_silent(key, arguments, options)?;
        let output = self.output_cache.borrow().get(&cache_key).unwrap_or_default().to_string();
        Ok(output)
    }

    /// Whether this exact silent run is in the output cache.
    pub fn has_executed(&self, key: &str, arguments: &ParamMap, options: &ParamMap) -> bool {
        let options = invocation::normalize_options(options.clone());
        let cache_key = self.cache_key(key, arguments, &options);
        self.output_cache.borrow().contains(&cache_key)
    }

    /// Clears the output cache, or only the entries of one command.
    pub fn clear_output_cache(&self, command: Option<&str>) {
        let canonical = command.map(|c| self.canonical(c));
        self.output_cache.borrow_mut().clear(canonical.as_deref());
    }

    /// Names, aliases and identities of a command all map to its identity.
    fn canonical(&self, key: &str) -> String {
        self.registry
            .resolve(key)
            .map_or_else(|| key.to_string(), |e| e.identity.clone())
    }

    fn cache_key(&self, key: &str, arguments: &ParamMap, options: &ParamMap) -> String {
        output_cache::generate_key(&self.canonical(key), arguments, options)
    }
}
