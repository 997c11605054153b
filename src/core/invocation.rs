// src/core/invocation.rs

//! Turning a command instance into a callable action.

use crate::core::command::{Command, Context};
use crate::core::console::Console;
use crate::core::errors::ConsoleError;
use crate::models::{Hook, ParamMap, Parameters, ParsedValues, Value};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Bound invocation closure: `(console, arguments, options, suppress)`.
pub(crate) type Action = Box<dyn Fn(&Console, ParamMap, ParamMap, bool) -> anyhow::Result<Value>>;

/// Callback run around a handler with `(suppress, command)`.
pub(crate) type HookFn = Box<dyn Fn(bool, &dyn Command)>;

/// Dependency-injection seam: builds commands from their identity and may wrap
/// how handlers are invoked.
pub trait Container {
    /// Builds the command registered under `identity`, if this container knows it.
    fn make(&self, identity: &str) -> Option<Box<dyn Command>>;

    /// Runs a handler. The default calls [`Command::handle`] directly.
    ///
    /// # Errors
    /// Propagates the handler's error.
    fn call(&self, command: &mut dyn Command, ctx: &mut Context<'_>) -> anyhow::Result<Value> {
        command.handle(ctx)
    }
}

/// Parameters for one run.
///
/// Arguments are the caller's when non-empty, else the parsed positional
/// values. Options are the caller's when non-empty, else every parsed value
/// whose key is not already an argument.
pub(crate) fn merge_parameters(parsed: &ParsedValues, arguments: ParamMap, options: ParamMap) -> Parameters {
    let arguments = if arguments.is_empty() {
        parsed.arguments.clone()
    } else {
        arguments
    };
    let options = if options.is_empty() {
        parsed
            .values
            .iter()
            .filter(|(key, _)| !arguments.contains_key(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    } else {
        options
    };
    Parameters::new(arguments, options)
}

/// Strips a leading `--` from option keys. A stripped key never overrides a
/// bare key given explicitly.
pub(crate) fn normalize_options(options: ParamMap) -> ParamMap {
    let (dashed, mut normalized): (ParamMap, ParamMap) =
        options.into_iter().partition(|(key, _)| key.starts_with("--"));
    for (key, value) in dashed {
        let bare = key.trim_start_matches('-').to_string();
        normalized.entry(bare).or_insert(value);
    }
    normalized
}

/// Wraps a command instance into its [`Action`].
///
/// The action runs the before hook, the handler (through the console's
/// container when one is set), then the after hook. A command that is already
/// running fails with `ConsoleError::ReentrantCall`.
pub(crate) fn bind(identity: String, command: Box<dyn Command>, parsed: Rc<RefCell<ParsedValues>>) -> Action {
    let definition = command.definition();
    let instance = RefCell::new(command);

    Box::new(move |console: &Console, arguments: ParamMap, options: ParamMap, suppress: bool| {
        let mut command = instance
            .try_borrow_mut()
            .map_err(|_| ConsoleError::ReentrantCall(identity.clone()))?;
        let parameters = merge_parameters(&parsed.borrow(), arguments, options);
        debug!("Invoking '{}' (suppress={}) with {:?}", identity, suppress, parameters);

        console.run_hook(Hook::Before, suppress, &**command);
        let mut ctx = Context::new(console, &definition, parameters);
        let result = match console.container() {
            Some(container) => container.call(&mut **command, &mut ctx)?,
            None => command.handle(&mut ctx)?,
        };
        console.run_hook(Hook::After, suppress, &**command);

        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // --- Setup ---
    fn map(pairs: &[(&str, Value)]) -> ParamMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn parsed() -> ParsedValues {
        ParsedValues {
            arguments: map(&[("name", json!("parsed"))]),
            values: map(&[("name", json!("parsed")), ("loud", json!(true))]),
        }
    }

    #[test]
    fn test_merge_uses_parsed_values_when_caller_passes_nothing() {
        let params = merge_parameters(&parsed(), ParamMap::new(), ParamMap::new());
        assert_eq!(params.arguments, map(&[("name", json!("parsed"))]));
        assert_eq!(params.options, map(&[("loud", json!(true))]));
    }

    #[test]
    fn test_merge_caller_arguments_win() {
        let caller = map(&[("title", json!("Dr"))]);
        let params = merge_parameters(&parsed(), caller.clone(), ParamMap::new());
        assert_eq!(params.arguments, caller);
        // `name` is no longer an argument, so it flows into the options.
        assert_eq!(params.options.get("name"), Some(&json!("parsed")));
        assert_eq!(params.options.get("loud"), Some(&json!(true)));
    }

    #[test]
    fn test_merge_caller_options_win() {
        let caller = map(&[("quiet", json!(true))]);
        let params = merge_parameters(&parsed(), ParamMap::new(), caller.clone());
        assert_eq!(params.options, caller);
    }

    #[test]
    fn test_normalize_options() {
        let options = map(&[
            ("--loud", json!(true)),
            ("--name", json!("dashed")),
            ("name", json!("bare")),
        ]);
        let normalized = normalize_options(options);
        assert_eq!(normalized.get("loud"), Some(&json!(true)));
        assert_eq!(normalized.get("name"), Some(&json!("bare")));
        assert_eq!(normalized.len(), 2);
    }
}
