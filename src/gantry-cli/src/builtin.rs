//! Builtin command group.
//!
//! The `system` group ships with the binary and exercises the full
//! descriptor contract: a register capability attaching options, an async
//! run capability reading the helper context, and an eject capability.

use serde_json::{Value, json};

use gantry_dispatch::{CommandSpec, GroupSpec, OptionSpec};

/// Builtin groups, registered ahead of discovered command modules.
pub fn groups() -> Vec<GroupSpec> {
    vec![GroupSpec::new("system").with_command(version_command())]
}

fn version_command() -> CommandSpec {
    CommandSpec::new("version", |helper, args| {
        let verbose = args.flag("verbose");
        let commands = helper.context("commands").cloned().unwrap_or(Value::Null);
        async move {
            let version = env!("CARGO_PKG_VERSION");
            if verbose {
                Ok(json!({"version": version, "commands": commands}))
            } else {
                Ok(Value::String(version.to_string()))
            }
        }
    })
    .with_description("Print the gantry version")
    .with_register(|_key, parser| {
        parser.option(
            "verbose",
            OptionSpec::flag("Also list the registered commands").with_alias('v'),
        );
        Ok(())
    })
    .with_eject(|| {
        Ok(json!({
            "group": "system",
            "name": "version",
            "version": env!("CARGO_PKG_VERSION"),
        }))
    })
}
