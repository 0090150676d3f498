//! End-to-end adapter tests: real argv through bind, parse, and dispatch.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use gantry_clap::ClapParser;
use gantry_dispatch::{
    CommandRegistry, CommandSpec, DispatchError, GroupSpec, Helper, HelpText, OptionSpec,
    ParserHandle, bind,
};

fn build_group() -> GroupSpec {
    GroupSpec::new("build").with_command(
        CommandSpec::new("app", |_helper, args| {
            let verbose = args.flag("verbose");
            let target = args.get_str("target").unwrap_or("debug").to_string();
            async move { Ok(json!({"built": "app", "verbose": verbose, "target": target})) }
        })
        .with_description("Build the application")
        .with_register(|_key, parser| {
            parser.option("verbose", OptionSpec::flag("More output").with_alias('v'));
            parser.option(
                "target",
                OptionSpec::value("Build target").with_default(json!("debug")),
            );
            Ok(())
        }),
    )
}

fn failing_group() -> GroupSpec {
    GroupSpec::new("deploy").with_command(
        CommandSpec::new("app", |_helper, _args| async {
            Err(anyhow::anyhow!("no deploy target configured"))
        })
        .with_description("Deploy the application"),
    )
}

fn bound_parser(groups: Vec<GroupSpec>) -> ClapParser {
    let registry = Arc::new(CommandRegistry::build(groups).unwrap());
    let mut parser = ClapParser::new("gantry");
    bind(
        registry,
        &mut parser,
        Helper::new(),
        &HelpText::new("gantry <group> <command> [options]", "run with --help for details"),
    )
    .unwrap();
    parser
}

#[tokio::test]
async fn resolves_and_runs_the_selected_command() {
    let parser = bound_parser(vec![build_group()]);
    let value = parser.run(["gantry", "build", "app"]).await.unwrap();
    assert_eq!(
        value,
        json!({"built": "app", "verbose": false, "target": "debug"})
    );
}

#[tokio::test]
async fn long_and_short_options_reach_the_handler() {
    let parser = bound_parser(vec![build_group()]);
    let value = parser
        .run(["gantry", "build", "app", "--verbose", "--target", "release"])
        .await
        .unwrap();
    assert_eq!(value["verbose"], json!(true));
    assert_eq!(value["target"], json!("release"));

    let parser = bound_parser(vec![build_group()]);
    let value = parser.run(["gantry", "build", "app", "-v"]).await.unwrap();
    assert_eq!(value["verbose"], json!(true));
}

#[tokio::test]
async fn alias_table_carries_bound_aliases() {
    let parser = bound_parser(vec![build_group()]);
    let aliases = parser.parsed_aliases();
    assert_eq!(aliases.resolve("verbose"), Some('v'));
    assert_eq!(aliases.resolve("help"), Some('h'));
    assert_eq!(aliases.resolve("target"), None);
}

#[tokio::test]
async fn run_failure_surfaces_as_a_tagged_outcome() {
    let parser = bound_parser(vec![build_group(), failing_group()]);
    let err = parser.run(["gantry", "deploy", "app"]).await.unwrap_err();
    assert_eq!(err.composite_key(), Some("deploy-app"));
    assert!(err.to_string().contains("no deploy target configured"));
}

#[tokio::test]
async fn unknown_command_is_a_parse_error() {
    let parser = bound_parser(vec![build_group()]);
    let err = parser.run(["gantry", "teleport"]).await.unwrap_err();
    assert!(matches!(err, DispatchError::Parser(_)));
}

#[tokio::test]
async fn missing_command_is_rejected_when_demanded() {
    let parser = bound_parser(vec![build_group()]);
    let err = parser.run(["gantry"]).await.unwrap_err();
    assert!(matches!(err, DispatchError::Parser(_)));
}

#[tokio::test]
async fn help_request_is_a_quiet_success() {
    let parser = bound_parser(vec![build_group()]);
    let value = parser.run(["gantry", "--help"]).await.unwrap();
    assert_eq!(value, json!(null));
}
