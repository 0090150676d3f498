//! User-facing help copy.

/// Usage banner shown at the top of help output.
pub const USAGE: &str = "gantry <group> <command> [options]";

/// Epilog shown after the command list.
pub const EPILOG: &str = "Commands are provided by installed command modules. \
Run 'gantry <group> <command> --help' for command options.";
