use std::ffi::OsString;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};

/// Parsed command-line state before validation.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) list: bool,
    pub(crate) interactive: bool,
    pub(crate) strict: bool,
    pub(crate) verbosity: u8,
    pub(crate) debug: Vec<String>,
    pub(crate) only: Vec<String>,
    pub(crate) skip: Vec<String>,
    pub(crate) large_write_size: Option<OsString>,
    pub(crate) write_ceiling: Option<OsString>,
    pub(crate) devices: Vec<OsString>,
}

fn clap_command() -> Command {
    Command::new("lpc-bb-test")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAG")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("probe")
                .long("probe")
                .value_name("NAME")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("skip")
                .long("skip")
                .value_name("NAME")
                .action(ArgAction::Append),
        )
        .arg(Arg::new("list").long("list").action(ArgAction::SetTrue))
        .arg(
            Arg::new("interactive")
                .long("interactive")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new("strict").long("strict").action(ArgAction::SetTrue))
        .arg(
            Arg::new("large-write-size")
                .long("large-write-size")
                .value_name("SIZE")
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("write-ceiling")
                .long("write-ceiling")
                .value_name("SIZE")
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("devices")
                .value_name("DEVICE")
                .num_args(0..)
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
}

pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from("lpc-bb-test"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let strings = |matches: &mut clap::ArgMatches, id: &str| -> Vec<String> {
        matches
            .remove_many::<String>(id)
            .map(Iterator::collect)
            .unwrap_or_default()
    };

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        list: matches.get_flag("list"),
        interactive: matches.get_flag("interactive"),
        strict: matches.get_flag("strict"),
        verbosity: matches.get_count("verbose"),
        debug: strings(&mut matches, "debug"),
        only: strings(&mut matches, "probe"),
        skip: strings(&mut matches, "skip"),
        large_write_size: matches.remove_one::<OsString>("large-write-size"),
        write_ceiling: matches.remove_one::<OsString>("write-ceiling"),
        devices: matches
            .remove_many::<OsString>("devices")
            .map(Iterator::collect)
            .unwrap_or_default(),
    })
}
