use clap::{
    arg,
    builder::{styling::AnsiColor, Styles},
    crate_description, crate_name, crate_version, value_parser, Arg, ArgAction, ColorChoice,
    Command,
};

fn env_no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|x| !x.is_empty())
}

// Builds the application command line interface defining the commands, subcommands
// and arguments
pub fn build_app(interactive_output: bool) -> Command {
    let color_when = if interactive_output && !env_no_color() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };

    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default());

    Command::new(crate_name!())
    .styles(styles)
    .version(crate_version!())
    .about(crate_description!())
    .color(color_when)
    .args_conflicts_with_subcommands(true)
    .arg(
        Arg::new("tool")
        .value_name("TOOL")
        .index(1)
        .help("Name or alias of the transformation to run")
        .long_help(
            "Name or alias of the transformation to run (e.g. snake-case, base64-decode, \
                    chicago-style). Defaults to the tool configured in [defaults] of the \
                    configuration file.",
        ),
    )
    .arg(
        Arg::new("input")
        .value_name("INPUT")
        .index(2)
        .num_args(1..)
        .trailing_var_arg(true)
        .allow_hyphen_values(true)
        .action(ArgAction::Append)
        .help("Text to transform (read from stdin when omitted)")
        .long_help(
            "Text to transform. Multiple values are joined with a single space. \
                    When omitted, the text is read from the standard input.",
        ),
    )
    .arg(
        arg!(-s --set <VALUE> ... "Sets a tool option (key=value).")
        .long_help(
            "Sets an option of the selected tool by supplying the name of the option \
                    and its value in (key=value) format (e.g. -s width=40). Options given here \
                    override the ones in the configuration file.",
        ),
    )
    .arg(
        arg!(-l --list "Lists every available tool grouped by category.")
        .conflicts_with_all(["category", "search"]),
    )
    .arg(
        arg!(-c --category <NAME> "Lists the tools of a category.")
        .long_help("Lists the tools of the given category (e.g. encoding, text-effects)."),
    )
    .arg(
        arg!(--search <KEYWORD> "Searches tools by name, description or category.")
    )
    .arg(
        arg!(-n --"no-newline" "Supress new line after the transformed text.")
        .long_help("Prevents writing a carriage return after the transformed text.")
    )
    .subcommand(build_qa_command())
}

/// Builds the qa command running every tool against sample inputs
///
/// # Returns
/// A `Command` object representing the qa command.
fn build_qa_command() -> Command {
    Command::new("qa")
    .about("Runs every tool against sample inputs and reports the results.")
    .long_about(
        "Runs every registered tool against the samples configured in the [qa] section \
            of the configuration file, timing each call. Reports passed, warning, failed and \
            skipped tools, regressions between consecutive runs and flaky tools.",
    )
    .arg(
        arg!(-r --runs <N> "Number of consecutive runs.")
        .value_parser(value_parser!(u32).range(1..))
        .default_value("1"),
    )
    .arg(
        arg!(--sample <TEXT> ... "Overrides the configured samples.")
    )
    .arg(
        arg!(--json "Prints the report of the last run as JSON.")
    )
    .arg(
        arg!(-v --verbose "Prints the result of every tool, not only the problematic ones.")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        build_app(false).debug_assert();
    }

    #[test]
    fn test_tool_and_input() {
        let matches =
            build_app(false).get_matches_from(["textforge", "snake-case", "Hello", "World"]);
        assert_eq!(matches.get_one::<String>("tool").unwrap(), "snake-case");
        let input: Vec<&String> = matches.get_many::<String>("input").unwrap().collect();
        assert_eq!(input, ["Hello", "World"]);
    }

    #[test]
    fn test_options_and_qa() {
        let matches = build_app(false).get_matches_from([
            "textforge", "-s", "width=10", "-s", "x=y", "word-wrap", "some", "text",
        ]);
        assert_eq!(matches.get_many::<String>("set").unwrap().count(), 2);

        let matches = build_app(false).get_matches_from(["textforge", "qa", "--runs", "3"]);
        let (name, qa) = matches.subcommand().unwrap();
        assert_eq!(name, "qa");
        assert_eq!(*qa.get_one::<u32>("runs").unwrap(), 3);
    }
}
