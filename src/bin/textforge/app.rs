use std::io::{IsTerminal, Read, Write};
use std::sync::Arc;

use crate::{bootstrap::BootStrap, clap_app};
use clap::ArgMatches;
use console::measure_text_width;
use nu_ansi_term::{Color, Style};
use textforge::{
    config::MainConfig,
    debug,
    dispatcher::Dispatcher,
    error::*,
    method::TransformMethod,
    options::Options,
    qa::{FlakinessTracker, QaReport, QaRunner, QaStatus},
};

pub struct App {
    pub matches: ArgMatches,
    colored: bool,
}

impl App {
    pub fn new() -> Result<Self> {
        #[cfg(windows)]
        let _ = nu_ansi_term::enable_ansi_support();

        let interactive_output = std::io::stdout().is_terminal();

        Ok(App {
            matches: Self::matches(interactive_output)?,
            colored: interactive_output && std::env::var_os("NO_COLOR").is_none(),
        })
    }

    pub fn matches(interactive_output: bool) -> Result<ArgMatches> {
        Ok(clap_app::build_app(interactive_output).get_matches())
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colored {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Collects the `-s key=value` options of the command line
    fn build_options(&self) -> Result<Options> {
        let mut options = Options::new();
        if let Some(pairs) = self.matches.get_many::<String>("set") {
            for pair in pairs {
                options.parse_pair(pair)?;
            }
        }
        Ok(options)
    }

    /// Reads the text to transform from the arguments, or from stdin when
    /// none are given and stdin is not a terminal. `None` means no input.
    fn read_input(&self) -> Result<Option<String>> {
        if let Some(values) = self.matches.get_many::<String>("input") {
            let values: Vec<&str> = values.map(|s| s.as_str()).collect();
            return Ok(Some(values.join(" ")));
        }

        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Ok(None);
        }
        let mut buffer = String::new();
        stdin.lock().read_to_string(&mut buffer)?;
        let trimmed_len = buffer.trim_end_matches(['\n', '\r']).len();
        buffer.truncate(trimmed_len);
        Ok(Some(buffer))
    }

    /// Runs a single tool and prints its output
    fn transform(&self, dispatcher: &Dispatcher, config: &MainConfig) -> Result<bool> {
        let tool = self
            .matches
            .get_one::<String>("tool")
            .map(|s| s.as_str())
            .unwrap_or(&config.defaults.tool);

        let method = dispatcher.method(tool)?;
        let mut options = self.build_options()?;
        options.merge_defaults(&config.options_for([method.name(), tool]));
        debug!("Running {} (requested as {}) with {:?}", method.name(), tool, options);

        let input = self.read_input()?;
        let output = dispatcher.transform_nullable(tool, input.as_deref(), &options)?;

        let mut stdout = std::io::stdout().lock();
        if self.matches.get_flag("no-newline") {
            write!(stdout, "{}", output)?;
        } else {
            writeln!(stdout, "{}", output)?;
        }
        Ok(true)
    }

    fn print_methods(&self, dispatcher: &Dispatcher, methods: &[Arc<TransformMethod>]) {
        let width = methods
            .iter()
            .map(|m| measure_text_width(m.name()))
            .max()
            .unwrap_or(0);
        for method in methods {
            let aliases = dispatcher.registry().aliases_of(method.name());
            let aliases = if aliases.is_empty() {
                String::new()
            } else {
                self.paint(
                    Color::DarkGray.normal(),
                    &format!(" (aliases: {})", aliases.join(", ")),
                )
            };
            let padding = " ".repeat(width - measure_text_width(method.name()));
            println!(
                "  {}{}  {}{}",
                self.paint(Color::Green.normal(), method.name()),
                padding,
                method.description(),
                aliases
            );
        }
    }

    /// Prints the tools selected by --list, --category or --search
    fn list(&self, dispatcher: &Dispatcher) -> Result<bool> {
        let registry = dispatcher.registry();

        if let Some(category) = self.matches.get_one::<String>("category") {
            let methods = registry.get_category(category);
            if methods.is_empty() {
                return Err(Error::ArgsProcessingError(format!(
                    "Unknown category \"{}\" (available: {})",
                    category,
                    registry.categories().join(", ")
                )));
            }
            self.print_methods(dispatcher, &methods);
            return Ok(true);
        }

        if let Some(keyword) = self.matches.get_one::<String>("search") {
            let methods = registry.search_methods(keyword);
            if methods.is_empty() {
                println!("No tools matching \"{}\"", keyword);
                return Ok(false);
            }
            self.print_methods(dispatcher, &methods);
            return Ok(true);
        }

        for category in registry.categories() {
            println!("{}", self.paint(Color::Yellow.bold(), category));
            self.print_methods(dispatcher, &registry.get_category(category));
        }
        println!("\n{} tools", registry.len());
        Ok(true)
    }

    fn status_label(&self, status: QaStatus) -> String {
        let (label, color) = match status {
            QaStatus::Passed => ("PASS", Color::Green),
            QaStatus::Warning => ("WARN", Color::Yellow),
            QaStatus::Failed => ("FAIL", Color::Red),
            QaStatus::Skipped => ("SKIP", Color::DarkGray),
        };
        self.paint(color.bold(), &format!("[{}]", label))
    }

    fn print_report(&self, report: &QaReport, verbose: bool) {
        for result in &report.results {
            if !verbose && result.status == QaStatus::Passed {
                continue;
            }
            println!(
                "{} {} ({}, {:.2}ms slowest)",
                self.status_label(result.status),
                result.name,
                result.category,
                result.slowest_ms
            );
            if result.rejected > 0 {
                println!("    {} sample(s) rejected as badly formatted", result.rejected);
            }
            if result.slow > 0 {
                println!("    {} sample(s) over the slow threshold", result.slow);
            }
            for failure in &result.failures {
                println!("    {}", self.paint(Color::Red.normal(), failure));
            }
        }

        println!(
            "{} tools: {} passed, {} warnings, {} failed, {} skipped (pass rate {:.1}%)",
            report.total(),
            self.paint(Color::Green.normal(), &report.count(QaStatus::Passed).to_string()),
            self.paint(Color::Yellow.normal(), &report.count(QaStatus::Warning).to_string()),
            self.paint(Color::Red.normal(), &report.count(QaStatus::Failed).to_string()),
            report.count(QaStatus::Skipped),
            report.pass_rate() * 100.0
        );
    }

    /// Runs the QA subcommand
    fn qa(&self, dispatcher: Dispatcher, config: &MainConfig, params: &ArgMatches) -> Result<bool> {
        let mut qa_config = config.qa.clone();
        if let Some(samples) = params.get_many::<String>("sample") {
            qa_config.samples = samples.cloned().collect();
        }

        let options = dispatcher
            .registry()
            .all_methods()
            .iter()
            .map(|m| (m.name().to_string(), config.options_for([m.name()])))
            .filter(|(_, options)| !options.is_empty())
            .collect();

        let mut tracker = FlakinessTracker::new(qa_config.window);
        let runner = QaRunner::new(dispatcher, qa_config).with_options(options);
        let runs = params.get_one::<u32>("runs").copied().unwrap_or(1);
        let json = params.get_flag("json");
        let verbose = params.get_flag("verbose");

        let mut previous: Option<QaReport> = None;
        for run in 1..=runs {
            debug!("QA run {} of {}", run, runs);
            let report = runner.run();
            tracker.record_report(&report);

            if !json {
                if runs > 1 {
                    println!("{}", self.paint(Color::Yellow.bold(), &format!("Run {}", run)));
                }
                self.print_report(&report, verbose);
                if let Some(previous) = &previous {
                    for regression in report.regressions(previous) {
                        println!(
                            "{} {} passed in the previous run",
                            self.paint(Color::Red.bold(), "[REGRESSION]"),
                            regression.name
                        );
                    }
                }
            }
            previous = Some(report);
        }

        let Some(last) = previous else {
            return Ok(true);
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&last)?);
        } else {
            for (name, score) in tracker.flaky_tools() {
                println!(
                    "{} {} (flakiness {:.2})",
                    self.paint(Color::Yellow.bold(), "[FLAKY]"),
                    name,
                    score
                );
            }
        }
        Ok(last.count(QaStatus::Failed) == 0)
    }

    /// Start the application, bootstraps the configuration and forwards the request
    /// to the dispatcher, the listing or the QA runner.
    ///
    /// # Returns
    /// A `Result` indicating whether every requested operation succeeded.
    pub fn start(&self) -> Result<bool> {
        // Parse the default config
        let bootstrap = BootStrap::new()?;
        let config = bootstrap.get_config();
        let dispatcher = Dispatcher::with_defaults()?;
        debug!("Registry built with {} tools", dispatcher.registry().len());

        match self.matches.subcommand() {
            Some(("qa", params)) => self.qa(dispatcher, config, params),
            _ if self.matches.get_flag("list")
                || self.matches.contains_id("category")
                || self.matches.contains_id("search") =>
            {
                self.list(&dispatcher)
            }
            _ => self.transform(&dispatcher, config),
        }
    }
}
