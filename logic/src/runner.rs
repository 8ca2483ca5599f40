use crate::adapter::{Adapter, AdapterBox};
use crate::configuration::{BuildConfiguration, load_configuration};
use crate::context::DocumentationContext;
use crate::help::print_help;
use crate::types::Env;
use crate::version::get_version;
use docver_base::logging::{info, warn};
use docver_base::result::{Context, DocverError, DocverResult, HelpError, MietteReportError, bail};
use miette::{GraphicalReportHandler, GraphicalTheme};
use std::fmt::Write;
use std::rc::Rc;

pub struct DocverRunner {
    adapter: AdapterBox,
    report_handler: GraphicalReportHandler,
}

impl DocverRunner {
    pub fn new(adapter: impl Adapter) -> Self {
        let theme = if want_color(adapter.env()) {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        Self {
            adapter: Rc::new(adapter),
            report_handler: GraphicalReportHandler::new_themed(theme),
        }
    }

    pub fn run(&self) {
        info!("Running docver ({})", get_version());
        match self.run_inner() {
            Ok(()) => {}
            Err(err) => {
                if let Err(print_err) = self.print_error(err) {
                    self.adapter
                        .print(&format!("ERROR: Failed to print error: {print_err}\n"));
                }
                self.adapter.exit(1);
            }
        }
    }

    pub fn run_inner(&self) -> DocverResult<()> {
        let args = self.adapter.args();
        let Some(first_arg) = args.get(1) else {
            self.print_help();
            return Ok(());
        };
        match first_arg.as_str() {
            "--help" => {
                self.print_help();
            }
            "--version" => {
                self.print_version();
            }
            "--resolve" => {
                self.resolve();
            }
            "--expand" => {
                self.expand(&args[2..])?;
            }
            "--validate" => {
                self.validate_config()?;
            }
            "--expand-config" => {
                self.expand_config()?;
            }
            other => {
                self.adapter.print(&format!("ERROR: Unknown argument: '{other}'\n\nTry --help for more information about supported arguments\n"));
                self.adapter.exit(1);
            }
        }
        Ok(())
    }

    fn print_error(&self, err: DocverError) -> DocverResult<()> {
        let mut message = format!("ERROR running docver ({}): {err}\n", get_version());
        let mut help_text = String::new();
        if err.source().is_some() {
            message.push_str("  Chain of causes:\n");
            err.chain().skip(1).enumerate().for_each(|(index, err)| {
                message.push_str(&format!("   {index}: {err}\n"));
            });
            message.push('\n');
            for err in err.chain() {
                if let Some(err) = err.downcast_ref::<MietteReportError>() {
                    self.report_handler
                        .render_report(&mut message, err.report().as_ref())?;
                } else if let Some(err) = err.downcast_ref::<HelpError>() {
                    writeln!(help_text, "Help: {}", err.help_message)?;
                }
            }
        }
        // omit backtrace in tests to prevent noise in test output
        #[cfg(not(test))]
        {
            let backtrace = err.backtrace();
            if let std::backtrace::BacktraceStatus::Captured = backtrace.status() {
                message.push_str("\n  Backtrace:\n");
                message.push_str(&backtrace.to_string());
            }
        }
        // put help text last
        message.push_str(&help_text);
        self.adapter.print(&message);
        Ok(())
    }

    fn print_help(&self) {
        print_help(self.adapter.as_ref());
    }

    fn print_version(&self) {
        self.adapter.print(&format!("{}\n", get_version()))
    }

    fn resolve(&self) {
        let context = self.create_context();
        self.adapter.print(&format!("{}\n", context.version()));
    }

    fn expand(&self, template_paths: &[String]) -> DocverResult<()> {
        if template_paths.is_empty() {
            bail!("No template files given to --expand");
        }
        let context = self.create_context();
        let expander = context.template_expander();
        for path in template_paths {
            let template = std::io::read_to_string(self.adapter.read_input_file(path)?)
                .with_context(|| format!("Failed to read template file '{path}'"))?;
            let expanded = expander
                .expand_str(&template)
                .with_context(|| format!("Failed to expand template file '{path}'"))?;
            self.adapter.print(&expanded);
        }
        Ok(())
    }

    fn validate_config(&self) -> DocverResult<()> {
        load_configuration(self.adapter.as_ref())
            .context("Failed to validate docver configuration file")?;
        Ok(())
    }

    fn expand_config(&self) -> DocverResult<()> {
        let configuration = load_configuration(self.adapter.as_ref())?;
        let values = configuration.flatten();
        let width = values
            .iter()
            .map(|(path, _)| path.len() + 1)
            .max()
            .unwrap_or_default();
        let mut output = String::new();
        output.push_str("Expanded docver configuration:\n");
        for (path, value) in values {
            writeln!(output, "\t{:<width$} {value}", format!("{path}:"))?;
        }
        self.adapter.print(&output);
        Ok(())
    }

    /// The version is best effort, so an unusable configuration only loses the fallback tag
    fn create_context(&self) -> DocumentationContext {
        let configuration = load_configuration(self.adapter.as_ref()).unwrap_or_else(|err| {
            warn!("Ignoring unusable configuration: {err:#}");
            BuildConfiguration::default()
        });
        DocumentationContext::initialize(self.adapter.as_ref(), &configuration)
    }
}

fn want_color(env: Env) -> bool {
    let mut want_color = true;
    for (key, value) in env {
        if key == "NO_COLOR" && !value.is_empty() {
            want_color = false;
        }
    }
    want_color
}
