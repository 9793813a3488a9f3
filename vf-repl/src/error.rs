use ariadne::Fmt;
use vf_attrs::ErrorKind;
use vf_error::{Error as CommandError, EXPR};
use vf_parser::Error as ParseError;

/// Utility enum to package errors that can occur while running a line.
#[derive(Debug)]
pub enum Error {
    /// An expression could not be parsed.
    Parse {
        /// The text that was parsed; the spans of the error point into it.
        input: String,
        err: ParseError,
    },

    /// A command was malformed. The spans of the error point into the whole line.
    Command(CommandError),
}

impl Error {
    /// Report the error to stderr.
    pub fn report_to_stderr(&self, line: &str) {
        let result = match self {
            Self::Parse { input, err } => err.report_to_stderr("input", input),
            Self::Command(err) => err.report_to_stderr("command", line),
        };
        if let Err(err) = result {
            eprintln!("{}", err);
        }
    }
}

impl From<CommandError> for Error {
    fn from(err: CommandError) -> Self {
        Self::Command(err)
    }
}

/// The command is not one of the known commands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", self.name),
    labels = ["this command"],
    help = format!("type {} to list the commands", ":help".fg(EXPR)),
)]
pub struct UnknownCommand {
    pub name: String,
}

/// A command argument is missing.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing argument",
    labels = [format!("this command needs {}", self.expected)],
)]
pub struct MissingArgument {
    /// A description of the argument.
    pub expected: &'static str,
}

/// A command argument could not be understood.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid argument",
    labels = [format!("expected {}", self.expected)],
)]
pub struct InvalidArgument {
    /// A description of the argument.
    pub expected: &'static str,
}

/// The command works on the current expression, but there is none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "there is no expression to work on",
    labels = ["this command"],
    help = "enter an expression first",
)]
pub struct NoExpression;

/// `:field` was not given three components.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("a vector field has three components, found {}", self.found),
    labels = ["these components"],
    help = format!("separate the components with {}, as in {}", "`;`".fg(EXPR), ":field y ; -x ; 0".fg(EXPR)),
)]
pub struct FieldComponents {
    pub found: usize,
}
