use crate::error::{
    Error,
    FieldComponents,
    InvalidArgument,
    MissingArgument,
    NoExpression,
    UnknownCommand,
};
use std::ops::Range;
use vf_compute::{numerical::fmt::trim_zeroes, Expr, Markup, Symbol, VectorField};
use vf_error::Error as CommandError;
use vf_parser::{trace::Event, LexMode, ParserKind};

/// The precision numbers are printed with.
const PRECISION: u32 = 4;

/// The half-width of the cube that `:field` samples lengths on.
const FIELD_RANGE: f32 = 2.0;

/// The grid step of the `:field` length sampling.
const FIELD_STEP: f32 = 1.0;

const HELP: &[&str] = &[
    "<expression>            parse an expression and make it the current one",
    ":mode none|single|multi  choose the symbols expressions may use",
    ":parser token|direct     choose the parser",
    ":trace on|off            print the parser trace",
    ":eval X [Y Z]            evaluate the current expression",
    ":diff SYMBOL             differentiate the current expression",
    ":simplify                simplify the current expression, listing the rules used",
    ":field I ; J ; K         print a vector field, its curl and the range of its lengths",
    ":help                    print this message",
];

/// Splits the line into whitespace-separated words, with their spans.
fn words(line: &str) -> Vec<(&str, Range<usize>)> {
    let mut words = Vec::new();
    let mut start = None;

    for (offset, c) in line.char_indices().chain(std::iter::once((line.len(), ' '))) {
        match (start, c.is_whitespace()) {
            (None, false) => start = Some(offset),
            (Some(begin), true) => {
                words.push((&line[begin..offset], begin..offset));
                start = None;
            },
            _ => (),
        }
    }

    words
}

/// The settings of the session and the current expression.
#[derive(Debug, Default)]
pub struct Session {
    pub mode: LexMode,
    pub parser: ParserKind,
    pub trace: bool,

    /// The expression the commands work on. Kept when a line fails.
    pub current: Option<Expr>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a line, returning the lines of output.
    pub fn execute(&mut self, line: &str) -> Result<Vec<String>, Error> {
        if line.trim_start().starts_with(':') {
            self.command(line)
        } else {
            self.expression(line)
        }
    }

    /// Parses an expression with the current settings.
    fn parse(&self, input: &str, mode: LexMode, output: &mut Vec<String>) -> Result<Expr, Error> {
        let mut trace: Vec<Event> = Vec::new();
        let result = self.parser.parse_with(input, mode, &mut trace);
        if self.trace {
            output.extend(trace.iter().map(|event| format!("trace: {}", event)));
        }
        result.map_err(|err| Error::Parse { input: input.to_string(), err })
    }

    fn expression(&mut self, line: &str) -> Result<Vec<String>, Error> {
        let mut output = Vec::new();
        let expr = self.parse(line, self.mode, &mut output)?;
        output.push(format!("expression: {}", expr.display(Markup::Plain)));
        output.push(format!("simplified: {}", expr.simplify().display(Markup::Plain)));
        self.current = Some(expr);
        Ok(output)
    }

    fn command(&mut self, line: &str) -> Result<Vec<String>, Error> {
        let words = words(line);
        let Some((name, name_span)) = words.first().cloned() else {
            return Ok(Vec::new());
        };
        let args = &words[1..];

        match name {
            ":help" => Ok(HELP.iter().map(ToString::to_string).collect()),
            ":mode" => {
                self.mode = match one_arg(args, &name_span, "one of `none`, `single` or `multi`")? {
                    "none" => LexMode::NoVariables,
                    "single" => LexMode::SingleVariable,
                    "multi" => LexMode::MultiVariable,
                    _ => return Err(invalid(&args[0].1, "one of `none`, `single` or `multi`")),
                };
                Ok(vec![format!("mode: {}", self.mode)])
            },
            ":parser" => {
                self.parser = match one_arg(args, &name_span, "`token` or `direct`")? {
                    "token" => ParserKind::Token,
                    "direct" => ParserKind::Direct,
                    _ => return Err(invalid(&args[0].1, "`token` or `direct`")),
                };
                Ok(vec![format!("parser: {}", self.parser)])
            },
            ":trace" => {
                self.trace = match one_arg(args, &name_span, "`on` or `off`")? {
                    "on" => true,
                    "off" => false,
                    _ => return Err(invalid(&args[0].1, "`on` or `off`")),
                };
                Ok(vec![format!("trace: {}", if self.trace { "on" } else { "off" })])
            },
            ":eval" => {
                let expr = self.current(&name_span)?;
                if args.is_empty() {
                    return Err(CommandError::new(vec![name_span], MissingArgument { expected: "a point" }).into());
                }
                if args.len() > 3 {
                    return Err(invalid(&args[3].1, "at most three coordinates"));
                }

                let mut point = [0.0; 3];
                for (slot, (word, span)) in point.iter_mut().zip(args) {
                    *slot = word.parse::<f32>().map_err(|_| invalid(span, "a number"))?;
                }
                let [x, y, z] = point;
                Ok(vec![trim_zeroes(expr.eval(x, y, z), PRECISION)])
            },
            ":diff" => {
                let expr = self.current(&name_span)?;
                let word = one_arg(args, &name_span, "a symbol")?;
                let mut chars = word.chars();
                let symbol = match (chars.next().map(Symbol::try_from), chars.next()) {
                    (Some(Ok(symbol)), None) => symbol,
                    _ => return Err(invalid(&args[0].1, "one of `t`, `x`, `y` or `z`")),
                };

                let derivative = expr.derivative(symbol).simplify();
                let output = vec![format!("d/d{}: {}", symbol, derivative.display(Markup::Plain))];
                self.current = Some(derivative);
                Ok(output)
            },
            ":simplify" => {
                let (simplified, steps) = self.current(&name_span)?.simplify_with_steps();
                let mut output = vec![format!("simplified: {}", simplified.display(Markup::Plain))];
                output.extend(steps.iter().map(|step| format!("  {:?}: {}", step, step.rule())));
                self.current = Some(simplified);
                Ok(output)
            },
            ":field" => self.field(line, name_span),
            _ => Err(CommandError::new(vec![name_span], UnknownCommand { name: name.to_string() }).into()),
        }
    }

    /// Returns the current expression.
    fn current(&self, name_span: &Range<usize>) -> Result<&Expr, Error> {
        self.current
            .as_ref()
            .ok_or_else(|| CommandError::new(vec![name_span.clone()], NoExpression).into())
    }

    fn field(&mut self, line: &str, name_span: Range<usize>) -> Result<Vec<String>, Error> {
        let rest = &line[name_span.end..];
        let components = rest.split(';').map(str::trim).collect::<Vec<_>>();
        if components.len() != 3 || components.iter().any(|component| component.is_empty()) {
            let span = if rest.trim().is_empty() { name_span } else { name_span.end..line.len() };
            let found = components.iter().filter(|component| !component.is_empty()).count();
            return Err(CommandError::new(vec![span], FieldComponents { found }).into());
        }

        let mut output = Vec::new();
        let mut parsed = Vec::with_capacity(3);
        for component in components {
            parsed.push(self.parse(component, LexMode::MultiVariable, &mut output)?);
        }
        let [i, j, k]: [Expr; 3] = parsed.try_into()
            .map_err(|_| CommandError::new(vec![name_span.clone()], FieldComponents { found: 0 }))?;

        let field = VectorField::new(i, j, k);
        output.push(format!("field: {}", field.display(Markup::Plain)));
        output.push(format!("curl: {}", field.curl().display(Markup::Plain)));
        if let Some((min, max)) = field.length_range(FIELD_RANGE, FIELD_RANGE, FIELD_RANGE, FIELD_STEP) {
            output.push(format!(
                "lengths: {} to {}",
                trim_zeroes(min, PRECISION),
                trim_zeroes(max, PRECISION),
            ));
        }
        Ok(output)
    }
}

/// Returns the only argument of a command.
fn one_arg<'a>(
    args: &[(&'a str, Range<usize>)],
    name_span: &Range<usize>,
    expected: &'static str,
) -> Result<&'a str, Error> {
    match args {
        [] => Err(CommandError::new(vec![name_span.clone()], MissingArgument { expected }).into()),
        [(word, _)] => Ok(*word),
        [_, (_, span), ..] => Err(invalid(span, "nothing more")),
    }
}

fn invalid(span: &Range<usize>, expected: &'static str) -> Error {
    CommandError::new(vec![span.clone()], InvalidArgument { expected }).into()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(session: &mut Session, line: &str) -> Vec<String> {
        session.execute(line).unwrap()
    }

    fn command_error(result: Result<Vec<String>, Error>) -> CommandError {
        match result {
            Err(Error::Command(err)) => err,
            other => panic!("expected a command error, got {:?}", other),
        }
    }

    #[test]
    fn split_words() {
        assert_eq!(words("  :eval 1  2"), vec![(":eval", 2..7), ("1", 8..9), ("2", 11..12)]);
        assert!(words("   ").is_empty());
    }

    #[test]
    fn expression() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "0 + x * 1"), vec![
            "expression: 0 + (x * 1)",
            "simplified: x",
        ]);
        assert_eq!(run(&mut session, ":eval 4"), vec!["4"]);
    }

    #[test]
    fn failed_line_keeps_expression() {
        let mut session = Session::new();
        run(&mut session, "x^2");
        match session.execute("(x + 1") {
            Err(Error::Parse { input, .. }) => assert_eq!(input, "(x + 1"),
            other => panic!("expected a parse error, got {:?}", other),
        }
        assert_eq!(run(&mut session, ":eval 3"), vec!["9"]);
    }

    #[test]
    fn derivative() {
        let mut session = Session::new();
        run(&mut session, "x * y");
        assert_eq!(run(&mut session, ":diff x"), vec!["d/dx: y"]);
        assert_eq!(run(&mut session, ":eval 0 5 0"), vec!["5"]);

        let err = command_error(session.execute(":diff w"));
        assert_eq!(err.spans, vec![6..7]);
    }

    #[test]
    fn simplify_lists_steps() {
        let mut session = Session::new();
        run(&mut session, "0 + x * 1");
        assert_eq!(run(&mut session, ":simplify"), vec![
            "simplified: x",
            "  MultiplyOne: 1*a = a",
            "  AddZero: 0+a = a",
        ]);
    }

    #[test]
    fn settings() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, ":mode single"), vec!["mode: single-variable"]);
        run(&mut session, "t^2");
        assert_eq!(run(&mut session, ":eval 3"), vec!["9"]);
        assert!(session.execute("x").is_err());

        assert_eq!(run(&mut session, ":parser direct"), vec!["parser: direct"]);
        assert!(session.execute("sin(t)").is_err());
        assert_eq!(run(&mut session, ":parser token"), vec!["parser: token"]);
        assert!(session.execute("sin(t)").is_ok());
    }

    #[test]
    fn trace() {
        let mut session = Session::new();
        run(&mut session, ":trace on");
        let output = run(&mut session, "x + y");
        assert!(output.contains(&"trace: built [1] x + y".to_string()));
        assert_eq!(output.last().map(String::as_str), Some("simplified: x + y"));
    }

    #[test]
    fn field() {
        let mut session = Session::new();
        let output = run(&mut session, ":field y ; -x ; 0");
        assert_eq!(output[0], "field: { i = y, j = -x, k = 0 }");
        assert_eq!(output[1], "curl: { i = 0, j = 0, k = -2 }");
        assert_eq!(output[2], "lengths: 0 to 2.8284");

        let err = command_error(session.execute(":field y ; x"));
        assert_eq!(err.downcast_ref::<FieldComponents>(), Some(&FieldComponents { found: 2 }));
    }

    #[test]
    fn command_errors() {
        let mut session = Session::new();
        let err = command_error(session.execute(":eval 1"));
        assert!(err.is::<NoExpression>());

        let err = command_error(session.execute(":frobnicate"));
        assert_eq!(err.spans, vec![0..11]);
        assert!(err.is::<UnknownCommand>());

        let err = command_error(session.execute(":mode"));
        assert!(err.is::<MissingArgument>());

        let err = command_error(session.execute(":mode several"));
        assert_eq!(err.spans, vec![6..13]);
        assert!(err.is::<InvalidArgument>());
    }
}
