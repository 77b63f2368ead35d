//! Turns a [`DrawDdlError`] into miette reports.
//!
//! A rejected diagram can fail for several table rows at once. Every row
//! diagnostic becomes its own [`Report`] with a snippet of the diagram file;
//! I/O and configuration failures become a single plain report.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use drawddl::DrawDdlError;
use drawddl_parser::{Span, error::Diagnostic};

const CONFIG_HELP: &str = "check the file passed with --config or drawddl/config.toml";

/// One renderable failure.
#[derive(Debug)]
pub enum Report<'a> {
    /// A diagnostic whose labels point into the diagram file.
    Located {
        diag: &'a Diagnostic,
        source: NamedSource<String>,
    },
    /// A failure with nothing in the diagram to point at.
    Plain(&'a DrawDdlError),
}

/// Splits `err` into reports.
///
/// `origin` names the diagram file in rendered snippets.
pub fn reports<'a>(err: &'a DrawDdlError, origin: &str) -> Vec<Report<'a>> {
    match err {
        DrawDdlError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Report::Located {
                diag,
                source: NamedSource::new(origin, src.clone()),
            })
            .collect(),
        DrawDdlError::Io(_) | DrawDdlError::Config(_) => vec![Report::Plain(err)],
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Located { diag, .. } => f.write_str(diag.message()),
            Report::Plain(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Report::Located { .. } => None,
            Report::Plain(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Located { diag, .. } => Some(Box::new(diag.code())),
            Report::Plain(DrawDdlError::Io(_)) => Some(Box::new("drawddl::io")),
            Report::Plain(DrawDdlError::Config(_)) => Some(Box::new("drawddl::config")),
            Report::Plain(DrawDdlError::Parse { .. }) => None,
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Located { diag, .. } => diag
                .hint_text()
                .map(|hint| Box::new(hint) as Box<dyn fmt::Display>),
            Report::Plain(DrawDdlError::Config(_)) => Some(Box::new(CONFIG_HELP)),
            Report::Plain(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Report::Located { source, .. } => Some(source as &dyn miette::SourceCode),
            Report::Plain(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Report::Located { diag, .. } = self else {
            return None;
        };

        let primary = diag.primary_label().map(|label| {
            LabeledSpan::new_primary_with_span(
                Some(label.message().to_string()),
                source_span(label.span()),
            )
        });
        let context = diag.context_labels().iter().map(|label| {
            LabeledSpan::new_with_span(Some(label.message().to_string()), source_span(label.span()))
        });

        Some(Box::new(primary.into_iter().chain(context)))
    }
}
