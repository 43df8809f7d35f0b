//! Status construction from finding logs and catalog templates.
//!
//! Three report shapes are supported:
//! - `single_msg`: one status at a fixed severity
//! - `single_list`: one status listing the subjects of a log's findings
//! - `composite`: one child status per sub-scope log, rolled up into a parent

use std::collections::BTreeMap;
use std::fmt::Display;

use fluxqc_model::{FindingLog, Severity, Status, StatusDetail};
use fluxqc_standards::{MessageCatalog, ReportKind};

use crate::error::StatusError;

/// Named values substituted into `{placeholder}` fields.
#[derive(Debug, Clone, Default)]
pub struct MessageArgs {
    values: BTreeMap<String, String>,
}

impl MessageArgs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Display) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// `count` and its plural suffix `s`.
    fn set_count(&mut self, count: usize) {
        self.set("count", count);
        self.set("s", plural(count));
    }
}

/// Plural suffix for a count.
pub fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Substitute `{name}` placeholders. `{{` and `}}` render literal braces;
/// text in braces that is not an identifier is kept as is.
pub fn render_template(
    check_id: &str,
    template: &str,
    args: &MessageArgs,
) -> Result<String, StatusError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(['{', '}']) {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        if rest[start..].starts_with('}') {
            out.push('}');
            rest = after.strip_prefix('}').unwrap_or(after);
            continue;
        }
        if let Some(stripped) = after.strip_prefix('{') {
            out.push('{');
            rest = stripped;
            continue;
        }
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let name = &after[..end];
        if name.is_empty() || !name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            out.push('{');
            rest = after;
            continue;
        }
        let value = args.get(name).ok_or_else(|| StatusError::MissingArgument {
            check_id: check_id.to_string(),
            placeholder: name.to_string(),
        })?;
        out.push_str(value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn join_report(prefix: &str, message: &str, suffix: &str) -> String {
    [prefix, message, suffix]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds statuses against a loaded message catalog.
#[derive(Debug, Clone, Copy)]
pub struct StatusBuilder<'a> {
    catalog: &'a MessageCatalog,
}

impl<'a> StatusBuilder<'a> {
    pub fn new(catalog: &'a MessageCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a MessageCatalog {
        self.catalog
    }

    pub fn single_msg(
        &self,
        check_id: &str,
        severity: Severity,
        args: &MessageArgs,
    ) -> Result<Status, StatusError> {
        self.leaf(
            check_id,
            severity,
            ReportKind::SingleMsg,
            args,
            StatusDetail::Message,
        )
    }

    /// Severity is the worst finding in the log, `Ok` when it is empty.
    /// Adds `count`, `s`, and `list` to the message arguments.
    pub fn single_list(
        &self,
        check_id: &str,
        log: FindingLog,
        args: &MessageArgs,
    ) -> Result<Status, StatusError> {
        let severity = log.worst();
        let subjects = log.into_subjects();
        let mut args = args.clone();
        args.set_count(subjects.len());
        args.set("list", subjects.join(", "));
        self.leaf(
            check_id,
            severity,
            ReportKind::SingleList,
            &args,
            StatusDetail::List(subjects),
        )
    }

    /// One `single_msg` child per log (args `var`, `count`, `s`), folded
    /// into a parent with the worst child severity (args `count` of
    /// flagged children, `total`, `s`).
    pub fn composite(
        &self,
        check_id: &str,
        children: Vec<FindingLog>,
        args: &MessageArgs,
    ) -> Result<Status, StatusError> {
        let mut statuses = Vec::with_capacity(children.len());
        for log in children {
            let mut child_args = args.clone();
            child_args.set("var", log.scope());
            child_args.set_count(log.summary().flagged());
            statuses.push(self.single_msg(check_id, log.worst(), &child_args)?);
        }
        let severity = Severity::aggregate(statuses.iter().map(|status| status.severity));
        let flagged = statuses
            .iter()
            .filter(|status| status.severity != Severity::Ok)
            .count();
        let mut parent_args = args.clone();
        parent_args.set_count(flagged);
        parent_args.set("total", statuses.len());
        self.leaf(
            check_id,
            severity,
            ReportKind::Composite,
            &parent_args,
            StatusDetail::Composite(statuses),
        )
    }

    fn leaf(
        &self,
        check_id: &str,
        severity: Severity,
        kind: ReportKind,
        args: &MessageArgs,
        detail: StatusDetail,
    ) -> Result<Status, StatusError> {
        let entry = self.catalog.get_message(check_id, severity, kind)?;
        let message = render_template(check_id, &entry.message, args)?;
        let prefix = render_template(check_id, &entry.report_prefix, args)?;
        let suffix = render_template(check_id, &entry.report_suffix, args)?;
        let display_name = self
            .catalog
            .get_display_name(check_id)
            .unwrap_or(entry.display_name.as_str())
            .to_string();
        Ok(Status {
            check_id: check_id.to_string(),
            display_name,
            severity,
            report_message: join_report(&prefix, &message, &suffix),
            message,
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_named_placeholders() {
        let args = MessageArgs::new().with("count", 2).with("s", "s");
        let text = render_template("x", "{count} variable{s} missing", &args).unwrap();
        assert_eq!(text, "2 variables missing");
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        let err = render_template("gap_fill", "{count} in {var}", &MessageArgs::new()).unwrap_err();
        assert!(matches!(
            err,
            StatusError::MissingArgument { ref placeholder, .. } if placeholder == "count"
        ));
    }

    #[test]
    fn literal_braces_survive() {
        let args = MessageArgs::new();
        assert_eq!(render_template("x", "{{literal}", &args).unwrap(), "{literal}");
        assert_eq!(render_template("x", "a {b c} d", &args).unwrap(), "a {b c} d");
        assert_eq!(render_template("x", "open {", &args).unwrap(), "open {");
        assert_eq!(render_template("x", "close }", &args).unwrap(), "close }");
    }

    #[test]
    fn doubled_braces_escape_both_ways() {
        let args = MessageArgs::new().with("count", 3);
        assert_eq!(render_template("x", "{{x}}", &args).unwrap(), "{x}");
        assert_eq!(
            render_template("x", "{{{count}}} rows", &args).unwrap(),
            "{3} rows"
        );
    }

    #[test]
    fn plural_suffix() {
        assert_eq!(plural(0), "s");
        assert_eq!(plural(1), "");
        assert_eq!(plural(3), "s");
    }

    #[test]
    fn report_text_joins_non_empty_parts() {
        assert_eq!(join_report("", "body.", "Fix it."), "body. Fix it.");
        assert_eq!(join_report("Note:", "body.", ""), "Note: body.");
    }
}
