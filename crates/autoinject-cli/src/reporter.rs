use autoinject_common::diagnostics::display_code;
use autoinject_common::{Diagnostic, DiagnosticCategory};
use colored::Colorize;

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// Every diagnostic on its own line, newline-terminated.
    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    /// `file(start,length) - error ALG0002: message`, or the type name in
    /// place of the file when the declaration has no location.
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        if diagnostic.file.is_empty() {
            output.push_str(&diagnostic.type_name);
        } else {
            output.push_str(&format!(
                "{}({},{})",
                diagnostic.file, diagnostic.start, diagnostic.length
            ));
        }

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    /// `2 errors, 1 warning`; empty when there is nothing to count.
    pub fn summary(&self, diagnostics: &[Diagnostic]) -> String {
        let count = |category: DiagnosticCategory| {
            diagnostics
                .iter()
                .filter(|d| d.category == category)
                .count()
        };
        let errors = count(DiagnosticCategory::Error);
        let warnings = count(DiagnosticCategory::Warning);
        let mut parts = Vec::new();
        if errors > 0 {
            parts.push(plural(errors, "error"));
        }
        if warnings > 0 {
            parts.push(plural(warnings, "warning"));
        }
        let text = parts.join(", ");
        if self.color && errors > 0 {
            text.red().bold().to_string()
        } else {
            text
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = display_code(code);
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
