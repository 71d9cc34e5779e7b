//! C# printer for synthesized constructors.
//!
//! Renders one partial class per resolved type:
//!
//! ```text
//! // Generated code
//! using System;
//!
//! namespace Demo.Services;
//!
//! partial class Service1
//! {
//!     public Service1(int intValue, bool boolValue = default(bool)) : base(i1: i1)
//!     {
//!         this.IntValue = intValue;
//!         ...
//!     }
//! }
//! ```
//!
//! Output depends only on its input; the same constructors always print to
//! the same bytes.

use autoinject_decl::TypeDeclaration;

use crate::ir::{ConstructorSpec, Expr, NamedArgument, ParameterSpec, Statement, SynthesizedConstructors};

pub const GENERATED_HEADER: &str = "// Generated code";

/// File name for the generated part of `decl`: `{Namespace}.{Name}.g.cs`.
pub fn hint_name(decl: &TypeDeclaration) -> String {
    format!("{}.g.cs", decl.full_name())
}

pub struct SourcePrinter {
    output: String,
    indent_level: u32,
    indent_str: &'static str,
}

impl Default for SourcePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourcePrinter {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(1024),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// Print the whole compilation unit for `decl`.
    pub fn print_unit(&mut self, decl: &TypeDeclaration, ctors: &SynthesizedConstructors) {
        self.write(GENERATED_HEADER);
        self.write_line();
        for using in &decl.usings {
            let Some(namespace) = using_target(using) else {
                continue;
            };
            self.write("using ");
            self.write(namespace);
            self.write(";");
            self.write_line();
        }
        if !decl.namespace.is_empty() {
            self.write_line();
            self.write("namespace ");
            self.write(&decl.namespace);
            self.write(";");
            self.write_line();
        }
        self.write_line();
        self.print_class(decl, ctors);
    }

    pub fn print_class(&mut self, decl: &TypeDeclaration, ctors: &SynthesizedConstructors) {
        self.write_indent();
        self.write("partial class ");
        self.write(&decl.name);
        if !decl.type_parameters.is_empty() {
            self.write("<");
            self.write(&decl.type_parameters.join(", "));
            self.write(">");
        }
        self.write_line();
        self.write_indent();
        self.write("{");
        self.write_line();

        self.increase_indent();
        for (i, ctor) in ctors.iter().enumerate() {
            if i > 0 {
                self.write_line();
            }
            self.print_constructor(ctor);
        }
        self.decrease_indent();

        self.write_indent();
        self.write("}");
        self.write_line();
    }

    pub fn print_constructor(&mut self, ctor: &ConstructorSpec) {
        self.write_indent();
        self.write(ctor.accessibility.keyword());
        self.write(" ");
        self.write(&ctor.type_name);
        self.write("(");
        for (i, param) in ctor.parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_parameter(param);
        }
        self.write(")");
        if ctor.has_base_call() {
            self.write(" : base(");
            self.print_arguments(&ctor.base_arguments);
            self.write(")");
        }
        self.write_line();

        self.write_indent();
        self.write("{");
        self.write_line();
        self.increase_indent();
        for statement in &ctor.body {
            self.print_statement(statement);
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
        self.write_line();
    }

    fn print_parameter(&mut self, param: &ParameterSpec) {
        self.write(&param.ty);
        self.write(" ");
        self.write(&param.name);
        if let Some(default) = &param.default {
            self.write(" = ");
            self.print_expr(default);
        }
    }

    fn print_statement(&mut self, statement: &Statement) {
        self.write_indent();
        match statement {
            Statement::Assign { member, parameter } => {
                self.print_assignment(member, parameter);
            }
            Statement::AssignIfNotDefault {
                member,
                parameter,
                ty,
            } => {
                self.write("if (");
                self.write(parameter);
                self.write(" != default(");
                self.write(ty);
                self.write("))");
                self.write_line();
                self.increase_indent();
                self.write_indent();
                self.print_assignment(member, parameter);
                self.decrease_indent();
            }
            Statement::CallInitializer { method, arguments } => {
                self.write(method);
                self.write("(");
                self.print_arguments(arguments);
                self.write(");");
                self.write_line();
            }
        }
    }

    fn print_assignment(&mut self, member: &str, parameter: &str) {
        self.write("this.");
        self.write(member);
        self.write(" = ");
        self.write(parameter);
        self.write(";");
        self.write_line();
    }

    fn print_arguments(&mut self, arguments: &[NamedArgument]) {
        for (i, arg) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&arg.name);
            self.write(": ");
            self.print_expr(&arg.value);
        }
    }

    fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(name) => self.write(name),
            Expr::Default(ty) => {
                self.write("default(");
                self.write(ty);
                self.write(")");
            }
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

/// `System.Text`, `using System.Text;` and `global using X;` all name the
/// same import target. Blank entries are dropped.
fn using_target(using: &str) -> Option<&str> {
    let target = using
        .trim()
        .trim_start_matches("global ")
        .trim_start()
        .trim_start_matches("using ")
        .trim()
        .trim_end_matches(';')
        .trim_end();
    (!target.is_empty()).then_some(target)
}

/// Print the compilation unit for one type.
pub fn print_unit(decl: &TypeDeclaration, ctors: &SynthesizedConstructors) -> String {
    let mut printer = SourcePrinter::new();
    printer.print_unit(decl, ctors);
    printer.finish()
}
