//! Kotlin text for declaration trees.
//!
//! Output follows the conventions of generated Kotlin: explicit `public` visibility, two-space
//! indentation, one annotation per line on declarations and inline on parameters. Imports are
//! derived from the classes the tree mentions; the first class to claim a simple name is
//! imported and later ones stay fully qualified.

use sealant_kernel::domain::names::ClassName;
use sealant_kernel::tree::{
    AnnotationSpec, ConstructorSpec, FileSpec, FunSpec, MemberValue, Modifier, ParameterSpec,
    PropertyKind, Statement, TypeKind, TypeName, TypeSpec,
};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Packages every Kotlin/JVM file sees without an import.
const DEFAULT_IMPORTS: [&str; 4] = ["kotlin", "kotlin.collections", "kotlin.jvm", "java.lang"];

/// Renders `file` as Kotlin source.
///
/// # Errors
/// Only if writing into the buffer fails, which a `String` never does.
pub fn render(file: &FileSpec) -> Result<String, fmt::Error> {
    let imports = Imports::collect(file);
    let mut w = String::new();

    for line in &file.comment {
        writeln!(w, "// {line}")?;
    }
    for annotation in &file.annotations {
        write_targeted_annotation(&mut w, Some("file"), annotation, &imports)?;
        w.push('\n');
    }
    if !file.comment.is_empty() || !file.annotations.is_empty() {
        w.push('\n');
    }

    if !file.package.is_empty() {
        writeln!(w, "package {}\n", file.package)?;
    }

    let import_lines = imports.lines(&file.package);
    if !import_lines.is_empty() {
        for line in &import_lines {
            writeln!(w, "import {line}")?;
        }
        w.push('\n');
    }

    for (i, ty) in file.types.iter().enumerate() {
        if i > 0 {
            w.push('\n');
        }
        write_type(&mut w, ty, 0, &imports)?;
    }

    Ok(w)
}

// --- Imports ---

/// Top-level simple name -> package that owns it in this file.
struct Imports {
    owners: BTreeMap<String, String>,
}

impl Imports {
    fn collect(file: &FileSpec) -> Self {
        let mut owners = BTreeMap::new();
        for ty in &file.types {
            owners.insert(ty.name.clone(), file.package.clone());
        }

        let mut classes = Vec::new();
        for annotation in &file.annotations {
            annotation_classes(annotation, &mut classes);
        }
        for ty in &file.types {
            type_classes(ty, &mut classes);
        }

        for class in classes {
            let top = class.top_level_class();
            owners
                .entry(top.simple_name().to_owned())
                .or_insert_with(|| top.package().to_owned());
        }

        Self { owners }
    }

    /// How `class` is spelled in this file.
    fn name(&self, class: &ClassName) -> String {
        let top = class.simple_names().first().map(String::as_str).unwrap_or_default();
        if self.owners.get(top).is_some_and(|pkg| pkg == class.package()) {
            class.joined_simple_names(".")
        } else {
            class.canonical_name()
        }
    }

    /// Import lines in fully-qualified order.
    fn lines(&self, file_package: &str) -> Vec<String> {
        let mut lines: Vec<String> = self
            .owners
            .iter()
            .filter(|(_, pkg)| {
                pkg.as_str() != file_package
                    && !pkg.is_empty()
                    && !DEFAULT_IMPORTS.contains(&pkg.as_str())
            })
            .map(|(simple, pkg)| format!("{pkg}.{simple}"))
            .collect();
        lines.sort();
        lines
    }
}

fn annotation_classes<'a>(annotation: &'a AnnotationSpec, out: &mut Vec<&'a ClassName>) {
    out.push(&annotation.class);
    for member in &annotation.members {
        match &member.value {
            MemberValue::ClassLiteral(class) => out.push(class),
            MemberValue::ClassArray(classes) => out.extend(classes),
            MemberValue::Str(_) => {},
        }
    }
}

fn parameter_classes<'a>(parameter: &'a ParameterSpec, out: &mut Vec<&'a ClassName>) {
    for annotation in &parameter.annotations {
        annotation_classes(annotation, out);
    }
    out.extend(parameter.ty.referenced_classes());
}

fn type_classes<'a>(ty: &'a TypeSpec, out: &mut Vec<&'a ClassName>) {
    for annotation in &ty.annotations {
        annotation_classes(annotation, out);
    }
    for supertype in &ty.supertypes {
        out.extend(supertype.referenced_classes());
    }
    if let Some(ctor) = &ty.primary_constructor {
        for annotation in &ctor.annotations {
            annotation_classes(annotation, out);
        }
        for parameter in &ctor.parameters {
            parameter_classes(parameter, out);
        }
    }
    for function in &ty.functions {
        for annotation in &function.annotations {
            annotation_classes(annotation, out);
        }
        for parameter in &function.parameters {
            parameter_classes(parameter, out);
        }
        if let Some(returns) = &function.returns {
            out.extend(returns.referenced_classes());
        }
        match &function.body {
            Some(Statement::ReturnNew { class, .. } | Statement::ReturnJavaClass { class }) => {
                out.push(class);
            },
            None => {},
        }
    }
    for nested in &ty.types {
        type_classes(nested, out);
    }
}

// --- Declarations ---

fn indent(w: &mut String, depth: usize) {
    for _ in 0..depth {
        w.push_str(INDENT);
    }
}

fn write_type(w: &mut String, ty: &TypeSpec, depth: usize, imports: &Imports) -> fmt::Result {
    for annotation in &ty.annotations {
        indent(w, depth);
        write_annotation(w, annotation, imports)?;
        w.push('\n');
    }

    indent(w, depth);
    w.push_str(if ty.modifiers.contains(&Modifier::Private) { "private " } else { "public " });
    if ty.modifiers.contains(&Modifier::Abstract) {
        w.push_str("abstract ");
    }
    match ty.kind {
        TypeKind::Class => write!(w, "class {}", ty.name)?,
        TypeKind::Interface => write!(w, "interface {}", ty.name)?,
        TypeKind::Object => write!(w, "object {}", ty.name)?,
        TypeKind::CompanionObject => w.push_str("companion object"),
    }

    if let Some(ctor) = &ty.primary_constructor {
        write_constructor(w, ctor, imports)?;
    }

    if !ty.supertypes.is_empty() {
        w.push_str(" : ");
        write_list(w, &ty.supertypes, |w, t| write_type_name(w, t, imports))?;
    }

    if ty.functions.is_empty() && ty.types.is_empty() {
        w.push('\n');
        return Ok(());
    }

    w.push_str(" {\n");
    let mut first = true;
    for function in &ty.functions {
        if !first {
            w.push('\n');
        }
        first = false;
        write_function(w, function, depth + 1, ty.kind, imports)?;
    }
    for nested in &ty.types {
        if !first {
            w.push('\n');
        }
        first = false;
        write_type(w, nested, depth + 1, imports)?;
    }
    indent(w, depth);
    w.push_str("}\n");
    Ok(())
}

fn write_constructor(w: &mut String, ctor: &ConstructorSpec, imports: &Imports) -> fmt::Result {
    let explicit = !ctor.annotations.is_empty() || !ctor.modifiers.is_empty();
    if explicit {
        for annotation in &ctor.annotations {
            w.push(' ');
            write_annotation(w, annotation, imports)?;
        }
        if ctor.modifiers.contains(&Modifier::Private) {
            w.push_str(" private");
        }
        w.push_str(" constructor");
    }
    w.push('(');
    write_list(w, &ctor.parameters, |w, p| write_parameter(w, p, imports))?;
    w.push(')');
    Ok(())
}

fn write_function(
    w: &mut String,
    function: &FunSpec,
    depth: usize,
    owner: TypeKind,
    imports: &Imports,
) -> fmt::Result {
    for annotation in &function.annotations {
        indent(w, depth);
        write_annotation(w, annotation, imports)?;
        w.push('\n');
    }

    indent(w, depth);
    if function.modifiers.contains(&Modifier::Override) {
        w.push_str("override ");
    } else if function.modifiers.contains(&Modifier::Private) {
        w.push_str("private ");
    } else {
        w.push_str("public ");
    }
    if function.modifiers.contains(&Modifier::Abstract) && owner != TypeKind::Interface {
        w.push_str("abstract ");
    }

    write!(w, "fun {}(", function.name)?;
    write_list(w, &function.parameters, |w, p| write_parameter(w, p, imports))?;
    w.push(')');
    if let Some(returns) = &function.returns {
        w.push_str(": ");
        write_type_name(w, returns, imports)?;
    }

    match &function.body {
        None => w.push('\n'),
        Some(statement) => {
            w.push_str(" {\n");
            indent(w, depth + 1);
            write_statement(w, statement, imports)?;
            w.push('\n');
            indent(w, depth);
            w.push_str("}\n");
        },
    }
    Ok(())
}

fn write_statement(w: &mut String, statement: &Statement, imports: &Imports) -> fmt::Result {
    match statement {
        Statement::ReturnNew { class, arguments } => {
            write!(w, "return {}({})", imports.name(class), arguments.join(", "))
        },
        Statement::ReturnJavaClass { class } => {
            write!(w, "return {}::class.java", imports.name(class))
        },
    }
}

fn write_parameter(w: &mut String, parameter: &ParameterSpec, imports: &Imports) -> fmt::Result {
    for annotation in &parameter.annotations {
        write_annotation(w, annotation, imports)?;
        w.push(' ');
    }
    match parameter.property {
        PropertyKind::None => {},
        PropertyKind::Val => w.push_str("val "),
        PropertyKind::OverrideVal => w.push_str("override val "),
    }
    write!(w, "{}: ", parameter.name)?;
    write_type_name(w, &parameter.ty, imports)
}

fn write_type_name(w: &mut String, ty: &TypeName, imports: &Imports) -> fmt::Result {
    match ty {
        TypeName::Class { name } => w.push_str(&imports.name(name)),
        TypeName::Parameterized { raw, arguments } => {
            w.push_str(&imports.name(raw));
            w.push('<');
            write_list(w, arguments, |w, t| write_type_name(w, t, imports))?;
            w.push('>');
        },
        TypeName::Producer { bound } => {
            w.push_str("out ");
            write_type_name(w, bound, imports)?;
        },
        TypeName::Star => w.push('*'),
        TypeName::Annotated { annotations, inner } => {
            for annotation in annotations {
                write_annotation(w, annotation, imports)?;
                w.push(' ');
            }
            write_type_name(w, inner, imports)?;
        },
    }
    Ok(())
}

fn write_annotation(w: &mut String, annotation: &AnnotationSpec, imports: &Imports) -> fmt::Result {
    write_targeted_annotation(w, None, annotation, imports)
}

/// Writes `annotation` with an optional use-site target such as `file`.
fn write_targeted_annotation(
    w: &mut String,
    target: Option<&str>,
    annotation: &AnnotationSpec,
    imports: &Imports,
) -> fmt::Result {
    w.push('@');
    if let Some(target) = target {
        write!(w, "{target}:")?;
    }
    w.push_str(&imports.name(&annotation.class));
    if annotation.members.is_empty() {
        return Ok(());
    }

    w.push('(');
    write_list(w, &annotation.members, |w, member| {
        if let Some(name) = &member.name {
            write!(w, "{name} = ")?;
        }
        match &member.value {
            MemberValue::ClassLiteral(class) => write!(w, "{}::class", imports.name(class)),
            MemberValue::ClassArray(classes) => {
                w.push('[');
                write_list(w, classes, |w, c| write!(w, "{}::class", imports.name(c)))?;
                w.push(']');
                Ok(())
            },
            MemberValue::Str(value) => write!(w, "\"{}\"", escape_str(value)),
        }
    })?;
    w.push(')');
    Ok(())
}

fn write_list<T>(
    w: &mut String,
    items: &[T],
    mut each: impl FnMut(&mut String, &T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            w.push_str(", ");
        }
        each(w, item)?;
    }
    Ok(())
}

fn escape_str(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('$', "\\$")
}
