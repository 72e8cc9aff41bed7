//! Kotlin Emitter Module
//!
//! Renders a `FileSpec` to Kotlin source text. Output is a pure function of the input:
//! imports are sorted and nothing time- or environment-dependent is written.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::Result;
use crate::output::output_ast::{
    AnnotationSpec, ClassName, CodeBlock, CodePart, FileSpec, PropertySpec, TypeName, TypeSpec,
    TypeVariableName,
};
use crate::util::{escape_identifier, escape_package, is_default_import, quote_string};

const INDENT_WITH: &str = "  ";

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

/// Line buffer with indentation tracking.
pub struct EmitterVisitorContext {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl EmitterVisitorContext {
    pub fn create_root() -> Self {
        EmitterVisitorContext::new(0)
    }

    pub fn new(indent: usize) -> Self {
        EmitterVisitorContext {
            lines: vec![EmittedLine::new(indent)],
            indent,
        }
    }

    fn current_line_mut(&mut self) -> &mut EmittedLine {
        if self.lines.is_empty() {
            self.lines.push(EmittedLine::new(self.indent));
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    pub fn line_is_empty(&self) -> bool {
        !matches!(self.lines.last(), Some(line) if !line.parts.is_empty())
    }

    pub fn print(&mut self, part: &str, new_line: bool) {
        if !part.is_empty() {
            self.current_line_mut().parts.push(part.to_string());
        }
        if new_line {
            self.lines.push(EmittedLine::new(self.indent));
        }
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part, true);
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    pub fn remove_empty_last_line(&mut self) {
        if self.line_is_empty() {
            self.lines.pop();
        }
    }

    pub fn to_source(&self) -> String {
        self.lines
            .iter()
            .map(|l| {
                if !l.parts.is_empty() {
                    format!("{}{}", INDENT_WITH.repeat(l.indent), l.parts.join(""))
                } else {
                    String::new()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Decides, per file, which classes are imported and how each class is spelled.
#[derive(Debug, Default)]
pub struct ImportResolver {
    package: String,
    imports: BTreeSet<String>,
    /// Top-level classes that must be written fully qualified.
    qualified: HashSet<ClassName>,
}

impl ImportResolver {
    /// Collect imports for every class referenced in `file`.
    ///
    /// A simple name shared by two different top-level classes, or by a class and a type
    /// declared in (or a type variable of) the file, is written fully qualified everywhere.
    pub fn for_file(file: &FileSpec) -> Self {
        let mut by_simple_name: BTreeMap<String, BTreeSet<ClassName>> = BTreeMap::new();
        let mut reserved: HashSet<String> = HashSet::new();

        for type_spec in &file.types {
            reserved.insert(type_spec.name.clone());
            for type_variable in &type_spec.type_variables {
                reserved.insert(type_variable.name.clone());
            }
            for class_name in type_spec.referenced_classes() {
                let top = class_name.top_level_class();
                by_simple_name
                    .entry(top.top_level_name().to_string())
                    .or_default()
                    .insert(top);
            }
        }

        let declared_here: HashSet<ClassName> = file
            .types
            .iter()
            .map(|t| ClassName::new(file.package.clone(), t.name.clone()))
            .collect();

        let mut resolver = ImportResolver {
            package: file.package.clone(),
            ..ImportResolver::default()
        };

        for (simple_name, classes) in by_simple_name {
            let clashes = classes.len() > 1
                || (reserved.contains(&simple_name)
                    && classes.iter().any(|c| !declared_here.contains(c)));
            for class_name in classes {
                if clashes {
                    resolver.qualified.insert(class_name);
                } else if resolver.needs_import(&class_name) {
                    resolver.imports.insert(class_name.canonical_name());
                }
            }
        }

        resolver
    }

    fn needs_import(&self, class_name: &ClassName) -> bool {
        class_name.package != self.package && !is_default_import(&class_name.package)
    }

    pub fn imports(&self) -> impl Iterator<Item = &String> {
        self.imports.iter()
    }

    /// Spelling of `class_name` inside this file.
    pub fn class_reference(&self, class_name: &ClassName) -> Result<String> {
        let names = class_name
            .simple_names
            .iter()
            .map(|n| escape_identifier(n, "class"))
            .collect::<Result<Vec<_>>>()?
            .join(".");
        if self.qualified.contains(&class_name.top_level_class()) && !class_name.package.is_empty()
        {
            Ok(format!("{}.{}", escape_package(&class_name.package)?, names))
        } else {
            Ok(names)
        }
    }
}

/// Renders Kotlin files from the output model.
pub struct KotlinEmitter;

impl KotlinEmitter {
    pub fn new() -> Self {
        KotlinEmitter
    }

    /// Render `file` to source text ending with a single newline.
    pub fn emit_file(&self, file: &FileSpec) -> Result<String> {
        let imports = ImportResolver::for_file(file);
        let mut ctx = EmitterVisitorContext::create_root();

        if !file.package.is_empty() {
            ctx.println(&format!("package {}", escape_package(&file.package)?));
            ctx.println("");
        }

        let mut has_imports = false;
        for import in imports.imports() {
            ctx.println(&format!("import {}", escape_package(import)?));
            has_imports = true;
        }
        if has_imports {
            ctx.println("");
        }

        for (index, type_spec) in file.types.iter().enumerate() {
            if index > 0 {
                ctx.println("");
            }
            self.emit_type(type_spec, &imports, &mut ctx)?;
        }

        ctx.remove_empty_last_line();
        let mut source = ctx.to_source();
        source.push('\n');
        Ok(source)
    }

    fn emit_type(
        &self,
        type_spec: &TypeSpec,
        imports: &ImportResolver,
        ctx: &mut EmitterVisitorContext,
    ) -> Result<()> {
        if let Some(kdoc) = &type_spec.kdoc {
            ctx.println("/**");
            for line in kdoc.lines() {
                ctx.println(format!(" * {}", line).trim_end());
            }
            ctx.println(" */");
        }

        for annotation in &type_spec.annotations {
            ctx.println(&self.annotation(annotation, imports)?);
        }

        let mut header = String::new();
        for keyword in type_spec.modifiers.keywords() {
            header.push_str(keyword);
            header.push(' ');
        }
        header.push_str("class ");
        header.push_str(&escape_identifier(&type_spec.name, "type")?);
        let (type_parameters, where_clause) =
            self.type_variables(&type_spec.type_variables, imports)?;
        header.push_str(&type_parameters);

        if !type_spec.superinterfaces.is_empty() {
            let supers = type_spec
                .superinterfaces
                .iter()
                .map(|s| self.type_name(s, imports))
                .collect::<Result<Vec<_>>>()?;
            header.push_str(" : ");
            header.push_str(&supers.join(", "));
        }
        header.push_str(&where_clause);

        if type_spec.properties.is_empty() {
            ctx.println(&header);
            return Ok(());
        }

        header.push_str(" {");
        ctx.println(&header);
        ctx.inc_indent();
        for (index, property) in type_spec.properties.iter().enumerate() {
            if index > 0 {
                ctx.println("");
            }
            self.emit_property(property, imports, ctx)?;
        }
        ctx.dec_indent();
        ctx.println("}");
        Ok(())
    }

    fn emit_property(
        &self,
        property: &PropertySpec,
        imports: &ImportResolver,
        ctx: &mut EmitterVisitorContext,
    ) -> Result<()> {
        let mut line = String::new();
        for keyword in property.modifiers.keywords() {
            line.push_str(keyword);
            line.push(' ');
        }
        line.push_str(if property.mutable { "var " } else { "val " });
        line.push_str(&escape_identifier(&property.name, "property")?);
        line.push_str(": ");
        line.push_str(&self.type_name(&property.type_name, imports)?);
        if let Some(initializer) = &property.initializer {
            line.push_str(" = ");
            line.push_str(&self.code(initializer, imports)?);
        }
        ctx.println(&line);

        if let Some(getter) = &property.getter {
            ctx.inc_indent();
            ctx.println(&format!("get() = {}", self.code(getter, imports)?));
            ctx.dec_indent();
        }
        Ok(())
    }

    fn annotation(&self, annotation: &AnnotationSpec, imports: &ImportResolver) -> Result<String> {
        let name = imports.class_reference(&annotation.class_name)?;
        if annotation.members.is_empty() {
            return Ok(format!("@{}", name));
        }
        let members = annotation
            .members
            .iter()
            .map(|m| self.code(m, imports))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("@{}({})", name, members.join(", ")))
    }

    fn type_variables(
        &self,
        type_variables: &[TypeVariableName],
        imports: &ImportResolver,
    ) -> Result<(String, String)> {
        if type_variables.is_empty() {
            return Ok((String::new(), String::new()));
        }
        let mut rendered = Vec::with_capacity(type_variables.len());
        for variable in type_variables {
            let mut text = String::new();
            if let Some(variance) = variable.variance {
                text.push_str(variance.keyword());
                text.push(' ');
            }
            text.push_str(&escape_identifier(&variable.name, "type variable")?);
            // Multiple bounds need a where clause; a single bound is written inline.
            if let Some(bound) = variable.bounds.first() {
                text.push_str(" : ");
                text.push_str(&self.type_name(bound, imports)?);
            }
            rendered.push(text);
        }
        let parameters = format!("<{}>", rendered.join(", "));

        let extra_bounds: Vec<(String, &TypeName)> = type_variables
            .iter()
            .flat_map(|v| v.bounds.iter().skip(1).map(move |b| (v.name.clone(), b)))
            .collect();
        if extra_bounds.is_empty() {
            return Ok((parameters, String::new()));
        }
        let clauses = extra_bounds
            .into_iter()
            .map(|(name, bound)| {
                Ok(format!(
                    "{} : {}",
                    escape_identifier(&name, "type variable")?,
                    self.type_name(bound, imports)?
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((parameters, format!(" where {}", clauses.join(", "))))
    }

    /// Spelling of a type reference, honoring imports and nullability.
    pub fn type_name(&self, type_name: &TypeName, imports: &ImportResolver) -> Result<String> {
        Ok(match type_name {
            TypeName::Class {
                name,
                arguments,
                nullable,
            } => {
                let mut text = imports.class_reference(name)?;
                if !arguments.is_empty() {
                    let args = arguments
                        .iter()
                        .map(|a| self.type_name(a, imports))
                        .collect::<Result<Vec<_>>>()?;
                    text.push('<');
                    text.push_str(&args.join(", "));
                    text.push('>');
                }
                if *nullable {
                    text.push('?');
                }
                text
            }
            TypeName::Variable { name, nullable } => {
                let mut text = escape_identifier(name, "type variable")?;
                if *nullable {
                    text.push('?');
                }
                text
            }
            TypeName::Projection { variance, bound } => {
                format!("{} {}", variance.keyword(), self.type_name(bound, imports)?)
            }
            TypeName::Star => "*".to_string(),
        })
    }

    fn code(&self, code: &CodeBlock, imports: &ImportResolver) -> Result<String> {
        let mut text = String::new();
        for part in &code.parts {
            match part {
                CodePart::Literal(literal) => text.push_str(literal),
                CodePart::Type(type_name) => text.push_str(&self.type_name(type_name, imports)?),
                CodePart::Name(name) => text.push_str(&escape_identifier(name, "member")?),
                CodePart::StringLiteral(value) => text.push_str(&quote_string(value)),
            }
        }
        Ok(text)
    }
}

impl Default for KotlinEmitter {
    fn default() -> Self {
        Self::new()
    }
}
