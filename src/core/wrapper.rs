use crate::domain::model::ExportStyle;
use std::collections::HashMap;
use std::fmt::Write;

pub const DEFAULT_NAMESPACE: &str = "AFS";
pub const DEFAULT_TITLE_PREFIX: &str = "Advanced Filter Search";

/// 模組樣板：每個插槽各自渲染，不做文字替換
#[derive(Debug, Clone)]
pub struct ModuleTemplate<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub dependencies: &'a [String],
    pub exports: &'a [String],
}

#[derive(Debug, Clone)]
pub struct ModuleWrapper {
    namespace: String,
    title_prefix: String,
    style: ExportStyle,
    /// export name -> file of the section that exports it (ES module imports)
    providers: HashMap<String, String>,
}

impl ModuleWrapper {
    pub fn new(namespace: &str, title_prefix: &str, style: ExportStyle) -> Self {
        Self {
            namespace: namespace.to_string(),
            title_prefix: title_prefix.to_string(),
            style,
            providers: HashMap::new(),
        }
    }

    pub fn with_provider(mut self, export: &str, file: &str) -> Self {
        self.providers
            .entry(export.to_string())
            .or_insert_with(|| file.to_string());
        self
    }

    pub fn render(&self, template: &ModuleTemplate<'_>) -> String {
        let mut out = String::new();
        self.render_header(&mut out, template.title);
        match self.style {
            ExportStyle::Namespace => self.render_namespace(&mut out, template),
            ExportStyle::Esm => self.render_esm(&mut out, template),
        }
        out
    }

    fn render_header(&self, out: &mut String, title: &str) {
        out.push_str("/**\n");
        let _ = writeln!(out, " * {} - {}", self.title_prefix, title);
        out.push_str(" * Auto-generated module\n");
        out.push_str(" */\n");
    }

    fn render_namespace(&self, out: &mut String, template: &ModuleTemplate<'_>) {
        let ns = &self.namespace;

        out.push_str("(function(global) {\n");
        out.push_str("  'use strict';\n");
        self.render_dependency_stubs(out, template.dependencies.iter(), "  ");
        out.push('\n');
        out.push_str(template.body);
        out.push_str("\n  \n");
        out.push_str("  // Expose to global namespace\n");
        out.push_str("  if (typeof window !== 'undefined') {\n");
        let _ = writeln!(out, "    window.{ns} = window.{ns} || {{}};");
        for name in template.exports {
            let _ = writeln!(out, "    window.{ns}.{name} = {name};");
        }
        out.push_str("  } else if (typeof global !== 'undefined') {\n");
        let _ = writeln!(out, "    global.{ns} = global.{ns} || {{}};");
        for name in template.exports {
            let _ = writeln!(out, "    global.{ns}.{name} = {name};");
        }
        out.push_str("  }\n");
        out.push_str("  \n");
        out.push_str("})(typeof window !== 'undefined' ? window : this);\n");
    }

    fn render_esm(&self, out: &mut String, template: &ModuleTemplate<'_>) {
        let (imported, stubbed): (Vec<&String>, Vec<&String>) = template
            .dependencies
            .iter()
            .partition(|dep| self.providers.contains_key(dep.as_str()));

        // group imports per file, keeping first-seen order
        let mut files: Vec<(&str, Vec<&str>)> = Vec::new();
        for dep in imported {
            let file = self.providers[dep.as_str()].as_str();
            match files.iter_mut().find(|(f, _)| *f == file) {
                Some((_, names)) => names.push(dep.as_str()),
                None => files.push((file, vec![dep.as_str()])),
            }
        }
        for (file, names) in &files {
            let _ = writeln!(out, "import {{ {} }} from './{}';", names.join(", "), file);
        }

        if !stubbed.is_empty() {
            out.push_str("\nconst global = typeof window !== 'undefined' ? window : globalThis;\n");
            self.render_dependency_stubs(out, stubbed.into_iter(), "");
        }

        out.push('\n');
        out.push_str(template.body);
        out.push('\n');

        if !template.exports.is_empty() {
            let names: Vec<&str> = template.exports.iter().map(String::as_str).collect();
            let _ = writeln!(out, "\nexport {{ {} }};", names.join(", "));
        }
    }

    fn render_dependency_stubs<'d>(
        &self,
        out: &mut String,
        dependencies: impl Iterator<Item = &'d String>,
        indent: &str,
    ) {
        let mut deps = dependencies.peekable();
        if deps.peek().is_none() {
            return;
        }
        let _ = writeln!(out, "\n{indent}// Dependencies");
        for dep in deps {
            let _ = writeln!(out, "{indent}const {dep} = global.{}?.{dep} || {{}};", self.namespace);
        }
    }
}

impl Default for ModuleWrapper {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE, DEFAULT_TITLE_PREFIX, ExportStyle::Namespace)
    }
}
