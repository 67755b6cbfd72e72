use std::iter::Peekable;

use crate::error::CoreError;
use crate::history;

/// Names of the generated functions this tool manages. Anything else in the
/// file is user content and passes through untouched.
pub const MANAGED_FNS: [&str; 5] = ["page", "init", "update", "view", "subscriptions"];

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleHeader {
    pub name: String,
    pub exposing: Option<String>,
}

/// A single `import` line. The exposing list is split into names so imports
/// can be deduplicated and their exposings unioned.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub module: String,
    pub alias: Option<String>,
    pub exposing: Vec<String>,
}

impl Import {
    pub fn plain(module: &str) -> Self {
        Self {
            module: module.to_string(),
            alias: None,
            exposing: Vec::new(),
        }
    }

    pub fn exposing(module: &str, names: &[&str]) -> Self {
        Self {
            module: module.to_string(),
            alias: None,
            exposing: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("import {}", self.module);
        if let Some(alias) = &self.alias {
            out.push_str(&format!(" as {alias}"));
        }
        if !self.exposing.is_empty() {
            out.push_str(&format!(" exposing ({})", self.exposing.join(", ")));
        }
        out
    }
}

/// A named top-level declaration, stored as verbatim lines (annotation first
/// when present, then the definition and its body).
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub lines: Vec<String>,
}

impl Declaration {
    pub fn from_text(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: text.lines().map(String::from).collect(),
        }
    }

    /// The type annotation line, if the declaration carries one.
    pub fn annotation(&self) -> Option<&str> {
        let prefix = format!("{} :", self.name);
        self.lines
            .first()
            .filter(|l| l.starts_with(&prefix))
            .map(String::as_str)
    }
}

/// A page module split into the parts the rewrite cares about. Managed
/// functions are pulled out by name; everything else stays in `others` in
/// file order. The history region (everything from the first archive marker
/// to end-of-file) is kept verbatim.
#[derive(Debug)]
pub struct PageModule {
    pub header: ModuleHeader,
    pub imports: Vec<Import>,
    pub functions: Vec<Declaration>,
    pub others: Vec<String>,
    pub history: Vec<String>,
}

impl PageModule {
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let mut header = None;
        let mut imports = Vec::new();
        let mut functions = Vec::new();
        let mut others = Vec::new();
        let mut history = Vec::new();

        let mut lines = text.lines().map(|l| l.trim_end().to_string()).peekable();

        while let Some(line) = lines.next() {
            if line.starts_with(history::MARKER) {
                history.push(line);
                history.extend(&mut lines);
                while history.last().is_some_and(|l| l.is_empty()) {
                    history.pop();
                }
            } else if line.starts_with("module ") {
                header = Some(parse_header(&line, &mut lines)?);
            } else if line.starts_with("import ") {
                imports.push(parse_import(&line, &mut lines)?);
            } else if let Some(name) = managed_name(&line) {
                functions.push(parse_function(name, line, &mut lines));
            } else {
                others.push(line);
            }
        }

        let header =
            header.ok_or_else(|| CoreError::Parse("no `module` declaration found".into()))?;

        Ok(Self {
            header,
            imports,
            functions,
            others,
            history,
        })
    }

    pub fn function(&self, name: &str) -> Option<&Declaration> {
        self.functions.iter().find(|d| d.name == name)
    }

    pub fn declares_model(&self) -> bool {
        self.others.iter().any(|l| l.starts_with("type alias Model"))
    }

    pub fn declares_msg(&self) -> bool {
        self.others
            .iter()
            .any(|l| l == "type Msg" || l.starts_with("type Msg "))
    }
}

fn managed_name(line: &str) -> Option<&'static str> {
    MANAGED_FNS
        .iter()
        .copied()
        .find(|name| line.starts_with(name) && line[name.len()..].starts_with(' '))
}

fn parse_header(
    line: &str,
    lines: &mut Peekable<impl Iterator<Item = String>>,
) -> Result<ModuleHeader, CoreError> {
    let name = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| CoreError::Parse(format!("malformed module header: {line}")))?
        .to_string();
    let exposing = parse_exposing_clause(line, lines);
    Ok(ModuleHeader { name, exposing })
}

fn parse_import(
    line: &str,
    lines: &mut Peekable<impl Iterator<Item = String>>,
) -> Result<Import, CoreError> {
    let mut words = line.split_whitespace().skip(1);
    let module = words
        .next()
        .ok_or_else(|| CoreError::Parse(format!("malformed import: {line}")))?
        .to_string();
    let alias = match words.next() {
        Some("as") => words.next().map(String::from),
        _ => None,
    };
    let exposing = parse_exposing_clause(line, lines)
        .map(|raw| split_names(&raw))
        .unwrap_or_default();
    Ok(Import {
        module,
        alias,
        exposing,
    })
}

/// Capture the text between the parens of an `exposing (...)` clause, which
/// may continue over several lines. Depth-aware so constructor lists like
/// `Msg(..)` survive.
fn parse_exposing_clause(
    first: &str,
    lines: &mut Peekable<impl Iterator<Item = String>>,
) -> Option<String> {
    fn feed(s: &str, inner: &mut String, depth: &mut u32, opened: &mut bool) -> bool {
        for c in s.chars() {
            if !*opened {
                if c == '(' {
                    *opened = true;
                    *depth = 1;
                }
                continue;
            }
            match c {
                '(' => {
                    *depth += 1;
                    inner.push(c);
                }
                ')' => {
                    *depth -= 1;
                    if *depth == 0 {
                        return true;
                    }
                    inner.push(c);
                }
                _ => inner.push(c),
            }
        }
        false
    }

    if !first.contains("exposing") {
        return None;
    }

    let mut inner = String::new();
    let mut depth = 0;
    let mut opened = false;
    if feed(first, &mut inner, &mut depth, &mut opened) {
        return Some(inner);
    }
    for line in lines {
        inner.push(' ');
        if feed(&line, &mut inner, &mut depth, &mut opened) {
            break;
        }
    }
    Some(inner)
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Capture a managed function block: the line that named it, then every
/// following line that is blank, indented, or restates the same name (the
/// definition line after an annotation). Trailing blanks are dropped.
fn parse_function(
    name: &'static str,
    first: String,
    lines: &mut Peekable<impl Iterator<Item = String>>,
) -> Declaration {
    let continuation = format!("{name} ");
    let mut block = vec![first];
    while let Some(next) = lines.peek() {
        if next.is_empty()
            || next.starts_with(' ')
            || next.starts_with('\t')
            || next.starts_with(&continuation)
        {
            block.push(next.clone());
            lines.next();
        } else {
            break;
        }
    }
    while block.last().is_some_and(|l| l.is_empty()) {
        block.pop();
    }
    Declaration {
        name: name.to_string(),
        lines: block,
    }
}
