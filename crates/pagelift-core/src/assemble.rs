use crate::history::History;
use crate::module::{Declaration, Import, ModuleHeader};

/// Compose the final module text: header, imports, active declarations,
/// preserved user content, archived history, in that fixed order. Pure text
/// concatenation, no I/O.
pub fn assemble(
    header: &ModuleHeader,
    imports: &[Import],
    declarations: &[Declaration],
    preserved: &[String],
    history: &History,
) -> String {
    let mut out = String::new();

    match &header.exposing {
        Some(exposing) => {
            out.push_str(&format!("module {} exposing ({exposing})\n", header.name));
        }
        None => out.push_str(&format!("module {}\n", header.name)),
    }

    if !imports.is_empty() {
        out.push('\n');
        for import in imports {
            out.push_str(&import.render());
            out.push('\n');
        }
    }

    for decl in declarations {
        out.push_str("\n\n");
        for line in &decl.lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    let preserved = trim_blank_edges(preserved);
    if !preserved.is_empty() {
        out.push_str("\n\n");
        for line in preserved {
            out.push_str(line);
            out.push('\n');
        }
    }

    if !history.is_empty() {
        out.push_str("\n\n");
        for line in history.lines() {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

fn trim_blank_edges(lines: &[String]) -> &[String] {
    let start = lines
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}
