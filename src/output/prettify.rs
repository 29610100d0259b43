//! Readable stylesheet layout: one declaration per line

const INDENT: &str = "  ";

/// Reformat minified css with one rule or declaration per line
///
/// Quoted strings and parenthesized values (`url(...)`, `calc(...)`) are
/// copied verbatim. Runs of whitespace collapse to a single space.
pub fn prettify_css(css: &str) -> String {
    let mut out = String::with_capacity(css.len() * 2);
    let mut depth = 0usize;
    let mut line_start = true;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut parens = 0usize;

    for ch in css.chars() {
        if let Some(q) = quote {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        if parens > 0 {
            out.push(ch);
            match ch {
                '(' => parens += 1,
                ')' => parens -= 1,
                '"' | '\'' => quote = Some(ch),
                _ => {}
            }
            continue;
        }

        match ch {
            '{' => {
                trim_spaces(&mut out);
                out.push_str(" {\n");
                depth += 1;
                line_start = true;
            }
            '}' => {
                trim_whitespace(&mut out);
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                depth = depth.saturating_sub(1);
                indent(&mut out, depth);
                out.push_str("}\n");
                line_start = true;
            }
            ';' => {
                trim_spaces(&mut out);
                out.push_str(";\n");
                line_start = true;
            }
            c if c.is_whitespace() => {
                if !line_start && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            c => {
                if line_start {
                    indent(&mut out, depth);
                    line_start = false;
                }
                match c {
                    '"' | '\'' => quote = Some(c),
                    '(' => parens += 1,
                    _ => {}
                }
                out.push(c);
            }
        }
    }

    trim_whitespace(&mut out);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn trim_spaces(out: &mut String) {
    let len = out.trim_end_matches(' ').len();
    out.truncate(len);
}

fn trim_whitespace(out: &mut String) {
    let len = out.trim_end().len();
    out.truncate(len);
}
