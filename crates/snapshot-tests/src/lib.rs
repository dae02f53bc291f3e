#![allow(missing_docs)]

use toml_tree::{Table, Value};

/// Parses a valid document and asserts its JSON rendering matches `json!`
/// syntax.
#[macro_export]
macro_rules! valid {
    ($name:ident, $toml:expr, $($json:tt)+) => {
        #[test]
        fn $name() {
            let root = match toml_tree::parse($toml) {
                Ok(root) => root,
                Err(err) => {
                    let file = $crate::File::new(stringify!($name), $toml);
                    let error = $crate::emit_diags(&file, Some(err.to_diagnostic(())));
                    panic!("failed to parse document:\n{error}");
                }
            };
            let got = serde_json::to_value(&root).expect("failed to serialize");
            pretty_assertions::assert_eq!(got, serde_json::json!($($json)+));
            $crate::assert_reparses(&root);
        }
    };
}

/// Parses an invalid document and asserts the rendered diagnostic contains
/// every expected fragment.
#[macro_export]
macro_rules! invalid {
    ($name:ident, $toml:expr, [$($fragment:expr),+ $(,)?]) => {
        #[test]
        fn $name() {
            let error = match toml_tree::parse($toml) {
                Ok(root) => panic!("expected an error but parsed {root:?}"),
                Err(err) => err,
            };
            let file = $crate::File::new(stringify!($name), $toml);
            let rendered = $crate::emit_diags(&file, Some(error.to_diagnostic(())));
            for fragment in [$($fragment),+] {
                assert!(
                    rendered.contains(fragment),
                    "missing {fragment:?} in diagnostic:\n{rendered}"
                );
            }
        }
    };
}

pub type File<'s> = codespan_reporting::files::SimpleFile<&'static str, &'s str>;

pub fn emit_diags(
    f: &File<'_>,
    error: impl IntoIterator<Item = codespan_reporting::diagnostic::Diagnostic<()>>,
) -> String {
    let mut output = codespan_reporting::term::termcolor::NoColor::new(Vec::new());

    for diag in error {
        codespan_reporting::term::emit_to_write_style(
            &mut output,
            &codespan_reporting::term::Config::default(),
            f,
            &diag,
        )
        .expect("failed to emit diagnostic");
    }

    String::from_utf8(output.into_inner()).unwrap()
}

/// Writes `table` back out as a document that parses to an equal table.
///
/// Scalars and arrays of each table come first, followed by one header per
/// nested table. Keys are written bare where the lexer would read them back
/// as keys and quoted otherwise.
pub fn to_source(table: &Table) -> String {
    let mut out = String::new();
    emit_table(table, &mut Vec::new(), &mut out);
    out
}

fn emit_table<'t>(table: &'t Table, path: &mut Vec<&'t str>, out: &mut String) {
    let mut keys: Vec<&str> = table.keys().collect();
    keys.sort_unstable();

    for &key in &keys {
        match table.get(key) {
            Some(Value::Table(_)) | None => {}
            Some(value) => {
                emit_key(key, out);
                out.push_str(" = ");
                emit_value(value, out);
                out.push('\n');
            }
        }
    }
    for &key in &keys {
        if let Some(Value::Table(child)) = table.get(key) {
            path.push(key);
            out.push_str("\n[");
            for (i, name) in path.iter().enumerate() {
                if i > 0 {
                    out.push('.');
                }
                emit_key(name, out);
            }
            out.push_str("]\n");
            emit_table(child, path, out);
            path.pop();
        }
    }
}

fn is_bare_key(key: &str) -> bool {
    let Some(first) = key.bytes().next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == b'_')
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        && key != "true"
        && key != "false"
}

fn emit_key(key: &str, out: &mut String) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        emit_string(key, out);
    }
}

fn emit_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn emit_value(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => emit_string(s, out),
        Value::Integer(i) => out.push_str(&i.to_string()),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                emit_value(item, out);
            }
            out.push(']');
        }
        Value::Table(_) => panic!("tables inside arrays cannot be written"),
    }
}

/// Asserts that writing `table` out and parsing it again is lossless.
pub fn assert_reparses(table: &Table) {
    let text = to_source(table);
    match toml_tree::parse(&text) {
        Ok(back) => pretty_assertions::assert_eq!(&back, table, "document:\n{text}"),
        Err(err) => {
            let file = File::new("reparse", &text);
            let error = emit_diags(&file, Some(err.to_diagnostic(())));
            panic!("written document failed to parse:\n{error}");
        }
    }
}
