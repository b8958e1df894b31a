//! HTML rendering for the voting page.
//!
//! One page: two vote buttons, a reset button, and the current counts.
//! Labels and title come from config and are always escaped.

use std::fmt::Write;

use votebox_core::{Tally, RESET_VALUE};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(title: &str, tally: &Tally) -> String {
    let title = escape_html(title);
    let (a, a_count) = (escape_html(&tally.a.0), tally.a.1);
    let (b, b_count) = (escape_html(&tally.b.0), tally.b.1);

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; background: #f4f4f4; text-align: center; }}
#container {{ margin: 40px auto; max-width: 480px; }}
button {{ display: block; width: 100%; margin: 12px 0; padding: 14px; font-size: 1.2em; }}
#results {{ font-size: 1.4em; margin-top: 24px; }}
</style>
</head>
<body>
<div id="container">
<form id="form" name="form" action="/" method="post">
<h1>{title}</h1>
<button name="vote" type="submit" value="{a}">{a}</button>
<button name="vote" type="submit" value="{b}">{b}</button>
<button name="vote" type="submit" value="{reset}">Reset</button>
</form>
<div id="results">{a} - {a_count} | {b} - {b_count}</div>
</div>
</body>
</html>
"#,
        reset = RESET_VALUE,
    );
    out
}
