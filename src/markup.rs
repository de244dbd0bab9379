//! Plain-text normalization of the light markup found in example and
//! comment bodies.

/// Literal replacements. Tokens never overlap, so the order only matters
/// for `&amp;`, which must come last to avoid double decoding.
const REPLACEMENTS: &[(&str, &str)] = &[
    (r"\r\n", r"\n"),
    ("\r\n", "\n"),
    ("<pre>", "\n"),
    ("</pre>", "\n"),
    ("<code>", ""),
    ("</code>", ""),
    ("<b>", ""),
    ("</b>", ""),
    ("<p>", ""),
    ("</p>", ""),
    ("<br />", ""),
    ("<br/>", ""),
    ("<br>", ""),
    ("&gt;", ">"),
    ("&lt;", "<"),
    ("&amp;", "&"),
];

/// Strip known tags and decode the three supported entities. Anything
/// else passes through unchanged.
pub fn normalize(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        })
}

/// Drop leading and trailing blank lines, keeping interior ones.
pub fn trim_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());

    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}
