// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Escaping of text placed into a JUnit XML report.
//!
//! The report uses a backslash-style escaping scheme (`\x3C` rather than
//! `&lt;`) that downstream consumers of the report expect verbatim.

/// Substitutions of [`attribute()`], applied in this exact order.
///
/// The backslash must go first, so the escape character itself is never
/// escaped twice.
const SUBSTITUTIONS: [(&str, &str); 9] = [
    ("\\", "\\\\"),
    ("\t", "\\t"),
    ("\n", "\\n"),
    ("\u{A0}", "\\u00A0"),
    ("&", "\\x26"),
    ("'", "\\x27"),
    ("\"", "\\x22"),
    ("<", "\\x3C"),
    (">", "\\x3E"),
];

/// Opening of a CDATA section.
const CDATA_START: &str = "<![CDATA[";

/// Terminator of a CDATA section.
const CDATA_END: &str = "]]>";

/// Escapes the given `text` to be safe inside a double-quoted XML attribute
/// value or as an element text.
#[must_use]
pub fn attribute(text: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(text.to_owned(), |acc, (from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        })
}

/// Wraps the given `text` verbatim into a CDATA section.
///
/// A `]]>` sequence inside the `text` would terminate the section early, so
/// it's split across two adjacent sections.
#[must_use]
pub fn cdata(text: &str) -> String {
    format!(
        "{CDATA_START}{}{CDATA_END}",
        text.replace(CDATA_END, "]]]]><![CDATA[>"),
    )
}
