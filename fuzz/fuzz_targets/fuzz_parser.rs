#![no_main]

use jsontree::{Format, MinifyOptions, ParserOptions, SerializeOptions, minify, parse_with_options, serialize};
use libfuzzer_sys::fuzz_target;

fn options() -> ParserOptions {
    ParserOptions {
        max_depth: 64,
        ..ParserOptions::default()
    }
}

fn run(data: &[u8]) {
    let Ok(value) = parse_with_options(data, &options()) else {
        return;
    };

    // A value the parser accepted must serialize in both formats and
    // re-parse to something structurally equal, in both compact and
    // indented form.
    let compact = serialize(&value, SerializeOptions::default());
    let reparsed = parse_with_options(compact.as_bytes(), &options())
        .expect("re-parsing our own compact output must not fail");
    assert!(jsontree::equal(&value, &reparsed));

    let indented = serialize(&value, SerializeOptions { format: Format::Indented });
    let _ = parse_with_options(indented.as_bytes(), &options());

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = minify(text, MinifyOptions::default());
        let _ = minify(text, MinifyOptions { strip_comments: true });
    }
}

fuzz_target!(|data: &[u8]| run(data));
