//! Matching behaviour of compiled Ant patterns.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ant_router::pattern::{compile, matches};

#[test]
fn test_literal_patterns_match_only_themselves() {
    let cases = ["GET/", "GET/index.html", "POST/api/v1/users", "DELETE/a/b/c/", ""];

    for source in cases {
        let pattern = compile(source);
        assert!(pattern.is_literal(), "{source}");
        for candidate in cases {
            assert_eq!(matches(&pattern, candidate), source == candidate, "{source} vs {candidate}");
        }
    }
}

#[test]
fn test_star() {
    let pattern = compile("GET/*.java");
    assert!(matches(&pattern, "GET/.java"));
    assert!(matches(&pattern, "GET/FooBar.java"));
    assert!(!matches(&pattern, "GET/FooBar.xml"));
}

#[test]
fn test_question_mark() {
    let pattern = compile("GET/?.java");
    assert!(matches(&pattern, "GET/x.java"));
    assert!(!matches(&pattern, "GET/.java"));
    assert!(!matches(&pattern, "GET/xyz.java"));
}

#[test]
fn test_trailing_double_star() {
    let pattern = compile("GET/test/**");
    assert!(matches(&pattern, "GET/test/x.java"));
    assert!(!matches(&pattern, "GET/xyz.html"));
}

#[test]
fn test_leading_double_star() {
    let cvs = compile("GET/**/CVS/*");
    assert!(matches(&cvs, "GET/CVS/Repository"));
    assert!(!matches(&cvs, "GET/org/apache/CVS/foo/bar/Entries"));

    let js = compile("GET/**/*.js");
    assert!(matches(&js, "GET/f1.js"));
    assert!(matches(&js, "GET/js/lib/jquery.js"));
}

#[test]
fn test_many_double_stars_terminate() {
    let pattern = compile("GET/**/a/**/b/**/c/**/d");
    let miss = format!("GET/{}", ["x"; 40].join("/"));
    assert!(!matches(&pattern, &miss));
    assert!(matches(&pattern, "GET/a/b/c/d"));
    assert!(matches(&pattern, "GET/1/a/2/b/3/c/4/d"));
}

#[test]
fn test_long_request_path_stays_fast() {
    let pattern = compile("GET/**/static/**/*.js");
    let miss = format!("GET/{}x.css", "static/".repeat(3000));
    let hit = format!("GET/{}x.js", "static/".repeat(3000));

    let start = Instant::now();
    assert!(!matches(&pattern, &miss));
    assert!(matches(&pattern, &hit));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_shared_across_threads() {
    let pattern = Arc::new(compile("GET/org/apache/jakarta/**"));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pattern = Arc::clone(&pattern);
            thread::spawn(move || {
                for _ in 0..1000 {
                    assert!(pattern.matches(&format!("GET/org/apache/jakarta/{i}/test.xml")));
                    assert!(!pattern.matches("GET/org/apache/test.xml"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
