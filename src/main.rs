//! Demo run: a small word-per-element tree goes through the full pass
//! (scan, check, place) and the annotated outline is printed.
//!
//! By default the checker replies are canned Grammalecte responses so the
//! demo works offline. Point `PROOFMARK_URL` at a live Grammalecte server
//! (e.g. `http://localhost:8080`) to go over the wire instead.

use checker::{CheckOutcome, CheckerConfig, wire};
use dom::{Id, Node, debug, traverse};
use mimalloc::MiMalloc;
use overlay::{CheckJob, Session};
use std::sync::Arc;
use std::sync::mpsc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn text(t: &str) -> Node {
    Node::Text {
        id: Id(0),
        text: t.to_string(),
    }
}

fn elem(name: &str, children: Vec<Node>) -> Node {
    Node::Element {
        id: Id(0),
        name: Arc::<str>::from(name),
        attributes: Vec::new(),
        children,
    }
}

fn word_row(words: &[&str]) -> Node {
    let mut children = Vec::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            children.push(text(" "));
        }
        children.push(elem("div", vec![text(word)]));
    }
    elem("div", children)
}

fn main() {
    env_logger::init();

    let mut root = elem(
        "main",
        vec![
            word_row(&["Le", "chat", "manges."]),
            word_row(&["Ils", "est", "contents."]),
        ],
    );
    traverse::assign_node_ids(&mut root);

    let mut session = Session::new();
    let jobs = session.scan(&mut root);
    for job in &jobs {
        println!("request {} -> {:?}", job.request_id, job.text);
    }

    let outcomes = match std::env::var("PROOFMARK_URL") {
        Ok(base_url) => run_live(&base_url, &jobs),
        Err(_) => canned_outcomes(&jobs),
    };

    for outcome in &outcomes {
        if let Some(report) = session.complete(&mut root, outcome) {
            println!(
                "request {}: {} marker(s) placed, {} unresolved",
                outcome.request_id,
                report.placed(),
                report.unresolved()
            );
        }
    }

    println!();
    for line in debug::outline(&root, 200) {
        println!("{line}");
    }
}

fn run_live(base_url: &str, jobs: &[CheckJob]) -> Vec<CheckOutcome> {
    let config = CheckerConfig {
        base_url: base_url.to_string(),
        ..CheckerConfig::default()
    };

    let (tx, rx) = mpsc::channel();
    for job in jobs {
        let tx = tx.clone();
        checker::check_text(
            &config,
            job.request_id,
            job.text.clone(),
            Arc::new(move |outcome| {
                let _ = tx.send(outcome);
            }),
        );
    }
    drop(tx);
    rx.iter().take(jobs.len()).collect()
}

fn canned_outcomes(jobs: &[CheckJob]) -> Vec<CheckOutcome> {
    const BODIES: [&str; 2] = [
        r#"{"data":[{"lGrammarErrors":[
            {"nStart":8,"nEnd":14,"sMessage":"Accord avec le sujet « chat ».","aSuggestions":["mange"]}
        ],"lSpellingErrors":[]}]}"#,
        r#"{"data":[{"lGrammarErrors":[
            {"nStart":4,"nEnd":7,"sMessage":"Accord avec le sujet « ils ».","aSuggestions":["sont"]}
        ],"lSpellingErrors":[]}]}"#,
    ];

    jobs.iter()
        .zip(BODIES)
        .map(|(job, body)| CheckOutcome {
            request_id: job.request_id,
            matches: wire::parse_response(body).expect("canned response parses"),
            status: Some(200),
            duration_ms: 0,
            error: None,
        })
        .collect()
}
